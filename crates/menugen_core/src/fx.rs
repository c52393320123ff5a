use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value kinds an animator controller parameter can have. This is a superset
/// of [`crate::parameters::ParameterKind`]: triggers exist on the controller
/// side but cannot be synced or persisted.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimatorParameterKind {
    Float,
    Int,
    Bool,
    Trigger,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum AnimatorValue {
    Float(f32),
    Int(i32),
    Bool(bool),
}

impl AnimatorValue {
    pub fn as_f32(&self) -> f32 {
        match self {
            AnimatorValue::Float(v) => *v,
            AnimatorValue::Int(v) => *v as f32,
            AnimatorValue::Bool(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnimatorParameter {
    pub kind: AnimatorParameterKind,
    pub default: AnimatorValue,
}

/// Typed handles to controller parameters, so item code cannot accidentally
/// drive a blend tree with a bool or write a float condition against an int.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FloatParam(String);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BoolParam(String);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IntParam(String);

impl FloatParam {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl BoolParam {
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl IntParam {
    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FxParam {
    Float(FloatParam),
    Int(IntParam),
    Bool(BoolParam),
}

impl FxParam {
    pub fn name(&self) -> &str {
        match self {
            FxParam::Float(p) => p.name(),
            FxParam::Int(p) => p.name(),
            FxParam::Bool(p) => p.name(),
        }
    }
}

/// One animated property binding inside a clip: a target path within the
/// avatar hierarchy and the constant value the clip drives it to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClipBinding {
    pub path: String,
    pub value: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Clip {
    pub name: String,
    pub bindings: Vec<ClipBinding>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClipRef {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Motion {
    Clip(ClipRef),
    BlendTree(BlendTree),
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendTreeKind {
    Direct,
    Simple1D,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BlendTree {
    pub name: String,
    pub kind: BlendTreeKind,
    pub blend_parameter: Option<String>,
    pub children: Vec<BlendChild>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BlendChild {
    pub motion: Motion,
    pub threshold: f32,
    /// Only meaningful under a [`BlendTreeKind::Direct`] parent.
    pub direct_blend_parameter: Option<String>,
    pub time_scale: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct State {
    pub name: String,
    pub motion: Motion,
    pub write_defaults: bool,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConditionMode {
    If,
    IfNot,
    Greater,
    Less,
    Equals,
    NotEqual,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Condition {
    pub parameter: String,
    pub mode: ConditionMode,
    pub threshold: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Transition {
    /// `None` means "from any state".
    pub source: Option<String>,
    pub target: String,
    pub conditions: Vec<Condition>,
}

/// Mask restricting which parts of the rig a layer may animate. The
/// generated main layer always carries a no-transforms mask so shared blend
/// trees never fight hand-authored locomotion layers.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct AvatarMask {
    pub transforms: bool,
}

impl AvatarMask {
    pub fn no_transforms() -> Self {
        Self { transforms: false }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Layer {
    pub name: String,
    pub mask: Option<AvatarMask>,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
}

impl Layer {
    pub fn named(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// An animator controller asset: the base FX slot of an avatar as well as
/// the generated output container are both represented by this type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct AnimatorController {
    pub layers: Vec<Layer>,
    pub parameters: IndexMap<String, AnimatorParameter>,
    pub clips: Vec<Clip>,
}

impl AnimatorController {
    /// Insert-or-update a float parameter and return its typed handle. The
    /// default is written unconditionally, which doubles as the live value
    /// override the registry performs on every ensure.
    pub fn ensure_float(&mut self, name: &str, default: f32) -> FloatParam {
        self.set_parameter(name, AnimatorParameterKind::Float, AnimatorValue::Float(default));
        FloatParam(name.to_string())
    }

    pub fn ensure_int(&mut self, name: &str, default: i32) -> IntParam {
        self.set_parameter(name, AnimatorParameterKind::Int, AnimatorValue::Int(default));
        IntParam(name.to_string())
    }

    pub fn ensure_bool(&mut self, name: &str, default: bool) -> BoolParam {
        self.set_parameter(name, AnimatorParameterKind::Bool, AnimatorValue::Bool(default));
        BoolParam(name.to_string())
    }

    fn set_parameter(&mut self, name: &str, kind: AnimatorParameterKind, default: AnimatorValue) {
        self.parameters
            .insert(name.to_string(), AnimatorParameter { kind, default });
    }

    pub fn override_value(&mut self, name: &str, value: AnimatorValue) {
        if let Some(param) = self.parameters.get_mut(name) {
            param.default = value;
        }
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    pub fn add_clip(&mut self, clip: Clip) -> ClipRef {
        let reference = ClipRef {
            name: clip.name.clone(),
        };
        self.clips.push(clip);
        reference
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ensure_replaces_kind_and_default() {
        let mut fx = AnimatorController::default();
        fx.ensure_bool("Lamp", true);
        assert_eq!(
            fx.parameters["Lamp"].default,
            AnimatorValue::Bool(true)
        );

        let param = fx.ensure_float("Lamp", 0.25);
        assert_eq!(param.name(), "Lamp");
        assert_eq!(fx.parameters["Lamp"].kind, AnimatorParameterKind::Float);
        assert_eq!(fx.parameters["Lamp"].default, AnimatorValue::Float(0.25));
        assert_eq!(fx.parameters.len(), 1);
    }

    #[test]
    fn test_override_value_missing_parameter_is_noop() {
        let mut fx = AnimatorController::default();
        fx.override_value("Nothing", AnimatorValue::Float(1.0));
        assert!(fx.parameters.is_empty());
    }
}
