use crate::blend::{self, BlendMotionCollector};
use crate::fx::{
    AnimatorController, AnimatorParameterKind, AnimatorValue, AvatarMask, BoolParam, Clip,
    ClipBinding, FloatParam, FxParam, IntParam, Layer, Motion, State,
};
use crate::parameters::{OWNED_PREFIX, ParameterRegistry, ParameterTable, REMOTE_PREFIX};

/// Mutable state shared by everything that runs inside one generation pass.
///
/// Created fresh by the orchestrator at the start of every run and torn down
/// at the end; nothing in here survives between runs. Items and hooks only
/// ever see it as `&mut`, for the duration of a single callback.
pub struct GenerationContext<'a> {
    system_name: String,
    write_defaults: bool,
    container_path: String,
    pub(crate) fx: &'a mut AnimatorController,
    pub(crate) table: &'a mut ParameterTable,
    pub(crate) container: AnimatorController,
    pub(crate) registry: ParameterRegistry,
    pub(crate) blend: BlendMotionCollector,
}

impl<'a> GenerationContext<'a> {
    pub(crate) fn new(
        system_name: String,
        write_defaults: bool,
        container_path: String,
        fx: &'a mut AnimatorController,
        table: &'a mut ParameterTable,
    ) -> Self {
        GenerationContext {
            system_name,
            write_defaults,
            container_path,
            fx,
            table,
            container: AnimatorController::default(),
            registry: ParameterRegistry::default(),
            blend: BlendMotionCollector::default(),
        }
    }

    pub fn system_name(&self) -> &str {
        &self.system_name
    }

    /// The avatar's global write-defaults setting. The merged blend tree
    /// state ignores this and always writes defaults.
    pub fn write_defaults(&self) -> bool {
        self.write_defaults
    }

    pub fn fx(&self) -> &AnimatorController {
        self.fx
    }

    pub fn fx_mut(&mut self) -> &mut AnimatorController {
        self.fx
    }

    pub fn parameter_table(&self) -> &ParameterTable {
        self.table
    }

    /// The main generated layer. Recreated on demand if a hook removed it.
    pub fn main_layer(&mut self) -> &mut Layer {
        let index = match self
            .fx
            .layers
            .iter()
            .position(|l| l.name == self.system_name)
        {
            Some(index) => index,
            None => {
                let mut layer = Layer::named(self.system_name.clone());
                layer.mask = Some(AvatarMask::no_transforms());
                self.fx.layers.push(layer);
                self.fx.layers.len() - 1
            }
        };
        &mut self.fx.layers[index]
    }

    /// Create a fresh supporting layer for one item, named under the
    /// reserved prefix so the next run's cleanup can find it.
    pub fn supporting_layer(&mut self, suffix: &str) -> &mut Layer {
        let layer = Layer::named(self.supporting_layer_name(suffix));
        self.fx.layers.push(layer);
        let index = self.fx.layers.len() - 1;
        &mut self.fx.layers[index]
    }

    /// Drop every previously generated supporting layer keyed by `suffix`.
    pub fn remove_supporting_layers(&mut self, suffix: &str) {
        let name = self.supporting_layer_name(suffix);
        self.fx.layers.retain(|l| l.name != name);
    }

    fn supporting_layer_name(&self, suffix: &str) -> String {
        format!("{}__{}", self.system_name, suffix)
    }

    /// Create a clip asset in the output container and return a motion
    /// referencing it.
    pub fn new_clip(&mut self, name: &str, bindings: Vec<ClipBinding>) -> Motion {
        let full_name = format!("{}__{}", self.system_name, name);
        let reference = self.container.add_clip(Clip {
            name: full_name,
            bindings,
        });
        Motion::Clip(reference)
    }

    /// Convenience for a state that follows the avatar's global
    /// write-defaults setting.
    pub fn new_state(&self, name: impl Into<String>, motion: Motion) -> State {
        State {
            name: name.into(),
            motion,
            write_defaults: self.write_defaults,
        }
    }

    pub fn register_blend_motion(&mut self, on: Motion, off: Motion, param: FloatParam) {
        self.blend.register(on, off, param);
    }

    pub fn ensure_bool_parameter(
        &mut self,
        name: &str,
        saved: bool,
        default: bool,
    ) -> Option<BoolParam> {
        let default = if default { 1.0 } else { 0.0 };
        match self.ensure_parameter(name, saved, AnimatorParameterKind::Bool, default, false)? {
            FxParam::Bool(param) => Some(param),
            _ => None,
        }
    }

    pub fn ensure_int_parameter(
        &mut self,
        name: &str,
        saved: bool,
        default: i32,
    ) -> Option<IntParam> {
        match self.ensure_parameter(
            name,
            saved,
            AnimatorParameterKind::Int,
            default as f32,
            false,
        )? {
            FxParam::Int(param) => Some(param),
            _ => None,
        }
    }

    pub fn ensure_float_parameter(
        &mut self,
        name: &str,
        saved: bool,
        default: f32,
    ) -> Option<FloatParam> {
        match self.ensure_parameter(name, saved, AnimatorParameterKind::Float, default, false)? {
            FxParam::Float(param) => Some(param),
            _ => None,
        }
    }

    /// Bool create/update semantics in the parameter table, float
    /// representation on the controller, for items that drive blend trees.
    pub fn ensure_bool_as_float_parameter(
        &mut self,
        name: &str,
        saved: bool,
        default: bool,
    ) -> Option<FloatParam> {
        let default = if default { 1.0 } else { 0.0 };
        match self.ensure_parameter(name, saved, AnimatorParameterKind::Bool, default, true)? {
            FxParam::Float(param) => Some(param),
            _ => None,
        }
    }

    fn ensure_parameter(
        &mut self,
        name: &str,
        saved: bool,
        kind: AnimatorParameterKind,
        default: f32,
        force_float: bool,
    ) -> Option<FxParam> {
        self.registry
            .ensure(self.table, self.fx, name, saved, kind, default, force_float, true)
    }

    pub fn override_parameter_value(&mut self, name: &str, value: AnimatorValue) {
        self.fx.override_value(name, value);
    }

    pub fn used_parameter_count(&self) -> usize {
        self.registry.used_count()
    }

    pub fn updated_parameter_count(&self) -> usize {
        self.registry.updated_count()
    }

    pub fn blend_motion_count(&self) -> usize {
        self.blend.len()
    }

    pub(crate) fn prune_parameters(&mut self) {
        self.registry.prune(self.table);
    }

    /// Merge collected blend motions into the shared direct tree state, or
    /// drop the otherwise-empty main layer when nothing was collected.
    pub(crate) fn finish_blend(&mut self) {
        if self.blend.is_empty() {
            let name = self.system_name.clone();
            self.fx.layers.retain(|l| l.name != name);
            return;
        }

        let weight_name = blend::weight_parameter_name();
        let weight = self.fx.ensure_float(&weight_name, 1.0);
        self.fx
            .override_value(&weight_name, AnimatorValue::Float(1.0));

        let collector = std::mem::take(&mut self.blend);
        let tree = collector.merge(&weight);
        let state = State {
            name: blend::blend_state_name(),
            motion: Motion::BlendTree(tree),
            // Direct blend trees misbehave without write defaults, so this
            // state ignores the avatar-wide setting.
            write_defaults: true,
        };
        self.main_layer().states.push(state);
    }

    pub(crate) fn generated_layer_count(&self) -> usize {
        self.fx
            .layers
            .iter()
            .filter(|l| l.name.starts_with(OWNED_PREFIX) || l.name.starts_with(REMOTE_PREFIX))
            .count()
    }

    pub(crate) fn into_container(self) -> (String, AnimatorController) {
        (self.container_path, self.container)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn context_parts() -> (AnimatorController, ParameterTable) {
        (AnimatorController::default(), ParameterTable::default())
    }

    fn has_layer(fx: &AnimatorController, name: &str) -> bool {
        fx.layers.iter().any(|l| l.name == name)
    }

    #[test]
    fn test_supporting_layer_roundtrip() {
        let (mut fx, mut table) = context_parts();
        let mut ctx = GenerationContext::new(
            "MGen-Avatar".to_string(),
            false,
            "Generated-MenuGen/AssetContainer-Avatar.controller".to_string(),
            &mut fx,
            &mut table,
        );

        ctx.supporting_layer("Hat");
        assert!(has_layer(ctx.fx(), "MGen-Avatar__Hat"));
        ctx.remove_supporting_layers("Hat");
        assert!(!has_layer(ctx.fx(), "MGen-Avatar__Hat"));
    }

    #[test]
    fn test_finish_blend_drops_empty_main_layer() {
        let (mut fx, mut table) = context_parts();
        fx.layers.push(Layer::named("MGen-Avatar"));
        let mut ctx = GenerationContext::new(
            "MGen-Avatar".to_string(),
            false,
            String::new(),
            &mut fx,
            &mut table,
        );

        ctx.finish_blend();
        assert!(ctx.fx().layers.is_empty());
    }

    #[test]
    fn test_finish_blend_forces_write_defaults_on() {
        let (mut fx, mut table) = context_parts();
        fx.layers.push(Layer::named("MGen-Avatar"));
        let mut ctx = GenerationContext::new(
            "MGen-Avatar".to_string(),
            false,
            String::new(),
            &mut fx,
            &mut table,
        );

        let param = ctx.ensure_bool_as_float_parameter("Hat", false, false).unwrap();
        let on = ctx.new_clip("Hat_on", vec![]);
        let off = ctx.new_clip("Hat_off", vec![]);
        ctx.register_blend_motion(on, off, param);
        ctx.finish_blend();

        let layer = ctx.fx.layer_mut("MGen-Avatar").unwrap();
        assert_eq!(layer.states.len(), 1);
        assert!(layer.states[0].write_defaults);
        assert_eq!(
            ctx.fx.parameters["MGenInternal-BlendTree-Weight"].default,
            AnimatorValue::Float(1.0)
        );
    }
}
