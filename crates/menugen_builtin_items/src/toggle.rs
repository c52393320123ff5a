use serde::{Deserialize, Serialize};

use menugen_core::context::GenerationContext;
use menugen_core::fx::{ClipBinding, Condition, ConditionMode, Motion, State, Transition};
use menugen_core::item::MenuItem;
use menugen_core::menu::{MenuAssetFile, MenuControl, MenuControlKind};
use menugen_core::parameters::owned_parameter_key;

/// One property this toggle drives, with its value in each position.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToggleTarget {
    pub path: String,
    pub on_value: f32,
    pub off_value: f32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ToggleStrategy {
    /// Contribute an on/off motion pair to the shared direct blend tree.
    /// Costs no extra layer.
    #[default]
    BlendTree,
    /// Emit a dedicated supporting layer with two states. Needed when the
    /// toggle must not share the main layer's no-transforms mask.
    Layer,
}

/// A two-state switch backed by a bool synced parameter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToggleItem {
    pub name: String,
    /// Parameter name override; the item name is used when absent.
    pub parameter: Option<String>,
    pub icon: Option<String>,
    pub saved: bool,
    pub default_on: bool,
    pub strategy: ToggleStrategy,
    pub targets: Vec<ToggleTarget>,
}

impl ToggleItem {
    pub fn new(name: impl Into<String>) -> Self {
        ToggleItem {
            name: name.into(),
            parameter: None,
            icon: None,
            saved: true,
            default_on: false,
            strategy: ToggleStrategy::default(),
            targets: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn with_target(mut self, target: ToggleTarget) -> Self {
        self.targets.push(target);
        self
    }

    pub fn with_strategy(mut self, strategy: ToggleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn unsaved(mut self) -> Self {
        self.saved = false;
        self
    }

    pub fn default_on(mut self) -> Self {
        self.default_on = true;
        self
    }

    fn bindings(&self, on: bool) -> Vec<ClipBinding> {
        self.targets
            .iter()
            .map(|t| ClipBinding {
                path: t.path.clone(),
                value: if on { t.on_value } else { t.off_value },
            })
            .collect()
    }
}

impl MenuItem for ToggleItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_name(&self) -> String {
        self.parameter.clone().unwrap_or_else(|| self.name.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) {
        let key = self.parameter_name();
        match self.strategy {
            ToggleStrategy::BlendTree => {
                let Some(param) =
                    ctx.ensure_bool_as_float_parameter(&key, self.saved, self.default_on)
                else {
                    return;
                };
                let on = ctx.new_clip(&format!("{key}_on"), self.bindings(true));
                let off = ctx.new_clip(&format!("{key}_off"), self.bindings(false));
                ctx.register_blend_motion(on, off, param);
            }
            ToggleStrategy::Layer => {
                let Some(param) = ctx.ensure_bool_parameter(&key, self.saved, self.default_on)
                else {
                    return;
                };
                let on = ctx.new_clip(&format!("{key}_on"), self.bindings(true));
                let off = ctx.new_clip(&format!("{key}_off"), self.bindings(false));
                let write_defaults = ctx.write_defaults();
                let layer = ctx.supporting_layer(&key);
                push_two_state_switch(layer, param.name(), on, off, write_defaults);
            }
        }
    }

    fn render_menu_control(&self, _file: &mut MenuAssetFile) -> Option<MenuControl> {
        Some(MenuControl {
            name: self.name.clone(),
            icon: self.icon.clone(),
            kind: MenuControlKind::Toggle {
                parameter: owned_parameter_key(&self.parameter_name()),
                value: 1.0,
            },
        })
    }
}

pub(crate) fn push_two_state_switch(
    layer: &mut menugen_core::fx::Layer,
    parameter: &str,
    on: Motion,
    off: Motion,
    write_defaults: bool,
) {
    layer.states.push(State {
        name: "Off".to_string(),
        motion: off,
        write_defaults,
    });
    layer.states.push(State {
        name: "On".to_string(),
        motion: on,
        write_defaults,
    });
    layer.transitions.push(Transition {
        source: Some("Off".to_string()),
        target: "On".to_string(),
        conditions: vec![Condition {
            parameter: parameter.to_string(),
            mode: ConditionMode::If,
            threshold: 0.0,
        }],
    });
    layer.transitions.push(Transition {
        source: Some("On".to_string()),
        target: "Off".to_string(),
        conditions: vec![Condition {
            parameter: parameter.to_string(),
            mode: ConditionMode::IfNot,
            threshold: 0.0,
        }],
    });
}
