use log::debug;
use serde::{Deserialize, Serialize};

use menugen_core::context::GenerationContext;
use menugen_core::fx::{ClipBinding, Condition, ConditionMode, State, Transition};
use menugen_core::item::MenuItem;
use menugen_core::menu::{MenuAssetFile, MenuControl, MenuControlKind};
use menugen_core::parameters::owned_parameter_key;

/// One selectable position of a [`SelectorItem`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelectorOption {
    pub label: String,
    pub icon: Option<String>,
    pub targets: Vec<ClipBinding>,
}

impl SelectorOption {
    pub fn new(label: impl Into<String>) -> Self {
        SelectorOption {
            label: label.into(),
            icon: None,
            targets: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: ClipBinding) -> Self {
        self.targets.push(target);
        self
    }
}

/// A multi-way switch backed by an int synced parameter: one animator state
/// per option, one menu toggle per option grouped in a generated sub-menu.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SelectorItem {
    pub name: String,
    pub parameter: Option<String>,
    pub icon: Option<String>,
    pub saved: bool,
    pub default_index: i32,
    pub options: Vec<SelectorOption>,
}

impl SelectorItem {
    pub fn new(name: impl Into<String>) -> Self {
        SelectorItem {
            name: name.into(),
            parameter: None,
            icon: None,
            saved: true,
            default_index: 0,
            options: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn with_option(mut self, option: SelectorOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn with_default_index(mut self, index: i32) -> Self {
        self.default_index = index;
        self
    }
}

impl MenuItem for SelectorItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_name(&self) -> String {
        self.parameter.clone().unwrap_or_else(|| self.name.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) {
        let key = self.parameter_name();
        let Some(param) = ctx.ensure_int_parameter(&key, self.saved, self.default_index) else {
            return;
        };

        let mut motions = Vec::with_capacity(self.options.len());
        for option in &self.options {
            motions.push(ctx.new_clip(
                &format!("{key}_{}", option.label),
                option.targets.clone(),
            ));
        }

        debug!(
            "selector '{}': {} options on parameter {}",
            self.name,
            self.options.len(),
            param.name()
        );
        let write_defaults = ctx.write_defaults();
        let layer = ctx.supporting_layer(&key);
        for (index, (option, motion)) in self.options.iter().zip(motions).enumerate() {
            layer.states.push(State {
                name: option.label.clone(),
                motion,
                write_defaults,
            });
            // From any state, so switching between options is one hop.
            layer.transitions.push(Transition {
                source: None,
                target: option.label.clone(),
                conditions: vec![Condition {
                    parameter: param.name().to_string(),
                    mode: ConditionMode::Equals,
                    threshold: index as f32,
                }],
            });
        }
    }

    fn render_menu_control(&self, file: &mut MenuAssetFile) -> Option<MenuControl> {
        let key = owned_parameter_key(&self.parameter_name());
        let controls = self
            .options
            .iter()
            .enumerate()
            .map(|(index, option)| MenuControl {
                name: option.label.clone(),
                icon: option.icon.clone(),
                kind: MenuControlKind::Toggle {
                    parameter: key.clone(),
                    value: index as f32,
                },
            })
            .collect();
        let sub_menu = file.attach_sub_menu(self.name.clone(), controls);
        Some(MenuControl {
            name: self.name.clone(),
            icon: self.icon.clone(),
            kind: MenuControlKind::SubMenu { sub_menu },
        })
    }
}
