use serde::{Deserialize, Serialize};

use menugen_core::context::GenerationContext;
use menugen_core::fx::{
    BlendChild, BlendTree, BlendTreeKind, ClipBinding, Motion, State,
};
use menugen_core::item::MenuItem;
use menugen_core::menu::{MenuAssetFile, MenuControl, MenuControlKind};
use menugen_core::parameters::owned_parameter_key;

/// One property a radial drives, interpolated between its endpoint values.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RadialTarget {
    pub path: String,
    pub low_value: f32,
    pub high_value: f32,
}

/// A continuous 0..=1 slider backed by a float synced parameter. Emits its
/// own supporting layer holding a 1D blend tree across the two endpoint
/// clips.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RadialItem {
    pub name: String,
    pub parameter: Option<String>,
    pub icon: Option<String>,
    pub saved: bool,
    pub default: f32,
    pub targets: Vec<RadialTarget>,
}

impl RadialItem {
    pub fn new(name: impl Into<String>) -> Self {
        RadialItem {
            name: name.into(),
            parameter: None,
            icon: None,
            saved: true,
            default: 0.0,
            targets: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }

    pub fn with_default(mut self, default: f32) -> Self {
        self.default = default;
        self
    }

    pub fn with_target(mut self, target: RadialTarget) -> Self {
        self.targets.push(target);
        self
    }

    fn bindings(&self, high: bool) -> Vec<ClipBinding> {
        self.targets
            .iter()
            .map(|t| ClipBinding {
                path: t.path.clone(),
                value: if high { t.high_value } else { t.low_value },
            })
            .collect()
    }
}

impl MenuItem for RadialItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_name(&self) -> String {
        self.parameter.clone().unwrap_or_else(|| self.name.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) {
        let key = self.parameter_name();
        let Some(param) = ctx.ensure_float_parameter(&key, self.saved, self.default) else {
            return;
        };

        let low = ctx.new_clip(&format!("{key}_low"), self.bindings(false));
        let high = ctx.new_clip(&format!("{key}_high"), self.bindings(true));

        let tree = BlendTree {
            name: param.name().to_string(),
            kind: BlendTreeKind::Simple1D,
            blend_parameter: Some(param.name().to_string()),
            children: vec![
                BlendChild {
                    motion: low,
                    threshold: 0.0,
                    direct_blend_parameter: None,
                    time_scale: 1.0,
                },
                BlendChild {
                    motion: high,
                    threshold: 1.0,
                    direct_blend_parameter: None,
                    time_scale: 1.0,
                },
            ],
        };

        let write_defaults = ctx.write_defaults();
        let layer = ctx.supporting_layer(&key);
        layer.states.push(State {
            name: format!("{key} Blend"),
            motion: Motion::BlendTree(tree),
            write_defaults,
        });
    }

    fn render_menu_control(&self, _file: &mut MenuAssetFile) -> Option<MenuControl> {
        Some(MenuControl {
            name: self.name.clone(),
            icon: self.icon.clone(),
            kind: MenuControlKind::RadialPuppet {
                parameter: owned_parameter_key(&self.parameter_name()),
            },
        })
    }
}
