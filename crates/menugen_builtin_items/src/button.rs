use serde::{Deserialize, Serialize};

use menugen_core::context::GenerationContext;
use menugen_core::item::MenuItem;
use menugen_core::menu::{MenuAssetFile, MenuControl, MenuControlKind};
use menugen_core::parameters::owned_parameter_key;

use crate::toggle::{ToggleTarget, push_two_state_switch};

/// A momentary switch: the parameter is high only while the control is
/// held. Never saved across sessions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ButtonItem {
    pub name: String,
    pub parameter: Option<String>,
    pub icon: Option<String>,
    pub targets: Vec<ToggleTarget>,
}

impl ButtonItem {
    pub fn new(name: impl Into<String>) -> Self {
        ButtonItem {
            name: name.into(),
            parameter: None,
            icon: None,
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
}

impl MenuItem for ButtonItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_name(&self) -> String {
        self.parameter.clone().unwrap_or_else(|| self.name.clone())
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) {
        let key = self.parameter_name();
        let Some(param) = ctx.ensure_bool_parameter(&key, false, false) else {
            return;
        };
        let on = ctx.new_clip(
            &format!("{key}_on"),
            self.targets
                .iter()
                .map(|t| menugen_core::fx::ClipBinding {
                    path: t.path.clone(),
                    value: t.on_value,
                })
                .collect(),
        );
        let off = ctx.new_clip(
            &format!("{key}_off"),
            self.targets
                .iter()
                .map(|t| menugen_core::fx::ClipBinding {
                    path: t.path.clone(),
                    value: t.off_value,
                })
                .collect(),
        );
        let write_defaults = ctx.write_defaults();
        let layer = ctx.supporting_layer(&key);
        push_two_state_switch(layer, param.name(), on, off, write_defaults);
    }

    fn render_menu_control(&self, _file: &mut MenuAssetFile) -> Option<MenuControl> {
        Some(MenuControl {
            name: self.name.clone(),
            icon: self.icon.clone(),
            kind: MenuControlKind::Button {
                parameter: owned_parameter_key(&self.parameter_name()),
                value: 1.0,
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use menugen_core::avatar::Avatar;
    use menugen_core::generator::Generator;
    use menugen_core::hooks::HookRegistry;
    use menugen_core::item::{ItemNode, SubmenuItem};
    use menugen_core::store::MemoryAssetStore;

    #[test]
    fn test_button_parameter_is_never_saved() {
        let mut store = MemoryAssetStore::new();
        let mut avatar = Avatar::new("Ava");
        let root =
            SubmenuItem::new("Avatar").with_item(ItemNode::leaf(ButtonItem::new("Wave")));

        let mut generator = Generator::new(&mut store, HookRegistry::default());
        generator.generate(&mut avatar, &root).unwrap();

        let descriptor = avatar
            .parameters
            .as_ref()
            .unwrap()
            .find("MGenWave")
            .unwrap();
        assert!(!descriptor.saved);
        assert_eq!(descriptor.default, 0.0);
    }
}
