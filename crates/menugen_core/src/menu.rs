use serde::{Deserialize, Serialize};

use crate::item::SubmenuItem;

/// Identity of a sub-menu asset inside its backing file. Ids are assigned
/// sequentially and reset when the file's sub-assets are destroyed, so an
/// unchanged tree regenerates to identical bytes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubMenuId(u64);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MenuControl {
    pub name: String,
    pub icon: Option<String>,
    pub kind: MenuControlKind,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum MenuControlKind {
    /// Sets the parameter to `value` while held.
    Button { parameter: String, value: f32 },
    /// Sets the parameter to `value` when on, back to default when off.
    Toggle { parameter: String, value: f32 },
    /// Drives a float parameter across 0..=1.
    RadialPuppet { parameter: String },
    SubMenu { sub_menu: SubMenuId },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ExpressionMenu {
    pub name: String,
    pub controls: Vec<MenuControl>,
}

/// The expression menu backing file: the top-level menu plus every sub-menu
/// asset attached to the same file. Sub-assets are destroyed wholesale
/// before each re-render so stale menus never accumulate across runs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct MenuAssetFile {
    pub main: ExpressionMenu,
    sub_assets: Vec<(SubMenuId, ExpressionMenu)>,
    next_id: u64,
}

impl MenuAssetFile {
    pub fn attach_sub_menu(&mut self, name: String, controls: Vec<MenuControl>) -> SubMenuId {
        let id = SubMenuId(self.next_id);
        self.next_id += 1;
        self.sub_assets.push((id, ExpressionMenu { name, controls }));
        id
    }

    pub fn detach_all_sub_menus(&mut self) {
        self.sub_assets.clear();
        self.next_id = 0;
    }

    pub fn sub_menu(&self, id: SubMenuId) -> Option<&ExpressionMenu> {
        self.sub_assets
            .iter()
            .find(|(existing, _)| *existing == id)
            .map(|(_, menu)| menu)
    }

    pub fn sub_menu_count(&self) -> usize {
        self.sub_assets.len()
    }
}

/// Rebuild the top-level menu from the item tree. Every previous sub-menu
/// sub-asset is destroyed first; inactive top-level items are skipped, and
/// each submenu filters its own children while rendering.
pub fn render_menu(root: &SubmenuItem, file: &mut MenuAssetFile) {
    file.main.controls.clear();
    file.detach_all_sub_menus();

    let mut controls = Vec::new();
    for node in root.items.iter().filter(|n| n.is_active_self()) {
        if let Some(control) = node.item().render_menu_control(file) {
            controls.push(control);
        }
    }
    file.main.controls = controls;
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::item::{ItemNode, MenuItem};

    #[derive(Debug)]
    struct FakeToggle(&'static str);

    impl MenuItem for FakeToggle {
        fn name(&self) -> &str {
            self.0
        }

        fn parameter_name(&self) -> String {
            self.0.to_string()
        }

        fn render_menu_control(&self, _file: &mut MenuAssetFile) -> Option<MenuControl> {
            Some(MenuControl {
                name: self.0.to_string(),
                icon: None,
                kind: MenuControlKind::Toggle {
                    parameter: self.0.to_string(),
                    value: 1.0,
                },
            })
        }
    }

    #[test]
    fn test_submenu_renders_recursively_in_declaration_order() {
        let root = SubmenuItem::new("Root")
            .with_item(ItemNode::leaf(FakeToggle("a")))
            .with_item(ItemNode::submenu(
                SubmenuItem::new("clothes")
                    .with_item(ItemNode::leaf(FakeToggle("hat")))
                    .with_item(ItemNode::leaf(FakeToggle("coat"))),
            ));

        let mut file = MenuAssetFile::default();
        render_menu(&root, &mut file);

        assert_eq!(file.main.controls.len(), 2);
        assert_eq!(file.main.controls[0].name, "a");
        let MenuControlKind::SubMenu { sub_menu } = &file.main.controls[1].kind else {
            panic!("expected a submenu control");
        };
        let clothes = file.sub_menu(*sub_menu).unwrap();
        assert_eq!(clothes.name, "clothes");
        let names: Vec<_> = clothes.controls.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["hat", "coat"]);
    }

    #[test]
    fn test_inactive_items_are_filtered_per_node() {
        let root = SubmenuItem::new("Root")
            .with_item(ItemNode::leaf(FakeToggle("a")).disabled())
            .with_item(ItemNode::submenu(
                SubmenuItem::new("sub")
                    .with_item(ItemNode::leaf(FakeToggle("kept")))
                    .with_item(ItemNode::leaf(FakeToggle("dropped")).inactive()),
            ));

        let mut file = MenuAssetFile::default();
        render_menu(&root, &mut file);

        assert_eq!(file.main.controls.len(), 1);
        let MenuControlKind::SubMenu { sub_menu } = &file.main.controls[0].kind else {
            panic!("expected a submenu control");
        };
        let sub = file.sub_menu(*sub_menu).unwrap();
        assert_eq!(sub.controls.len(), 1);
        assert_eq!(sub.controls[0].name, "kept");
    }

    #[test]
    fn test_re_render_destroys_previous_sub_assets() {
        let root = SubmenuItem::new("Root").with_item(ItemNode::submenu(
            SubmenuItem::new("sub").with_item(ItemNode::leaf(FakeToggle("x"))),
        ));

        let mut file = MenuAssetFile::default();
        render_menu(&root, &mut file);
        let first = file.clone();
        render_menu(&root, &mut file);

        assert_eq!(file.sub_menu_count(), 1);
        assert_eq!(file, first);
    }
}
