//! Built-in menu item types for the menugen pipeline: toggles, buttons,
//! radial sliders and int-backed selectors. Each implements
//! [`menugen_core::item::MenuItem`]; the composite submenu kind lives in the
//! core crate because traversal depends on it.

pub mod button;
pub mod radial;
pub mod selector;
pub mod toggle;

pub use button::ButtonItem;
pub use radial::RadialItem;
pub use selector::{SelectorItem, SelectorOption};
pub use toggle::{ToggleItem, ToggleStrategy, ToggleTarget};

#[cfg(test)]
mod test {
    use menugen_core::avatar::Avatar;
    use menugen_core::fx::Motion;
    use menugen_core::generator::{GenerationReport, Generator};
    use menugen_core::hooks::HookRegistry;
    use menugen_core::item::{ItemNode, SubmenuItem};
    use menugen_core::menu::MenuControlKind;
    use menugen_core::store::MemoryAssetStore;

    use super::*;

    fn run(
        store: &mut MemoryAssetStore,
        avatar: &mut Avatar,
        root: &SubmenuItem,
    ) -> GenerationReport {
        let mut generator = Generator::new(store, HookRegistry::default());
        generator.generate(avatar, root).unwrap()
    }

    /// ToggleA drives "Foo" (bool, default false); submenu "S" holds
    /// ToggleB driving "Bar" (int, default 0).
    fn foo_bar_tree(with_bar: bool) -> SubmenuItem {
        let mut sub = SubmenuItem::new("S");
        if with_bar {
            sub = sub.with_item(ItemNode::leaf(
                SelectorItem::new("ToggleB")
                    .with_parameter("Bar")
                    .with_option(SelectorOption::new("Off"))
                    .with_option(SelectorOption::new("On")),
            ));
        }
        SubmenuItem::new("Avatar")
            .with_item(ItemNode::leaf(ToggleItem::new("ToggleA").with_parameter("Foo")))
            .with_item(ItemNode::submenu(sub))
    }

    #[test]
    fn test_first_run_creates_prefixed_parameters_and_nested_menu() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut store = MemoryAssetStore::new();
        let mut avatar = Avatar::new("Ava");

        let report = run(&mut store, &mut avatar, &foo_bar_tree(true));

        assert_eq!(report.stats.used_parameters, 2);
        assert_eq!(report.stats.updated_parameters, 2);
        assert_eq!(report.stats.layers, 2);
        assert_eq!(report.stats.blend_tree_motions, 1);
        assert!(report.summary.starts_with(
            "Synchronized 2 layers + 1 direct blend tree motions using 2 parameters (2 modified) in"
        ));

        let table = avatar.parameters.as_ref().unwrap();
        let names: Vec<_> = table.names().collect();
        assert_eq!(names, ["MGenFoo", "MGenBar"]);

        let MenuControlKind::SubMenu { sub_menu } = &avatar.menu.main.controls[1].kind else {
            panic!("expected submenu control for S");
        };
        let s = avatar.menu.sub_menu(*sub_menu).unwrap();
        assert_eq!(s.name, "S");
        assert_eq!(s.controls.len(), 1);
        assert_eq!(s.controls[0].name, "ToggleB");
    }

    #[test]
    fn test_unchanged_second_run_updates_nothing() {
        let mut store = MemoryAssetStore::new();
        let mut avatar = Avatar::new("Ava");
        let root = foo_bar_tree(true);

        run(&mut store, &mut avatar, &root);
        let layer_names: Vec<String> = avatar
            .fx
            .as_ref()
            .unwrap()
            .layers
            .iter()
            .map(|l| l.name.clone())
            .collect();
        let parameter_names: Vec<String> = avatar
            .parameters
            .as_ref()
            .unwrap()
            .names()
            .map(str::to_string)
            .collect();

        let report = run(&mut store, &mut avatar, &root);

        assert_eq!(report.stats.updated_parameters, 0);
        let fx = avatar.fx.as_ref().unwrap();
        let names: Vec<_> = fx.layers.iter().map(|l| l.name.clone()).collect();
        assert_eq!(names, layer_names);
        let table: Vec<_> = avatar
            .parameters
            .as_ref()
            .unwrap()
            .names()
            .map(str::to_string)
            .collect();
        assert_eq!(table, parameter_names);
    }

    #[test]
    fn test_removing_item_prunes_parameter_and_empties_submenu() {
        let mut store = MemoryAssetStore::new();
        let mut avatar = Avatar::new("Ava");

        run(&mut store, &mut avatar, &foo_bar_tree(true));
        run(&mut store, &mut avatar, &foo_bar_tree(false));

        let table = avatar.parameters.as_ref().unwrap();
        assert!(table.find("MGenBar").is_none());
        assert!(table.find("MGenFoo").is_some());

        let MenuControlKind::SubMenu { sub_menu } = &avatar.menu.main.controls[1].kind else {
            panic!("expected submenu control for S");
        };
        assert!(avatar.menu.sub_menu(*sub_menu).unwrap().controls.is_empty());
    }

    #[test]
    fn test_changing_parameter_kind_counts_as_update() {
        let mut store = MemoryAssetStore::new();
        let mut avatar = Avatar::new("Ava");

        let as_toggle = SubmenuItem::new("Avatar")
            .with_item(ItemNode::leaf(ToggleItem::new("X").with_parameter("Shape")));
        let as_radial = SubmenuItem::new("Avatar")
            .with_item(ItemNode::leaf(RadialItem::new("X").with_parameter("Shape")));

        run(&mut store, &mut avatar, &as_toggle);
        let report = run(&mut store, &mut avatar, &as_radial);
        assert_eq!(report.stats.updated_parameters, 1);

        let report = run(&mut store, &mut avatar, &as_radial);
        assert_eq!(report.stats.updated_parameters, 0);
    }

    #[test]
    fn test_two_toggles_on_one_parameter_keep_two_blend_children() {
        let mut store = MemoryAssetStore::new();
        let mut avatar = Avatar::new("Ava");
        let root = SubmenuItem::new("Avatar")
            .with_item(ItemNode::leaf(ToggleItem::new("Left").with_parameter("X")))
            .with_item(ItemNode::leaf(ToggleItem::new("Right").with_parameter("X")));

        let report = run(&mut store, &mut avatar, &root);

        assert_eq!(report.stats.blend_tree_motions, 2);
        // The shared parameter is ensured twice but only created once.
        assert_eq!(report.stats.used_parameters, 2);
        assert_eq!(report.stats.updated_parameters, 1);

        let fx = avatar.fx.as_ref().unwrap();
        let main = fx.layers.iter().find(|l| l.name == "MGen-Ava").unwrap();
        let Motion::BlendTree(tree) = &main.states[0].motion else {
            panic!("expected merged blend tree state");
        };
        assert_eq!(tree.children.len(), 2);
    }
}
