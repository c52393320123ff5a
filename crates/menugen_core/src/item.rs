use std::fmt::Debug;

use crate::context::GenerationContext;
use crate::menu::{MenuAssetFile, MenuControl, MenuControlKind};

/// The contract every menu item type satisfies. The orchestrator drives the
/// five lifecycle callbacks in fixed sweeps over the whole tree; an item may
/// declare shared resources in the pre passes, emit its animator states in
/// [`MenuItem::generate`], and wire up cross-item dependencies in the post
/// passes once every item's states exist.
///
/// Callbacks receive the live [`GenerationContext`] for the duration of the
/// call only; the borrow ends with the call, so no item can retain it.
pub trait MenuItem: Debug {
    /// Stable identity of the item, used for menu labels and remoting.
    fn name(&self) -> &str;

    /// The parameter name this item drives, derived from its configuration.
    /// Also keys the cleanup of this item's supporting layers between runs.
    fn parameter_name(&self) -> String;

    fn pre_generate_1(&self, _ctx: &mut GenerationContext<'_>) {}

    fn pre_generate_2(&self, _ctx: &mut GenerationContext<'_>) {}

    fn generate(&self, _ctx: &mut GenerationContext<'_>) {}

    fn post_generate_1(&self, _ctx: &mut GenerationContext<'_>) {}

    fn post_generate_2(&self, _ctx: &mut GenerationContext<'_>) {}

    /// Render this item into the expression menu. `None` means the item
    /// contributes no control. Sub-assets may be attached to `file`.
    fn render_menu_control(&self, file: &mut MenuAssetFile) -> Option<MenuControl>;
}

/// A node of the item tree: activity flags plus the attached item.
#[derive(Debug)]
pub struct ItemNode {
    /// The item component itself is enabled.
    pub enabled: bool,
    /// The scene object carrying the item is active.
    pub active: bool,
    pub kind: ItemKind,
}

/// Explicit variant split between composite and leaf items, so traversal and
/// rendering never need to downcast a trait object to find children.
#[derive(Debug)]
pub enum ItemKind {
    Leaf(Box<dyn MenuItem>),
    Submenu(SubmenuItem),
}

impl ItemNode {
    pub fn leaf(item: impl MenuItem + 'static) -> Self {
        ItemNode {
            enabled: true,
            active: true,
            kind: ItemKind::Leaf(Box::new(item)),
        }
    }

    pub fn submenu(submenu: SubmenuItem) -> Self {
        ItemNode {
            enabled: true,
            active: true,
            kind: ItemKind::Submenu(submenu),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Local activity only; whether the whole ancestor chain is active is
    /// decided during traversal.
    pub fn is_active_self(&self) -> bool {
        self.enabled && self.active
    }

    pub fn item(&self) -> &dyn MenuItem {
        match &self.kind {
            ItemKind::Leaf(item) => item.as_ref(),
            ItemKind::Submenu(submenu) => submenu,
        }
    }

    pub fn children(&self) -> &[ItemNode] {
        match &self.kind {
            ItemKind::Leaf(_) => &[],
            ItemKind::Submenu(submenu) => &submenu.items,
        }
    }
}

/// The composite item kind: an ordered sequence of child nodes. Declaration
/// order is menu display order. The tree root is a submenu as well; it is
/// not itself visited by the sweeps, only its descendants are.
#[derive(Debug, Default)]
pub struct SubmenuItem {
    pub name: String,
    pub icon: Option<String>,
    pub items: Vec<ItemNode>,
}

impl SubmenuItem {
    pub fn new(name: impl Into<String>) -> Self {
        SubmenuItem {
            name: name.into(),
            icon: None,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, node: ItemNode) -> Self {
        self.items.push(node);
        self
    }

    /// Depth-first pre-order over all descendants: a node is yielded before
    /// its children, siblings in declaration order. Yields every node along
    /// with whether its whole ancestor chain (including itself) is active.
    /// All five generation sweeps and the remoting walk share this order.
    pub fn iter_recursive(&self) -> PreOrderIter<'_> {
        let mut stack: Vec<(&ItemNode, bool)> = Vec::with_capacity(self.items.len());
        for node in self.items.iter().rev() {
            stack.push((node, true));
        }
        PreOrderIter { stack }
    }
}

impl MenuItem for SubmenuItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_name(&self) -> String {
        self.name.clone()
    }

    // A submenu emits no animator states of its own.

    fn render_menu_control(&self, file: &mut MenuAssetFile) -> Option<MenuControl> {
        let mut controls = Vec::new();
        for node in self.items.iter().filter(|n| n.is_active_self()) {
            if let Some(control) = node.item().render_menu_control(file) {
                controls.push(control);
            }
        }
        let sub_menu = file.attach_sub_menu(self.name.clone(), controls);
        Some(MenuControl {
            name: self.name.clone(),
            icon: self.icon.clone(),
            kind: MenuControlKind::SubMenu { sub_menu },
        })
    }
}

pub struct PreOrderIter<'a> {
    stack: Vec<(&'a ItemNode, bool)>,
}

impl<'a> Iterator for PreOrderIter<'a> {
    /// (node, active in hierarchy)
    type Item = (&'a ItemNode, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, ancestors_active) = self.stack.pop()?;
        let active = ancestors_active && node.is_active_self();
        for child in node.children().iter().rev() {
            self.stack.push((child, active));
        }
        Some((node, active))
    }
}
