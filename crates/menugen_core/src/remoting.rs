use serde::{Deserialize, Serialize};

use crate::item::{ItemNode, SubmenuItem};

/// One node of the network-relay mirror of the item tree. The wire schema
/// (field names, nesting) is owned by the remoting subsystem; this type only
/// guarantees the name/children shape.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct RemoteNode {
    pub name: String,
    #[serde(default)]
    pub children: Vec<RemoteNode>,
}

/// Mirror the active parts of the item tree into a remoting descriptor.
/// Same pre-order, declaration-ordered walk the generation sweeps use.
pub fn build_descriptor(root: &SubmenuItem) -> RemoteNode {
    RemoteNode {
        name: root.name.clone(),
        children: children_of(&root.items),
    }
}

fn children_of(items: &[ItemNode]) -> Vec<RemoteNode> {
    items
        .iter()
        .filter(|node| node.is_active_self())
        .map(|node| RemoteNode {
            name: node.item().name().to_string(),
            children: children_of(node.children()),
        })
        .collect()
}

/// Serialize the descriptor for transport. A trivial descriptor (no name or
/// no children) yields `None`: there is nothing worth relaying.
pub fn serialize_descriptor(root: &RemoteNode) -> Result<Option<String>, serde_json::Error> {
    if root.name.is_empty() || root.children.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(root).map(Some)
}
