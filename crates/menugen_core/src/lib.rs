//! # MenuGen core
//!
//! Generation pipeline turning a declarative tree of avatar menu items into
//! animator controller layers, a hierarchical expression menu, synced avatar
//! parameters and an optional remoting descriptor.
//!
//! The entry point is [`generator::Generator`]: given an [`avatar::Avatar`]
//! and the root [`item::SubmenuItem`] of an item tree, [`Generator::generate`]
//! runs a six-phase walk over the tree:
//!
//! 1. reset: strip everything a previous run generated (matched by the
//!    reserved name prefixes) and rebuild the output container,
//! 2. hook pre-apply,
//! 3. two pre-generation sweeps, so items can declare shared resources
//!    before anyone references them,
//! 4. the generate sweep emitting animator states,
//! 5. two post-generation sweeps for cross-item wiring,
//! 6. remoting, parameter pruning, blend tree merging, hook apply and the
//!    menu rebuild.
//!
//! Re-running generation with an unchanged tree reproduces identical
//! artifacts and updates nothing; items removed from the tree have their
//! persisted parameters pruned on the next run.
//!
//! Item types implement [`item::MenuItem`]; the built-in catalog lives in
//! the `menugen_builtin_items` crate.
//!
//! [`Generator::generate`]: generator::Generator::generate

pub mod avatar;
pub mod blend;
pub mod context;
pub mod errors;
pub mod fx;
pub mod generator;
pub mod hooks;
pub mod item;
pub mod menu;
pub mod parameters;
pub mod remoting;
pub mod store;

pub mod prelude {
    pub use super::avatar::Avatar;
    pub use super::context::GenerationContext;
    pub use super::errors::{GenerationError, HookError, StoreError};
    pub use super::fx::{
        AnimatorController, AnimatorValue, BlendTree, BlendTreeKind, BoolParam, ClipBinding,
        FloatParam, IntParam, Motion,
    };
    pub use super::generator::{GenerationReport, GenerationStats, Generator};
    pub use super::hooks::{GenerationHook, HookRegistry};
    pub use super::item::{ItemKind, ItemNode, MenuItem, SubmenuItem};
    pub use super::menu::{ExpressionMenu, MenuAssetFile, MenuControl, MenuControlKind};
    pub use super::parameters::{
        OWNED_PREFIX, ParameterKind, ParameterTable, REMOTE_PREFIX, owned_parameter_key,
    };
    pub use super::store::{AssetStore, FsAssetStore, MemoryAssetStore};
}
