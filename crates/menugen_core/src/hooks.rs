use std::fmt::Debug;

use crate::context::GenerationContext;
use crate::errors::HookError;
use crate::item::SubmenuItem;

/// External observer of a generation run, called at two fixed points: right
/// after the output layer is created and cleared, and right after all item
/// passes and remoting are done. Hooks may read and mutate the context.
pub trait GenerationHook: Debug {
    fn name(&self) -> &str;

    fn pre_apply(
        &self,
        _root: &SubmenuItem,
        _ctx: &mut GenerationContext<'_>,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn apply(
        &self,
        _root: &SubmenuItem,
        _ctx: &mut GenerationContext<'_>,
    ) -> Result<(), HookError> {
        Ok(())
    }
}

/// Explicit, append-only registry of hooks, owned by whoever constructs the
/// generator. Registration happens before a run starts; iteration order is
/// registration order, although no ordering is promised to hooks.
#[derive(Debug, Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn GenerationHook>>,
}

impl HookRegistry {
    pub fn register(&mut self, hook: impl GenerationHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn GenerationHook> {
        self.hooks.iter().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
