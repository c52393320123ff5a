use std::time::Instant;

use log::{error, info};

use crate::avatar::Avatar;
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::fx::{AvatarMask, Layer};
use crate::hooks::HookRegistry;
use crate::item::SubmenuItem;
use crate::menu;
use crate::parameters::{OWNED_PREFIX, REMOTE_PREFIX};
use crate::remoting;
use crate::store::{AssetStore, BatchEditScope};

/// Store folder holding the regenerated output containers.
pub const GENERATED_FOLDER: &str = "Generated-MenuGen";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
    pub layers: usize,
    pub blend_tree_motions: usize,
    pub used_parameters: usize,
    pub updated_parameters: usize,
    pub elapsed_ms: u128,
}

impl GenerationStats {
    /// The one-line human-readable summary. Content and field order are a
    /// stable contract; external tooling scrapes this line.
    pub fn summary(&self) -> String {
        format!(
            "Synchronized {} layers + {} direct blend tree motions using {} parameters ({} modified) in {}ms",
            self.layers,
            self.blend_tree_motions,
            self.used_parameters,
            self.updated_parameters,
            self.elapsed_ms
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub stats: GenerationStats,
    /// Serialized remoting descriptor, present only when non-trivial.
    pub remoting: Option<String>,
    pub summary: String,
}

/// Runs the generation pipeline against an avatar. Each run fully
/// supersedes the previous run's generated artifacts, so calling
/// [`Generator::generate`] repeatedly is safe.
pub struct Generator<'s, S: AssetStore> {
    store: &'s mut S,
    hooks: HookRegistry,
}

impl<'s, S: AssetStore> Generator<'s, S> {
    /// Hooks are registered up front on the registry; there is no way to
    /// add more once the generator owns it.
    pub fn new(store: &'s mut S, hooks: HookRegistry) -> Self {
        Generator { store, hooks }
    }

    /// Run the full six-phase generation over `root` and rewrite the
    /// avatar's generated artifacts.
    ///
    /// On failure the error is logged and returned after the store's batch
    /// editing mode has been released; a failed run may leave mixed old/new
    /// state behind, and re-running after fixing the cause is the recovery
    /// path.
    pub fn generate(
        &mut self,
        avatar: &mut Avatar,
        root: &SubmenuItem,
    ) -> Result<GenerationReport, GenerationError> {
        let mut store = BatchEditScope::new(&mut *self.store);
        let result = generate_internal(&mut *store, &self.hooks, avatar, root);
        if let Err(err) = &result {
            error!("generation failed: {err}");
        }
        result
    }
}

fn generate_internal<S: AssetStore>(
    store: &mut S,
    hooks: &HookRegistry,
    avatar: &mut Avatar,
    root: &SubmenuItem,
) -> Result<GenerationReport, GenerationError> {
    let start = Instant::now();

    let avatar_name = avatar.name.clone();
    let write_defaults = avatar.write_defaults;
    let fx = avatar
        .fx
        .as_mut()
        .ok_or(GenerationError::MissingFxController)?;
    let table = avatar
        .parameters
        .as_mut()
        .ok_or(GenerationError::MissingParameterTable)?;

    let system_name = format!("{OWNED_PREFIX}-{avatar_name}");

    // Phase 1: reset. The output container is deleted and rebuilt from
    // scratch; everything a previous run left on the avatar's own assets is
    // stripped by reserved-prefix match.
    store.ensure_folder(GENERATED_FOLDER)?;
    let container_path = format!("{GENERATED_FOLDER}/AssetContainer-{avatar_name}.controller");
    store.delete_controller(&container_path);

    fx.clips
        .retain(|c| !c.name.starts_with(OWNED_PREFIX) && !c.name.starts_with(REMOTE_PREFIX));
    let owned_layer_prefix = format!("{OWNED_PREFIX}-");
    fx.layers.retain(|l| {
        !l.name.starts_with(&owned_layer_prefix) && !l.name.starts_with(REMOTE_PREFIX)
    });
    fx.parameters
        .retain(|name, _| !name.starts_with(OWNED_PREFIX) && !name.starts_with(REMOTE_PREFIX));

    let mut main = Layer::named(system_name.clone());
    main.mask = Some(AvatarMask::no_transforms());
    fx.layers.push(main);

    let mut ctx = GenerationContext::new(system_name, write_defaults, container_path, fx, table);

    // Phase 2: hook pre-apply.
    for hook in hooks.iter() {
        hook.pre_apply(root, &mut ctx)
            .map_err(|err| GenerationError::Hook {
                hook: hook.name().to_string(),
                message: err.to_string(),
            })?;
    }

    // Phases 3-5: the item sweeps. Every sweep walks the same pre-order;
    // two pre passes let items declare shared resources before anyone emits
    // states, two post passes handle wiring that needs all states to exist.
    for (node, active) in root.iter_recursive() {
        if active {
            node.item().pre_generate_1(&mut ctx);
        }
    }
    for (node, active) in root.iter_recursive() {
        if active {
            node.item().pre_generate_2(&mut ctx);
        }
    }
    for (node, active) in root.iter_recursive() {
        // Stale supporting layers are cleaned up even for items that are
        // currently inactive, so disabling an item does not leak its layers.
        ctx.remove_supporting_layers(&node.item().parameter_name());
        if active {
            node.item().generate(&mut ctx);
        }
    }
    for (node, active) in root.iter_recursive() {
        if active {
            node.item().post_generate_1(&mut ctx);
        }
    }
    for (node, active) in root.iter_recursive() {
        if active {
            node.item().post_generate_2(&mut ctx);
        }
    }

    // Phase 6: remoting.
    let descriptor = remoting::build_descriptor(root);
    let remoting = remoting::serialize_descriptor(&descriptor)?;

    // Phase 7: finalize.
    ctx.prune_parameters();

    let blend_tree_motions = ctx.blend_motion_count();
    ctx.finish_blend();
    let layers = ctx.generated_layer_count();

    for hook in hooks.iter() {
        hook.apply(root, &mut ctx)
            .map_err(|err| GenerationError::Hook {
                hook: hook.name().to_string(),
                message: err.to_string(),
            })?;
    }

    let used_parameters = ctx.used_parameter_count();
    let updated_parameters = ctx.updated_parameter_count();

    let (container_path, container) = ctx.into_container();
    store.put_controller(&container_path, container)?;

    menu::render_menu(root, &mut avatar.menu);

    store.mark_dirty(&avatar.fx_path);
    store.mark_dirty(&avatar.parameters_path);
    store.mark_dirty(&avatar.menu_path);
    store.mark_dirty(&container_path);

    let stats = GenerationStats {
        layers,
        blend_tree_motions,
        used_parameters,
        updated_parameters,
        elapsed_ms: start.elapsed().as_millis(),
    };
    let summary = stats.summary();
    info!("{summary}");

    Ok(GenerationReport {
        stats,
        remoting,
        summary,
    })
}
