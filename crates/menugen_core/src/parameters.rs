use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};

use crate::fx::{AnimatorController, AnimatorParameterKind, AnimatorValue, FxParam};

/// Reserved name prefix for everything this generator owns: synced
/// parameters, layers, clips and other sub-assets. Cleanup and pruning match
/// on it, so nothing outside this crate may create names under it.
pub const OWNED_PREFIX: &str = "MGen";

/// Reserved name prefix for artifacts owned by the remoting subsystem. Kept
/// as a separate namespace from [`OWNED_PREFIX`]; both are stripped during
/// cleanup but only remoting writes under this one.
pub const REMOTE_PREFIX: &str = "RemoteMGen";

/// The persisted key for a generator-owned synced parameter.
pub fn owned_parameter_key(name: &str) -> String {
    format!("{OWNED_PREFIX}{name}")
}

/// Value kinds the avatar parameter table can persist and sync.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    Bool,
    Int,
    Float,
}

impl ParameterKind {
    /// Triggers have no synced representation, so requesting one yields no
    /// kind. Callers treat that as "feature unavailable", not an error.
    pub fn from_animator(kind: AnimatorParameterKind) -> Option<Self> {
        match kind {
            AnimatorParameterKind::Bool => Some(ParameterKind::Bool),
            AnimatorParameterKind::Int => Some(ParameterKind::Int),
            AnimatorParameterKind::Float => Some(ParameterKind::Float),
            AnimatorParameterKind::Trigger => None,
        }
    }
}

/// One entry of the avatar's persisted parameter table.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParameterKind,
    pub default: f32,
    /// Saved across sessions by the host.
    pub saved: bool,
    /// Synced over the network by the host.
    pub synced: bool,
}

/// The avatar's parameter table asset. Insertion order is preserved because
/// the host displays and budgets parameters in declaration order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ParameterTable {
    parameters: IndexMap<String, ParameterDescriptor>,
}

impl ParameterTable {
    pub fn find(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.get(name)
    }

    /// Inserting an existing name replaces the descriptor in place.
    pub fn insert(&mut self, descriptor: ParameterDescriptor) {
        self.parameters
            .insert(descriptor.name.clone(), descriptor);
    }

    /// Removal preserves the order of the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<ParameterDescriptor> {
        self.parameters.shift_remove(name)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&ParameterDescriptor) -> bool) {
        self.parameters.retain(|_, descriptor| keep(descriptor));
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.keys().map(String::as_str)
    }
}

/// Per-run reconciliation of requested parameters against the persisted
/// table. Tracks which keys this run touched (for pruning) and how many
/// descriptors had to be added or replaced.
#[derive(Debug, Default)]
pub struct ParameterRegistry {
    used: Vec<String>,
    updated: usize,
}

impl ParameterRegistry {
    /// Lookup-or-create a synced parameter under the reserved prefix.
    ///
    /// A descriptor that differs in kind, default or saved-flag is deleted
    /// and recreated, never merged; whatever value the host accumulated for
    /// the old descriptor is lost by design. An exactly matching descriptor
    /// is reused without counting as an update.
    ///
    /// The controller-side parameter is created (or its live default
    /// overridden) in the same step. With `force_float` the controller side
    /// is a float regardless of `kind`, for items that need to drive blend
    /// trees with a bool-shaped parameter.
    ///
    /// Returns `None` without mutating anything when `kind` has no synced
    /// representation.
    #[allow(clippy::too_many_arguments)]
    pub fn ensure(
        &mut self,
        table: &mut ParameterTable,
        fx: &mut AnimatorController,
        name: &str,
        saved: bool,
        kind: AnimatorParameterKind,
        default: f32,
        force_float: bool,
        synced: bool,
    ) -> Option<FxParam> {
        let synced_kind = ParameterKind::from_animator(kind)?;
        let key = owned_parameter_key(name);

        let mut update = false;
        match table.find(&key) {
            None => update = true,
            Some(existing)
                if existing.kind != synced_kind
                    || existing.default != default
                    || existing.saved != saved =>
            {
                table.remove(&key);
                update = true;
            }
            Some(_) => {}
        }

        if update {
            table.insert(ParameterDescriptor {
                name: key.clone(),
                kind: synced_kind,
                default,
                saved,
                synced,
            });
            info!("added or updated avatar parameter: {key}");
            self.updated += 1;
        }

        self.used.push(key.clone());

        let param = if force_float {
            FxParam::Float(fx.ensure_float(&key, default))
        } else {
            match synced_kind {
                ParameterKind::Bool => FxParam::Bool(fx.ensure_bool(&key, default != 0.0)),
                ParameterKind::Int => FxParam::Int(fx.ensure_int(&key, default as i32)),
                ParameterKind::Float => FxParam::Float(fx.ensure_float(&key, default)),
            }
        };
        fx.override_value(&key, default_value(&param, default));

        Some(param)
    }

    pub fn used(&self) -> &[String] {
        &self.used
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    pub fn updated_count(&self) -> usize {
        self.updated
    }

    /// Drop generator-owned table entries this run never touched.
    pub fn prune(&self, table: &mut ParameterTable) {
        table.retain(|descriptor| {
            !descriptor.name.starts_with(OWNED_PREFIX) || self.used.contains(&descriptor.name)
        });
    }
}

fn default_value(param: &FxParam, default: f32) -> AnimatorValue {
    match param {
        FxParam::Float(_) => AnimatorValue::Float(default),
        FxParam::Int(_) => AnimatorValue::Int(default as i32),
        FxParam::Bool(_) => AnimatorValue::Bool(default != 0.0),
    }
}
