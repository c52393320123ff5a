use thiserror::Error;

/// A fault raised by an external generation hook. Hooks run with the same
/// trust level as the core, so the orchestrator does not insulate them: a
/// hook fault aborts the run like any other generation fault.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HookError(pub String);
