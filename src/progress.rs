//! Stage-completion events for one pipeline run
//!
//! Events fire when a stage actually starts and finishes; there is no
//! simulated progress. Callers that do not track progress pass [`NoProgress`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveAssets,
    WriteManifests,
    Package,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::ResolveAssets, Stage::WriteManifests, Stage::Package];

    pub fn describe(&self) -> &'static str {
        match self {
            Stage::ResolveAssets => "resolving web assets",
            Stage::WriteManifests => "writing project manifests",
            Stage::Package => "packaging downloadable archive",
        }
    }
}

pub trait ProgressSink {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_completed(&self, _stage: Stage) {}
}

/// Sink that ignores all events.
pub struct NoProgress;

impl ProgressSink for NoProgress {}
