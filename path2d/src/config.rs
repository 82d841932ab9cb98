use serde::Deserialize;

/// What a replay does with a close path that has no open subpath, i.e. a
/// second `Z` without a move in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosePolicy {
    /// Skip the segment without touching the surface.
    #[default]
    Ignore,
    /// Stop the replay with [`ReplayError::CloseWithoutSubpath`](crate::ReplayError).
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReplayConfig {
    pub close_policy: ClosePolicy,
}

impl ReplayConfig {
    pub fn strict() -> Self {
	ReplayConfig { close_policy: ClosePolicy::Error }
    }
}
