//! Redirect chain data types.

use serde::Serialize;

use crate::error_handling::FailureStage;

/// One HTTP response observed while following a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectHop {
    /// URL that was requested for this hop
    pub url: String,
    /// Status code of the response
    pub status_code: u16,
}

/// Result of walking one URL's redirect chain.
///
/// Exactly one variant is produced per task. `hops` is in request order; the
/// initial request is hop 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChainOutcome {
    /// A terminal (non-redirect) response was reached.
    Resolved {
        /// URL of the terminal response
        final_url: String,
        /// Every hop, including the terminal one
        hops: Vec<RedirectHop>,
    },
    /// The walk stopped at `stage`.
    Failed {
        /// Where the walk failed
        stage: FailureStage,
        /// Human-readable, never empty
        detail: String,
        /// Hops observed before the failure
        hops: Vec<RedirectHop>,
    },
}

impl ChainOutcome {
    /// Hops recorded so far, for either variant.
    pub fn hops(&self) -> &[RedirectHop] {
        match self {
            ChainOutcome::Resolved { hops, .. } | ChainOutcome::Failed { hops, .. } => hops,
        }
    }

    /// Number of redirects actually followed (hops beyond the initial request).
    pub fn redirect_count(&self) -> usize {
        self.hops().len().saturating_sub(1)
    }

    /// Whether the chain reached a terminal response.
    #[cfg(test)]
    pub fn is_resolved(&self) -> bool {
        matches!(self, ChainOutcome::Resolved { .. })
    }

    /// Failure stage, if the walk failed.
    pub fn failure_stage(&self) -> Option<FailureStage> {
        match self {
            ChainOutcome::Failed { stage, .. } => Some(*stage),
            ChainOutcome::Resolved { .. } => None,
        }
    }
}
