//! Redirect outcome classification.
//!
//! `classify()` is a pure function from (original URL, chain outcome) to one of
//! three categories. Domains are compared at the registrable level, so a
//! redirect between two subdomains of the same registrable domain is always
//! same-domain, even though the hostnames differ.

use serde::Serialize;
use url::Url;

use crate::domain::{domain_of_url, same_registrable_domain};
use crate::error_handling::FailureStage;
use crate::fetch::ChainOutcome;

/// Outcome category of one URL task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Classification {
    /// The chain ends on a different registrable domain (potential open redirect).
    CrossDomain {
        /// Registrable domain of the original URL
        initial_domain: String,
        /// Registrable domain of the final URL
        final_domain: String,
        /// URL of the terminal response
        final_url: String,
        /// Redirects followed
        hop_count: usize,
    },
    /// The chain stays on the original registrable domain (or never redirected).
    SameDomain {
        /// Registrable domain shared by original and final URL
        domain: String,
        /// URL of the terminal response
        final_url: String,
        /// Redirects followed, 0 if none
        hop_count: usize,
    },
    /// The task failed.
    Invalid {
        /// Where it failed
        stage: FailureStage,
        /// Human-readable detail, never empty
        detail: String,
    },
}

/// The three output categories, for counting and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// See [`Classification::CrossDomain`]
    CrossDomain,
    /// See [`Classification::SameDomain`]
    SameDomain,
    /// See [`Classification::Invalid`]
    Invalid,
}

impl Classification {
    /// Category without the payload.
    pub fn category(&self) -> Category {
        match self {
            Classification::CrossDomain { .. } => Category::CrossDomain,
            Classification::SameDomain { .. } => Category::SameDomain,
            Classification::Invalid { .. } => Category::Invalid,
        }
    }

    /// Redirects followed; 0 for invalid results.
    pub fn hop_count(&self) -> usize {
        match self {
            Classification::CrossDomain { hop_count, .. }
            | Classification::SameDomain { hop_count, .. } => *hop_count,
            Classification::Invalid { .. } => 0,
        }
    }
}

/// Classifies a chain outcome.
///
/// # Arguments
///
/// * `original_url` - The URL exactly as it was handed to the resolver
/// * `outcome` - What the resolver produced for it
///
/// Deterministic and side-effect free: the same inputs always give the same
/// classification.
pub fn classify(original_url: &str, outcome: &ChainOutcome) -> Classification {
    let final_url = match outcome {
        ChainOutcome::Failed { stage, detail, .. } => {
            return invalid(*stage, non_empty(detail, *stage));
        }
        ChainOutcome::Resolved { final_url, .. } => final_url,
    };

    let hop_count = outcome.redirect_count();

    let original = match Url::parse(original_url) {
        Ok(url) => url,
        Err(e) => {
            return invalid(
                FailureStage::InvalidUrl,
                format!("Invalid URL '{}': {}", original_url, e),
            )
        }
    };
    let initial_domain = match domain_of_url(&original) {
        Ok(domain) => domain,
        Err(e) => return invalid(FailureStage::InvalidHost, e.to_string()),
    };

    if hop_count == 0 {
        return Classification::SameDomain {
            domain: initial_domain,
            final_url: final_url.clone(),
            hop_count: 0,
        };
    }

    let final_domain = match Url::parse(final_url) {
        Ok(url) => match domain_of_url(&url) {
            Ok(domain) => domain,
            Err(e) => return invalid(FailureStage::InvalidHost, e.to_string()),
        },
        Err(e) => {
            return invalid(
                FailureStage::InvalidHost,
                format!("Final URL '{}' could not be parsed: {}", final_url, e),
            )
        }
    };

    if same_registrable_domain(&initial_domain, &final_domain) {
        Classification::SameDomain {
            domain: initial_domain,
            final_url: final_url.clone(),
            hop_count,
        }
    } else {
        Classification::CrossDomain {
            initial_domain,
            final_domain,
            final_url: final_url.clone(),
            hop_count,
        }
    }
}

fn invalid(stage: FailureStage, detail: String) -> Classification {
    Classification::Invalid { stage, detail }
}

fn non_empty(detail: &str, stage: FailureStage) -> String {
    if detail.trim().is_empty() {
        stage.description().to_string()
    } else {
        detail.to_string()
    }
}
