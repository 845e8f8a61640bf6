#![warn(
    clippy::doc_markdown,
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs
)]

#![doc = include_str!("../README.md")]

///
/// Event logs of action sequences ([`TraceStore`]) and their text import
///
pub mod event_log {
    /// [`Action`] identifiers (original and synthetic)
    pub mod action;
    /// Import of [`TraceStore`]s from line-based text logs
    pub mod import_text;
    /// Stage 0 statistics of a [`TraceStore`]
    pub mod statistics;
    /// [`TraceStore`] struct and sub-structs
    pub mod trace_store_struct;

    pub use action::{is_original_action, Action, SYNTHETIC_ACTION_START};
    pub use trace_store_struct::{Trace, TraceStore};
}

///
/// Pairwise relation matrices (support, precedence-dominance, weight)
///
pub mod relations {
    /// Building the support, precedence-dominance and weight matrices of a [`TraceStore`]
    pub mod relation_matrices;
    /// [`RelationMatrix`] struct
    pub mod relation_matrix_struct;

    #[doc(inline)]
    pub use relation_matrices::RelationMatrices;
    #[doc(inline)]
    pub use relation_matrix_struct::RelationMatrix;
}

///
/// Discovery of SEQ/CON/CHC abstractions by iterative log rewriting
///
pub mod discovery {
    /// Rewriting a [`TraceStore`] for a selected [`Pattern`]
    pub mod abstraction;
    /// [`DiscoveryConfig`] parameters
    pub mod config;
    /// Full discovery loop (sequential phase followed by the general phase)
    pub mod full;
    /// Hierarchy of discovered abstractions ([`AbstractionModel`])
    pub mod model;
    /// Scoring and selection of the next [`Pattern`]
    pub mod pattern_selection;

    #[cfg(test)]
    mod tests;
}

///
/// Presentation of discovery results
///
pub mod report {
    /// Plain text report of all discovery stages
    pub mod text_report;
}

/// Error type shared by import and discovery
pub mod error;

/// Helpers shared by the unit tests
#[cfg(test)]
mod utils;

#[doc(inline)]
pub use error::{DiscoveryError, Result};

#[doc(inline)]
pub use event_log::trace_store_struct::TraceStore;

#[doc(inline)]
pub use event_log::action::Action;

#[doc(inline)]
pub use event_log::statistics::LogStatistics;

#[doc(inline)]
pub use event_log::import_text::{
    import_text_log, import_text_log_file, import_text_log_slice, import_text_log_str,
    TextImportOptions,
};

#[doc(inline)]
pub use relations::RelationMatrices;

#[doc(inline)]
pub use relations::RelationMatrix;

#[doc(inline)]
pub use discovery::config::{DiscoveryConfig, PostAbstractionOrder};

#[doc(inline)]
pub use discovery::pattern_selection::{Pattern, RelationKind};

#[doc(inline)]
pub use discovery::full::{
    discover, discover_with_step_fn, AbstractionStep, DiscoveryPhase, DiscoveryResult,
};

#[doc(inline)]
pub use discovery::model::AbstractionModel;

#[doc(inline)]
pub use report::text_report::{export_text_report, text_report_to_string};
