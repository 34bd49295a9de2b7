//! # Blueprint Analyzers
//!
//! Auxiliary AI analyzers: independent async operations over project data.
//! Each call is side-effect-free beyond the network and shares no state with
//! the pipeline; callers decide whether a failure is fatal or merely logged.

pub mod architect;
pub mod brainstorm;
pub mod estimation;
pub mod marketing;
pub mod rebuild;
pub mod refinement;

pub use architect::ask_architect;
pub use brainstorm::brainstorm_features;
pub use estimation::estimate_effort;
pub use marketing::marketing_strategy;
pub use rebuild::analyze_existing_product;
pub use refinement::refine_component;
