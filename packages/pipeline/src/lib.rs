//! # Blueprint Pipeline
//!
//! The three mandatory generation stages run in strict sequence over a
//! single-slot run register: system model, technical architecture, then the
//! compiled agent workspace. Completed runs are recorded through the project
//! repository; failed runs keep their partial result for diagnostics until
//! reset. The in-app console queries the register read-only.

pub mod console;
pub mod error;
pub mod orchestrator;
pub mod stages;

pub use console::{run_command, ConsoleCommand, ConsoleEffect, ConsoleOutput};
pub use error::{OrchestratorResult, PipelineError};
pub use orchestrator::{PipelineOrchestrator, PipelineSnapshot};
pub use stages::{derive_architecture, derive_system_model, derive_workspace};
