//! # undo-stress
//!
//! Multi-actor stress launcher for a collaborative editor's undo/redo engine.
//!
//! The engine itself is a black box reached through an external actor
//! executable. This crate:
//! - Builds the actor executable ([`build_step`])
//! - Provisions one shared [`DocumentId`](undo_stress_types::DocumentId) per run
//! - Opens the viewer on that document ([`viewer`])
//! - Starts N actor processes at once and waits for all of them ([`fleet`], [`actor`])
//! - Reports per-actor and total wall-clock time ([`report`])
//!
//! ## Architecture
//!
//! ```text
//!              ┌──────────────┐
//!              │    Fleet     │── provision ──► DocumentId
//!              └──────┬───────┘── viewer ─────► <base>/index.html?file=<id>
//!        ┌────────────┼────────────┐
//!        ▼            ▼            ▼
//!   actor 0 <id>  actor 1 <id>  actor N-1 <id>
//!        │            │            │
//!        └──── mpsc ──┴── mpsc ────┘
//!                     ▼
//!               FleetSummary
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod actor;
pub mod build_step;
pub mod config;
pub mod error;
pub mod fleet;
pub mod report;
pub mod viewer;

pub use actor::{ActorError, ActorLauncher, MockLauncher, ProcessLauncher};
pub use config::{Config, ConfigError};
pub use error::StressError;
pub use fleet::{Fleet, FleetConfig};
