//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Dial EVM chains → Build storage → Bind listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight requests → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - The EVM registry is complete before the listener binds, so handlers
//!   only ever see a read-only client map
//! - Any startup error is fatal

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
