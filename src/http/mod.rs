//! Local RPC surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request id)
//!     → storage.rs / chain.rs (decode body, call the core)
//!     → error.rs (typed error → status + JSON body)
//!     → Send to client
//! ```

pub mod chain;
pub mod error;
pub mod request;
pub mod server;
pub mod storage;

pub use error::ApiError;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, FusionServer};
