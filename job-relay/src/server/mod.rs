//! HTTP surface: `/webhook` for inbound updates and `/worker` for scheduled passes.

pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
