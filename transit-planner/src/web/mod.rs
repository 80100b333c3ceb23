//! Web layer for the transit planner.
//!
//! Provides one HTTP endpoint per reduction. Requests carry the whole
//! problem instance as JSON; nothing is stored between requests.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
