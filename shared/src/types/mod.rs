//! Type definitions shared by the API layer
//!
//! - `response` - action result envelope and health check payload

pub mod response;

// Re-export commonly used types at module level
pub use response::{ActionResult, HealthResponse, HealthStatus};
