//! Camera module
//!
//! Provides a simulated camera device for development and headless
//! environments. Exclusivity and permission outcomes behave like real
//! hardware so the liveness engine can be exercised end to end.

pub mod simulated;

pub use simulated::{CameraPermission, SimulatedCamera, SimulatedStream};
