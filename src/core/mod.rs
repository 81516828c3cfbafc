//! Core library modules for transroute
//!
//! This module contains the internal implementation details of the transroute
//! library.

pub mod advisor;
pub mod error;
pub mod features;
pub mod geo;
pub mod geocode;
pub mod loader;
pub mod planner;
pub mod provider;
pub mod route;
pub mod session;
pub mod settle;
pub mod vehicle;

// Re-export main types for internal use
pub use self::error::{Error, Result};
pub use self::planner::RoutePlanner;
