//! # Motion-Core
//!
//! Core types and utilities for the MotionCare exercise form analysis
//! system: pose landmarks in the 33-point body topology, captured frames,
//! exercise descriptors and the joint-angle geometry shared by every
//! downstream crate.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
