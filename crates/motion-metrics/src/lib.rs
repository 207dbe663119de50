//! # Motion-Metrics
//!
//! Pose metrics extraction for exercise form analysis.
//!
//! A capture session produces a time-ordered history of 33-point landmark
//! frames. [`compute_metrics`] reduces that history in a single pass to a
//! flat [`MetricsRecord`]:
//!
//! - **Joint angles**: knee, elbow, hip, wrist and ankle angles per frame,
//!   summarised as min/max/avg ranges
//! - **Movement totals**: cumulative frame-to-frame displacement of the
//!   bilateral landmark pairs (shoulders, elbows, knees, wrists, ankles)
//! - **Aggregates**: body stability from horizontal hip sway and movement
//!   score, both normalized per frame
//!
//! All values stay in normalized image-space units.

pub mod joints;
pub mod metrics;

pub use joints::*;
pub use metrics::*;
