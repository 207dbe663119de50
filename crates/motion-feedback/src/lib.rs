//! # Motion-Feedback
//!
//! Exercise form feedback built on top of the pose metrics record.
//!
//! ## Flow
//!
//! ```text
//! Landmark history + exercise
//!     ↓
//! [compute_metrics]  (empty history → canned "no pose data" feedback)
//!     ↓
//! FormAnalysisRequest { metrics, plan, injury }
//!     ↓
//! [FormScorer]  heuristic, or remote LLM through a TextGenerator
//!     ↓ raw text
//! [parse_feedback]  (unparseable → typed tracking default)
//!     ↓
//! FormAnalysis
//! ```

pub mod feedback;
pub mod generator;
pub mod heuristic;
pub mod parse;
pub mod request;
pub mod scorer;
pub mod service;

pub use feedback::*;
pub use generator::*;
pub use heuristic::*;
pub use parse::*;
pub use request::*;
pub use scorer::*;
pub use service::*;
