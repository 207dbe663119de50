//! Planar joint geometry over normalized landmark coordinates.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::types::Landmark;

/// Angle at vertex `b` subtended by rays `b→a` and `b→c`, in degrees.
///
/// Always in [0, 180] regardless of winding, so swapping `a` and `c`
/// gives the same result. Depth is ignored.
pub fn calculate_angle(a: &Landmark, b: &Landmark, c: &Landmark) -> f64 {
    let to_a: Vector2<f64> = a.to_point2() - b.to_point2();
    let to_c: Vector2<f64> = c.to_point2() - b.to_point2();

    let radians = to_c.y.atan2(to_c.x) - to_a.y.atan2(to_a.x);
    let angle = radians.to_degrees().abs();

    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Min/max/mean of a joint angle over a capture, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl AngleRange {
    /// Range of motion covered (max - min)
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Running min/max/sum over angle samples
#[derive(Debug, Clone, Copy)]
pub struct AngleAccumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl AngleAccumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, angle: f64) {
        self.count += 1;
        self.sum += angle;
        self.min = self.min.min(angle);
        self.max = self.max.max(angle);
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `None` when no sample was pushed
    pub fn finish(&self) -> Option<AngleRange> {
        if self.is_empty() {
            return None;
        }

        Some(AngleRange {
            min: self.min,
            max: self.max,
            avg: self.sum / self.count as f64,
        })
    }
}

impl Default for AngleAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
