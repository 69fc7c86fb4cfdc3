use std::fmt;
use std::hash::{
    Hash,
    Hasher
};

use serde::{
    Deserialize,
    Serialize
};

/// A single `(x, y)` sample.
///
/// Two points are equal when both coordinates have identical bit patterns,
/// so `0.0` and `-0.0` differ. A NaN coordinate is never equal to anything,
/// including itself.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FunctionPoint {
    x: f64,
    y: f64
}

impl FunctionPoint {
    pub fn new(x: f64, y: f64) -> FunctionPoint {
        FunctionPoint { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn with_x(&self, x: f64) -> FunctionPoint {
        FunctionPoint::new(x, self.y)
    }

    pub fn with_y(&self, y: f64) -> FunctionPoint {
        FunctionPoint::new(self.x, y)
    }
}

fn same_bits(lhs: f64, rhs: f64) -> bool {
    !lhs.is_nan() && lhs.to_bits() == rhs.to_bits()
}

impl PartialEq for FunctionPoint {
    fn eq(&self, other: &FunctionPoint) -> bool {
        same_bits(self.x, other.x) && same_bits(self.y, other.y)
    }
}

impl Hash for FunctionPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Display for FunctionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", self.x, self.y)
    }
}
