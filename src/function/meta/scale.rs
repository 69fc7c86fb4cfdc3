use std::sync::Arc;

use crate::function::function::{
    Function,
    EPS
};
use crate::function::functionerror::FunctionError;

/// `scale_y * f(x / scale_x)`.
///
/// The domain is stretched by `scale_x`; a negative factor mirrors it, so the
/// borders are reordered.
pub struct Scale {
    function: Arc<dyn Function>,
    scale_x: f64,
    scale_y: f64,
    left_border: f64,
    right_border: f64,
}

impl Scale {
    pub fn new(function: Arc<dyn Function>, scale_x: f64, scale_y: f64) -> Result<Scale, FunctionError> {
        if !(scale_x.abs() > EPS) {
            return Err(FunctionError::invalid_argument(format!(
                "x scale factor must be non-zero, got {}",
                scale_x
            )));
        }
        let scaled_left = function.left_domain_border() * scale_x;
        let scaled_right = function.right_domain_border() * scale_x;
        Ok(Scale {
            function,
            scale_x,
            scale_y,
            left_border: scaled_left.min(scaled_right),
            right_border: scaled_left.max(scaled_right),
        })
    }
}

impl Function for Scale {
    fn left_domain_border(&self) -> f64 {
        self.left_border
    }

    fn right_domain_border(&self) -> f64 {
        self.right_border
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        self.scale_y * self.function.value(x / self.scale_x)
    }
}
