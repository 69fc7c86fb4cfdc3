use std::sync::Arc;

use crate::function::function::{
    domain_intersection,
    Function
};
use crate::function::functionerror::FunctionError;

/// `f(x) * g(x)` on the intersection of both domains.
pub struct Mult {
    first: Arc<dyn Function>,
    second: Arc<dyn Function>,
    left_border: f64,
    right_border: f64,
}

impl Mult {
    pub fn new(first: Arc<dyn Function>, second: Arc<dyn Function>) -> Result<Mult, FunctionError> {
        let (left_border, right_border) = domain_intersection(first.as_ref(), second.as_ref())
            .ok_or_else(|| FunctionError::invalid_argument("factor domains do not intersect"))?;
        Ok(Mult { first, second, left_border, right_border })
    }
}

impl Function for Mult {
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
        self.first.value(x) * self.second.value(x)
    }
}
