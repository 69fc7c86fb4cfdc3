use std::sync::Arc;

use crate::function::function::Function;

/// `outer(inner(x))` on the domain of `inner`.
pub struct Composition {
    outer: Arc<dyn Function>,
    inner: Arc<dyn Function>,
}

impl Composition {
    pub fn new(outer: Arc<dyn Function>, inner: Arc<dyn Function>) -> Composition {
        Composition { outer, inner }
    }
}

impl Function for Composition {
    fn left_domain_border(&self) -> f64 {
        self.inner.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.inner.right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        if !self.in_domain(x) {
            return f64::NAN;
        }
        let inner_value = self.inner.value(x);
        if inner_value.is_nan() || !self.outer.in_domain(inner_value) {
            return f64::NAN;
        }
        self.outer.value(inner_value)
    }
}
