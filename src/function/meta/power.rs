use std::sync::Arc;

use crate::function::function::Function;

/// `f(x)^power` on the domain of `f`.
pub struct Power {
    function: Arc<dyn Function>,
    power: f64,
}

impl Power {
    pub fn new(function: Arc<dyn Function>, power: f64) -> Power {
        Power { function, power }
    }
}

impl Function for Power {
    fn left_domain_border(&self) -> f64 {
        self.function.left_domain_border()
    }

    fn right_domain_border(&self) -> f64 {
        self.function.right_domain_border()
    }

    fn value(&self, x: f64) -> f64 {
        let base = self.function.value(x);
        if base.is_nan() {
            return f64::NAN;
        }
        base.powf(self.power)
    }
}
