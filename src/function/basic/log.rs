use crate::function::function::{
    Function,
    EPS
};
use crate::function::functionerror::FunctionError;

/// Logarithm to an arbitrary base, defined for `x > 0`.
#[derive(Debug, Clone, Copy)]
pub struct Log {
    base: f64,
}

impl Log {
    pub fn new(base: f64) -> Result<Log, FunctionError> {
        if !(base > 0.0) || (base - 1.0).abs() <= EPS {
            return Err(FunctionError::invalid_argument(format!(
                "log base must be positive and not equal to 1, got {}",
                base
            )));
        }
        Ok(Log { base })
    }

    pub fn natural() -> Log {
        Log { base: std::f64::consts::E }
    }

    pub fn base(&self) -> f64 {
        self.base
    }
}

impl Function for Log {
    fn left_domain_border(&self) -> f64 {
        // smallest positive subnormal
        f64::from_bits(1)
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        if !(x > 0.0) {
            return f64::NAN;
        }
        x.ln() / self.base.ln()
    }
}
