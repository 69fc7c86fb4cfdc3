use crate::function::function::Function;

/// `e^x` over the whole real line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exp;

impl Exp {
    pub fn new() -> Exp {
        Exp
    }
}

impl Function for Exp {
    fn left_domain_border(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn right_domain_border(&self) -> f64 {
        f64::INFINITY
    }

    fn value(&self, x: f64) -> f64 {
        x.exp()
    }
}
