use std::sync::Arc;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;
use crate::function::meta::composition::Composition;
use crate::function::meta::mult::Mult;
use crate::function::meta::power::Power;
use crate::function::meta::scale::Scale;
use crate::function::meta::shift::Shift;
use crate::function::meta::sum::Sum;

// Shared-handle constructors for the combinators, so results can be wrapped
// again without naming the concrete types.

pub fn shift(function: Arc<dyn Function>, shift_x: f64, shift_y: f64) -> Arc<dyn Function> {
    Arc::new(Shift::new(function, shift_x, shift_y))
}

pub fn scale(function: Arc<dyn Function>, scale_x: f64, scale_y: f64) -> Result<Arc<dyn Function>, FunctionError> {
    Ok(Arc::new(Scale::new(function, scale_x, scale_y)?))
}

pub fn power(function: Arc<dyn Function>, power: f64) -> Arc<dyn Function> {
    Arc::new(Power::new(function, power))
}

pub fn sum(first: Arc<dyn Function>, second: Arc<dyn Function>) -> Result<Arc<dyn Function>, FunctionError> {
    Ok(Arc::new(Sum::new(first, second)?))
}

pub fn mult(first: Arc<dyn Function>, second: Arc<dyn Function>) -> Result<Arc<dyn Function>, FunctionError> {
    Ok(Arc::new(Mult::new(first, second)?))
}

pub fn composition(outer: Arc<dyn Function>, inner: Arc<dyn Function>) -> Arc<dyn Function> {
    Arc::new(Composition::new(outer, inner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    use crate::function::basic::exp::Exp;
    use crate::function::basic::log::Log;
    use crate::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;

    fn line(left: f64, right: f64) -> Arc<dyn Function> {
        // y = x on [left, right]
        Arc::new(ArrayTabulatedFunction::from_values(left, right, &[left, right]).unwrap())
    }

    #[test]
    fn shift_translates_domain_and_value() {
        let f = shift(line(0.0, 1.0), 2.0, 10.0);
        assert_eq!(f.left_domain_border(), 2.0);
        assert_eq!(f.right_domain_border(), 3.0);
        assert_eq!(f.value(2.5), 10.5);
        assert!(f.value(1.0).is_nan());
    }

    #[test]
    fn scale_orders_mirrored_borders() {
        let f = scale(line(1.0, 2.0), -2.0, 3.0).unwrap();
        assert_eq!(f.left_domain_border(), -4.0);
        assert_eq!(f.right_domain_border(), -2.0);
        assert_eq!(f.value(-3.0), 4.5);
        assert!(f.value(0.0).is_nan());
        assert!(matches!(scale(line(0.0, 1.0), 0.0, 1.0), Err(FunctionError::InvalidArgument(_))));
    }

    #[test]
    fn power_propagates_nan() {
        let f = power(line(0.0, 2.0), 2.0);
        assert_eq!(f.value(1.5), 2.25);
        assert!(f.value(5.0).is_nan());
        assert_eq!(f.left_domain_border(), 0.0);
    }

    #[test]
    fn mult_and_sum_use_domain_intersection() {
        let f = mult(line(0.0, 2.0), line(1.0, 3.0)).unwrap();
        assert_eq!(f.left_domain_border(), 1.0);
        assert_eq!(f.right_domain_border(), 2.0);
        assert_eq!(f.value(1.5), 2.25);
        assert!(f.value(0.5).is_nan());

        let g = sum(line(0.0, 2.0), Arc::new(Exp::new())).unwrap();
        assert_eq!(g.right_domain_border(), 2.0);
        assert_relative_eq!(g.value(1.0), 1.0 + std::f64::consts::E, epsilon = 1e-12);
    }

    #[test]
    fn disjoint_domains_are_rejected() {
        assert!(matches!(mult(line(0.0, 1.0), line(2.0, 3.0)), Err(FunctionError::InvalidArgument(_))));
        assert!(matches!(sum(line(0.0, 1.0), line(2.0, 3.0)), Err(FunctionError::InvalidArgument(_))));
        assert!(mult(line(0.0, 1.0), line(1.0, 3.0)).is_ok());
    }

    #[test]
    fn composition_checks_outer_domain() {
        let ln: Arc<dyn Function> = Arc::new(Log::natural());
        let f = composition(ln, line(-1.0, 1.0));
        assert_eq!(f.left_domain_border(), -1.0);
        assert_relative_eq!(f.value(0.5), 0.5f64.ln(), epsilon = 1e-12);
        assert!(f.value(-0.5).is_nan());

        let g = composition(line(0.0, 1.0), Arc::new(Exp::new()));
        assert!(g.value(1.0).is_nan());
        assert_eq!(g.value(0.0), 1.0);
    }
}
