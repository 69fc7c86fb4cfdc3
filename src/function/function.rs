/// Tolerance used for every "same x" and "inside the domain" decision.
pub const EPS: f64 = f64::EPSILON;

pub trait Function: Send + Sync {
    fn left_domain_border(&self) -> f64;

    fn right_domain_border(&self) -> f64;

    /// Value at `x`, or NaN where the function is undefined.
    fn value(&self, x: f64) -> f64;

    fn in_domain(&self, x: f64) -> bool {
        x >= self.left_domain_border() - EPS && x <= self.right_domain_border() + EPS
    }
}

/// Intersection `[max(left), min(right)]` of two domains, `None` when the
/// lower border exceeds the upper one by more than `EPS`.
pub fn domain_intersection(first: &dyn Function, second: &dyn Function) -> Option<(f64, f64)> {
    let left = first.left_domain_border().max(second.left_domain_border());
    let right = first.right_domain_border().min(second.right_domain_border());
    if left - right > EPS {
        None
    } else {
        Some((left, right))
    }
}
