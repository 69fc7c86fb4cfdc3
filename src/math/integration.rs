use tracing::debug;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;

/// Trapezoidal integral of `function` over `[left_x, right_x]`.
///
/// Walks `floor((right_x - left_x) / step)` full steps from `left_x`, then
/// one partial step up to `right_x`. Nodes are computed as
/// `left_x + i * step` and clamped to `right_x`, so both borders are
/// evaluated and no node leaves the segment through accumulated rounding.
pub fn integrate(function: &dyn Function, left_x: f64, right_x: f64, step: f64) -> Result<f64, FunctionError> {
    if !(step > 0.0) {
        return Err(FunctionError::invalid_argument(format!("step must be positive, got {}", step)));
    }
    if !(right_x >= left_x) {
        return Err(FunctionError::invalid_argument(format!(
            "right border {} is less than left border {}",
            right_x, left_x
        )));
    }
    if left_x < function.left_domain_border() || right_x > function.right_domain_border() {
        return Err(FunctionError::invalid_argument(format!(
            "segment [{}, {}] is outside the function domain [{}, {}]",
            left_x,
            right_x,
            function.left_domain_border(),
            function.right_domain_border()
        )));
    }

    let length = right_x - left_x;
    if length == 0.0 {
        return Ok(0.0);
    }

    let full_steps = (length / step).floor() as usize;
    let mut x = left_x;
    let mut y = function.value(x);
    let mut result = 0.0;

    for i in 1..=full_steps {
        let x_next = (left_x + step * i as f64).min(right_x);
        let y_next = function.value(x_next);
        result += (y + y_next) / 2.0 * (x_next - x);
        x = x_next;
        y = y_next;
    }

    let remainder = right_x - x;
    if remainder > 0.0 {
        let y_last = function.value(right_x);
        result += (y + y_last) / 2.0 * remainder;
    }

    debug!(left_x, right_x, step, full_steps, result, "integrated");
    Ok(result)
}
