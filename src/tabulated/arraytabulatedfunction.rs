use std::fmt;
use std::hash::{
    Hash,
    Hasher
};

use tracing::debug;

use crate::function::function::Function;
use crate::function::functionerror::FunctionError;
use crate::function::functionpoint::FunctionPoint;
use crate::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::tabulated::tabulatedfunction::{
    ensure_strictly_increasing,
    ensure_x_fits,
    fmt_points,
    hash_points,
    interpolated_value,
    search_x,
    tabulated_eq,
    uniform_grid,
    TabulatedFunction
};

/// Tabulated function stored in a contiguous, sorted buffer.
///
/// Insertion locates its slot by binary search (`O(log n)` comparisons) and
/// shifts the tail (`O(n)` moves). The buffer grows geometrically.
#[derive(Debug, Clone)]
pub struct ArrayTabulatedFunction {
    points: Vec<FunctionPoint>
}

impl ArrayTabulatedFunction {
    /// `points_count` zero-valued samples evenly spread over `[left_x, right_x]`.
    pub fn new(left_x: f64, right_x: f64, points_count: usize) -> Result<ArrayTabulatedFunction, FunctionError> {
        let points = uniform_grid(left_x, right_x, points_count)?
            .into_iter()
            .map(|x| FunctionPoint::new(x, 0.0))
            .collect();
        Ok(ArrayTabulatedFunction { points })
    }

    pub fn from_values(left_x: f64, right_x: f64, values: &[f64]) -> Result<ArrayTabulatedFunction, FunctionError> {
        let points = uniform_grid(left_x, right_x, values.len())?
            .into_iter()
            .zip(values.iter())
            .map(|(x, &y)| FunctionPoint::new(x, y))
            .collect();
        Ok(ArrayTabulatedFunction { points })
    }

    pub fn from_points(points: &[FunctionPoint]) -> Result<ArrayTabulatedFunction, FunctionError> {
        ensure_strictly_increasing(points)?;
        Ok(ArrayTabulatedFunction { points: points.to_vec() })
    }

    fn check_index(&self, index: usize) -> Result<(), FunctionError> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(FunctionError::IndexOutOfRange { index, count: self.points.len() })
        }
    }

    fn ensure_fits(&self, index: usize, x: f64) -> Result<(), FunctionError> {
        let prev_x = index.checked_sub(1).map(|i| self.points[i].x());
        let next_x = self.points.get(index + 1).map(|pt| pt.x());
        ensure_x_fits(index, x, prev_x, next_x)
    }
}

impl Function for ArrayTabulatedFunction {
    fn left_domain_border(&self) -> f64 {
        self.points[0].x()
    }

    fn right_domain_border(&self) -> f64 {
        self.points[self.points.len() - 1].x()
    }

    fn value(&self, x: f64) -> f64 {
        interpolated_value(self.points.len(), x, |i| self.points[i])
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn points_count(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> Result<FunctionPoint, FunctionError> {
        self.check_index(index)?;
        Ok(self.points[index])
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), FunctionError> {
        self.check_index(index)?;
        self.ensure_fits(index, point.x())?;
        self.points[index] = point;
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        self.check_index(index)?;
        self.points[index] = self.points[index].with_y(y);
        Ok(())
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<(), FunctionError> {
        if !point.x().is_finite() {
            return Err(FunctionError::invalid_argument(format!("cannot insert a point with x = {}", point.x())));
        }
        match search_x(self.points.len(), point.x(), |i| self.points[i].x()) {
            Ok(_) => Err(FunctionError::DuplicatePoint(point.x())),
            Err(index) => {
                if self.points.len() == self.points.capacity() {
                    self.points.reserve(self.points.len());
                }
                self.points.insert(index, point);
                debug!(index, x = point.x(), count = self.points.len(), "inserted point");
                Ok(())
            }
        }
    }

    fn delete_point(&mut self, index: usize) -> Result<(), FunctionError> {
        self.check_index(index)?;
        if self.points.len() < 3 {
            return Err(FunctionError::invariant_violation(
                "a tabulated function must keep at least two points",
            ));
        }
        self.points.remove(index);
        debug!(index, count = self.points.len(), "deleted point");
        Ok(())
    }

    fn points(&self) -> Vec<FunctionPoint> {
        self.points.clone()
    }
}

impl PartialEq for ArrayTabulatedFunction {
    fn eq(&self, other: &ArrayTabulatedFunction) -> bool {
        self.points == other.points
    }
}

impl PartialEq<LinkedListTabulatedFunction> for ArrayTabulatedFunction {
    fn eq(&self, other: &LinkedListTabulatedFunction) -> bool {
        tabulated_eq(self, other)
    }
}

impl Hash for ArrayTabulatedFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_points(self.points.len(), self.points.iter(), state);
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(self.points.iter(), f)
    }
}
