use std::cmp::Ordering;
use std::fmt;
use std::hash::Hasher;
use std::hash::Hash;

use serde::{
    Deserialize,
    Serialize
};

use crate::function::function::{
    Function,
    EPS
};
use crate::function::functionerror::FunctionError;
use crate::function::functionpoint::FunctionPoint;
use crate::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;

/// A function given by a finite sequence of samples ordered by strictly
/// increasing x, linearly interpolated in between.
///
/// Every implementation keeps at least two points, and the domain borders
/// are always the x of the first and the last point. Getters return copies;
/// setters take copies.
pub trait TabulatedFunction: Function {
    fn points_count(&self) -> usize;

    fn point(&self, index: usize) -> Result<FunctionPoint, FunctionError>;

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), FunctionError>;

    fn point_x(&self, index: usize) -> Result<f64, FunctionError> {
        self.point(index).map(|pt| pt.x())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), FunctionError> {
        let pt = self.point(index)?;
        self.set_point(index, pt.with_x(x))
    }

    fn point_y(&self, index: usize) -> Result<f64, FunctionError> {
        self.point(index).map(|pt| pt.y())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        let pt = self.point(index)?;
        self.set_point(index, pt.with_y(y))
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<(), FunctionError>;

    fn delete_point(&mut self, index: usize) -> Result<(), FunctionError>;

    fn points(&self) -> Vec<FunctionPoint> {
        (0..self.points_count())
            .filter_map(|i| self.point(i).ok())
            .collect()
    }
}

// ─────────────────────────────────────────────
// StorageKind
// ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageKind {
    #[default]
    Array,
    LinkedList,
}

impl StorageKind {
    pub fn create_from_points(&self, points: &[FunctionPoint]) -> Result<Box<dyn TabulatedFunction>, FunctionError> {
        Ok(match self {
            StorageKind::Array => Box::new(ArrayTabulatedFunction::from_points(points)?),
            StorageKind::LinkedList => Box::new(LinkedListTabulatedFunction::from_points(points)?),
        })
    }

    pub fn create_from_values(&self, left_x: f64, right_x: f64, values: &[f64]) -> Result<Box<dyn TabulatedFunction>, FunctionError> {
        Ok(match self {
            StorageKind::Array => Box::new(ArrayTabulatedFunction::from_values(left_x, right_x, values)?),
            StorageKind::LinkedList => Box::new(LinkedListTabulatedFunction::from_values(left_x, right_x, values)?),
        })
    }
}

// ─────────────────────────────────────────────
// Shared helpers for both stores
// ─────────────────────────────────────────────

/// Evenly spaced abscissas over `[left_x, right_x]`, each more than `EPS`
/// away from its neighbours.
pub(crate) fn uniform_grid(left_x: f64, right_x: f64, points_count: usize) -> Result<Vec<f64>, FunctionError> {
    if !left_x.is_finite() || !right_x.is_finite() {
        return Err(FunctionError::invalid_argument(format!(
            "borders must be finite, got [{}, {}]",
            left_x, right_x
        )));
    }
    if !(right_x - left_x > EPS) {
        return Err(FunctionError::invalid_argument(format!(
            "left border {} must be smaller than right border {}",
            left_x, right_x
        )));
    }
    if points_count < 2 {
        return Err(FunctionError::invariant_violation(
            "a tabulated function requires at least two points",
        ));
    }
    let step = (right_x - left_x) / (points_count - 1) as f64;
    let grid: Vec<f64> = (0..points_count).map(|i| left_x + step * i as f64).collect();
    if grid.windows(2).any(|pair| !(pair[1] - pair[0] > EPS)) {
        return Err(FunctionError::invalid_argument(format!(
            "{} points are too dense for [{}, {}]",
            points_count, left_x, right_x
        )));
    }
    Ok(grid)
}

pub(crate) fn ensure_strictly_increasing(points: &[FunctionPoint]) -> Result<(), FunctionError> {
    if points.len() < 2 {
        return Err(FunctionError::invariant_violation(
            "a tabulated function requires at least two points",
        ));
    }
    if let Some(pt) = points.iter().find(|pt| !pt.x().is_finite()) {
        return Err(FunctionError::invalid_argument(format!("x must be finite, got {}", pt.x())));
    }
    for (i, pair) in points.windows(2).enumerate() {
        if !(pair[1].x() - pair[0].x() > EPS) {
            return Err(FunctionError::invariant_violation(format!(
                "points must be strictly increasing by x (index {})",
                i + 1
            )));
        }
    }
    Ok(())
}

/// Checks that `x` keeps strict order with the neighbours of `index`.
pub(crate) fn ensure_x_fits(
    index: usize,
    x: f64,
    prev_x: Option<f64>,
    next_x: Option<f64>,
) -> Result<(), FunctionError> {
    if !x.is_finite() {
        return Err(FunctionError::invalid_argument(format!("x must be finite, got {}", x)));
    }
    let overlaps_prev = prev_x.is_some_and(|prev| !(x - prev > EPS));
    let overlaps_next = next_x.is_some_and(|next| !(next - x > EPS));
    if overlaps_prev || overlaps_next {
        Err(FunctionError::OverlapViolation { index, x })
    } else {
        Ok(())
    }
}

/// Binary search over sorted abscissas: `Ok(i)` when `x_at(i)` lies within
/// `EPS` of `x`, otherwise `Err(i)` with the insertion index.
pub(crate) fn search_x(points_count: usize, x: f64, x_at: impl Fn(usize) -> f64) -> Result<usize, usize> {
    let mut low = 0;
    let mut high = points_count;
    while low < high {
        let mid = low + (high - low) / 2;
        let mid_x = x_at(mid);
        let ordering = if (mid_x - x).abs() <= EPS {
            Ordering::Equal
        } else if mid_x < x {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        match ordering {
            Ordering::Equal => return Ok(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    Err(low)
}

/// Point evaluation shared by both stores: NaN outside the domain, the
/// stored y on a sample, linear interpolation otherwise.
pub(crate) fn interpolated_value(
    points_count: usize,
    x: f64,
    point_at: impl Fn(usize) -> FunctionPoint,
) -> f64 {
    let left = point_at(0).x();
    let right = point_at(points_count - 1).x();
    if x.is_nan() || x < left - EPS || x > right + EPS {
        return f64::NAN;
    }
    match search_x(points_count, x, |i| point_at(i).x()) {
        Ok(i) => point_at(i).y(),
        Err(i) => {
            let i = i.clamp(1, points_count - 1);
            interpolate(&point_at(i - 1), &point_at(i), x)
        }
    }
}

fn interpolate(lhs_pt: &FunctionPoint, rhs_pt: &FunctionPoint, x: f64) -> f64 {
    let k = (x - lhs_pt.x()) / (rhs_pt.x() - lhs_pt.x());
    lhs_pt.y() + k * (rhs_pt.y() - lhs_pt.y())
}

/// Point-by-point equality across storage strategies.
pub fn tabulated_eq(lhs: &dyn TabulatedFunction, rhs: &dyn TabulatedFunction) -> bool {
    lhs.points_count() == rhs.points_count()
        && lhs.points().iter().zip(rhs.points().iter()).all(|(l, r)| l == r)
}

pub(crate) fn hash_points<'a, H: Hasher>(
    points_count: usize,
    points: impl Iterator<Item = &'a FunctionPoint>,
    state: &mut H,
) {
    points_count.hash(state);
    for pt in points {
        pt.hash(state);
    }
}

pub(crate) fn fmt_points<'a>(
    points: impl Iterator<Item = &'a FunctionPoint>,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, pt) in points.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", pt)?;
    }
    write!(f, "}}")
}
