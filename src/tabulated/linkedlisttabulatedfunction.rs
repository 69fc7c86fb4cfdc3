use std::fmt;
use std::hash::{
    Hash,
    Hasher
};
use std::sync::atomic::{
    AtomicU64,
    Ordering
};

use tracing::debug;

use crate::function::function::{
    Function,
    EPS
};
use crate::function::functionerror::FunctionError;
use crate::function::functionpoint::FunctionPoint;
use crate::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::tabulated::tabulatedfunction::{
    ensure_strictly_increasing,
    ensure_x_fits,
    fmt_points,
    hash_points,
    interpolated_value,
    tabulated_eq,
    uniform_grid,
    TabulatedFunction
};

// ─────────────────────────────────────────────
// Arena node
// ─────────────────────────────────────────────

/// Arena slot of the sentinel. Its `next`/`prev` are the first/last point.
const HEAD: usize = 0;

const NO_CACHE: u64 = u64::MAX;

#[derive(Debug, Clone, Copy)]
struct FunctionNode {
    point: FunctionPoint,
    prev: usize,
    next: usize,
}

// ─────────────────────────────────────────────
// Position cache
// ─────────────────────────────────────────────
//
// The last visited (arena slot, logical index) pair, packed into one word so
// that a lookup through `&self` can move it without tearing the pair.
// Structural mutation needs `&mut self` and always clears it.

fn pack_position(node: usize, index: usize) -> u64 {
    match (u32::try_from(node), u32::try_from(index)) {
        (Ok(node), Ok(index)) if node != u32::MAX => ((node as u64) << 32) | index as u64,
        _ => NO_CACHE,
    }
}

fn unpack_position(packed: u64) -> Option<(usize, usize)> {
    if packed == NO_CACHE {
        None
    } else {
        Some(((packed >> 32) as usize, (packed & u32::MAX as u64) as usize))
    }
}

/// Tabulated function stored as a circular doubly linked list.
///
/// Nodes live in an arena addressed by slot index with slot 0 as sentinel,
/// and deleted slots are recycled. Index lookups start from whichever of the
/// cached position, the head or the tail is closest, so sequential and
/// neighbouring accesses cost `O(1)` hops.
#[derive(Debug)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<FunctionNode>,
    free_slots: Vec<usize>,
    points_count: usize,
    cache: AtomicU64,
}

impl LinkedListTabulatedFunction {
    fn empty() -> LinkedListTabulatedFunction {
        let head = FunctionNode { point: FunctionPoint::default(), prev: HEAD, next: HEAD };
        LinkedListTabulatedFunction {
            nodes: vec![head],
            free_slots: Vec::new(),
            points_count: 0,
            cache: AtomicU64::new(NO_CACHE),
        }
    }

    /// `points_count` zero-valued samples evenly spread over `[left_x, right_x]`.
    pub fn new(left_x: f64, right_x: f64, points_count: usize) -> Result<LinkedListTabulatedFunction, FunctionError> {
        let mut function = LinkedListTabulatedFunction::empty();
        for x in uniform_grid(left_x, right_x, points_count)? {
            function.push_back(FunctionPoint::new(x, 0.0));
        }
        Ok(function)
    }

    pub fn from_values(left_x: f64, right_x: f64, values: &[f64]) -> Result<LinkedListTabulatedFunction, FunctionError> {
        let mut function = LinkedListTabulatedFunction::empty();
        for (x, &y) in uniform_grid(left_x, right_x, values.len())?.into_iter().zip(values.iter()) {
            function.push_back(FunctionPoint::new(x, y));
        }
        Ok(function)
    }

    pub fn from_points(points: &[FunctionPoint]) -> Result<LinkedListTabulatedFunction, FunctionError> {
        ensure_strictly_increasing(points)?;
        let mut function = LinkedListTabulatedFunction::empty();
        for &pt in points {
            function.push_back(pt);
        }
        Ok(function)
    }

    fn iter(&self) -> impl Iterator<Item = &FunctionPoint> + '_ {
        let mut current = self.nodes[HEAD].next;
        std::iter::from_fn(move || {
            if current == HEAD {
                None
            } else {
                let node = &self.nodes[current];
                current = node.next;
                Some(&node.point)
            }
        })
    }

    fn drop_cache(&self) {
        self.cache.store(NO_CACHE, Ordering::Relaxed);
    }

    fn allocate(&mut self, node: FunctionNode) -> usize {
        match self.free_slots.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Links a new node carrying `point` right before `next`.
    fn insert_before(&mut self, next: usize, point: FunctionPoint) {
        let prev = self.nodes[next].prev;
        let slot = self.allocate(FunctionNode { point, prev, next });
        self.nodes[prev].next = slot;
        self.nodes[next].prev = slot;
        self.points_count += 1;
        self.drop_cache();
    }

    fn push_back(&mut self, point: FunctionPoint) {
        self.insert_before(HEAD, point)
    }

    fn unlink(&mut self, slot: usize) {
        let FunctionNode { prev, next, .. } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free_slots.push(slot);
        self.points_count -= 1;
        self.drop_cache();
    }

    /// Arena slot of the point at `index`; `index` must be in range.
    fn node_at(&self, index: usize) -> usize {
        let from_head = index;
        let from_tail = self.points_count - 1 - index;
        let cached = unpack_position(self.cache.load(Ordering::Relaxed));
        let from_cache = cached.map_or(usize::MAX, |(_, cached_index)| cached_index.abs_diff(index));

        let (mut current, mut current_index) = match cached {
            Some(position) if from_cache <= from_head && from_cache <= from_tail => position,
            _ if from_head <= from_tail => (self.nodes[HEAD].next, 0),
            _ => (self.nodes[HEAD].prev, self.points_count - 1),
        };

        while current_index < index {
            current = self.nodes[current].next;
            current_index += 1;
        }
        while current_index > index {
            current = self.nodes[current].prev;
            current_index -= 1;
        }

        self.cache.store(pack_position(current, index), Ordering::Relaxed);
        current
    }

    fn node_by_index(&self, index: usize) -> Result<usize, FunctionError> {
        if index < self.points_count {
            Ok(self.node_at(index))
        } else {
            Err(FunctionError::IndexOutOfRange { index, count: self.points_count })
        }
    }

    fn ensure_fits(&self, slot: usize, index: usize, x: f64) -> Result<(), FunctionError> {
        let FunctionNode { prev, next, .. } = self.nodes[slot];
        let prev_x = (prev != HEAD).then(|| self.nodes[prev].point.x());
        let next_x = (next != HEAD).then(|| self.nodes[next].point.x());
        ensure_x_fits(index, x, prev_x, next_x)
    }

    #[cfg(test)]
    fn cached_index(&self) -> Option<usize> {
        unpack_position(self.cache.load(Ordering::Relaxed)).map(|(_, index)| index)
    }
}

impl Clone for LinkedListTabulatedFunction {
    fn clone(&self) -> LinkedListTabulatedFunction {
        let mut copy = LinkedListTabulatedFunction::empty();
        for &pt in self.iter() {
            copy.push_back(pt);
        }
        copy
    }
}

impl Function for LinkedListTabulatedFunction {
    fn left_domain_border(&self) -> f64 {
        self.nodes[self.nodes[HEAD].next].point.x()
    }

    fn right_domain_border(&self) -> f64 {
        self.nodes[self.nodes[HEAD].prev].point.x()
    }

    fn value(&self, x: f64) -> f64 {
        interpolated_value(self.points_count, x, |i| self.nodes[self.node_at(i)].point)
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn points_count(&self) -> usize {
        self.points_count
    }

    fn point(&self, index: usize) -> Result<FunctionPoint, FunctionError> {
        let slot = self.node_by_index(index)?;
        Ok(self.nodes[slot].point)
    }

    fn set_point(&mut self, index: usize, point: FunctionPoint) -> Result<(), FunctionError> {
        let slot = self.node_by_index(index)?;
        self.ensure_fits(slot, index, point.x())?;
        self.nodes[slot].point = point;
        Ok(())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), FunctionError> {
        let slot = self.node_by_index(index)?;
        self.ensure_fits(slot, index, x)?;
        self.nodes[slot].point = self.nodes[slot].point.with_x(x);
        Ok(())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), FunctionError> {
        let slot = self.node_by_index(index)?;
        self.nodes[slot].point = self.nodes[slot].point.with_y(y);
        Ok(())
    }

    fn add_point(&mut self, point: FunctionPoint) -> Result<(), FunctionError> {
        if !point.x().is_finite() {
            return Err(FunctionError::invalid_argument(format!("cannot insert a point with x = {}", point.x())));
        }
        let mut index = 0;
        let mut current = self.nodes[HEAD].next;
        while current != HEAD && self.nodes[current].point.x() < point.x() - EPS {
            current = self.nodes[current].next;
            index += 1;
        }
        if current != HEAD && (self.nodes[current].point.x() - point.x()).abs() <= EPS {
            return Err(FunctionError::DuplicatePoint(point.x()));
        }
        self.insert_before(current, point);
        debug!(index, x = point.x(), count = self.points_count, "inserted point");
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), FunctionError> {
        let slot = self.node_by_index(index)?;
        if self.points_count < 3 {
            return Err(FunctionError::invariant_violation(
                "a tabulated function must keep at least two points",
            ));
        }
        self.unlink(slot);
        debug!(index, count = self.points_count, "deleted point");
        Ok(())
    }

    fn points(&self) -> Vec<FunctionPoint> {
        self.iter().copied().collect()
    }
}

impl PartialEq for LinkedListTabulatedFunction {
    fn eq(&self, other: &LinkedListTabulatedFunction) -> bool {
        self.points_count == other.points_count && self.iter().eq(other.iter())
    }
}

impl PartialEq<ArrayTabulatedFunction> for LinkedListTabulatedFunction {
    fn eq(&self, other: &ArrayTabulatedFunction) -> bool {
        tabulated_eq(self, other)
    }
}

impl Hash for LinkedListTabulatedFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_points(self.points_count, self.iter(), state);
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_points(self.iter(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LinkedListTabulatedFunction {
        LinkedListTabulatedFunction::from_values(0.0, 4.0, &[0.0, 1.0, 4.0, 9.0, 16.0]).unwrap()
    }

    #[test]
    fn lookups_move_the_cache_and_mutation_clears_it() {
        let mut f = sample();
        assert_eq!(f.cached_index(), None);
        assert_eq!(f.point_y(2).unwrap(), 4.0);
        assert_eq!(f.cached_index(), Some(2));
        assert_eq!(f.point_y(3).unwrap(), 9.0);
        assert_eq!(f.cached_index(), Some(3));

        f.add_point(FunctionPoint::new(2.5, 6.0)).unwrap();
        assert_eq!(f.cached_index(), None);
        assert_eq!(f.point_y(3).unwrap(), 6.0);
        assert_eq!(f.point_y(4).unwrap(), 9.0);

        f.delete_point(3).unwrap();
        assert_eq!(f.cached_index(), None);
        assert_eq!(f.point_y(3).unwrap(), 9.0);
    }

    #[test]
    fn sequential_scan_after_mutation_sees_shifted_indices() {
        let mut f = sample();
        for i in 0..f.points_count() {
            f.point(i).unwrap();
        }
        f.delete_point(0).unwrap();
        let xs: Vec<f64> = (0..f.points_count()).map(|i| f.point_x(i).unwrap()).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0, 4.0]);
        f.add_point(FunctionPoint::new(-1.0, 1.0)).unwrap();
        let xs: Vec<f64> = (0..f.points_count()).rev().map(|i| f.point_x(i).unwrap()).collect();
        assert_eq!(xs, vec![4.0, 3.0, 2.0, 1.0, -1.0]);
    }

    #[test]
    fn deleted_slots_are_reused() {
        let mut f = sample();
        f.delete_point(1).unwrap();
        f.add_point(FunctionPoint::new(0.5, 0.25)).unwrap();
        assert_eq!(f.nodes.len(), 6);
        assert_eq!(f.points_count(), 5);
        assert_eq!(f.point(1).unwrap(), FunctionPoint::new(0.5, 0.25));
    }

    #[test]
    fn add_point_handles_both_ends_and_duplicates() {
        let mut f = sample();
        f.add_point(FunctionPoint::new(10.0, 1.0)).unwrap();
        f.add_point(FunctionPoint::new(-10.0, 1.0)).unwrap();
        assert_eq!(f.left_domain_border(), -10.0);
        assert_eq!(f.right_domain_border(), 10.0);
        assert!(matches!(
            f.add_point(FunctionPoint::new(2.0 + EPS / 2.0, 0.0)),
            Err(FunctionError::DuplicatePoint(_))
        ));
    }

    #[test]
    fn set_point_x_checks_neighbours() {
        let mut f = sample();
        f.set_point_x(0, -1.0).unwrap();
        assert!(matches!(f.set_point_x(1, 2.0), Err(FunctionError::OverlapViolation { index: 1, .. })));
        assert!(matches!(f.set_point(4, FunctionPoint::new(3.0, 0.0)), Err(FunctionError::OverlapViolation { .. })));
        assert!(matches!(f.set_point_x(5, 9.0), Err(FunctionError::IndexOutOfRange { .. })));
    }

    #[test]
    fn value_matches_interpolation() {
        let f = sample();
        assert_eq!(f.value(3.0), 9.0);
        assert_eq!(f.value(3.5), 12.5);
        assert!(f.value(4.5).is_nan());
    }

    #[test]
    fn clone_is_deep_and_starts_without_cache() {
        let mut f = sample();
        f.point(3).unwrap();
        let copy = f.clone();
        assert_eq!(copy.cached_index(), None);
        f.set_point_y(3, -1.0).unwrap();
        assert_eq!(copy.point_y(3).unwrap(), 9.0);
        assert_ne!(f, copy);
    }

    #[test]
    fn delete_point_stops_at_two() {
        let mut f = LinkedListTabulatedFunction::new(0.0, 1.0, 3).unwrap();
        f.delete_point(2).unwrap();
        assert!(matches!(f.delete_point(1), Err(FunctionError::InvariantViolation(_))));
        assert_eq!(f.right_domain_border(), 0.5);
    }
}
