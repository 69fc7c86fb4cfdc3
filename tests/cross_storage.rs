//! Array-backed and linked-list-backed tabulated functions must be
//! indistinguishable from the outside.

use std::collections::hash_map::DefaultHasher;
use std::hash::{
    Hash,
    Hasher
};

use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng
};

use tabfunc::function::function::Function;
use tabfunc::function::functionerror::FunctionError;
use tabfunc::function::functionpoint::FunctionPoint;
use tabfunc::tabulated::arraytabulatedfunction::ArrayTabulatedFunction;
use tabfunc::tabulated::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfunc::tabulated::tabulatedfunction::{
    tabulated_eq,
    StorageKind,
    TabulatedFunction
};

fn random_points(rng: &mut StdRng, count: usize) -> Vec<FunctionPoint> {
    let mut x = rng.gen_range(-10.0..10.0);
    (0..count)
        .map(|_| {
            x += rng.gen_range(0.05..2.0);
            FunctionPoint::new(x, rng.gen_range(-100.0..100.0))
        })
        .collect()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn same_points_give_equal_functions_and_identical_values() {
    let mut rng = StdRng::seed_from_u64(17);
    let points = random_points(&mut rng, 64);
    let array = ArrayTabulatedFunction::from_points(&points).unwrap();
    let linked = LinkedListTabulatedFunction::from_points(&points).unwrap();

    assert!(array == linked);
    assert!(linked == array);
    assert!(tabulated_eq(&array, &linked));
    assert_eq!(hash_of(&array), hash_of(&linked));
    assert_eq!(array.to_string(), linked.to_string());

    let (left, right) = (array.left_domain_border(), array.right_domain_border());
    for _ in 0..1000 {
        let x = rng.gen_range(left..=right);
        assert_eq!(array.value(x).to_bits(), linked.value(x).to_bits(), "x = {}", x);
    }
}

#[test]
fn diverging_edit_breaks_equality() {
    let points = [FunctionPoint::new(0.0, 1.0), FunctionPoint::new(1.0, 2.0), FunctionPoint::new(2.0, 0.0)];
    let array = ArrayTabulatedFunction::from_points(&points).unwrap();
    let mut linked = LinkedListTabulatedFunction::from_points(&points).unwrap();
    linked.set_point_y(1, 2.0).unwrap();
    assert!(array == linked);
    linked.set_point_y(0, -1.0).unwrap();
    assert!(array != linked);
    linked.delete_point(0).unwrap();
    assert!(array != linked);
}

#[test]
fn signed_zero_and_nan_are_distinct() {
    let plus = ArrayTabulatedFunction::from_points(&[FunctionPoint::new(0.0, 0.0), FunctionPoint::new(1.0, 1.0)]).unwrap();
    let minus = LinkedListTabulatedFunction::from_points(&[FunctionPoint::new(0.0, -0.0), FunctionPoint::new(1.0, 1.0)]).unwrap();
    assert!(plus != minus);

    let nan = ArrayTabulatedFunction::from_points(&[FunctionPoint::new(0.0, f64::NAN), FunctionPoint::new(1.0, 1.0)]).unwrap();
    assert!(nan != nan.clone());
}

#[test]
fn both_stores_delete_down_to_two_points() {
    for storage in [StorageKind::Array, StorageKind::LinkedList] {
        let mut f = storage.create_from_values(0.0, 4.0, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        while f.points_count() > 2 {
            f.delete_point(1).unwrap();
        }
        assert_eq!(f.points(), vec![FunctionPoint::new(0.0, 0.0), FunctionPoint::new(4.0, 4.0)]);
        assert!(matches!(f.delete_point(0), Err(FunctionError::InvariantViolation(_))));
        assert!(matches!(f.delete_point(1), Err(FunctionError::InvariantViolation(_))));
        assert_eq!(f.points_count(), 2);
    }
}

#[test]
fn both_stores_agree_after_interleaved_edits() {
    let mut rng = StdRng::seed_from_u64(4);
    let points = random_points(&mut rng, 8);
    let mut stores: Vec<Box<dyn TabulatedFunction>> = vec![
        StorageKind::Array.create_from_points(&points).unwrap(),
        StorageKind::LinkedList.create_from_points(&points).unwrap(),
    ];

    for _ in 0..500 {
        let count = stores[0].points_count();
        let roll: u8 = rng.gen_range(0..4);
        let index = rng.gen_range(0..count + 1);
        let x = rng.gen_range(-20.0..60.0);
        let y = rng.gen_range(-5.0..5.0);
        let outcomes: Vec<bool> = stores
            .iter_mut()
            .map(|f| match roll {
                0 => f.add_point(FunctionPoint::new(x, y)).is_ok(),
                1 => f.delete_point(index).is_ok(),
                2 => f.set_point_x(index, x).is_ok(),
                _ => f.set_point_y(index, y).is_ok(),
            })
            .collect();
        assert_eq!(outcomes[0], outcomes[1]);
        assert_eq!(stores[0].points(), stores[1].points());
        assert!(tabulated_eq(stores[0].as_ref(), stores[1].as_ref()));
    }
}

#[test]
fn both_stores_reject_non_finite_x() {
    for storage in [StorageKind::Array, StorageKind::LinkedList] {
        let mut f = storage.create_from_values(0.0, 1.0, &[0.0, 1.0, 2.0]).unwrap();
        for x in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
            assert!(matches!(f.add_point(FunctionPoint::new(x, 0.0)), Err(FunctionError::InvalidArgument(_))));
            assert!(matches!(f.set_point_x(2, x), Err(FunctionError::InvalidArgument(_))));
            assert!(matches!(f.set_point(0, FunctionPoint::new(x, 0.0)), Err(FunctionError::InvalidArgument(_))));
        }
        assert_eq!(f.points_count(), 3);
        assert_eq!(f.right_domain_border(), 1.0);
        let infinite = [FunctionPoint::new(0.0, 0.0), FunctionPoint::new(f64::INFINITY, 0.0)];
        assert!(matches!(storage.create_from_points(&infinite), Err(FunctionError::InvalidArgument(_))));
    }
}

#[test]
fn both_stores_reject_grids_denser_than_eps() {
    for storage in [StorageKind::Array, StorageKind::LinkedList] {
        assert!(matches!(
            storage.create_from_values(0.0, 1e-15, &[0.0; 10]),
            Err(FunctionError::InvalidArgument(_))
        ));
        assert!(matches!(
            storage.create_from_values(1e17, 1e17 + 64.0, &[0.0; 9]),
            Err(FunctionError::InvalidArgument(_))
        ));
    }
    assert!(matches!(ArrayTabulatedFunction::new(0.0, 1e-15, 10), Err(FunctionError::InvalidArgument(_))));
    assert!(matches!(
        LinkedListTabulatedFunction::new(1e17, 1e17 + 64.0, 9),
        Err(FunctionError::InvalidArgument(_))
    ));
}
