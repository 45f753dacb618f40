//! Integration tests for dimensional families

use geoparam_rs::parameters::ParameterError;
use geoparam_rs::provider::{Dimensions, LazyFamily, ProviderFamily, Redimension, FAMILY_SIZE};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// A datum shift whose transform shape depends on its dimensions
#[derive(Debug)]
struct Shift {
    dimensions: Dimensions,
    family: &'static LazyFamily<Shift>,
}

impl Redimension for Shift {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn family(&self) -> Option<&'static LazyFamily<Self>> {
        Some(self.family)
    }
}

static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

static SHIFTS: LazyFamily<Shift> = LazyFamily::new(Dimensions::TWO_TO_TWO, |family, dimensions| {
    CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
    Shift { dimensions, family }
});

#[test]
fn test_redimension_from_two_members_returns_same_object() {
    let first = SHIFTS.member(Dimensions::TWO_TO_TWO);
    let second = SHIFTS.member(Dimensions::TWO_TO_THREE);

    let a = first.redimension(3, 2).unwrap();
    let b = second.redimension(3, 2).unwrap();
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.dimensions(), Dimensions::THREE_TO_TWO);
}

#[test]
fn test_redimension_is_idempotent() {
    for dimensions in Dimensions::ALL {
        let member = SHIFTS.member(dimensions);
        let flat = member.redimension(2, 2).unwrap();
        assert!(std::ptr::eq(flat, flat.redimension(2, 2).unwrap()));
        assert!(std::ptr::eq(
            member.redimension(dimensions.source(), dimensions.target()).unwrap(),
            member
        ));
    }
}

#[test]
fn test_whole_family_built_once() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            thread::spawn(move || {
                let member = SHIFTS.member(Dimensions::ALL[i]);
                member.redimension(3, 3).unwrap() as *const Shift as usize
            })
        })
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(addresses.iter().all(|address| *address == addresses[0]));
    assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), FAMILY_SIZE);
    assert!(SHIFTS.is_initialized());
}

#[test]
fn test_unsupported_dimensions() {
    let member = SHIFTS.member(Dimensions::THREE_TO_THREE);
    for (source, target) in [(1, 2), (2, 4), (0, 0), (4, 3)] {
        assert!(matches!(
            member.redimension(source, target),
            Err(ParameterError::InvalidDimension { .. })
        ));
    }
}

#[test]
fn test_eager_family_members() {
    let family = ProviderFamily::build(Dimensions::THREE_TO_THREE, |dimensions| {
        format!("{}", dimensions)
    });
    assert_eq!(family.members().len(), FAMILY_SIZE);
    assert_eq!(family.redimension(2, 3).unwrap(), "2D -> 3D");
    assert_eq!(family.member(Dimensions::THREE_TO_THREE), "3D -> 3D");
}
