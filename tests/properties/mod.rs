//! Property-based tests
//!
//! Selection, virtual parameters and redimensioning checked over generated
//! inputs.

use crate::test_helpers::ellipsoid_group;
use geoparam_rs::parameters::{
    authalic_radius, build_identity, select, Authority, NameTable, ParameterError,
    ParameterValueGroup, SelectOptions, ValueGroup,
};
use geoparam_rs::provider::{Dimensions, LazyFamily, Redimension};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

const AUTHORITIES: [&str; 4] = ["EPSG", "OGC", "ESRI", "NetCDF"];

/// Name table with unique codes; `owners[i]` is the authority of name `i`
fn table(owners: &[usize]) -> NameTable {
    owners
        .iter()
        .enumerate()
        .fold(NameTable::new("generated"), |table, (i, owner)| {
            table.name(Authority::new(AUTHORITIES[*owner]), &format!("name_{}", i))
        })
}

fn owners() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..AUTHORITIES.len(), 1..10)
}

#[derive(Debug)]
struct Probe {
    dimensions: Dimensions,
}

static PROBES: LazyFamily<Probe> = LazyFamily::new(Dimensions::TWO_TO_TWO, |_, dimensions| Probe { dimensions });

impl Redimension for Probe {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn family(&self) -> Option<&'static LazyFamily<Self>> {
        Some(&PROBES)
    }
}

proptest! {
    #[test]
    fn prop_select_keeps_one_name_per_authority(owners in owners()) {
        let identity = Arc::new(build_identity(table(&owners)).unwrap());
        let mut per_authority: HashMap<usize, usize> = HashMap::new();
        for owner in &owners {
            *per_authority.entry(*owner).or_default() += 1;
        }

        match select(&identity, &SelectOptions::new()) {
            Ok(spec) => {
                prop_assert!(spec.names().count() <= per_authority.len());
                for authority in AUTHORITIES {
                    let count = spec
                        .names()
                        .filter(|name| name.authority.as_ref().map(|a| a.as_str()) == Some(authority))
                        .count();
                    prop_assert!(count <= 1);
                }
            }
            Err(ParameterError::AmbiguousAuthority { .. }) => {
                prop_assert!(per_authority.values().any(|count| *count > 1));
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_unknown_disambiguation_name_fails(owners in owners(), typo in "[a-z]{1,8}_typo") {
        let identity = Arc::new(build_identity(table(&owners)).unwrap());
        let result = select(&identity, &SelectOptions::new().disambiguate(&typo));
        prop_assert_eq!(result.unwrap_err(), ParameterError::UnknownParameterName { name: typo });
    }

    #[test]
    fn prop_two_claims_in_one_authority_fail(
        owners in owners(),
        authority in 0..AUTHORITIES.len(),
    ) {
        // force two names for `authority` at the end of the list
        let mut owners = owners;
        owners.push(authority);
        owners.push(authority);
        let n = owners.len();
        let identity = Arc::new(build_identity(table(&owners)).unwrap());
        let options = SelectOptions::new()
            .disambiguate(&format!("name_{}", n - 2))
            .disambiguate(&format!("name_{}", n - 1));
        let is_ambiguous = matches!(
            select(&identity, &options),
            Err(ParameterError::AmbiguousAuthority { .. })
        );
        prop_assert!(is_ambiguous);
    }

    #[test]
    fn prop_earth_radius(a in 1.0e3f64..1.0e7, ratio in 0.5f64..=1.0, radius in 1.0f64..1.0e7) {
        let b = a * ratio;
        let mut values = ParameterValueGroup::new(&ellipsoid_group());
        values.set("semi_major", a).unwrap();
        values.set("semi_minor", b).unwrap();

        let computed = values.value("earth_radius").unwrap();
        prop_assert!((computed - authalic_radius(a, b)).abs() <= 1e-9 * a);
        prop_assert!(computed >= b * (1.0 - 1e-12) && computed <= a * (1.0 + 1e-12));

        values.set("earth_radius", radius).unwrap();
        prop_assert_eq!(values.value("semi_major").unwrap(), radius);
        prop_assert_eq!(values.value("semi_minor").unwrap(), radius);
    }

    #[test]
    fn prop_inverse_flattening_round_trip(a in 1.0e3f64..1.0e7, f in 1.5f64..1.0e4) {
        let mut values = ParameterValueGroup::new(&ellipsoid_group());
        values.set("semi_major", a).unwrap();
        values.set("inverse_flattening", f).unwrap();

        let b = values.value("semi_minor").unwrap();
        prop_assert!((b - a * (1.0 - 1.0 / f)).abs() <= 1e-9 * a);
        prop_assert_eq!(values.value("inverse_flattening").unwrap(), f);
    }

    #[test]
    fn prop_redimension(source in 0usize..6, target in 0usize..6) {
        let valid = (2..=3).contains(&source) && (2..=3).contains(&target);
        for start in Dimensions::ALL {
            let member = PROBES.member(start);
            let flat = member.redimension(2, 2).unwrap();
            prop_assert!(std::ptr::eq(flat, PROBES.member(Dimensions::TWO_TO_TWO)));

            match member.redimension(source, target) {
                Ok(sibling) => {
                    prop_assert!(valid);
                    prop_assert_eq!(sibling.dimensions(), Dimensions::new(source, target).unwrap());
                }
                Err(err) => {
                    prop_assert!(!valid);
                    let is_invalid_dimension = matches!(err, ParameterError::InvalidDimension { .. });
                    prop_assert!(is_invalid_dimension);
                }
            }
        }
    }
}
