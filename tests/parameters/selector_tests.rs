//! Integration tests for name selection

use crate::test_helpers::{codes, identity};
use geoparam_rs::parameters::{select, Authority, Bounds, NameTable, ParameterError, SelectOptions, Unit};

fn meridian_table() -> NameTable {
    NameTable::new("central_meridian")
        .name(Authority::EPSG, "Longitude of natural origin")
        .name(Authority::OGC, "central_meridian")
        .name(Authority::OGC, "longitude_of_center")
        .name(Authority::ESRI, "Central_Meridian")
        .name(Authority::NETCDF, "longitude_of_central_meridian")
        .name(Authority::PROJ4, "lon_0")
        .deprecated(Authority::EPSG, "Longitude of origin", Some("Longitude of natural origin"))
        .unit(Unit::Degree)
        .bounds(Bounds::longitude())
        .default_value(0.0)
}

#[test]
fn test_disambiguation_keeps_one_name_per_authority() {
    let identity = identity(
        NameTable::new("p")
            .name(Authority::new("A"), "x")
            .name(Authority::new("B"), "y")
            .name(Authority::new("B"), "z"),
    );
    let spec = select(&identity, &SelectOptions::new().disambiguate("z")).unwrap();
    assert_eq!(codes(&spec), vec!["x", "z"]);
    assert!(spec.name("y").is_none());
}

#[test]
fn test_excluded_authority_promotes_next_name() {
    let identity = identity(meridian_table());
    let spec = select(
        &identity,
        &SelectOptions::new()
            .exclude(Authority::EPSG)
            .exclude(Authority::OGC)
            .disambiguate("Central_Meridian"),
    )
    .unwrap();

    assert_eq!(spec.primary_name().code, "Central_Meridian");
    assert_eq!(
        codes(&spec),
        vec!["Central_Meridian", "longitude_of_central_meridian", "lon_0"]
    );
}

#[test]
fn test_claim_spans_authorities_with_equal_codes() {
    // "central_meridian" is claimed for OGC and ESRI alike
    let identity = identity(meridian_table());
    let spec = select(&identity, &SelectOptions::new().disambiguate("CENTRAL_MERIDIAN")).unwrap();
    assert_eq!(spec.name_for(&Authority::OGC).unwrap().code, "central_meridian");
    assert_eq!(spec.name_for(&Authority::ESRI).unwrap().code, "Central_Meridian");
    assert_eq!(spec.names().count(), 5);
}

#[test]
fn test_unresolved_ambiguity_names_the_authority() {
    let identity = identity(meridian_table());
    match select(&identity, &SelectOptions::new()) {
        Err(ParameterError::AmbiguousAuthority { authority, names }) => {
            assert_eq!(authority, "OGC");
            assert_eq!(names, vec!["central_meridian", "longitude_of_center"]);
        }
        other => panic!("expected ambiguity, got {:?}", other),
    }
}

#[test]
fn test_typo_in_disambiguation_name() {
    let identity = identity(meridian_table());
    let err = select(
        &identity,
        &SelectOptions::new().disambiguate("centre_meridian"),
    )
    .unwrap_err();
    assert_eq!(
        err,
        ParameterError::UnknownParameterName {
            name: "centre_meridian".to_string()
        }
    );
}

#[test]
fn test_excluded_disambiguation_name_is_unknown() {
    let identity = identity(meridian_table());
    let err = select(
        &identity,
        &SelectOptions::new()
            .exclude(Authority::OGC)
            .disambiguate("longitude_of_center"),
    )
    .unwrap_err();
    assert!(matches!(err, ParameterError::UnknownParameterName { .. }));
}

#[test]
fn test_deprecated_names_follow_kept_names() {
    let identity = identity(meridian_table());
    let spec = select(
        &identity,
        &SelectOptions::new()
            .exclude(Authority::EPSG)
            .disambiguate("central_meridian")
            .deprecated_name("Longitude of origin"),
    )
    .unwrap();

    // resolved against the full list even though EPSG is excluded
    let last = spec.aliases().last().unwrap();
    assert_eq!(last.code, "Longitude of origin");
    assert!(last.deprecated);
    assert_eq!(spec.primary_name().code, "central_meridian");
}

#[test]
fn test_domain_inherited_and_overridden() {
    let identity = identity(meridian_table());
    let options = SelectOptions::new().disambiguate("central_meridian");

    let inherited = select(&identity, &options).unwrap();
    assert_eq!(inherited.default(), Some(0.0));
    assert!(inherited.required());
    assert_eq!(inherited.unit(), Unit::Degree);
    assert_eq!(inherited.bounds(), &Bounds::longitude());

    let overridden = select(&identity, &options.clone().required(false).default_value(-3.0)).unwrap();
    assert_eq!(overridden.default(), Some(-3.0));
    assert!(!overridden.required());

    let err = select(&identity, &options.default_value(200.0)).unwrap_err();
    assert!(matches!(err, ParameterError::OutOfDomain { .. }));
}

#[test]
fn test_options_from_json() {
    let identity = identity(meridian_table());
    let options: SelectOptions = serde_json::from_str(
        r#"{
            "excluded_authorities": ["PROJ4"],
            "disambiguation_names": ["longitude_of_center"]
        }"#,
    )
    .unwrap();
    let spec = select(&identity, &options).unwrap();
    assert!(spec.name("lon_0").is_none());
    assert_eq!(spec.name_for(&Authority::OGC).unwrap().code, "longitude_of_center");
}

#[test]
fn test_deprecated_request_keeps_live_primary() {
    let identity = identity(
        NameTable::new("p")
            .name(Authority::new("A"), "x")
            .name(Authority::new("B"), "y"),
    );
    let spec = select(&identity, &SelectOptions::new().deprecated_name("X")).unwrap();
    assert_eq!(spec.primary_name().code, "x");
    assert!(!spec.primary_name().deprecated);
    assert_eq!(codes(&spec), vec!["x", "y"]);
    assert!(spec.aliases().iter().all(|alias| !alias.deprecated));
}
