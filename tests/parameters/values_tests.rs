//! Integration tests for value groups

use crate::test_helpers::{ellipsoid_group, semi_major, spec};
use geoparam_rs::descriptor::{Capabilities, DescriptorGroupBuilder, Lookup};
use geoparam_rs::parameters::{
    Authority, Bounds, NameTable, ParameterError, ParameterValue, ParameterValueGroup, Unit,
    ValueGroup, VirtualKind,
};
use std::sync::Arc;

fn projection_group() -> Arc<geoparam_rs::DescriptorGroup> {
    let latitude = spec(
        NameTable::new("latitude_of_origin")
            .name(Authority::EPSG, "Latitude of natural origin")
            .name(Authority::OGC, "latitude_of_origin")
            .unit(Unit::Degree)
            .bounds(Bounds::latitude())
            .default_value(0.0),
    );
    let false_easting = spec(
        NameTable::new("false_easting")
            .name(Authority::EPSG, "False easting")
            .name(Authority::OGC, "false_easting")
            .unit(Unit::Metre)
            .default_value(0.0),
    );
    Arc::new(
        DescriptorGroupBuilder::new()
            .name(Authority::OGC, "Test_Projection")
            .parameters([semi_major(), latitude, false_easting])
            .build()
            .unwrap(),
    )
}

#[test]
fn test_any_alias_reaches_the_same_slot() {
    let mut values = ParameterValueGroup::new(&projection_group());
    values.set("LATITUDE OF NATURAL ORIGIN", 45.0).unwrap();
    assert_eq!(values.value("latitude_of_origin").unwrap(), 45.0);
    assert!(values.is_set("Latitude_Of_Origin"));
    assert!(!values.is_set("false_easting"));
}

#[test]
fn test_unit_conversion_and_domain() {
    let mut values = ParameterValueGroup::new(&projection_group());
    values.set_in("false_easting", 500.0, Unit::Kilometre).unwrap();
    assert_eq!(values.value("False easting").unwrap(), 500_000.0);

    let err = values.set("latitude_of_origin", 95.0).unwrap_err();
    match err {
        ParameterError::OutOfDomain { name, .. } => assert_eq!(name, "Latitude of natural origin"),
        other => panic!("expected domain error, got {:?}", other),
    }
    assert!(matches!(
        values.set_in("latitude_of_origin", 1.0, Unit::Metre),
        Err(ParameterError::OutOfDomain { .. })
    ));
}

#[test]
fn test_defaults_and_missing_values() {
    let mut values = ParameterValueGroup::new(&projection_group());
    assert_eq!(values.value("false_easting").unwrap(), 0.0);
    assert_eq!(values.stored("false_easting").unwrap(), None);
    assert!(matches!(
        values.value("semi_major"),
        Err(ParameterError::MissingValue { .. })
    ));
    assert!(values.resolved().is_err());

    values.set("semi_major", 6378137.0).unwrap();
    let resolved: Vec<(String, f64)> = values
        .resolved()
        .unwrap()
        .into_iter()
        .map(|(spec, value)| (spec.key().to_string(), value))
        .collect();
    assert_eq!(
        resolved,
        vec![
            ("semi_major".to_string(), 6378137.0),
            ("latitude_of_origin".to_string(), 0.0),
            ("false_easting".to_string(), 0.0),
        ]
    );

    values.clear("semi_major").unwrap();
    assert!(!values.is_set("semi_major"));
}

#[test]
fn test_unknown_names_and_type_mismatch() {
    let mut values = ParameterValueGroup::new(&projection_group());
    assert!(matches!(
        values.get("lat_0"),
        Err(ParameterError::UnknownParameterName { .. })
    ));
    assert!(matches!(
        values.set("false_easting", vec![1.0, 2.0]),
        Err(ParameterError::TypeMismatch { .. })
    ));
}

#[test]
fn test_virtual_names_need_capability() {
    let plain = projection_group();
    assert!(matches!(plain.lookup("earth_radius"), Lookup::NotFound));
    let mut values = ParameterValueGroup::new(&plain);
    assert!(values.virtual_parameter("earth_radius").is_err());

    let ellipsoid = ellipsoid_group();
    assert!(matches!(
        ellipsoid.lookup("Earth_Radius"),
        Lookup::Virtual(VirtualKind::EarthRadius)
    ));
    assert!(matches!(ellipsoid.lookup("standard_parallel"), Lookup::NotFound));
}

#[test]
fn test_stored_parameter_shadows_virtual_name() {
    let radius = spec(
        NameTable::new("earth_radius")
            .name(Authority::OGC, "earth_radius")
            .unit(Unit::Metre),
    );
    let group = Arc::new(
        DescriptorGroupBuilder::new()
            .name(Authority::OGC, "Sphere")
            .parameters([semi_major(), crate::test_helpers::semi_minor(), radius])
            .capabilities(Capabilities::EARTH_RADIUS)
            .build()
            .unwrap(),
    );
    assert!(matches!(group.lookup("earth_radius"), Lookup::Parameter(2, _)));

    let mut values = ParameterValueGroup::new(&group);
    values.set("earth_radius", 6371000.0).unwrap();
    assert!(!values.is_set("semi_major"));
    assert_eq!(values.get("earth_radius").unwrap(), ParameterValue::Real(6371000.0));
}
