//! Integration tests for transform creation

use crate::test_helpers::{semi_major, semi_minor, spec};
use geoparam_rs::descriptor::{Capabilities, DescriptorGroupBuilder};
use geoparam_rs::parameters::{Authority, Bounds, NameTable, ParameterError, Unit};
use geoparam_rs::provider::{
    CreateTransformError, Dimensions, MercatorVariant, MethodKind, OperationMethod, TransformBuilder,
    TransformRequest,
};

/// Parameters of a spherical Mercator, ready to be applied
#[derive(Debug, PartialEq)]
struct Mercator {
    radius: f64,
    central_meridian: f64,
}

/// Builder that refuses ellipsoids
struct SphereOnly;

impl TransformBuilder for SphereOnly {
    type Transform = Mercator;
    type Error = String;

    fn build(&self, request: &TransformRequest<'_>) -> Result<Mercator, String> {
        let a = request.require("semi_major").map_err(|err| err.to_string())?;
        let b = request.require("semi_minor").map_err(|err| err.to_string())?;
        if a != b {
            return Err(format!("{} needs a sphere", request.kind()));
        }
        Ok(Mercator {
            radius: a,
            central_meridian: request.get("central_meridian").unwrap_or(0.0),
        })
    }
}

fn mercator() -> OperationMethod {
    let meridian = spec(
        NameTable::new("central_meridian")
            .name(Authority::EPSG, "Longitude of natural origin")
            .name(Authority::OGC, "central_meridian")
            .unit(Unit::Degree)
            .bounds(Bounds::longitude())
            .default_value(0.0),
    );
    let descriptor = DescriptorGroupBuilder::new()
        .name(Authority::EPSG, "Mercator (Spherical)")
        .parameters([semi_major(), semi_minor(), meridian])
        .capabilities(Capabilities::EARTH_RADIUS)
        .build()
        .unwrap();
    OperationMethod::new(
        MethodKind::Mercator(MercatorVariant::Spherical),
        Dimensions::TWO_TO_TWO,
        descriptor,
    )
}

#[test]
fn test_builder_receives_canonical_values() {
    let method = mercator();
    let mut values = method.values();
    values.set("earth_radius", 6371000.0).unwrap();
    values.set_in("Longitude of natural origin", 0.5, Unit::Radian).unwrap();

    let transform = method.create_transform(&values, &SphereOnly).unwrap();
    assert_eq!(transform.radius, 6371000.0);
    assert!((transform.central_meridian - 0.5f64.to_degrees()).abs() < 1e-12);
}

#[test]
fn test_builder_failure_propagates_unmodified() {
    let method = mercator();
    let mut values = method.values();
    values.set("semi_major", 6378137.0).unwrap();
    values.set("semi_minor", 6356752.314245).unwrap();

    let err = method.create_transform(&values, &SphereOnly).unwrap_err();
    assert_eq!(
        err,
        CreateTransformError::Builder("Mercator (Spherical) needs a sphere".to_string())
    );
}

#[test]
fn test_missing_value_stops_before_builder() {
    let method = mercator();
    let values = method.values();
    let err = method.create_transform(&values, &SphereOnly).unwrap_err();
    assert!(matches!(
        err,
        CreateTransformError::Parameter(ParameterError::MissingValue { .. })
    ));
}

#[test]
fn test_closure_builder() {
    let method = mercator();
    let mut values = method.values();
    values.set("earth_radius", 1.0).unwrap();

    let keys = method
        .create_transform(&values, &|request: &TransformRequest<'_>| -> Result<Vec<String>, ()> {
            assert_eq!(request.dimensions(), Dimensions::TWO_TO_TWO);
            Ok(request.values().iter().map(|(key, _)| key.to_string()).collect())
        })
        .unwrap();
    assert_eq!(keys, vec!["semi_major", "semi_minor", "central_meridian"]);
}
