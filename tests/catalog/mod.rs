//! Integration tests for the built-in catalog
//!
//! These tests drive the shipped identities and methods end to end, the way a
//! projection library would.

use approx::assert_relative_eq;
use geoparam_rs::catalog::{self, IdentityCatalog};
use geoparam_rs::descriptor::Lookup;
use geoparam_rs::parameters::{ParameterError, ParameterValue, ValueGroup};
use geoparam_rs::provider::{Dimensions, LambertVariant, MethodKind, Redimension, TransformRequest};

fn collect(request: &TransformRequest<'_>) -> Result<Vec<(String, f64)>, ParameterError> {
    Ok(request
        .values()
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect())
}

#[test]
fn test_lambert_2sp_from_netcdf_style_values() {
    let lcc = catalog::providers().method("Lambert Conic Conformal (2SP)").unwrap();
    assert_eq!(lcc.kind(), MethodKind::LambertConicConformal(LambertVariant::TwoParallels));

    let mut values = lcc.values();
    values.set("semi_major_axis", 6378137.0).unwrap();
    values.set("inverse_flattening", 298.257223563).unwrap();
    values.set("standard_parallel", vec![33.0, 45.0]).unwrap();
    values.set("longitude_of_central_meridian", -96.0).unwrap();
    values.set("latitude_of_projection_origin", 23.0).unwrap();

    let resolved = lcc.create_transform(&values, &collect).unwrap();
    let get = |key: &str| {
        resolved
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| *value)
    };
    assert_eq!(get("longitude_of_false_origin"), Some(-96.0));
    assert_eq!(get("latitude_of_false_origin"), Some(23.0));
    assert_eq!(get("standard_parallel_2"), Some(45.0));
    assert_eq!(get("easting_at_false_origin"), Some(0.0));
    assert_relative_eq!(get("semi_minor").unwrap(), 6356752.314245179, epsilon = 1e-6);
}

#[test]
fn test_lambert_2sp_with_single_parallel() {
    let lcc = catalog::providers().method("Lambert_Conformal_Conic_2SP").unwrap();
    let mut values = lcc.values();
    values.set("earth_radius", 6371000.0).unwrap();
    values.set("standard_parallel", 45.0).unwrap();

    let resolved = lcc.create_transform(&values, &collect).unwrap();
    assert!(resolved.iter().all(|(key, _)| key != "standard_parallel_2"));
    assert_eq!(values.get("standard_parallel").unwrap(), ParameterValue::Array(vec![45.0]));
}

#[test]
fn test_projection_names_by_authority() {
    let tm = catalog::providers().method("CT_TransverseMercator").unwrap();
    let descriptor = tm.descriptor();
    for name in [
        "Scale factor at natural origin",
        "scale_factor",
        "Scale_Factor",
        "scale_factor_at_central_meridian",
        "ScaleAtNatOrigin",
        "k_0",
    ] {
        assert!(
            matches!(descriptor.lookup(name), Lookup::Parameter(4, _)),
            "{} should name the scale factor",
            name
        );
    }
}

#[test]
fn test_mercator_variant_b_exposes_standard_parallel() {
    let mercator = catalog::providers().method("Mercator_2SP").unwrap();
    let mut values = mercator.values();
    values.set("standard_parallel", 10.0).unwrap();
    assert_eq!(values.value("Latitude of 1st standard parallel").unwrap(), 10.0);
    assert!(matches!(
        mercator.descriptor().lookup("scale_factor"),
        Lookup::NotFound
    ));
}

#[test]
fn test_datum_shift_family() {
    let providers = catalog::providers();
    let flat = providers.method("Geocentric translations (geog2D domain)").unwrap();
    let deep = providers.method_for("Geocentric translations (geog2D domain)", 3, 3).unwrap();

    assert_eq!(flat.dimensions(), Dimensions::TWO_TO_TWO);
    assert_eq!(deep.dimensions(), Dimensions::THREE_TO_THREE);
    assert!(std::ptr::eq(flat.redimension(3, 2).unwrap(), deep.redimension(3, 2).unwrap()));

    let mut values = deep.values();
    values.set("dx", -87.0).unwrap();
    values.set("src_semi_major", 6378388.0).unwrap();
    values.set("src_semi_minor", 6356911.946).unwrap();
    values.set("tgt_semi_major", 6378137.0).unwrap();
    values.set("tgt_semi_minor", 6356752.314).unwrap();

    let resolved = deep.create_transform(&values, &collect).unwrap();
    assert_eq!(resolved[0], ("x_translation".to_string(), -87.0));
    assert_eq!(resolved[1], ("y_translation".to_string(), 0.0));

    // values belong to one member
    assert!(matches!(
        flat.create_transform(&values, &collect),
        Err(geoparam_rs::provider::CreateTransformError::Parameter(
            ParameterError::DescriptorMismatch { .. }
        ))
    ));
}

#[test]
fn test_identity_catalog_serializes() {
    let json = catalog::identities().to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let identities = parsed.as_array().unwrap();
    assert_eq!(identities.len(), catalog::identities().len());
    assert_eq!(identities[0]["key"], "semi_major");
}

#[test]
fn test_custom_catalog_from_json() {
    let custom = IdentityCatalog::from_json(
        r#"[
            {"key": "azimuth", "names": [
                {"authority": "EPSG", "code": "Azimuth of initial line"},
                {"authority": "OGC", "code": "azimuth"},
                {"authority": "OGC", "code": "alpha", "deprecated": true}
            ], "unit": "degree", "bounds": {"min": -360.0, "max": 360.0}}
        ]"#,
    )
    .unwrap();
    let identity = custom.get("azimuth").unwrap();
    assert_eq!(identity.names().len(), 3);
    assert!(custom
        .select("azimuth", &Default::default())
        .unwrap()
        .name("alpha")
        .is_none());
}
