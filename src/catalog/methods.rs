//! Built-in operation methods
//!
//! Map projections are plain methods. Datum shifts come in 2-D and 3-D
//! flavours and live in [`LazyFamily`] statics, built on first use.

use crate::catalog::identities::*;
use crate::descriptor::{Capabilities, DescriptorGroupBuilder};
use crate::parameters::virtual_param::{SEMI_MAJOR, SEMI_MINOR, STANDARD_PARALLEL_1, STANDARD_PARALLEL_2};
use crate::parameters::{Authority, NamedIdentifier, ParameterError, ParameterSpec, SelectOptions};
use crate::provider::{
    Dimensions, LambertVariant, LazyFamily, MercatorVariant, MethodKind, OperationMethod,
    Redimension,
};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// A family and the names that can reach it, so lookup does not build it
struct FamilyEntry {
    names: &'static [&'static str],
    family: &'static LazyFamily<OperationMethod>,
}

static GEOCENTRIC_TRANSLATIONS: LazyFamily<OperationMethod> =
    LazyFamily::new(Dimensions::THREE_TO_THREE, geocentric_translation);

static MOLODENSKY: LazyFamily<OperationMethod> = LazyFamily::new(Dimensions::THREE_TO_THREE, molodensky);

static FAMILIES: [FamilyEntry; 2] = [
    FamilyEntry {
        names: &[
            "Geocentric translations (geog2D domain)",
            "Geocentric translations (geog3D domain)",
        ],
        family: &GEOCENTRIC_TRANSLATIONS,
    },
    FamilyEntry {
        names: &["Molodensky", "Molodenski"],
        family: &MOLODENSKY,
    },
];

/// Every built-in method, found by any of its names
#[derive(Debug)]
pub struct ProviderCatalog {
    methods: Vec<OperationMethod>,
}

impl ProviderCatalog {
    /// Build the map projection methods from `identities`
    ///
    /// Dimensional families are not part of this build; they are created the
    /// first time one of their members is requested.
    pub fn builtin(identities: &IdentityCatalog) -> Result<Self, ParameterError> {
        let specs = ProjectionSpecs::new(identities)?;
        let methods = vec![
            mercator_a(&specs)?,
            mercator_b(&specs)?,
            mercator_spherical(&specs)?,
            transverse_mercator(&specs)?,
            lambert_1sp(&specs)?,
            lambert_2sp(&specs)?,
        ];
        debug!(methods = methods.len(), "built provider catalog");
        Ok(Self { methods })
    }

    /// The method named `name`, ignoring case
    ///
    /// For a dimensional family this is the first member carrying the name,
    /// starting from the family's primary dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoparam_rs::catalog;
    /// use geoparam_rs::provider::{Dimensions, Redimension};
    ///
    /// let shift = catalog::providers().method("Molodensky").unwrap();
    /// assert_eq!(shift.dimensions(), Dimensions::THREE_TO_THREE);
    ///
    /// let flat = shift.redimension(2, 2).unwrap();
    /// assert!(std::ptr::eq(flat.redimension(3, 3).unwrap(), shift));
    /// ```
    pub fn method(&self, name: &str) -> Option<&OperationMethod> {
        if let Some(method) = self.methods.iter().find(|method| method.is_named(name)) {
            return Some(method);
        }
        let entry = FAMILIES
            .iter()
            .find(|entry| entry.names.iter().any(|known| known.eq_ignore_ascii_case(name)))?;
        let family = entry.family;
        std::iter::once(family.primary())
            .chain(Dimensions::ALL)
            .map(|dimensions| family.member(dimensions))
            .find(|method| method.is_named(name))
    }

    /// The method named `name`, redimensioned to `(source, target)`
    pub fn method_for(
        &self,
        name: &str,
        source: usize,
        target: usize,
    ) -> Result<&OperationMethod, ParameterError> {
        let dimensions = Dimensions::new(source, target)?;
        let method = self
            .method(name)
            .ok_or_else(|| ParameterError::UnknownParameterName {
                name: name.to_string(),
            })?;
        match method.family() {
            Some(family) => Ok(family.member(dimensions)),
            None if method.dimensions() == dimensions => Ok(method),
            None => Err(ParameterError::NoVariant {
                source_dim: source,
                target_dim: target,
            }),
        }
    }

    /// The plain methods, without dimensional families
    pub fn methods(&self) -> &[OperationMethod] {
        &self.methods
    }

    /// Every dimensional family, building none of them
    pub fn families(&self) -> impl Iterator<Item = &'static LazyFamily<OperationMethod>> {
        FAMILIES.iter().map(|entry| entry.family)
    }
}

/// Specs shared by several projections
struct ProjectionSpecs<'a> {
    identities: &'a IdentityCatalog,
    semi_major: Arc<ParameterSpec>,
    semi_minor: Arc<ParameterSpec>,
    latitude_of_origin: Arc<ParameterSpec>,
    /// NetCDF names the central meridian "longitude_of_projection_origin" here
    mercator_meridian: Arc<ParameterSpec>,
    /// NetCDF names the central meridian "longitude_of_central_meridian" here
    central_meridian: Arc<ParameterSpec>,
    scale_at_origin: Arc<ParameterSpec>,
    scale_at_meridian: Arc<ParameterSpec>,
    false_easting: Arc<ParameterSpec>,
    false_northing: Arc<ParameterSpec>,
}

impl<'a> ProjectionSpecs<'a> {
    fn new(identities: &'a IdentityCatalog) -> Result<Self, ParameterError> {
        let plain = SelectOptions::new();
        Ok(Self {
            identities,
            semi_major: identities.select(SEMI_MAJOR, &plain)?,
            semi_minor: identities.select(SEMI_MINOR, &plain)?,
            latitude_of_origin: identities.select(LATITUDE_OF_ORIGIN, &plain)?,
            mercator_meridian: identities.select(
                CENTRAL_MERIDIAN,
                &SelectOptions::new()
                    .disambiguate("central_meridian")
                    .disambiguate("longitude_of_projection_origin"),
            )?,
            central_meridian: identities.select(
                CENTRAL_MERIDIAN,
                &SelectOptions::new()
                    .disambiguate("central_meridian")
                    .disambiguate("longitude_of_central_meridian")
                    .deprecated_name("Longitude of origin"),
            )?,
            scale_at_origin: identities.select(
                SCALE_FACTOR,
                &SelectOptions::new().disambiguate("scale_factor_at_projection_origin"),
            )?,
            scale_at_meridian: identities.select(
                SCALE_FACTOR,
                &SelectOptions::new().disambiguate("scale_factor_at_central_meridian"),
            )?,
            false_easting: identities.select(FALSE_EASTING, &plain)?,
            false_northing: identities.select(FALSE_NORTHING, &plain)?,
        })
    }

    fn ellipsoid(&self) -> [Arc<ParameterSpec>; 2] {
        [Arc::clone(&self.semi_major), Arc::clone(&self.semi_minor)]
    }

    fn false_origin(&self) -> [Arc<ParameterSpec>; 2] {
        [Arc::clone(&self.false_easting), Arc::clone(&self.false_northing)]
    }
}

fn projection(kind: MethodKind, builder: DescriptorGroupBuilder) -> Result<OperationMethod, ParameterError> {
    Ok(OperationMethod::new(kind, Dimensions::TWO_TO_TWO, builder.build()?))
}

fn mercator_a(specs: &ProjectionSpecs<'_>) -> Result<OperationMethod, ParameterError> {
    projection(
        MethodKind::Mercator(MercatorVariant::A),
        DescriptorGroupBuilder::new()
            .name(Authority::EPSG, "Mercator (variant A)")
            .name(Authority::OGC, "Mercator_1SP")
            .name(Authority::GEOTIFF, "CT_Mercator")
            .parameters(specs.ellipsoid())
            .parameter(Arc::clone(&specs.latitude_of_origin))
            .parameter(Arc::clone(&specs.mercator_meridian))
            .parameter(Arc::clone(&specs.scale_at_origin))
            .parameters(specs.false_origin())
            .capabilities(Capabilities::EARTH_RADIUS),
    )
}

fn mercator_b(specs: &ProjectionSpecs<'_>) -> Result<OperationMethod, ParameterError> {
    let identities = specs.identities;
    projection(
        MethodKind::Mercator(MercatorVariant::B),
        DescriptorGroupBuilder::new()
            .name(Authority::EPSG, "Mercator (variant B)")
            .name(Authority::OGC, "Mercator_2SP")
            .parameters(specs.ellipsoid())
            .parameter(identities.select(STANDARD_PARALLEL_1, &SelectOptions::new())?)
            .parameter(Arc::clone(&specs.mercator_meridian))
            .parameters(specs.false_origin())
            .capabilities(Capabilities::EARTH_RADIUS | Capabilities::STANDARD_PARALLEL),
    )
}

fn mercator_spherical(specs: &ProjectionSpecs<'_>) -> Result<OperationMethod, ParameterError> {
    projection(
        MethodKind::Mercator(MercatorVariant::Spherical),
        DescriptorGroupBuilder::new()
            .name(Authority::EPSG, "Mercator (Spherical)")
            .name(Authority::GEOTIFF, "CT_Mercator")
            .parameters(specs.ellipsoid())
            .parameter(Arc::clone(&specs.latitude_of_origin))
            .parameter(Arc::clone(&specs.mercator_meridian))
            .parameters(specs.false_origin())
            .exclude(Authority::GEOTIFF)
            .capabilities(Capabilities::EARTH_RADIUS),
    )
}

fn transverse_mercator(specs: &ProjectionSpecs<'_>) -> Result<OperationMethod, ParameterError> {
    projection(
        MethodKind::TransverseMercator,
        DescriptorGroupBuilder::new()
            .name(Authority::EPSG, "Transverse Mercator")
            .name(Authority::OGC, "Transverse_Mercator")
            .name(Authority::ESRI, "Transverse_Mercator")
            .name(Authority::GEOTIFF, "CT_TransverseMercator")
            .parameters(specs.ellipsoid())
            .parameter(Arc::clone(&specs.latitude_of_origin))
            .parameter(Arc::clone(&specs.central_meridian))
            .parameter(Arc::clone(&specs.scale_at_meridian))
            .parameters(specs.false_origin())
            .capabilities(Capabilities::EARTH_RADIUS),
    )
}

fn lambert_1sp(specs: &ProjectionSpecs<'_>) -> Result<OperationMethod, ParameterError> {
    projection(
        MethodKind::LambertConicConformal(LambertVariant::OneParallel),
        DescriptorGroupBuilder::new()
            .name(Authority::EPSG, "Lambert Conic Conformal (1SP)")
            .name(Authority::OGC, "Lambert_Conformal_Conic_1SP")
            .name(Authority::GEOTIFF, "CT_LambertConfConic_1SP")
            .parameters(specs.ellipsoid())
            .parameter(Arc::clone(&specs.latitude_of_origin))
            .parameter(Arc::clone(&specs.central_meridian))
            .parameter(Arc::clone(&specs.scale_at_origin))
            .parameters(specs.false_origin())
            .capabilities(Capabilities::EARTH_RADIUS),
    )
}

fn lambert_2sp(specs: &ProjectionSpecs<'_>) -> Result<OperationMethod, ParameterError> {
    let identities = specs.identities;
    let plain = SelectOptions::new();
    projection(
        MethodKind::LambertConicConformal(LambertVariant::TwoParallels),
        DescriptorGroupBuilder::new()
            .name(Authority::EPSG, "Lambert Conic Conformal (2SP)")
            .name(Authority::OGC, "Lambert_Conformal_Conic_2SP")
            .name(Authority::ESRI, "Lambert_Conformal_Conic")
            .name(Authority::GEOTIFF, "CT_LambertConfConic_2SP")
            .parameters(specs.ellipsoid())
            .parameter(identities.select(LATITUDE_OF_FALSE_ORIGIN, &plain)?)
            .parameter(identities.select(
                LONGITUDE_OF_FALSE_ORIGIN,
                &SelectOptions::new()
                    .disambiguate("central_meridian")
                    .disambiguate("longitude_of_central_meridian"),
            )?)
            .parameter(identities.select(STANDARD_PARALLEL_1, &plain)?)
            .parameter(identities.select(STANDARD_PARALLEL_2, &SelectOptions::new().required(false))?)
            .parameter(identities.select(EASTING_AT_FALSE_ORIGIN, &plain)?)
            .parameter(identities.select(NORTHING_AT_FALSE_ORIGIN, &plain)?)
            .capabilities(Capabilities::EARTH_RADIUS | Capabilities::STANDARD_PARALLEL),
    )
}

/// Translation and ellipsoid specs shared by every datum shift member
fn shift_specs() -> &'static [Arc<ParameterSpec>] {
    static SPECS: OnceLock<Vec<Arc<ParameterSpec>>> = OnceLock::new();
    SPECS.get_or_init(|| {
        let identities = super::identities();
        let plain = SelectOptions::new();
        let translation = SelectOptions::new().default_value(0.0);
        let selected: Result<Vec<_>, ParameterError> = [
            (X_TRANSLATION, &translation),
            (Y_TRANSLATION, &translation),
            (Z_TRANSLATION, &translation),
            (SOURCE_SEMI_MAJOR, &plain),
            (SOURCE_SEMI_MINOR, &plain),
            (TARGET_SEMI_MAJOR, &plain),
            (TARGET_SEMI_MINOR, &plain),
        ]
        .into_iter()
        .map(|(key, options)| identities.select(key, options))
        .collect();
        selected.unwrap_or_else(|err| panic!("built-in datum shift parameters are inconsistent: {err}"))
    })
}

/// Build one datum shift member over the shared specs
///
/// Ellipsoid axes are inherited names shared by source and target, so only
/// the OGC and EPSG names are kept.
fn shift_member(
    family: &'static LazyFamily<OperationMethod>,
    dimensions: Dimensions,
    kind: MethodKind,
    names: Vec<NamedIdentifier>,
) -> OperationMethod {
    let descriptor = DescriptorGroupBuilder::new()
        .names(names)
        .parameters(shift_specs().iter().cloned())
        .exclude(Authority::ESRI)
        .exclude(Authority::NETCDF)
        .exclude(Authority::PROJ4)
        .build()
        .unwrap_or_else(|err| panic!("built-in {kind} descriptor is inconsistent: {err}"));
    OperationMethod::in_family(kind, dimensions, Arc::new(descriptor), family)
}

fn geocentric_translation(family: &'static LazyFamily<OperationMethod>, dimensions: Dimensions) -> OperationMethod {
    let name = if dimensions == Dimensions::TWO_TO_TWO {
        "Geocentric translations (geog2D domain)"
    } else {
        "Geocentric translations (geog3D domain)"
    };
    shift_member(
        family,
        dimensions,
        MethodKind::GeocentricTranslation,
        vec![NamedIdentifier::new(Authority::EPSG, name)],
    )
}

fn molodensky(family: &'static LazyFamily<OperationMethod>, dimensions: Dimensions) -> OperationMethod {
    shift_member(
        family,
        dimensions,
        MethodKind::Molodensky,
        vec![
            NamedIdentifier::new(Authority::EPSG, "Molodensky"),
            NamedIdentifier::new(Authority::OGC, "Molodenski"),
        ],
    )
}
