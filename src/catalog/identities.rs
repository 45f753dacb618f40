//! Identity catalog
//!
//! Builds a set of [`ParameterIdentity`] values from name tables. A table may
//! be `based_on` another one, in which case it inherits the base's names for
//! every authority it does not mention itself. Tables are built in dependency
//! order, so a base is always complete before anything derived from it.

use crate::error::Result;
use crate::parameters::virtual_param::{SEMI_MAJOR, SEMI_MINOR, STANDARD_PARALLEL_1, STANDARD_PARALLEL_2};
use crate::parameters::{
    select, Authority, Bounds, NameTable, ParameterError, ParameterIdentity, ParameterSpec,
    SelectOptions, Unit,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

pub const LATITUDE_OF_ORIGIN: &str = "latitude_of_origin";
pub const CENTRAL_MERIDIAN: &str = "central_meridian";
pub const SCALE_FACTOR: &str = "scale_factor";
pub const FALSE_EASTING: &str = "false_easting";
pub const FALSE_NORTHING: &str = "false_northing";
pub const LATITUDE_OF_FALSE_ORIGIN: &str = "latitude_of_false_origin";
pub const LONGITUDE_OF_FALSE_ORIGIN: &str = "longitude_of_false_origin";
pub const EASTING_AT_FALSE_ORIGIN: &str = "easting_at_false_origin";
pub const NORTHING_AT_FALSE_ORIGIN: &str = "northing_at_false_origin";
pub const X_TRANSLATION: &str = "x_translation";
pub const Y_TRANSLATION: &str = "y_translation";
pub const Z_TRANSLATION: &str = "z_translation";
pub const SOURCE_SEMI_MAJOR: &str = "src_semi_major";
pub const SOURCE_SEMI_MINOR: &str = "src_semi_minor";
pub const TARGET_SEMI_MAJOR: &str = "tgt_semi_major";
pub const TARGET_SEMI_MINOR: &str = "tgt_semi_minor";

/// Identities indexed by key
///
/// # Examples
///
/// ```
/// use geoparam_rs::catalog::IdentityCatalog;
///
/// let catalog = IdentityCatalog::from_json(
///     r#"[
///         {"key": "false_easting", "names": [{"authority": "OGC", "code": "false_easting"}], "unit": "metre"},
///         {"key": "easting_at_false_origin", "based_on": "false_easting",
///          "names": [{"authority": "EPSG", "code": "Easting at false origin"}]}
///     ]"#,
/// )
/// .unwrap();
///
/// let derived = catalog.get("easting_at_false_origin").unwrap();
/// assert_eq!(derived.names().len(), 2);
/// assert!(derived.is_named("false_easting"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdentityCatalog {
    order: Vec<String>,
    identities: HashMap<String, Arc<ParameterIdentity>>,
}

impl IdentityCatalog {
    /// Build every table, resolving `based_on` references
    ///
    /// Fails on duplicate keys, on references to unknown keys and on
    /// reference cycles, as well as on any table that fails to build.
    pub fn build(tables: Vec<NameTable>) -> std::result::Result<Self, ParameterError> {
        let mut by_key: HashMap<String, NameTable> = HashMap::with_capacity(tables.len());
        let mut order = Vec::with_capacity(tables.len());
        for mut table in tables {
            let key = table_key(&table)?;
            if by_key.contains_key(&key) {
                return Err(ParameterError::DuplicateParameter { name: key });
            }
            table.key = Some(key.clone());
            order.push(key.clone());
            by_key.insert(key, table);
        }

        let mut identities: HashMap<String, Arc<ParameterIdentity>> = HashMap::with_capacity(by_key.len());
        for key in dependency_order(&order, &by_key)? {
            let Some(table) = by_key.remove(&key) else {
                continue;
            };
            let base = match &table.based_on {
                Some(base) => Some(
                    identities
                        .get(base)
                        .cloned()
                        .ok_or_else(|| ParameterError::UnknownParameterName { name: base.clone() })?,
                ),
                None => None,
            };
            let identity = ParameterIdentity::from_table(table, base.as_deref())?;
            identities.insert(key, Arc::new(identity));
        }

        debug!(identities = identities.len(), "built identity catalog");
        Ok(Self { order, identities })
    }

    /// Build from a JSON array of name tables
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: Vec<NameTable> = serde_json::from_str(json)?;
        Ok(Self::build(tables)?)
    }

    /// Serialize every identity, in table order
    pub fn to_json(&self) -> Result<String> {
        let identities: Vec<&ParameterIdentity> = self.iter().map(Arc::as_ref).collect();
        Ok(serde_json::to_string_pretty(&identities)?)
    }

    /// The built-in identities
    pub fn builtin() -> std::result::Result<Self, ParameterError> {
        Self::build(builtin_tables())
    }

    pub fn get(&self, key: &str) -> Option<&Arc<ParameterIdentity>> {
        self.identities.get(key)
    }

    /// The identity for `key`, or [`ParameterError::UnknownParameterName`]
    pub fn require(&self, key: &str) -> std::result::Result<&Arc<ParameterIdentity>, ParameterError> {
        self.get(key).ok_or_else(|| ParameterError::UnknownParameterName {
            name: key.to_string(),
        })
    }

    /// Select a spec from the identity for `key`
    pub fn select(
        &self,
        key: &str,
        options: &SelectOptions,
    ) -> std::result::Result<Arc<ParameterSpec>, ParameterError> {
        Ok(Arc::new(select(self.require(key)?, options)?))
    }

    /// Identities in the order their tables were given
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ParameterIdentity>> {
        self.order.iter().filter_map(|key| self.identities.get(key))
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

fn table_key(table: &NameTable) -> std::result::Result<String, ParameterError> {
    match (&table.key, table.names.first()) {
        (Some(key), _) => Ok(key.clone()),
        (None, Some(name)) => Ok(name.code.to_lowercase()),
        (None, None) => Err(ParameterError::NoSurvivingName {
            parameter: "<unnamed>".to_string(),
        }),
    }
}

/// Keys ordered so that every base comes before the tables based on it
fn dependency_order(
    order: &[String],
    tables: &HashMap<String, NameTable>,
) -> std::result::Result<Vec<String>, ParameterError> {
    fn visit(
        key: &str,
        tables: &HashMap<String, NameTable>,
        visited: &mut HashSet<String>,
        in_progress: &mut HashSet<String>,
        result: &mut Vec<String>,
    ) -> std::result::Result<(), ParameterError> {
        if visited.contains(key) {
            return Ok(());
        }
        if !in_progress.insert(key.to_string()) {
            return Err(ParameterError::CircularReference {
                name: key.to_string(),
            });
        }

        let table = tables
            .get(key)
            .ok_or_else(|| ParameterError::UnknownParameterName {
                name: key.to_string(),
            })?;
        if let Some(base) = &table.based_on {
            visit(base, tables, visited, in_progress, result)?;
        }

        in_progress.remove(key);
        visited.insert(key.to_string());
        result.push(key.to_string());
        Ok(())
    }

    let mut result = Vec::with_capacity(order.len());
    let mut visited = HashSet::new();
    let mut in_progress = HashSet::new();
    for key in order {
        visit(key, tables, &mut visited, &mut in_progress, &mut result)?;
    }
    Ok(result)
}

/// Name tables of the built-in identities
pub fn builtin_tables() -> Vec<NameTable> {
    vec![
        NameTable::new(SEMI_MAJOR)
            .name(Authority::OGC, "semi_major")
            .name(Authority::ESRI, "Semi_Major")
            .name(Authority::NETCDF, "semi_major_axis")
            .name(Authority::PROJ4, "a")
            .unit(Unit::Metre)
            .bounds(Bounds::min_only(0.0)),
        NameTable::new(SEMI_MINOR)
            .name(Authority::OGC, "semi_minor")
            .name(Authority::ESRI, "Semi_Minor")
            .name(Authority::NETCDF, "semi_minor_axis")
            .name(Authority::PROJ4, "b")
            .unit(Unit::Metre)
            .bounds(Bounds::min_only(0.0)),
        NameTable::new(LATITUDE_OF_ORIGIN)
            .name(Authority::EPSG, "Latitude of natural origin")
            .name(Authority::OGC, "latitude_of_origin")
            .name(Authority::ESRI, "Latitude_Of_Origin")
            .name(Authority::NETCDF, "latitude_of_projection_origin")
            .name(Authority::GEOTIFF, "NatOriginLat")
            .name(Authority::PROJ4, "lat_0")
            .unit(Unit::Degree)
            .bounds(Bounds::latitude())
            .default_value(0.0),
        NameTable::new(CENTRAL_MERIDIAN)
            .name(Authority::EPSG, "Longitude of natural origin")
            .name(Authority::OGC, "central_meridian")
            .name(Authority::OGC, "longitude_of_center")
            .name(Authority::ESRI, "Central_Meridian")
            .name(Authority::ESRI, "Longitude_Of_Center")
            .name(Authority::NETCDF, "longitude_of_central_meridian")
            .name(Authority::NETCDF, "longitude_of_projection_origin")
            .name(Authority::GEOTIFF, "NatOriginLong")
            .name(Authority::PROJ4, "lon_0")
            .deprecated(Authority::EPSG, "Longitude of origin", Some("Longitude of natural origin"))
            .unit(Unit::Degree)
            .bounds(Bounds::longitude())
            .default_value(0.0),
        NameTable::new(SCALE_FACTOR)
            .name(Authority::EPSG, "Scale factor at natural origin")
            .name(Authority::OGC, "scale_factor")
            .name(Authority::ESRI, "Scale_Factor")
            .name(Authority::NETCDF, "scale_factor_at_projection_origin")
            .name(Authority::NETCDF, "scale_factor_at_central_meridian")
            .name(Authority::GEOTIFF, "ScaleAtNatOrigin")
            .name(Authority::PROJ4, "k_0")
            .unit(Unit::Unity)
            .bounds(Bounds::min_only(0.0))
            .default_value(1.0),
        NameTable::new(FALSE_EASTING)
            .name(Authority::EPSG, "False easting")
            .name(Authority::OGC, "false_easting")
            .name(Authority::ESRI, "False_Easting")
            .name(Authority::NETCDF, "false_easting")
            .name(Authority::GEOTIFF, "FalseEasting")
            .name(Authority::PROJ4, "x_0")
            .unit(Unit::Metre)
            .default_value(0.0),
        NameTable::new(FALSE_NORTHING)
            .name(Authority::EPSG, "False northing")
            .name(Authority::OGC, "false_northing")
            .name(Authority::ESRI, "False_Northing")
            .name(Authority::NETCDF, "false_northing")
            .name(Authority::GEOTIFF, "FalseNorthing")
            .name(Authority::PROJ4, "y_0")
            .unit(Unit::Metre)
            .default_value(0.0),
        NameTable::new(STANDARD_PARALLEL_1)
            .name(Authority::EPSG, "Latitude of 1st standard parallel")
            .name(Authority::OGC, "standard_parallel_1")
            .name(Authority::ESRI, "Standard_Parallel_1")
            .name(Authority::GEOTIFF, "StdParallel1")
            .name(Authority::PROJ4, "lat_1")
            .unit(Unit::Degree)
            .bounds(Bounds::latitude()),
        NameTable::new(STANDARD_PARALLEL_2)
            .name(Authority::EPSG, "Latitude of 2nd standard parallel")
            .name(Authority::OGC, "standard_parallel_2")
            .name(Authority::ESRI, "Standard_Parallel_2")
            .name(Authority::GEOTIFF, "StdParallel2")
            .name(Authority::PROJ4, "lat_2")
            .unit(Unit::Degree)
            .bounds(Bounds::latitude()),
        NameTable::new(LATITUDE_OF_FALSE_ORIGIN)
            .name(Authority::EPSG, "Latitude of false origin")
            .name(Authority::GEOTIFF, "FalseOriginLat")
            .based_on(LATITUDE_OF_ORIGIN),
        NameTable::new(LONGITUDE_OF_FALSE_ORIGIN)
            .name(Authority::EPSG, "Longitude of false origin")
            .name(Authority::GEOTIFF, "FalseOriginLong")
            .based_on(CENTRAL_MERIDIAN),
        NameTable::new(EASTING_AT_FALSE_ORIGIN)
            .name(Authority::EPSG, "Easting at false origin")
            .name(Authority::GEOTIFF, "FalseOriginEasting")
            .based_on(FALSE_EASTING),
        NameTable::new(NORTHING_AT_FALSE_ORIGIN)
            .name(Authority::EPSG, "Northing at false origin")
            .name(Authority::GEOTIFF, "FalseOriginNorthing")
            .based_on(FALSE_NORTHING),
        NameTable::new(X_TRANSLATION)
            .name(Authority::EPSG, "X-axis translation")
            .name(Authority::OGC, "dx")
            .unit(Unit::Metre),
        NameTable::new(Y_TRANSLATION)
            .name(Authority::EPSG, "Y-axis translation")
            .name(Authority::OGC, "dy")
            .unit(Unit::Metre),
        NameTable::new(Z_TRANSLATION)
            .name(Authority::EPSG, "Z-axis translation")
            .name(Authority::OGC, "dz")
            .unit(Unit::Metre),
        NameTable::new(SOURCE_SEMI_MAJOR)
            .name(Authority::OGC, "src_semi_major")
            .based_on(SEMI_MAJOR),
        NameTable::new(SOURCE_SEMI_MINOR)
            .name(Authority::OGC, "src_semi_minor")
            .based_on(SEMI_MINOR),
        NameTable::new(TARGET_SEMI_MAJOR)
            .name(Authority::OGC, "tgt_semi_major")
            .based_on(SEMI_MAJOR),
        NameTable::new(TARGET_SEMI_MINOR)
            .name(Authority::OGC, "tgt_semi_minor")
            .based_on(SEMI_MINOR),
    ]
}
