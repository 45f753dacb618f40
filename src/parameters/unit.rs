//! Units of measure for parameter values
//!
//! Every parameter identity declares the canonical unit its values are stored
//! in. Writers may supply a value in any unit of the same kind; the value is
//! converted to the canonical unit before it reaches storage.

use serde::{Deserialize, Serialize};

/// Physical quantity measured by a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Linear,
    Angular,
    Scale,
}

/// A unit of measure understood by the parameter layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Metre,
    Kilometre,
    UsSurveyFoot,
    Degree,
    Radian,
    Grad,
    ArcSecond,
    Unity,
    PartsPerMillion,
}

impl Unit {
    /// The kind of quantity this unit measures
    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Metre | Unit::Kilometre | Unit::UsSurveyFoot => UnitKind::Linear,
            Unit::Degree | Unit::Radian | Unit::Grad | Unit::ArcSecond => UnitKind::Angular,
            Unit::Unity | Unit::PartsPerMillion => UnitKind::Scale,
        }
    }

    /// The canonical unit for this unit's kind (metre, degree or unity)
    pub fn canonical(&self) -> Unit {
        match self.kind() {
            UnitKind::Linear => Unit::Metre,
            UnitKind::Angular => Unit::Degree,
            UnitKind::Scale => Unit::Unity,
        }
    }

    /// Multiplier from this unit to its canonical unit
    pub fn factor(&self) -> f64 {
        match self {
            Unit::Metre | Unit::Degree | Unit::Unity => 1.0,
            Unit::Kilometre => 1000.0,
            Unit::UsSurveyFoot => 1200.0 / 3937.0,
            Unit::Radian => 180.0 / std::f64::consts::PI,
            Unit::Grad => 0.9,
            Unit::ArcSecond => 1.0 / 3600.0,
            Unit::PartsPerMillion => 1e-6,
        }
    }

    /// Convert `value` expressed in `self` into `target`
    ///
    /// Returns `None` if the two units measure different kinds of quantity.
    ///
    /// # Examples
    ///
    /// ```
    /// use geoparam_rs::parameters::unit::Unit;
    ///
    /// assert_eq!(Unit::Kilometre.convert(6.378137, Unit::Metre), Some(6378.137));
    /// assert_eq!(Unit::Metre.convert(1.0, Unit::Degree), None);
    /// ```
    pub fn convert(&self, value: f64, target: Unit) -> Option<f64> {
        if self.kind() != target.kind() {
            return None;
        }
        if *self == target {
            return Some(value);
        }
        Some(value * self.factor() / target.factor())
    }
}
