//! Parameter types — the columns of a lookup table
//!
//! A `Parameter` has a type drawn from a fixed catalogue, a unit that must be
//! one of the units offered for that type, and an ordered list of values.
//!
//! | Type   | Units                      |
//! |--------|----------------------------|
//! | NUMBER | GENERAL, PERCENTAGE        |
//! | LENGTH | INCHES, FEET               |
//! | AREA   | SQUARE_FEET                |
//! | VOLUME | CUBIC_FEET                 |
//! | ANGLE  | DEGREES                    |
//! | OTHER  | GENERAL                    |

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named parameter with its possible values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    /// Stable identifier referenced by mapping rules
    pub id: String,

    /// Display name
    pub name: String,

    /// Parameter type
    #[serde(rename = "type")]
    pub typ: ParameterType,

    /// Unit, one of `typ.units()`
    pub unit: Unit,

    /// Possible values, in entry order. Duplicates are kept.
    #[serde(default)]
    pub values: Vec<String>,
}

impl Parameter {
    /// Create a parameter with no values, checking the unit against the type
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        typ: ParameterType,
        unit: Unit,
    ) -> Result<Self> {
        if !typ.accepts(unit) {
            return Err(Error::InvalidUnit {
                typ: typ.to_string(),
                unit: unit.to_string(),
            });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            typ,
            unit,
            values: Vec::new(),
        })
    }

    /// Builder-style helper used mostly by tests and fixtures
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Column header used in table exports: `name##TYPE##UNIT`
    pub fn column_header(&self) -> String {
        format!("{}##{}##{}", self.name, self.typ, self.unit)
    }
}

/// Parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterType {
    #[default]
    Number,
    Length,
    Area,
    Volume,
    Angle,
    Other,
}

impl ParameterType {
    pub const ALL: [ParameterType; 6] = [
        ParameterType::Number,
        ParameterType::Length,
        ParameterType::Area,
        ParameterType::Volume,
        ParameterType::Angle,
        ParameterType::Other,
    ];

    /// Units offered for this type, in display order
    pub fn units(self) -> &'static [Unit] {
        match self {
            ParameterType::Number => &[Unit::General, Unit::Percentage],
            ParameterType::Length => &[Unit::Inches, Unit::Feet],
            ParameterType::Area => &[Unit::SquareFeet],
            ParameterType::Volume => &[Unit::CubicFeet],
            ParameterType::Angle => &[Unit::Degrees],
            ParameterType::Other => &[Unit::General],
        }
    }

    /// First unit option, preselected for new parameters
    pub fn default_unit(self) -> Unit {
        self.units()[0]
    }

    pub fn accepts(self, unit: Unit) -> bool {
        self.units().contains(&unit)
    }

    pub fn label(self) -> &'static str {
        match self {
            ParameterType::Number => "Number",
            ParameterType::Length => "Length",
            ParameterType::Area => "Area",
            ParameterType::Volume => "Volume",
            ParameterType::Angle => "Angle",
            ParameterType::Other => "Other",
        }
    }

    /// Serialized code, e.g. `NUMBER`
    pub fn code(self) -> &'static str {
        match self {
            ParameterType::Number => "NUMBER",
            ParameterType::Length => "LENGTH",
            ParameterType::Area => "AREA",
            ParameterType::Volume => "VOLUME",
            ParameterType::Angle => "ANGLE",
            ParameterType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for ParameterType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ParameterType::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Validation(format!("unknown parameter type: {}", s)))
    }
}

/// Measurement units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    General,
    Percentage,
    Inches,
    Feet,
    SquareFeet,
    CubicFeet,
    Degrees,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::General => "General",
            Unit::Percentage => "Percentage",
            Unit::Inches => "Inches",
            Unit::Feet => "Feet",
            Unit::SquareFeet => "Square Feet",
            Unit::CubicFeet => "Cubic Feet",
            Unit::Degrees => "Degrees",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Unit::General => "GENERAL",
            Unit::Percentage => "PERCENTAGE",
            Unit::Inches => "INCHES",
            Unit::Feet => "FEET",
            Unit::SquareFeet => "SQUARE_FEET",
            Unit::CubicFeet => "CUBIC_FEET",
            Unit::Degrees => "DEGREES",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
