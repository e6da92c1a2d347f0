//! Configuration documents
//!
//! A configuration captures a whole session for export and later import:
//!
//! ```json
//! {
//!   "parameters": [
//!     { "id": "…", "name": "Size", "type": "OTHER", "unit": "GENERAL",
//!       "values": ["Small", "Large"] }
//!   ],
//!   "mappings": [
//!     { "id": "…",
//!       "conditions": [{ "sourceParam": "…", "operator": "equals", "sourceValue": "Large" }],
//!       "consequences": [{ "targetParam": "…", "operator": "equals", "targetValue": "Blue" }],
//!       "applied": true }
//!   ],
//!   "version": "1.0.0",
//!   "exportDate": "2024-05-01T09:30:00Z"
//! }
//! ```
//!
//! Import requires `version` to be present and truthy (not null, empty,
//! `false` or `0`); its value is otherwise not interpreted. Every parameter's
//! unit must suit its type. Unparseable input fails with
//! [`Error::ConfigParse`], a missing version or unit mismatch with
//! [`Error::InvalidConfig`]. An `exportDate` that is not RFC 3339 is dropped.

use crate::error::{Error, Result};
use crate::parameter::Parameter;
use crate::rule::MappingRule;
use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

/// Document version written on export
pub const CONFIG_VERSION: &str = "1.0.0";

/// Serialized session: parameters, mapping rules and export metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(
    title = "Lookup Table Configuration",
    description = "Parameters and mapping rules of a lookup table session"
)]
pub struct Configuration {
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    #[serde(default)]
    pub mappings: Vec<MappingRule>,

    /// Document version; required on import, any truthy value
    pub version: Value,

    /// When the document was exported (RFC 3339, UTC)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_date"
    )]
    #[schemars(with = "Option<String>")]
    pub export_date: Option<DateTime<Utc>>,
}

impl Configuration {
    pub fn new(
        parameters: Vec<Parameter>,
        mappings: Vec<MappingRule>,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            parameters,
            mappings,
            version: Value::from(CONFIG_VERSION),
            export_date: Some(exported_at),
        }
    }

    /// Parse and check a configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::ConfigParse(e.to_string()))?;

        if !has_version(&value) {
            tracing::warn!("rejected configuration without a version");
            return Err(Error::InvalidConfig("missing version".into()));
        }

        let config: Configuration =
            serde_json::from_value(value).map_err(|e| Error::ConfigParse(e.to_string()))?;

        if let Some(p) = config.parameters.iter().find(|p| !p.typ.accepts(p.unit)) {
            tracing::warn!(id = %p.id, typ = %p.typ, unit = %p.unit, "rejected parameter unit");
            return Err(Error::InvalidConfig(format!(
                "parameter {} has unit {}, which is not valid for type {}",
                p.name, p.unit, p.typ
            )));
        }
        tracing::debug!(
            version = %config.version,
            parameters = config.parameters.len(),
            mappings = config.mappings.len(),
            "parsed configuration"
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_parts(self) -> (Vec<Parameter>, Vec<MappingRule>) {
        (self.parameters, self.mappings)
    }

    /// Read a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(Error::Io)?;
        Self::from_json(&content)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?).map_err(Error::Io)?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Suggested file name, dated by the export date
    pub fn file_name(&self) -> Option<String> {
        self.export_date.map(|d| file_name_for(d.date_naive()))
    }
}

/// `revit-lookup-config-YYYY-MM-DD.json`
pub fn file_name_for(date: NaiveDate) -> String {
    format!("revit-lookup-config-{}.json", date.format("%Y-%m-%d"))
}

/// Parse an RFC 3339 export date, dropping anything else
fn lenient_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let date = match &raw {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|d| d.with_timezone(&Utc)),
        _ => None,
    };
    if date.is_none() && raw.as_ref().is_some_and(|v| !v.is_null()) {
        tracing::debug!(export_date = ?raw, "ignored unreadable export date");
    }
    Ok(date)
}

/// `version` present and not empty, null, false or zero
fn has_version(doc: &Value) -> bool {
    match doc.get("version") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}
