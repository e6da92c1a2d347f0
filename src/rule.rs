//! Mapping rules — conditions that, once met, require consequences
//!
//! A rule reads "if every condition holds, every consequence must hold too".
//! Conditions and consequences share one shape: a parameter reference, an
//! operator and a value. Only the serialized field names differ
//! (`sourceParam`/`sourceValue` versus `targetParam`/`targetValue`).
//!
//! ## Lifecycle
//!
//! ```text
//! new (applied = false) ──edit──► applied = false
//!        │                              │
//!        └──────── apply() ◄────────────┘   (structurally valid only)
//!                     │
//!                applied = true ──edit──► applied = false
//! ```
//!
//! Every edit resets `applied`, so a changed rule has to be approved again
//! before it constrains any row.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Comparison operator of a condition or consequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[default]
    Equals,
    NotEquals,
}

impl Operator {
    /// Resolve an equality test through the operator
    pub fn holds(self, is_equal: bool) -> bool {
        match self {
            Operator::Equals => is_equal,
            Operator::NotEquals => !is_equal,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Equals => write!(f, "equals"),
            Operator::NotEquals => write!(f, "not_equals"),
        }
    }
}

/// Common view over conditions and consequences
pub trait Clause {
    /// Referenced parameter id (empty when not chosen yet)
    fn parameter(&self) -> &str;

    fn operator(&self) -> Operator;

    /// Compared value (empty when not chosen yet)
    fn value(&self) -> &str;

    fn edit(&mut self, edit: ClauseEdit);

    /// Both the parameter reference and the value are set
    fn is_complete(&self) -> bool {
        !self.parameter().is_empty() && !self.value().is_empty()
    }
}

/// A single-field change to a condition or consequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseEdit {
    /// Point at another parameter. Clears the value, which belonged to the
    /// previous parameter.
    Parameter(String),
    Operator(Operator),
    Value(String),
}

/// Rule trigger: `sourceParam <operator> sourceValue`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub source_param: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub source_value: String,
}

impl Condition {
    pub fn new(param: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            source_param: param.into(),
            operator,
            source_value: value.into(),
        }
    }

    pub fn equals(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(param, Operator::Equals, value)
    }

    pub fn not_equals(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(param, Operator::NotEquals, value)
    }
}

impl Clause for Condition {
    fn parameter(&self) -> &str {
        &self.source_param
    }

    fn operator(&self) -> Operator {
        self.operator
    }

    fn value(&self) -> &str {
        &self.source_value
    }

    fn edit(&mut self, edit: ClauseEdit) {
        match edit {
            ClauseEdit::Parameter(param) => {
                self.source_param = param;
                self.source_value.clear();
            }
            ClauseEdit::Operator(op) => self.operator = op,
            ClauseEdit::Value(value) => self.source_value = value,
        }
    }
}

/// Rule requirement: `targetParam <operator> targetValue`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Consequence {
    #[serde(default)]
    pub target_param: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub target_value: String,
}

impl Consequence {
    pub fn new(param: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            target_param: param.into(),
            operator,
            target_value: value.into(),
        }
    }

    pub fn equals(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(param, Operator::Equals, value)
    }

    pub fn not_equals(param: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(param, Operator::NotEquals, value)
    }
}

impl Clause for Consequence {
    fn parameter(&self) -> &str {
        &self.target_param
    }

    fn operator(&self) -> Operator {
        self.operator
    }

    fn value(&self) -> &str {
        &self.target_value
    }

    fn edit(&mut self, edit: ClauseEdit) {
        match edit {
            ClauseEdit::Parameter(param) => {
                self.target_param = param;
                self.target_value.clear();
            }
            ClauseEdit::Operator(op) => self.operator = op,
            ClauseEdit::Value(value) => self.target_value = value,
        }
    }
}

/// Derived rule state, as shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    /// Participates in filtering
    Applied,
    /// Structurally valid, waiting for approval
    Ready,
    /// Missing conditions, consequences or fields
    Incomplete,
}

impl std::fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleStatus::Applied => write!(f, "Applied"),
            RuleStatus::Ready => write!(f, "Ready to apply"),
            RuleStatus::Incomplete => write!(f, "Incomplete rule"),
        }
    }
}

/// A condition → consequence mapping rule
///
/// Fields are private so that `applied` can only become true through
/// [`MappingRule::apply`]. Deserialized rules that are marked applied but
/// are not structurally valid come back unapplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(from = "RuleDocument")]
pub struct MappingRule {
    id: String,

    #[serde(default)]
    conditions: Vec<Condition>,

    #[serde(default)]
    consequences: Vec<Consequence>,

    #[serde(default)]
    applied: bool,
}

/// Mapping rule as written in a configuration document
#[derive(Deserialize, JsonSchema)]
#[schemars(rename = "MappingRule")]
struct RuleDocument {
    id: String,

    #[serde(default)]
    conditions: Vec<Condition>,

    #[serde(default)]
    consequences: Vec<Consequence>,

    #[serde(default)]
    applied: bool,
}

impl From<RuleDocument> for MappingRule {
    fn from(doc: RuleDocument) -> Self {
        let mut rule = MappingRule {
            id: doc.id,
            conditions: doc.conditions,
            consequences: doc.consequences,
            applied: false,
        };
        if doc.applied {
            if rule.is_structurally_valid() {
                rule.applied = true;
            } else {
                tracing::warn!(
                    id = %rule.id,
                    "rule marked applied but incomplete, left unapplied"
                );
            }
        }
        rule
    }
}

impl MappingRule {
    /// Empty, unapplied rule
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            conditions: Vec::new(),
            consequences: Vec::new(),
            applied: false,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.push_condition(condition);
        self
    }

    pub fn with_consequence(mut self, consequence: Consequence) -> Self {
        self.push_consequence(consequence);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn consequences(&self) -> &[Consequence] {
        &self.consequences
    }

    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// At least one condition, at least one consequence, every entry complete
    pub fn is_structurally_valid(&self) -> bool {
        !self.conditions.is_empty()
            && !self.consequences.is_empty()
            && self.conditions.iter().all(Clause::is_complete)
            && self.consequences.iter().all(Clause::is_complete)
    }

    pub fn status(&self) -> RuleStatus {
        if self.applied {
            RuleStatus::Applied
        } else if self.is_structurally_valid() {
            RuleStatus::Ready
        } else {
            RuleStatus::Incomplete
        }
    }

    /// Mark the rule as applied. Fails, leaving the flag untouched, when the
    /// rule is not structurally valid.
    pub fn apply(&mut self) -> Result<()> {
        if !self.is_structurally_valid() {
            return Err(Error::IncompleteRule(self.id.clone()));
        }
        self.applied = true;
        Ok(())
    }


    /// Append a blank condition (no parameter, `equals`, no value)
    pub fn add_condition(&mut self) {
        self.push_condition(Condition::default());
    }

    pub fn push_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
        self.applied = false;
    }

    pub fn remove_condition(&mut self, index: usize) -> Result<Condition> {
        if index >= self.conditions.len() {
            return Err(self.missing("condition", index));
        }
        self.applied = false;
        Ok(self.conditions.remove(index))
    }

    pub fn update_condition(&mut self, index: usize, edit: ClauseEdit) -> Result<()> {
        if index >= self.conditions.len() {
            return Err(self.missing("condition", index));
        }
        self.conditions[index].edit(edit);
        self.applied = false;
        Ok(())
    }

    /// Append a blank consequence (no parameter, `equals`, no value)
    pub fn add_consequence(&mut self) {
        self.push_consequence(Consequence::default());
    }

    pub fn push_consequence(&mut self, consequence: Consequence) {
        self.consequences.push(consequence);
        self.applied = false;
    }

    pub fn remove_consequence(&mut self, index: usize) -> Result<Consequence> {
        if index >= self.consequences.len() {
            return Err(self.missing("consequence", index));
        }
        self.applied = false;
        Ok(self.consequences.remove(index))
    }

    pub fn update_consequence(&mut self, index: usize, edit: ClauseEdit) -> Result<()> {
        if index >= self.consequences.len() {
            return Err(self.missing("consequence", index));
        }
        self.consequences[index].edit(edit);
        self.applied = false;
        Ok(())
    }

    fn missing(&self, kind: &'static str, index: usize) -> Error {
        Error::MissingClause {
            rule: self.id.clone(),
            kind,
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_rule() -> MappingRule {
        MappingRule::new("r1")
            .with_condition(Condition::equals("size", "Large"))
            .with_consequence(Consequence::equals("color", "Blue"))
    }

    #[test]
    fn test_operator_holds() {
        assert!(Operator::Equals.holds(true));
        assert!(!Operator::Equals.holds(false));
        assert!(Operator::NotEquals.holds(false));
        assert!(!Operator::NotEquals.holds(true));
    }

    #[test]
    fn test_structural_validity() {
        assert!(!MappingRule::new("r").is_structurally_valid());
        assert!(complete_rule().is_structurally_valid());

        let only_conditions =
            MappingRule::new("r").with_condition(Condition::equals("size", "Large"));
        assert!(!only_conditions.is_structurally_valid());

        let blank_value = MappingRule::new("r")
            .with_condition(Condition::equals("size", ""))
            .with_consequence(Consequence::equals("color", "Blue"));
        assert!(!blank_value.is_structurally_valid());

        let blank_target = MappingRule::new("r")
            .with_condition(Condition::equals("size", "Large"))
            .with_consequence(Consequence::equals("", "Blue"));
        assert!(!blank_target.is_structurally_valid());
    }

    #[test]
    fn test_apply_requires_valid_rule() {
        let mut rule = MappingRule::new("r1");
        rule.add_condition();
        rule.add_consequence();
        assert!(matches!(rule.apply(), Err(Error::IncompleteRule(id)) if id == "r1"));
        assert!(!rule.is_applied());
        assert_eq!(rule.status(), RuleStatus::Incomplete);

        let mut rule = complete_rule();
        assert_eq!(rule.status(), RuleStatus::Ready);
        rule.apply().unwrap();
        assert_eq!(rule.status(), RuleStatus::Applied);
    }

    #[test]
    fn test_every_edit_resets_applied() {
        let edits: [fn(&mut MappingRule); 6] = [
            |r| r.add_condition(),
            |r| r.add_consequence(),
            |r| {
                r.update_condition(0, ClauseEdit::Operator(Operator::NotEquals))
                    .unwrap()
            },
            |r| {
                r.update_consequence(0, ClauseEdit::Value("Red".into()))
                    .unwrap()
            },
            |r| {
                r.remove_condition(0).unwrap();
            },
            |r| {
                r.remove_consequence(0).unwrap();
            },
        ];

        for edit in edits {
            let mut rule = complete_rule();
            rule.apply().unwrap();
            edit(&mut rule);
            assert!(!rule.is_applied());
        }
    }

    #[test]
    fn test_parameter_edit_clears_value() {
        let mut rule = complete_rule();
        rule.update_condition(0, ClauseEdit::Parameter("shape".into()))
            .unwrap();
        assert_eq!(rule.conditions()[0], Condition::equals("shape", ""));

        rule.update_consequence(0, ClauseEdit::Parameter("finish".into()))
            .unwrap();
        assert_eq!(rule.consequences()[0], Consequence::equals("finish", ""));
        assert_eq!(rule.status(), RuleStatus::Incomplete);
    }

    #[test]
    fn test_out_of_range_edit() {
        let mut rule = complete_rule();
        rule.apply().unwrap();
        let err = rule
            .update_condition(3, ClauseEdit::Value("x".into()))
            .unwrap_err();
        assert_eq!(err.to_string(), "Mapping rule r1 has no condition at index 3");
        // A rejected edit changes nothing
        assert!(rule.is_applied());
        assert!(rule.remove_consequence(1).is_err());
        assert!(rule.is_applied());
    }

    #[test]
    fn test_wire_format() {
        let rule = MappingRule::new("r1")
            .with_condition(Condition::not_equals("p1", "X"))
            .with_consequence(Consequence::equals("p2", "Y"));
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "r1",
                "conditions": [
                    {"sourceParam": "p1", "operator": "not_equals", "sourceValue": "X"}
                ],
                "consequences": [
                    {"targetParam": "p2", "operator": "equals", "targetValue": "Y"}
                ],
                "applied": false
            })
        );
    }

    #[test]
    fn test_missing_operator_defaults_to_equals() {
        let condition: Condition =
            serde_json::from_str(r#"{"sourceParam": "p1", "sourceValue": "X"}"#).unwrap();
        assert_eq!(condition.operator, Operator::Equals);
    }

    #[test]
    fn test_deserialize_keeps_applied_complete_rule() {
        let rule: MappingRule = serde_json::from_str(
            r#"{
                "id": "r1",
                "conditions": [{"sourceParam": "p1", "sourceValue": "X"}],
                "consequences": [{"targetParam": "p2", "targetValue": "Y"}],
                "applied": true
            }"#,
        )
        .unwrap();
        assert_eq!(rule.status(), RuleStatus::Applied);
    }

    #[test]
    fn test_deserialize_unapplies_incomplete_rule() {
        for doc in [
            r#"{"id": "r", "consequences": [{"targetParam": "p2", "targetValue": "Y"}], "applied": true}"#,
            r#"{"id": "r", "conditions": [{"sourceParam": "p1", "sourceValue": "X"}], "applied": true}"#,
            r#"{"id": "r", "conditions": [{"sourceParam": "p1"}], "consequences": [{"targetParam": "p2", "targetValue": "Y"}], "applied": true}"#,
        ] {
            let rule: MappingRule = serde_json::from_str(doc).unwrap();
            assert!(!rule.is_applied(), "{}", doc);
            assert_eq!(rule.status(), RuleStatus::Incomplete);
        }
    }
}
