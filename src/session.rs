//! Session — the in-memory store of parameters and mapping rules
//!
//! A front end owns one `Session` and issues command calls (add a value,
//! edit a condition, apply a rule) and query calls (candidate rows, the
//! filtered lookup table). Every query derives the value lists, the
//! parameter index and the table columns from the same parameter list, so
//! their orders always agree.

use crate::combination::{build_index, generate, Combination, ParameterIndex};
use crate::config::Configuration;
use crate::engine::RuleEngine;
use crate::error::{Error, Result};
use crate::parameter::{Parameter, ParameterType, Unit};
use crate::rule::{ClauseEdit, Condition, Consequence, MappingRule, RuleStatus};
use crate::table::LookupTable;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
pub struct Session {
    parameters: Vec<Parameter>,
    rules: Vec<MappingRule>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records, e.g. ones loaded by a front end
    pub fn from_parts(parameters: Vec<Parameter>, rules: Vec<MappingRule>) -> Self {
        Self { parameters, rules }
    }

    // ------------------------------------------------------------------
    // Parameters
    // ------------------------------------------------------------------

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, id: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.id == id)
    }

    /// Add a parameter with a fresh id. The name is trimmed and must not be
    /// blank; the unit must be offered by the type.
    pub fn add_parameter(
        &mut self,
        name: &str,
        typ: ParameterType,
        unit: Unit,
    ) -> Result<&Parameter> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("parameter name must not be blank".into()));
        }
        let param = Parameter::new(Uuid::new_v4().to_string(), name, typ, unit)?;
        tracing::debug!(id = %param.id, name, %typ, %unit, "added parameter");
        self.parameters.push(param);
        Ok(&self.parameters[self.parameters.len() - 1])
    }

    /// Append a value. Blank values are rejected; others are kept verbatim,
    /// duplicates included.
    pub fn add_value(&mut self, param_id: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation("parameter value must not be blank".into()));
        }
        let param = self.parameter_mut(param_id)?;
        param.values.push(value.to_string());
        tracing::debug!(param = param_id, value, "added value");
        Ok(())
    }

    pub fn remove_value(&mut self, param_id: &str, index: usize) -> Result<String> {
        let param = self.parameter_mut(param_id)?;
        if index >= param.values.len() {
            return Err(Error::Validation(format!(
                "parameter {} has no value at index {}",
                param_id, index
            )));
        }
        Ok(param.values.remove(index))
    }

    /// Remove a parameter. Rules that still reference it are kept; clauses on
    /// the missing parameter evaluate as satisfied.
    pub fn remove_parameter(&mut self, param_id: &str) -> Result<Parameter> {
        let pos = self
            .parameters
            .iter()
            .position(|p| p.id == param_id)
            .ok_or_else(|| Error::UnknownParameter(param_id.to_string()))?;
        tracing::debug!(id = param_id, "removed parameter");
        Ok(self.parameters.remove(pos))
    }

    fn parameter_mut(&mut self, id: &str) -> Result<&mut Parameter> {
        self.parameters
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::UnknownParameter(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Mapping rules
    // ------------------------------------------------------------------

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    pub fn rule(&self, id: &str) -> Option<&MappingRule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    pub fn rule_status(&self, id: &str) -> Result<RuleStatus> {
        self.rule(id)
            .map(MappingRule::status)
            .ok_or_else(|| Error::UnknownRule(id.to_string()))
    }

    /// Add an empty, unapplied rule with a fresh id
    pub fn add_rule(&mut self) -> &MappingRule {
        let rule = MappingRule::new(Uuid::new_v4().to_string());
        tracing::debug!(id = rule.id(), "added mapping rule");
        self.rules.push(rule);
        &self.rules[self.rules.len() - 1]
    }

    /// Delete a rule for good
    pub fn remove_rule(&mut self, id: &str) -> Result<MappingRule> {
        let pos = self
            .rules
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Error::UnknownRule(id.to_string()))?;
        let rule = self.rules.remove(pos);
        tracing::debug!(id, was_applied = rule.is_applied(), "removed mapping rule");
        Ok(rule)
    }

    pub fn apply_rule(&mut self, id: &str) -> Result<()> {
        self.rule_mut(id)?.apply()?;
        tracing::debug!(id, "applied mapping rule");
        Ok(())
    }

    pub fn add_condition(&mut self, rule_id: &str) -> Result<()> {
        self.rule_mut(rule_id)?.add_condition();
        Ok(())
    }

    pub fn push_condition(&mut self, rule_id: &str, condition: Condition) -> Result<()> {
        self.rule_mut(rule_id)?.push_condition(condition);
        Ok(())
    }

    pub fn remove_condition(&mut self, rule_id: &str, index: usize) -> Result<Condition> {
        self.rule_mut(rule_id)?.remove_condition(index)
    }

    pub fn update_condition(
        &mut self,
        rule_id: &str,
        index: usize,
        edit: ClauseEdit,
    ) -> Result<()> {
        self.rule_mut(rule_id)?.update_condition(index, edit)
    }

    pub fn add_consequence(&mut self, rule_id: &str) -> Result<()> {
        self.rule_mut(rule_id)?.add_consequence();
        Ok(())
    }

    pub fn push_consequence(&mut self, rule_id: &str, consequence: Consequence) -> Result<()> {
        self.rule_mut(rule_id)?.push_consequence(consequence);
        Ok(())
    }

    pub fn remove_consequence(&mut self, rule_id: &str, index: usize) -> Result<Consequence> {
        self.rule_mut(rule_id)?.remove_consequence(index)
    }

    pub fn update_consequence(
        &mut self,
        rule_id: &str,
        index: usize,
        edit: ClauseEdit,
    ) -> Result<()> {
        self.rule_mut(rule_id)?.update_consequence(index, edit)
    }

    fn rule_mut(&mut self, id: &str) -> Result<&mut MappingRule> {
        self.rules
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Error::UnknownRule(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Value lists in parameter order
    pub fn value_lists(&self) -> Vec<&[String]> {
        self.parameters.iter().map(|p| p.values.as_slice()).collect()
    }

    pub fn index(&self) -> ParameterIndex {
        build_index(&self.parameters)
    }

    /// Full Cartesian product, before rules
    pub fn candidate_combinations(&self) -> Vec<Combination> {
        generate(&self.value_lists())
    }

    /// Combinations accepted by every applied rule
    pub fn valid_combinations(&self) -> Vec<Combination> {
        let index = self.index();
        RuleEngine::new(&index, &self.rules).filter(self.candidate_combinations())
    }

    pub fn lookup_table(&self) -> LookupTable {
        LookupTable::new(&self.parameters, self.valid_combinations())
    }

    // ------------------------------------------------------------------
    // Configuration documents
    // ------------------------------------------------------------------

    pub fn export_configuration(&self, exported_at: DateTime<Utc>) -> Configuration {
        Configuration::new(self.parameters.clone(), self.rules.clone(), exported_at)
    }

    /// Replace the whole session with a configuration's contents
    pub fn import_configuration(&mut self, config: Configuration) {
        let (parameters, rules) = config.into_parts();
        tracing::debug!(
            parameters = parameters.len(),
            rules = rules.len(),
            "imported configuration"
        );
        self.parameters = parameters;
        self.rules = rules;
    }

    /// Parse a configuration document and load it. A rejected document
    /// leaves the session unchanged.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let config = Configuration::from_json(json)?;
        self.import_configuration(config);
        Ok(())
    }
}
