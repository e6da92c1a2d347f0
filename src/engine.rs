//! Rule evaluation — which combinations survive the applied rules
//!
//! Evaluation is fail-open: a condition or consequence that is missing its
//! parameter or value, or that names a parameter absent from the index, is
//! treated as satisfied. Callers rely on this; an incomplete clause never
//! removes a row on its own.

use crate::combination::{Combination, ParameterIndex};
use crate::rule::{Clause, Condition, Consequence, MappingRule};

/// Structurally valid: ≥1 condition, ≥1 consequence, every entry complete
pub fn is_structurally_valid(rule: &MappingRule) -> bool {
    rule.is_structurally_valid()
}

pub fn evaluate_condition(
    condition: &Condition,
    combination: &[String],
    index: &ParameterIndex,
) -> bool {
    evaluate_clause(condition, combination, index)
}

pub fn evaluate_consequence(
    consequence: &Consequence,
    combination: &[String],
    index: &ParameterIndex,
) -> bool {
    evaluate_clause(consequence, combination, index)
}

/// Shared policy for conditions and consequences
pub fn evaluate_clause<C: Clause + ?Sized>(
    clause: &C,
    combination: &[String],
    index: &ParameterIndex,
) -> bool {
    if !clause.is_complete() {
        return true;
    }
    let Some(actual) = index
        .get(clause.parameter())
        .and_then(|pos| combination.get(pos))
    else {
        return true;
    };
    clause.operator().holds(actual == clause.value())
}

/// A row passes a rule when the rule is not triggered, or when it is and all
/// consequences hold
fn rule_accepts(rule: &MappingRule, combination: &[String], index: &ParameterIndex) -> bool {
    let triggered = rule
        .conditions()
        .iter()
        .all(|c| evaluate_condition(c, combination, index));
    !triggered
        || rule
            .consequences()
            .iter()
            .all(|c| evaluate_consequence(c, combination, index))
}

/// Applied and structurally valid
fn is_active(rule: &MappingRule) -> bool {
    rule.is_applied() && rule.is_structurally_valid()
}

/// Accept the row iff every applied rule accepts it
pub fn row_satisfies_rules(
    combination: &[String],
    index: &ParameterIndex,
    rules: &[MappingRule],
) -> bool {
    rules
        .iter()
        .filter(|r| is_active(r))
        .all(|r| rule_accepts(r, combination, index))
}

/// Keep, in order, the combinations that satisfy every applied rule
pub fn filter(
    combinations: Vec<Combination>,
    index: &ParameterIndex,
    rules: &[MappingRule],
) -> Vec<Combination> {
    RuleEngine::new(index, rules).filter(combinations)
}

/// Rule set bound to one parameter index
///
/// Selects the applied rules once, then checks any number of rows.
#[derive(Debug, Clone)]
pub struct RuleEngine<'a> {
    index: &'a ParameterIndex,
    applied: Vec<&'a MappingRule>,
}

impl<'a> RuleEngine<'a> {
    pub fn new(index: &'a ParameterIndex, rules: &'a [MappingRule]) -> Self {
        Self {
            index,
            applied: rules.iter().filter(|r| is_active(r)).collect(),
        }
    }

    /// Number of rules that constrain rows
    pub fn active_rules(&self) -> usize {
        self.applied.len()
    }

    pub fn accepts(&self, combination: &[String]) -> bool {
        self.applied
            .iter()
            .all(|r| rule_accepts(r, combination, self.index))
    }

    pub fn filter(&self, combinations: Vec<Combination>) -> Vec<Combination> {
        let candidates = combinations.len();
        if self.applied.is_empty() {
            return combinations;
        }
        let kept: Vec<Combination> = combinations
            .into_iter()
            .filter(|c| self.accepts(c))
            .collect();
        tracing::debug!(
            candidates,
            kept = kept.len(),
            rules = self.applied.len(),
            "filtered combinations"
        );
        kept
    }
}
