//! Mapping rule status command

use super::util::load_session;
use lookupgen::{Clause, MappingRule, Result, RuleStatus, Session};

pub fn cmd_rules(args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err("Usage: lookupgen rules <config.json> [--json]".into());
    }

    let session = load_session(&args[0])?;
    let json_output = args.contains(&"--json".to_string());

    if json_output {
        let rules: Vec<_> = session
            .rules()
            .iter()
            .map(|r| {
                serde_json::json!({
                    "id": r.id(),
                    "status": r.status(),
                    "conditions": r.conditions().len(),
                    "consequences": r.consequences().len(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules)?);
        return Ok(());
    }

    if session.rules().is_empty() {
        println!("No mapping rules defined");
        return Ok(());
    }

    for rule in session.rules() {
        let marker = match rule.status() {
            RuleStatus::Applied => "✓",
            RuleStatus::Ready => "•",
            RuleStatus::Incomplete => "✗",
        };
        println!("{} {} [{}]", marker, rule.id(), rule.status());
        print_rule(&session, rule);
    }
    Ok(())
}

fn print_rule(session: &Session, rule: &MappingRule) {
    for c in rule.conditions() {
        println!("    if   {}", describe(session, c));
    }
    for c in rule.consequences() {
        println!("    then {}", describe(session, c));
    }
}

/// `Size equals "Large"`, using the parameter name when it is known
fn describe<C: Clause>(session: &Session, clause: &C) -> String {
    let param = match clause.parameter() {
        "" => "<parameter?>",
        id => session.parameter(id).map(|p| p.name.as_str()).unwrap_or(id),
    };
    let value = match clause.value() {
        "" => "<value?>".to_string(),
        v => format!("\"{}\"", v),
    };
    format!("{} {} {}", param, clause.operator(), value)
}
