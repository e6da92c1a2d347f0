//! End-to-end lookup table scenarios
//!
//! Builds sessions the way a front end would and checks the exported table.

use lookupgen::{
    build_index, filter, generate, row_satisfies_rules, Condition, Consequence, MappingRule,
    Operator, Parameter, ParameterType, Session, Unit,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn session_with(params: &[(&str, ParameterType, Unit, &[&str])]) -> (Session, Vec<String>) {
    let mut session = Session::new();
    let mut ids = Vec::new();
    for (name, typ, unit, values) in params {
        let id = session.add_parameter(name, *typ, *unit).unwrap().id.clone();
        for v in *values {
            session.add_value(&id, v).unwrap();
        }
        ids.push(id);
    }
    (session, ids)
}

fn add_applied_rule(
    session: &mut Session,
    conditions: Vec<Condition>,
    consequences: Vec<Consequence>,
) -> String {
    let rule = session.add_rule().id().to_string();
    for c in conditions {
        session.push_condition(&rule, c).unwrap();
    }
    for c in consequences {
        session.push_consequence(&rule, c).unwrap();
    }
    session.apply_rule(&rule).unwrap();
    rule
}

#[test]
fn test_size_color_table() {
    let (mut session, ids) = session_with(&[
        ("Size", ParameterType::Other, Unit::General, &["Small", "Large"]),
        ("Color", ParameterType::Other, Unit::General, &["Red", "Blue"]),
    ]);
    add_applied_rule(
        &mut session,
        vec![Condition::equals(&ids[0], "Large")],
        vec![Consequence::equals(&ids[1], "Blue")],
    );

    assert_eq!(
        session.lookup_table().to_csv(),
        "Description,Size##OTHER##GENERAL,Color##OTHER##GENERAL\n\
         Row_1,Small,Red\n\
         Row_2,Small,Blue\n\
         Row_3,Large,Blue"
    );
}

#[test]
fn test_unconstrained_table_lists_full_product() {
    let (session, _) = session_with(&[
        ("Width", ParameterType::Length, Unit::Inches, &["10", "12"]),
        ("Slope", ParameterType::Angle, Unit::Degrees, &["15", "30", "45"]),
        ("Share", ParameterType::Number, Unit::Percentage, &["50"]),
    ]);

    let table = session.lookup_table();
    assert_eq!(table.len(), 6);
    assert_eq!(
        table.header(),
        vec![
            "Description",
            "Width##LENGTH##INCHES",
            "Slope##ANGLE##DEGREES",
            "Share##NUMBER##PERCENTAGE",
        ]
    );
    let labels: Vec<_> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["Row_1", "Row_2", "Row_3", "Row_4", "Row_5", "Row_6"]);
    assert_eq!(table.rows[0].values, ["10", "15", "50"]);
    assert_eq!(table.rows[5].values, ["12", "45", "50"]);
}

#[test]
fn test_parameter_without_values_empties_table() {
    let (session, _) = session_with(&[
        ("Size", ParameterType::Other, Unit::General, &["Small", "Large"]),
        ("Color", ParameterType::Other, Unit::General, &[]),
    ]);
    assert_eq!(
        session.lookup_table().to_csv(),
        "Description,Size##OTHER##GENERAL,Color##OTHER##GENERAL"
    );
}

#[test]
fn test_duplicate_values_give_duplicate_rows() {
    let (session, _) = session_with(&[(
        "Size",
        ParameterType::Other,
        Unit::General,
        &["Small", "Small"],
    )]);
    assert_eq!(
        session.lookup_table().to_csv(),
        "Description,Size##OTHER##GENERAL\nRow_1,Small\nRow_2,Small"
    );
}

// P1 = X implies P2 = Y, checked row by row
#[rstest]
#[case("X", "Y", true)]
#[case("X", "Z", false)]
#[case("W", "Y", true)]
#[case("W", "Z", true)]
fn test_condition_consequence_rows(#[case] p1: &str, #[case] p2: &str, #[case] expected: bool) {
    let params = vec![
        Parameter::new("p1", "P1", ParameterType::Other, Unit::General).unwrap(),
        Parameter::new("p2", "P2", ParameterType::Other, Unit::General).unwrap(),
    ];
    let mut rule = MappingRule::new("r1")
        .with_condition(Condition::equals("p1", "X"))
        .with_consequence(Consequence::equals("p2", "Y"));
    rule.apply().unwrap();

    let index = build_index(&params);
    let row = vec![p1.to_string(), p2.to_string()];
    assert_eq!(row_satisfies_rules(&row, &index, &[rule]), expected);
}

#[rstest]
#[case(Operator::Equals, Operator::Equals, &[["A", "1"], ["B", "1"], ["B", "2"]])]
#[case(Operator::Equals, Operator::NotEquals, &[["A", "2"], ["B", "1"], ["B", "2"]])]
#[case(Operator::NotEquals, Operator::Equals, &[["A", "1"], ["A", "2"], ["B", "1"]])]
#[case(Operator::NotEquals, Operator::NotEquals, &[["A", "1"], ["A", "2"], ["B", "2"]])]
fn test_operator_combinations(
    #[case] condition_op: Operator,
    #[case] consequence_op: Operator,
    #[case] expected_kept: &[[&str; 2]],
) {
    let params = vec![
        Parameter::new("letter", "Letter", ParameterType::Other, Unit::General)
            .unwrap()
            .with_values(["A", "B"]),
        Parameter::new("digit", "Digit", ParameterType::Number, Unit::General)
            .unwrap()
            .with_values(["1", "2"]),
    ];
    // letter <op> A  ⇒  digit <op> 1
    let mut rule = MappingRule::new("r")
        .with_condition(Condition::new("letter", condition_op, "A"))
        .with_consequence(Consequence::new("digit", consequence_op, "1"));
    rule.apply().unwrap();

    let value_lists: Vec<_> = params.iter().map(|p| p.values.clone()).collect();
    let candidates = generate(&value_lists);
    assert_eq!(candidates, [["A", "1"], ["A", "2"], ["B", "1"], ["B", "2"]]);

    let kept = filter(candidates, &build_index(&params), &[rule]);
    assert_eq!(kept, expected_kept);
}
