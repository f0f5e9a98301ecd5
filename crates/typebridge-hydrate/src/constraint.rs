//! Structural constraint evaluation
//!
//! Constraints run in declared order; the caller stops at the first
//! violation. Every rule except `NotBlank` passes on an absent or null
//! value, matching the convention that presence is `NotBlank`'s job alone.

use typebridge_core::{CaseValue, Constraint, Rule, SchemaRegistry};

use crate::value::TypedValue;

/// Evaluate one constraint against a value. `Err` carries the message only;
/// the caller attaches the translated field label.
pub fn check(
    constraint: &Constraint,
    value: &TypedValue,
    registry: &SchemaRegistry,
) -> Result<(), String> {
    let ok = match &constraint.rule {
        Rule::NotBlank => !is_blank(value),
        Rule::Choice(options) => value.is_null() || matches_choice(value, options),
        Rule::EnumChoice(target) => value.is_null() || matches_enum(value, target, registry),
        Rule::Range { min, max } => value.is_null() || within_range(value, *min, *max),
        Rule::Length { min, max } => value.is_null() || within_length(value, *min, *max),
    };
    if ok {
        Ok(())
    } else {
        Err(constraint
            .message
            .clone()
            .unwrap_or_else(|| default_message(&constraint.rule)))
    }
}

fn default_message(rule: &Rule) -> String {
    match rule {
        Rule::NotBlank => "must not be blank".to_string(),
        Rule::Choice(_) | Rule::EnumChoice(_) => "is not a valid choice".to_string(),
        Rule::Range { min, max } => bounds_message("must be", min, max, ""),
        Rule::Length { min, max } => {
            let min = min.map(|v| v as f64);
            let max = max.map(|v| v as f64);
            bounds_message("length must be", &min, &max, " characters")
        }
    }
}

fn bounds_message(lead: &str, min: &Option<f64>, max: &Option<f64>, unit: &str) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("{lead} between {min} and {max}{unit}"),
        (Some(min), None) => format!("{lead} at least {min}{unit}"),
        (None, Some(max)) => format!("{lead} at most {max}{unit}"),
        (None, None) => format!("{lead} in range{unit}"),
    }
}

/// Blank means null, empty string, empty collection, or false.
fn is_blank(value: &TypedValue) -> bool {
    match value {
        TypedValue::Null => true,
        TypedValue::Str(s) => s.is_empty(),
        TypedValue::Array(items) => items.is_empty(),
        TypedValue::Bool(b) => !b,
        _ => false,
    }
}

fn matches_choice(value: &TypedValue, options: &[String]) -> bool {
    let text = match value {
        TypedValue::Str(s) => s.clone(),
        TypedValue::Int(i) => i.to_string(),
        _ => return false,
    };
    options.iter().any(|o| *o == text)
}

/// A value matches an enum when it equals any case's declared value, or a
/// bare case's name.
fn matches_enum(value: &TypedValue, target: &str, registry: &SchemaRegistry) -> bool {
    let Some(symbol) = registry.resolve(target) else {
        return false;
    };
    symbol.cases.iter().any(|case| match (&case.value, value) {
        (CaseValue::Int(c), TypedValue::Int(v)) => c == v,
        (CaseValue::Str(c), TypedValue::Str(v)) => c == v,
        (CaseValue::Bare, TypedValue::Str(v)) => case.name == *v,
        _ => false,
    })
}

fn within_range(value: &TypedValue, min: Option<f64>, max: Option<f64>) -> bool {
    let number = match value {
        TypedValue::Int(i) => *i as f64,
        TypedValue::Float(f) => *f,
        _ => return false,
    };
    min.map_or(true, |m| number >= m) && max.map_or(true, |m| number <= m)
}

fn within_length(value: &TypedValue, min: Option<usize>, max: Option<usize>) -> bool {
    let length = match value {
        TypedValue::Str(s) => s.chars().count(),
        TypedValue::Array(items) => items.len(),
        _ => return false,
    };
    min.map_or(true, |m| length >= m) && max.map_or(true, |m| length <= m)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use test_case::test_case;
    use typebridge_core::{CaseValue, ClassSymbol, SymbolKind};

    use super::*;

    fn registry_with_status() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                ClassSymbol::builder("app::Status", SymbolKind::Enum)
                    .case("Draft", CaseValue::Int(0))
                    .case("Live", CaseValue::Int(1))
                    .case("Legacy", CaseValue::Str("legacy".into()))
                    .build(),
            )
            .unwrap();
        registry
    }

    #[test_case(TypedValue::Null, true; "null")]
    #[test_case(TypedValue::Str("".into()), true; "empty_string")]
    #[test_case(TypedValue::Array(vec![]), true; "empty_array")]
    #[test_case(TypedValue::Bool(false), true; "false_value")]
    #[test_case(TypedValue::Int(0), false; "zero_is_present")]
    #[test_case(TypedValue::Str("x".into()), false; "non_empty")]
    fn check___not_blank___blankness_table(value: TypedValue, blank: bool) {
        let registry = SchemaRegistry::new();
        let result = check(&Constraint::new(Rule::NotBlank), &value, &registry);
        assert_eq!(result.is_err(), blank);
    }

    #[test]
    fn check___not_blank___custom_message_wins() {
        let registry = SchemaRegistry::new();
        let constraint = Constraint::with_message(Rule::NotBlank, "required");

        let message = check(&constraint, &TypedValue::Null, &registry).unwrap_err();
        assert_eq!(message, "required");
    }

    #[test]
    fn check___choice___null_passes_and_mismatch_fails() {
        let registry = SchemaRegistry::new();
        let constraint = Constraint::new(Rule::Choice(vec!["a".into(), "b".into()]));

        check(&constraint, &TypedValue::Null, &registry).unwrap();
        check(&constraint, &TypedValue::Str("a".into()), &registry).unwrap();
        let message = check(&constraint, &TypedValue::Str("c".into()), &registry).unwrap_err();
        assert_eq!(message, "is not a valid choice");
    }

    #[test]
    fn check___enum_choice___matches_case_values() {
        let registry = registry_with_status();
        let constraint = Constraint::new(Rule::EnumChoice("Status".into()));

        check(&constraint, &TypedValue::Int(1), &registry).unwrap();
        check(&constraint, &TypedValue::Str("legacy".into()), &registry).unwrap();
        assert!(check(&constraint, &TypedValue::Int(9), &registry).is_err());
    }

    #[test_case(Some(1.0), Some(10.0), 5.0, true; "inside")]
    #[test_case(Some(1.0), Some(10.0), 0.5, false; "below")]
    #[test_case(None, Some(10.0), -100.0, true; "open_min")]
    #[test_case(Some(1.0), None, 100.0, true; "open_max")]
    fn check___range___bounds(min: Option<f64>, max: Option<f64>, value: f64, ok: bool) {
        let registry = SchemaRegistry::new();
        let constraint = Constraint::new(Rule::Range { min, max });
        let result = check(&constraint, &TypedValue::Float(value), &registry);
        assert_eq!(result.is_ok(), ok);
    }

    #[test]
    fn check___length___counts_chars_not_bytes() {
        let registry = SchemaRegistry::new();
        let constraint = Constraint::new(Rule::Length {
            min: None,
            max: Some(3),
        });

        check(&constraint, &TypedValue::Str("äöü".into()), &registry).unwrap();
        assert!(check(&constraint, &TypedValue::Str("vier".into()), &registry).is_err());
    }

    #[test]
    fn check___range___default_message_names_bounds() {
        let registry = SchemaRegistry::new();
        let constraint = Constraint::new(Rule::Range {
            min: Some(1.0),
            max: Some(5.0),
        });

        let message = check(&constraint, &TypedValue::Int(9), &registry).unwrap_err();
        assert_eq!(message, "must be between 1 and 5");
    }
}
