//! Schema adherence checking.
//!
//! A short-circuiting chain of checks over one parsed call. The shape checks
//! always run; after them the call is checked against the tool schema when
//! one is present as a mapping, otherwise against the gold call, otherwise
//! not at all. The first failing check names the verdict; arguments are
//! visited in the order the model wrote them.

use crate::taxonomy::{ErrorTag, Verdict};
use callcheck_core::schema::SchemaView;
use callcheck_core::{JsonType, PredictionRecord, CALL_KEYS};
use serde_json::{Map, Value as JsonValue};

/// Check one prediction record.
pub fn check_record(record: &PredictionRecord) -> Verdict {
    check_call(
        record.parsed_output.as_ref(),
        record.tool_schema.as_ref(),
        record.target_call.as_ref(),
    )
}

/// Check a parsed call against a schema, falling back to the gold call.
///
/// `parsed` is `None` when upstream decoding failed.
///
/// ```rust
/// use callcheck_evals::{check_call, ErrorTag, Verdict};
/// use serde_json::json;
///
/// let schema = json!({
///     "name": "get_weather",
///     "parameters": {
///         "properties": {"city": {"type": "string"}, "unit": {"type": "string"}},
///         "required": ["city"]
///     }
/// });
/// let parsed = json!({"name": "get_weather", "arguments": {"unit": "celsius"}});
/// assert_eq!(
///     check_call(Some(&parsed), Some(&schema), None),
///     Verdict::Fail(ErrorTag::MissingRequiredArg)
/// );
/// ```
pub fn check_call(
    parsed: Option<&JsonValue>,
    schema: Option<&JsonValue>,
    gold: Option<&JsonValue>,
) -> Verdict {
    validate(parsed, schema, gold).into()
}

fn validate(
    parsed: Option<&JsonValue>,
    schema: Option<&JsonValue>,
    gold: Option<&JsonValue>,
) -> Result<(), ErrorTag> {
    let parsed = parsed.ok_or(ErrorTag::InvalidJson)?;
    let call = parsed.as_object().ok_or(ErrorTag::NotObject)?;

    if CALL_KEYS.iter().any(|key| !call.contains_key(*key)) {
        return Err(ErrorTag::MissingKey);
    }
    if call.keys().any(|key| !CALL_KEYS.contains(&key.as_str())) {
        return Err(ErrorTag::ExtraKey);
    }

    let name = &call["name"];
    let arguments = call["arguments"].as_object().ok_or(ErrorTag::WrongType)?;

    match (
        schema.and_then(SchemaView::new),
        gold.and_then(JsonValue::as_object),
    ) {
        (Some(schema), _) => against_schema(name, arguments, schema),
        (None, Some(gold)) => against_gold(name, arguments, gold),
        (None, None) => Ok(()),
    }
}

fn against_schema(
    name: &JsonValue,
    arguments: &Map<String, JsonValue>,
    schema: SchemaView<'_>,
) -> Result<(), ErrorTag> {
    if let Some(declared) = schema.name() {
        if name.as_str() != Some(declared) {
            return Err(ErrorTag::WrongToolName);
        }
    }

    let Some(params) = schema.parameters() else {
        return Ok(());
    };

    if let Some(required) = params.required() {
        // A non-string entry can never name a present argument.
        let all_present = required
            .iter()
            .all(|req| req.as_str().is_some_and(|key| arguments.contains_key(key)));
        if !all_present {
            return Err(ErrorTag::MissingRequiredArg);
        }
    }

    if let Some(properties) = params.properties() {
        for (key, value) in arguments {
            let constraint = properties
                .constraint(key)
                .ok_or(ErrorTag::UnknownArgument)?;
            if !constraint.accepts(value) {
                return Err(ErrorTag::WrongArgType);
            }
        }
    }

    Ok(())
}

fn against_gold(
    name: &JsonValue,
    arguments: &Map<String, JsonValue>,
    gold: &Map<String, JsonValue>,
) -> Result<(), ErrorTag> {
    // An absent gold name matches a `null` predicted name.
    if gold.get("name").unwrap_or(&JsonValue::Null) != name {
        return Err(ErrorTag::WrongToolName);
    }

    // Without a schema optional arguments are unknowable: only the gold
    // arguments are checked, for presence and exact type (no widening).
    let Some(gold_args) = gold.get("arguments") else {
        return Ok(());
    };
    let Some(gold_args) = gold_args.as_object() else {
        return Ok(());
    };
    for (key, expected) in gold_args {
        let actual = arguments.get(key).ok_or(ErrorTag::MissingKey)?;
        if JsonType::of(actual) != JsonType::of(expected) {
            return Err(ErrorTag::WrongType);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn weather_schema() -> JsonValue {
        json!({
            "name": "get_weather",
            "description": "Current weather for a city",
            "parameters": {
                "type": "object",
                "properties": {
                    "city": {"type": "string"},
                    "unit": {"type": "string"}
                },
                "required": ["city"]
            }
        })
    }

    fn check_weather(parsed: JsonValue) -> Verdict {
        check_call(Some(&parsed), Some(&weather_schema()), None)
    }

    #[test]
    fn test_optional_argument_may_be_omitted() {
        let verdict = check_weather(json!({"name": "get_weather", "arguments": {"city": "Paris"}}));
        assert_eq!(verdict, Verdict::Pass);
        assert_eq!(verdict.tag(), "ok");
    }

    #[test]
    fn test_missing_required_argument() {
        let verdict = check_weather(json!({"name": "get_weather", "arguments": {"unit": "celsius"}}));
        assert_eq!(verdict, Verdict::Fail(ErrorTag::MissingRequiredArg));
    }

    #[test]
    fn test_unknown_argument() {
        let verdict = check_weather(json!({
            "name": "get_weather",
            "arguments": {"city": "Paris", "country": "FR"}
        }));
        assert_eq!(verdict, Verdict::Fail(ErrorTag::UnknownArgument));
    }

    #[test]
    fn test_integer_satisfies_number() {
        let schema = json!({
            "name": "pay",
            "parameters": {"properties": {"amount": {"type": "number"}}, "required": ["amount"]}
        });
        let parsed = json!({"name": "pay", "arguments": {"amount": 10}});
        assert_eq!(check_call(Some(&parsed), Some(&schema), None), Verdict::Pass);
    }

    #[test]
    fn test_fraction_does_not_satisfy_integer() {
        let schema = json!({
            "name": "repeat",
            "parameters": {"properties": {"times": {"type": "integer"}}}
        });
        let parsed = json!({"name": "repeat", "arguments": {"times": 2.5}});
        assert_eq!(
            check_call(Some(&parsed), Some(&schema), None),
            Verdict::Fail(ErrorTag::WrongArgType)
        );
    }

    #[test]
    fn test_type_union() {
        let schema = json!({
            "name": "f",
            "parameters": {"properties": {"x": {"type": ["string", "null"]}}}
        });
        let ok = json!({"name": "f", "arguments": {"x": null}});
        let bad = json!({"name": "f", "arguments": {"x": 1}});
        assert_eq!(check_call(Some(&ok), Some(&schema), None), Verdict::Pass);
        assert_eq!(
            check_call(Some(&bad), Some(&schema), None),
            Verdict::Fail(ErrorTag::WrongArgType)
        );
    }

    #[test]
    fn test_untyped_property_accepts_anything() {
        let schema = json!({"name": "f", "parameters": {"properties": {"x": {}}}});
        let parsed = json!({"name": "f", "arguments": {"x": [1, {"y": 2}]}});
        assert_eq!(check_call(Some(&parsed), Some(&schema), None), Verdict::Pass);
    }

    #[rstest]
    #[case(None, ErrorTag::InvalidJson)]
    #[case(Some(json!([1, 2])), ErrorTag::NotObject)]
    #[case(Some(json!("get_weather")), ErrorTag::NotObject)]
    #[case(Some(json!({"name": "get_weather"})), ErrorTag::MissingKey)]
    #[case(Some(json!({"arguments": {}})), ErrorTag::MissingKey)]
    #[case(Some(json!({"name": "get_weather", "arguments": {}, "id": 1})), ErrorTag::ExtraKey)]
    #[case(Some(json!({"name": "get_weather", "arguments": "city=Paris"})), ErrorTag::WrongType)]
    #[case(Some(json!({"name": "get_forecast", "arguments": {"city": "Paris"}})), ErrorTag::WrongToolName)]
    #[case(Some(json!({"name": "get_weather", "arguments": {"city": 75001}})), ErrorTag::WrongArgType)]
    fn test_failure_tags(#[case] parsed: Option<JsonValue>, #[case] expected: ErrorTag) {
        let verdict = check_call(parsed.as_ref(), Some(&weather_schema()), None);
        assert_eq!(verdict, Verdict::Fail(expected));
    }

    fn check_text(parsed: &str, schema: &JsonValue) -> Verdict {
        let parsed: JsonValue = serde_json::from_str(parsed).unwrap();
        check_call(Some(&parsed), Some(schema), None)
    }

    #[rstest]
    #[case(r#"{"name": "f", "arguments": {"zzz": 1, "city": 5}}"#, Verdict::Fail(ErrorTag::UnknownArgument))]
    #[case(r#"{"name": "f", "arguments": {"city": 5, "zzz": 1}}"#, Verdict::Fail(ErrorTag::WrongArgType))]
    #[case(r#"{"arguments": {"count": 1.5, "aaa": true}, "name": "f"}"#, Verdict::Fail(ErrorTag::WrongArgType))]
    #[case(r#"{"name": "f", "arguments": {"count": 123456789012345678901234567890}}"#, Verdict::Pass)]
    #[case(r#"{"name": "f", "arguments": {"count": -98765432109876543210, "city": "Oslo"}}"#, Verdict::Pass)]
    #[case(r#"{"name": "f", "arguments": {"count": 1e30}}"#, Verdict::Fail(ErrorTag::WrongArgType))]
    fn test_first_failing_argument_in_written_order(#[case] parsed: &str, #[case] expected: Verdict) {
        let schema = json!({
            "name": "f",
            "parameters": {
                "properties": {"city": {"type": "string"}, "count": {"type": "integer"}}
            }
        });
        assert_eq!(check_text(parsed, &schema), expected);
    }

    #[test]
    fn test_gold_arguments_checked_in_written_order() {
        let gold: JsonValue =
            serde_json::from_str(r#"{"name": "f", "arguments": {"b": 1, "a": "x"}}"#).unwrap();
        let parsed = json!({"name": "f", "arguments": {"a": 1}});
        assert_eq!(
            check_call(Some(&parsed), None, Some(&gold)),
            Verdict::Fail(ErrorTag::MissingKey)
        );
    }

    #[test]
    fn test_gold_without_name_matches_null_name() {
        let gold = json!({"arguments": {"x": 1}});
        let null_name = json!({"name": null, "arguments": {"x": 2}});
        let named = json!({"name": "f", "arguments": {"x": 2}});
        assert_eq!(check_call(Some(&null_name), None, Some(&gold)), Verdict::Pass);
        assert_eq!(
            check_call(Some(&named), None, Some(&gold)),
            Verdict::Fail(ErrorTag::WrongToolName)
        );
    }

    #[test]
    fn test_shape_checks_precede_schema_checks() {
        // Both a missing key and a wrong tool name: the shape check wins.
        let parsed = json!({"name": "other"});
        assert_eq!(
            check_call(Some(&parsed), Some(&weather_schema()), None),
            Verdict::Fail(ErrorTag::MissingKey)
        );
    }

    #[test]
    fn test_required_checked_before_unknown() {
        let parsed = json!({"name": "get_weather", "arguments": {"country": "FR"}});
        assert_eq!(check_weather(parsed), Verdict::Fail(ErrorTag::MissingRequiredArg));
    }

    #[test]
    fn test_schema_without_name_skips_name_check() {
        let schema = json!({"parameters": {"properties": {"q": {"type": "string"}}}});
        let parsed = json!({"name": "anything", "arguments": {"q": "rust"}});
        assert_eq!(check_call(Some(&parsed), Some(&schema), None), Verdict::Pass);
    }

    #[test]
    fn test_schema_without_parameters_rejects_arguments() {
        let schema = json!({"name": "ping"});
        let empty = json!({"name": "ping", "arguments": {}});
        let extra = json!({"name": "ping", "arguments": {"host": "a"}});
        assert_eq!(check_call(Some(&empty), Some(&schema), None), Verdict::Pass);
        assert_eq!(
            check_call(Some(&extra), Some(&schema), None),
            Verdict::Fail(ErrorTag::UnknownArgument)
        );
    }

    #[test]
    fn test_malformed_parameters_skip_argument_checks() {
        let schema = json!({"name": "ping", "parameters": "none"});
        let parsed = json!({"name": "ping", "arguments": {"host": "a"}});
        assert_eq!(check_call(Some(&parsed), Some(&schema), None), Verdict::Pass);
    }

    #[test]
    fn test_non_string_required_entry_is_missing() {
        let schema = json!({"name": "f", "parameters": {"properties": {"1": {}}, "required": [1]}});
        let parsed = json!({"name": "f", "arguments": {"1": true}});
        assert_eq!(
            check_call(Some(&parsed), Some(&schema), None),
            Verdict::Fail(ErrorTag::MissingRequiredArg)
        );
    }

    #[test]
    fn test_schema_takes_precedence_over_gold() {
        // Gold disagrees on everything, but the schema is authoritative.
        let gold = json!({"name": "other_tool", "arguments": {"zip": 1}});
        let parsed = json!({"name": "get_weather", "arguments": {"city": "Paris"}});
        assert_eq!(
            check_call(Some(&parsed), Some(&weather_schema()), Some(&gold)),
            Verdict::Pass
        );
    }

    #[test]
    fn test_non_mapping_schema_uses_gold() {
        let gold = json!({"name": "f", "arguments": {"x": 1}});
        let parsed = json!({"name": "g", "arguments": {"x": 1}});
        assert_eq!(
            check_call(Some(&parsed), Some(&json!("schema")), Some(&gold)),
            Verdict::Fail(ErrorTag::WrongToolName)
        );
    }

    #[rstest]
    #[case(json!({"name": "f", "arguments": {"x": 1, "y": "a"}}), Verdict::Pass)]
    #[case(json!({"name": "f", "arguments": {"x": 1, "y": "a", "z": true}}), Verdict::Pass)]
    #[case(json!({"name": "g", "arguments": {"x": 1, "y": "a"}}), Verdict::Fail(ErrorTag::WrongToolName))]
    #[case(json!({"name": "f", "arguments": {"x": 1}}), Verdict::Fail(ErrorTag::MissingKey))]
    #[case(json!({"name": "f", "arguments": {"x": "1", "y": "a"}}), Verdict::Fail(ErrorTag::WrongType))]
    #[case(json!({"name": "f", "arguments": {"x": 1.5, "y": "a"}}), Verdict::Fail(ErrorTag::WrongType))]
    fn test_gold_fallback(#[case] parsed: JsonValue, #[case] expected: Verdict) {
        let gold = json!({"name": "f", "arguments": {"x": 1, "y": "b"}});
        assert_eq!(check_call(Some(&parsed), None, Some(&gold)), expected);
    }

    #[test]
    fn test_gold_fallback_has_no_widening() {
        let gold = json!({"name": "f", "arguments": {"amount": 1.5}});
        let parsed = json!({"name": "f", "arguments": {"amount": 2}});
        assert_eq!(
            check_call(Some(&parsed), None, Some(&gold)),
            Verdict::Fail(ErrorTag::WrongType)
        );
    }

    #[test]
    fn test_no_schema_and_no_gold_passes_well_formed_calls() {
        let parsed = json!({"name": "anything", "arguments": {"a": 1}});
        assert_eq!(check_call(Some(&parsed), None, None), Verdict::Pass);
        assert_eq!(check_call(Some(&parsed), None, Some(&json!([]))), Verdict::Pass);
    }

    #[test]
    fn test_check_record_is_idempotent() {
        let record = PredictionRecord::new("r1", json!({"name": "get_weather", "arguments": {}}))
            .with_tool_schema(weather_schema())
            .with_parsed_output(json!({"name": "get_weather", "arguments": {"city": 1}}));
        let before = record.clone();

        let first = check_record(&record);
        let second = check_record(&record);
        assert_eq!(first, second);
        assert_eq!(first, Verdict::Fail(ErrorTag::WrongArgType));
        assert_eq!(record, before);
    }
}
