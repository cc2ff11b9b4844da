//! Locates the result list inside whatever JSON the model returned.

use serde_json::Value;

use crate::models::{PlaceResult, PlaceResults};

/// Which rule matched a model answer. Rules are tried in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// Object with a set `results` field. The field is used as-is, even when
    /// it is not an array.
    ExactShape(Value),

    /// Object whose `results` is missing or unset; the first array-valued field.
    SingleArrayField { field: String, items: Vec<Value> },

    /// The answer is itself an array.
    BareArray(Vec<Value>),

    Unrecognized,
}

impl ResponseShape {
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ExactShape(_) => "exact",
            Self::SingleArrayField { .. } => "single_array_field",
            Self::BareArray(_) => "bare_array",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Result list for this shape. `Unrecognized` yields the format-issue placeholder.
    #[must_use]
    pub fn into_results(self) -> PlaceResults {
        match self {
            Self::ExactShape(Value::Array(items))
            | Self::SingleArrayField { items, .. }
            | Self::BareArray(items) => items,
            // A non-array `results` still goes to the caller, wrapped so the
            // response keeps its list type.
            Self::ExactShape(other) => vec![other],
            Self::Unrecognized => vec![PlaceResult::format_issue().to_value()],
        }
    }
}

#[must_use]
pub fn classify(value: Value) -> ResponseShape {
    match value {
        Value::Object(mut map) => {
            if map.get("results").is_some_and(is_set)
                && let Some(results) = map.remove("results")
            {
                return ResponseShape::ExactShape(results);
            }

            map.into_iter()
                .find_map(|(field, v)| match v {
                    Value::Array(items) => Some(ResponseShape::SingleArrayField { field, items }),
                    _ => None,
                })
                .unwrap_or(ResponseShape::Unrecognized)
        }
        Value::Array(items) => ResponseShape::BareArray(items),
        _ => ResponseShape::Unrecognized,
    }
}

/// `null`, `false`, zero and `""` count as unset; empty arrays and objects do not.
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn place(n: usize) -> Value {
        json!({
            "title": format!("Place {n}"),
            "description": "desc",
            "category": "Cafe, Bakery"
        })
    }

    #[test]
    fn test_exact_shape_passes_items_through() {
        let items: Vec<Value> = (0..7).map(place).collect();
        let shape = classify(json!({ "results": items.clone() }));

        assert_eq!(shape.label(), "exact");
        assert_eq!(shape.into_results(), items);
    }

    #[test]
    fn test_exact_shape_wins_over_other_arrays() {
        let shape = classify(json!({ "places": [place(1)], "results": [place(2)] }));
        assert_eq!(shape.into_results(), vec![place(2)]);
    }

    #[test]
    fn test_malformed_entries_propagate() {
        let shape = classify(json!({ "results": [1, "two", {"title": 3}] }));
        assert_eq!(shape.into_results(), vec![json!(1), json!("two"), json!({"title": 3})]);
    }

    #[test]
    fn test_single_array_field() {
        let shape = classify(json!({ "places": [place(1)] }));
        assert_eq!(
            shape,
            ResponseShape::SingleArrayField {
                field: "places".to_string(),
                items: vec![place(1)],
            }
        );
    }

    #[test]
    fn test_first_array_field_in_document_order() {
        let value: Value =
            serde_json::from_str(r#"{"note": "x", "zeta": [1], "alpha": [2]}"#).unwrap();
        match classify(value) {
            ResponseShape::SingleArrayField { field, .. } => assert_eq!(field, "zeta"),
            other => panic!("unexpected shape: {other:?}"),
        }
    }

    #[test]
    fn test_bare_array() {
        let shape = classify(json!([place(1), place(2)]));
        assert_eq!(shape.label(), "bare_array");
        assert_eq!(shape.into_results().len(), 2);
    }

    #[test]
    fn test_unrecognized_object_yields_placeholder() {
        let shape = classify(json!({"a": 1, "b": 2}));
        assert!(!shape.is_recognized());

        let results = shape.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["category"], "Error");
        assert_eq!(results[0]["title"], "Response Format Issue");
    }

    #[test]
    fn test_scalars_are_unrecognized() {
        assert_eq!(classify(json!("text")), ResponseShape::Unrecognized);
        assert_eq!(classify(json!(42)), ResponseShape::Unrecognized);
    }

    #[test]
    fn test_unset_results_falls_through_to_array_field() {
        let shape = classify(json!({"results": null, "places": [{"title": "A"}]}));
        assert_eq!(shape.label(), "single_array_field");
        assert_eq!(shape.into_results(), vec![json!({"title": "A"})]);

        let shape = classify(json!({"results": 0, "venues": [place(3)]}));
        assert_eq!(shape.into_results(), vec![place(3)]);
    }

    #[test]
    fn test_unset_results_alone_yields_placeholder() {
        for unset in [json!(null), json!(false), json!(0), json!("")] {
            let results = classify(json!({ "results": unset })).into_results();
            assert_eq!(results.len(), 1);
            assert_eq!(results[0]["title"], "Response Format Issue");
        }
    }

    #[test]
    fn test_empty_results_array_is_still_exact() {
        let shape = classify(json!({"results": [], "places": [place(1)]}));
        assert_eq!(shape.label(), "exact");
        assert!(shape.into_results().is_empty());
    }

    #[test]
    fn test_set_scalar_results_is_wrapped() {
        let results = classify(json!({"results": "none found"})).into_results();
        assert_eq!(results, vec![json!("none found")]);
    }
}
