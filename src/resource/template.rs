//! Url Template Module
//!
//! Resolves `:name` placeholder tokens in operation path templates against
//! caller-supplied arguments.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{ResourceError, Result};

/// Placeholder token: a colon followed by an identifier.
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("valid token regex"));

// == Template Resolution ==
/// Substitutes every `:name` token in `template` with its caller argument.
///
/// A token looks up its argument name in `aliases` first, falling back to
/// the token itself, then reads that argument from `params`. Arguments must
/// be scalars (string, number, or bool); numbers and bools are rendered in
/// their JSON form.
///
/// Fails with [`ResourceError::MissingParameter`] naming the first token
/// whose argument is absent or not a scalar.
pub fn resolve_template(
    template: &str,
    params: &BTreeMap<String, Value>,
    aliases: &BTreeMap<String, String>,
) -> Result<String> {
    let mut missing: Option<String> = None;

    let resolved = TOKEN_RE.replace_all(template, |caps: &regex::Captures<'_>| {
        let token = &caps[1];
        let argument = aliases.get(token).map(String::as_str).unwrap_or(token);

        match params.get(argument).and_then(scalar_to_string) {
            Some(value) => value,
            None => {
                if missing.is_none() {
                    missing = Some(token.to_string());
                }
                String::new()
            }
        }
    });

    match missing {
        Some(token) => Err(ResourceError::MissingParameter(token)),
        None => Ok(resolved.into_owned()),
    }
}

/// Renders a scalar JSON value as a path segment, rejecting everything else.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn aliases(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolve_single_token() {
        let url = resolve_template(
            "/todos/update/:id",
            &params(&[("id", json!(7))]),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(url, "/todos/update/7");
    }

    #[test]
    fn test_resolve_no_tokens() {
        let url = resolve_template("/todos/all", &BTreeMap::new(), &BTreeMap::new()).unwrap();
        assert_eq!(url, "/todos/all");
    }

    #[test]
    fn test_resolve_missing_parameter() {
        let result = resolve_template("/todos/update/:id", &BTreeMap::new(), &BTreeMap::new());
        assert!(matches!(
            result,
            Err(ResourceError::MissingParameter(token)) if token == "id"
        ));
    }

    #[test]
    fn test_resolve_aliased_token() {
        let url = resolve_template(
            "/todos/update/:id",
            &params(&[("todoId", json!(42))]),
            &aliases(&[("id", "todoId")]),
        )
        .unwrap();
        assert_eq!(url, "/todos/update/42");
    }

    #[test]
    fn test_resolve_identity_alias() {
        let url = resolve_template(
            "/todos/update/:id",
            &params(&[("id", json!(7))]),
            &aliases(&[("id", "id")]),
        )
        .unwrap();
        assert_eq!(url, "/todos/update/7");
    }

    #[test]
    fn test_resolve_alias_hides_token_name() {
        // With an alias in place, the token's own name no longer binds
        let result = resolve_template(
            "/todos/update/:id",
            &params(&[("id", json!(42))]),
            &aliases(&[("id", "todoId")]),
        );
        assert!(matches!(result, Err(ResourceError::MissingParameter(_))));
    }

    #[test]
    fn test_resolve_multiple_tokens() {
        let url = resolve_template(
            "/projects/:projectId/todos/:id",
            &params(&[("projectId", json!("alpha")), ("id", json!(3))]),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(url, "/projects/alpha/todos/3");
    }

    #[test]
    fn test_resolve_repeated_token() {
        let url = resolve_template(
            "/compare/:id/with/:id",
            &params(&[("id", json!(5))]),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(url, "/compare/5/with/5");
    }

    #[test]
    fn test_resolve_token_names_do_not_prefix_match() {
        // ":idx" is its own token, not ":id" followed by "x"
        let result = resolve_template(
            "/items/:idx",
            &params(&[("id", json!(1))]),
            &BTreeMap::new(),
        );
        assert!(matches!(
            result,
            Err(ResourceError::MissingParameter(token)) if token == "idx"
        ));
    }

    #[test]
    fn test_resolve_scalar_coercion() {
        let url = resolve_template(
            "/flags/:name/:enabled",
            &params(&[("name", json!("dark_mode")), ("enabled", json!(true))]),
            &BTreeMap::new(),
        )
        .unwrap();
        assert_eq!(url, "/flags/dark_mode/true");
    }

    #[test]
    fn test_resolve_rejects_non_scalar_argument() {
        let result = resolve_template(
            "/todos/:id",
            &params(&[("id", json!({"nested": 1}))]),
            &BTreeMap::new(),
        );
        assert!(matches!(result, Err(ResourceError::MissingParameter(_))));
    }

    #[test]
    fn test_resolve_rejects_null_argument() {
        let result = resolve_template(
            "/todos/:id",
            &params(&[("id", Value::Null)]),
            &BTreeMap::new(),
        );
        assert!(matches!(result, Err(ResourceError::MissingParameter(_))));
    }

    #[test]
    fn test_resolve_reports_first_missing_token() {
        let result = resolve_template(
            "/projects/:projectId/todos/:id",
            &BTreeMap::new(),
            &BTreeMap::new(),
        );
        assert!(matches!(
            result,
            Err(ResourceError::MissingParameter(token)) if token == "projectId"
        ));
    }
}
