use crate::api::ActionId;
use crate::types::{Constraint, ParamSpec};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ----------------- Result -----------------

/// One broken constraint, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("`{field}` {reason}")]
pub struct ContractViolation {
    pub field: String,
    pub reason: String,
}

impl ContractViolation {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self { field: field.to_string(), reason: reason.into() }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub action: ActionId,
    pub passed: bool,
    /// Declared-order violations, then undeclared fields in payload order.
    pub violations: Vec<ContractViolation>,
}

impl EvaluationResult {
    pub fn primary_violation(&self) -> Option<&ContractViolation> {
        self.violations.first()
    }
}

// ----------------- Helpers -----------------

fn check_value(spec: &ParamSpec, value: &Value) -> Option<ContractViolation> {
    match spec.constraint {
        Constraint::OneOf(labels) => match value.as_str() {
            Some(s) if labels.contains(&s) => None,
            Some(s) => Some(ContractViolation::new(
                spec.name,
                format!("must be one of [{}], got \"{}\"", labels.join(", "), s),
            )),
            None => Some(ContractViolation::new(
                spec.name,
                format!("must be a string, one of [{}]", labels.join(", ")),
            )),
        },
        Constraint::Range { min, max } => match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => None,
            Some(n) => Some(ContractViolation::new(
                spec.name,
                format!("must be in [{min}, {max}], got {n}"),
            )),
            None => Some(ContractViolation::new(
                spec.name,
                format!("must be an integer in [{min}, {max}]"),
            )),
        },
        Constraint::Text { max_len } => match value.as_str() {
            Some(s) if s.trim().is_empty() => {
                Some(ContractViolation::new(spec.name, "must not be blank"))
            }
            Some(s) if s.chars().count() > max_len => Some(ContractViolation::new(
                spec.name,
                format!("must be at most {max_len} characters"),
            )),
            Some(_) => None,
            None => Some(ContractViolation::new(spec.name, "must be a string")),
        },
    }
}

// ----------------- Core -----------------

/// Check a payload against the action's contract and collect every violation.
pub fn evaluate_params(action: ActionId, params: &Value) -> EvaluationResult {
    let contract = action.contract();
    let mut violations = Vec::new();

    let Some(map) = params.as_object() else {
        return EvaluationResult {
            action,
            passed: false,
            violations: vec![ContractViolation::new("params", "must be an object")],
        };
    };

    for spec in contract {
        match map.get(spec.name) {
            Some(value) => violations.extend(check_value(spec, value)),
            None => violations.push(ContractViolation::new(spec.name, "is required")),
        }
    }

    // No silent pass-through of fields nobody declared.
    for key in map.keys() {
        if !contract.iter().any(|spec| spec.name == key) {
            violations.push(ContractViolation::new(key, "is not a declared parameter"));
        }
    }

    EvaluationResult { action, passed: violations.is_empty(), violations }
}

/// Fail fast on the first violation.
pub fn validate_params(action: ActionId, params: &Value) -> Result<(), ContractViolation> {
    let result = evaluate_params(action, params);
    match result.violations.into_iter().next() {
        Some(violation) => Err(violation),
        None => Ok(()),
    }
}

/// Validate then bind the payload into the action's typed parameters.
pub fn bind_params<P: DeserializeOwned>(
    action: ActionId,
    params: &Value,
) -> Result<P, ContractViolation> {
    validate_params(action, params)?;
    P::deserialize(params).map_err(|e| ContractViolation::new("params", e.to_string()))
}
