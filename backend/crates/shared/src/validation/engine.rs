//! Validation Engine
//!
//! One [`Validator`] is built at startup with a rule set per payload type and
//! is then only read. It is `Send + Sync`; share it behind an `Arc`.

use std::any::{TypeId, type_name};
use std::collections::HashMap;

use super::rule_set::{FieldCheck, RuleSet};
use super::{FieldValue, FieldViolation, Validate, ValidationError};

/// Immutable registry of payload type -> rule set
#[derive(Debug, Default)]
pub struct Validator {
    rule_sets: HashMap<TypeId, RuleSet>,
}

impl Validator {
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Check every rule on every field
    ///
    /// Returns [`ValidationError::Rejected`] with all violations in
    /// declaration order, or [`ValidationError::InvalidTarget`] when `T` has
    /// no rule set or does not expose a field its rule set names.
    pub fn validate<T: Validate + 'static>(&self, payload: &T) -> Result<(), ValidationError> {
        let shape = type_name::<T>();
        let rule_set = self
            .rule_sets
            .get(&TypeId::of::<T>())
            .ok_or(ValidationError::InvalidTarget { shape })?;

        let mut violations = Vec::new();
        walk(rule_set, payload, None, shape, &mut violations)?;

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Rejected(violations))
        }
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.rule_sets.contains_key(&TypeId::of::<T>())
    }
}

fn walk(
    rule_set: &RuleSet,
    record: &dyn Validate,
    prefix: Option<&str>,
    shape: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Result<(), ValidationError> {
    for spec in rule_set.fields() {
        let value = record
            .field(spec.name)
            .ok_or(ValidationError::InvalidTarget { shape })?;

        let path = match prefix {
            Some(prefix) => format!("{prefix}.{}", spec.display),
            None => spec.display.to_owned(),
        };

        match (&spec.check, value) {
            (FieldCheck::Rules(rules), FieldValue::Absent) => {
                for rule in rules.iter().filter(|rule| !rule.passes(None)) {
                    violations.push(FieldViolation::new(path.as_str(), rule.tag()));
                }
            }
            (FieldCheck::Rules(rules), FieldValue::Text(text)) => {
                for rule in rules.iter().filter(|rule| !rule.passes(Some(text))) {
                    violations.push(FieldViolation::new(path.as_str(), rule.tag()));
                }
            }
            (FieldCheck::Nested(nested), FieldValue::Record(child)) => {
                walk(nested, child, Some(&path), shape, violations)?;
            }
            // Optional nested record that was not supplied
            (FieldCheck::Nested(_), FieldValue::Absent) => {}
            (FieldCheck::Rules(_), FieldValue::Record(_))
            | (FieldCheck::Nested(_), FieldValue::Text(_)) => {
                return Err(ValidationError::InvalidTarget { shape });
            }
        }
    }

    Ok(())
}

#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    rule_sets: HashMap<TypeId, RuleSet>,
}

impl ValidatorBuilder {
    /// Bind a rule set to payload type `T`; a second call for the same type
    /// replaces the first
    pub fn register<T: Validate + 'static>(mut self, rule_set: RuleSet) -> Self {
        self.rule_sets.insert(TypeId::of::<T>(), rule_set);
        self
    }

    pub fn build(self) -> Validator {
        Validator {
            rule_sets: self.rule_sets,
        }
    }
}
