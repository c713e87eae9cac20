//! Rule Sets
//!
//! The per-shape table of field -> rules. Each field carries the display name
//! it is reported under; the name is fixed when the rule set is built, so the
//! reported path never depends on how the payload type is named in Rust.

use super::rule::Rule;

/// What a field is checked with
#[derive(Debug)]
pub(crate) enum FieldCheck {
    Rules(Vec<Rule>),
    Nested(RuleSet),
}

#[derive(Debug)]
pub(crate) struct FieldSpec {
    /// Key passed to [`super::Validate::field`]
    pub(crate) name: &'static str,
    /// Path segment used in violations
    pub(crate) display: &'static str,
    pub(crate) check: FieldCheck,
}

/// Immutable field -> rules mapping for one request shape
#[derive(Debug, Default)]
pub struct RuleSet {
    fields: Vec<FieldSpec>,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Fields in declaration order
    pub(crate) fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    fields: Vec<FieldSpec>,
}

impl RuleSetBuilder {
    /// Field reported under its own name
    pub fn field(self, name: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.field_as(name, name, rules)
    }

    /// Field reported under `display` instead of `name`
    pub fn field_as(
        mut self,
        name: &'static str,
        display: &'static str,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name,
            display,
            check: FieldCheck::Rules(rules.into_iter().collect()),
        });
        self
    }

    /// Nested record checked with its own rule set; violations are
    /// reported as `name.child`
    pub fn nested(mut self, name: &'static str, rules: RuleSet) -> Self {
        self.fields.push(FieldSpec {
            name,
            display: name,
            check: FieldCheck::Nested(rules),
        });
        self
    }

    pub fn build(self) -> RuleSet {
        RuleSet {
            fields: self.fields,
        }
    }
}
