//! Typed form state shared by the entity controllers.
//!
//! Field access goes through a per-entity key enum rather than stringly
//! reflection: each key knows its wire name, its slot index and whether it
//! is required. A form holds one optional [`FieldValue`] per key and
//! nothing else; validity is required-ness only.

use std::marker::PhantomData;

use crate::errors::FormError;

/// Current input value of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    /// Ordered collection driven by checkbox-style multi-select inputs.
    Many(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Rendering for lists and form dumps.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Many(items) => items.join(", "),
        }
    }
}

/// Field key of one entity kind: a fixed, closed set of slots.
pub trait FieldKey: Copy + Eq + 'static {
    /// Every key, in declaration order. Slot indices follow this order.
    const ALL: &'static [Self];

    /// The field's wire/display name.
    fn name(self) -> &'static str;

    /// Slot index into the form's value table.
    fn index(self) -> usize;

    /// All entity screens mark every field required; individual keys may
    /// override.
    fn required(self) -> bool {
        true
    }
}

/// Form state for one entity kind: one optional value per field key.
/// Initialized empty, populated from a fetched record on edit, cleared on
/// successful submit or explicit reset.
#[derive(Debug)]
pub struct Form<K: FieldKey> {
    values: Vec<Option<FieldValue>>,
    _marker: PhantomData<K>,
}

impl<K: FieldKey> Default for Form<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FieldKey> Form<K> {
    pub fn new() -> Self {
        Self {
            values: vec![None; K::ALL.len()],
            _marker: PhantomData,
        }
    }

    pub fn value(&self, key: K) -> Option<&FieldValue> {
        self.values[key.index()].as_ref()
    }

    pub fn set(&mut self, key: K, value: Option<FieldValue>) {
        self.values[key.index()] = value;
    }

    pub fn set_text(&mut self, key: K, value: impl Into<String>) {
        self.set(key, Some(FieldValue::text(value)));
    }

    pub fn set_number(&mut self, key: K, value: f64) {
        self.set(key, Some(FieldValue::Number(value)));
    }

    /// Clear every field back to empty.
    pub fn reset(&mut self) {
        for slot in &mut self.values {
            *slot = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Required-ness is the only validity rule.
    pub fn is_complete(&self) -> bool {
        K::ALL
            .iter()
            .all(|key| !key.required() || self.value(*key).is_some())
    }

    /// Names of required fields still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        K::ALL
            .iter()
            .filter(|key| key.required() && self.value(**key).is_none())
            .map(|key| key.name())
            .collect()
    }

    /// The field's text content, if it holds text.
    pub fn text(&self, key: K) -> Option<&str> {
        self.value(key).and_then(FieldValue::as_text)
    }

    /// The field interpreted as a number. Text values parse; an empty field
    /// is `None`; anything unparseable is a validation failure.
    pub fn number(&self, key: K) -> Result<Option<f64>, FormError> {
        match self.value(key) {
            None => Ok(None),
            Some(FieldValue::Number(n)) => Ok(Some(*n)),
            Some(FieldValue::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| FormError::Validation(format!("{} must be a number", key.name()))),
            Some(FieldValue::Many(_)) => Err(FormError::Validation(format!(
                "{} must be a number",
                key.name()
            ))),
        }
    }

    /// Toggle membership of `value` in a collection field: append if
    /// absent, remove the first occurrence if present. An empty field
    /// becomes a one-element collection; scalar fields are left untouched.
    pub fn toggle_array_value(&mut self, key: K, value: &str) {
        let slot = &mut self.values[key.index()];
        match slot {
            Some(FieldValue::Many(items)) => {
                if let Some(pos) = items.iter().position(|item| item == value) {
                    items.remove(pos);
                } else {
                    items.push(value.to_string());
                }
            }
            None => *slot = Some(FieldValue::Many(vec![value.to_string()])),
            Some(_) => {}
        }
    }

    /// Whether a collection field currently contains `value` (linear scan).
    pub fn has_array_value(&self, key: K, value: &str) -> bool {
        match self.value(key) {
            Some(FieldValue::Many(items)) => items.iter().any(|item| item == value),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum TestField {
        Name,
        Amount,
        Tags,
    }

    impl FieldKey for TestField {
        const ALL: &'static [Self] = &[Self::Name, Self::Amount, Self::Tags];

        fn name(self) -> &'static str {
            match self {
                Self::Name => "name",
                Self::Amount => "amount",
                Self::Tags => "tags",
            }
        }

        fn index(self) -> usize {
            match self {
                Self::Name => 0,
                Self::Amount => 1,
                Self::Tags => 2,
            }
        }
    }

    #[test]
    fn starts_empty_and_resets() {
        let mut form: Form<TestField> = Form::new();
        assert!(form.is_empty());
        assert!(!form.is_complete());

        form.set_text(TestField::Name, "first");
        form.set_number(TestField::Amount, 10.0);
        form.toggle_array_value(TestField::Tags, "a");
        assert!(form.is_complete());

        form.reset();
        assert!(form.is_empty());
        assert_eq!(
            form.missing_fields(),
            vec!["name", "amount", "tags"]
        );
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut form: Form<TestField> = Form::new();
        form.set(
            TestField::Tags,
            Some(FieldValue::Many(vec!["a".into(), "b".into(), "c".into()])),
        );

        form.toggle_array_value(TestField::Tags, "b");
        assert!(!form.has_array_value(TestField::Tags, "b"));
        form.toggle_array_value(TestField::Tags, "b");
        assert!(form.has_array_value(TestField::Tags, "b"));

        // Removal then re-append moves the entry to the back; a value not
        // yet present round-trips to the exact original order.
        form.toggle_array_value(TestField::Tags, "z");
        form.toggle_array_value(TestField::Tags, "z");
        assert_eq!(
            form.value(TestField::Tags),
            Some(&FieldValue::Many(vec![
                "a".into(),
                "c".into(),
                "b".into()
            ]))
        );
    }

    #[test]
    fn toggle_removes_only_first_occurrence() {
        let mut form: Form<TestField> = Form::new();
        form.set(
            TestField::Tags,
            Some(FieldValue::Many(vec!["x".into(), "y".into(), "x".into()])),
        );
        form.toggle_array_value(TestField::Tags, "x");
        assert_eq!(
            form.value(TestField::Tags),
            Some(&FieldValue::Many(vec!["y".into(), "x".into()]))
        );
    }

    #[test]
    fn toggle_on_empty_field_creates_collection() {
        let mut form: Form<TestField> = Form::new();
        form.toggle_array_value(TestField::Tags, "a");
        assert!(form.has_array_value(TestField::Tags, "a"));
        form.toggle_array_value(TestField::Tags, "a");
        assert_eq!(
            form.value(TestField::Tags),
            Some(&FieldValue::Many(vec![]))
        );
    }

    #[test]
    fn number_parses_text_and_rejects_garbage() {
        let mut form: Form<TestField> = Form::new();
        assert_eq!(form.number(TestField::Amount), Ok(None));

        form.set_text(TestField::Amount, " 42.5 ");
        assert_eq!(form.number(TestField::Amount), Ok(Some(42.5)));

        form.set_text(TestField::Amount, "many");
        assert!(matches!(
            form.number(TestField::Amount),
            Err(FormError::Validation(_))
        ));
    }
}
