//! Field-by-field reconciliation of a stored entity with a partial update.
//!
//! Each entity type owns a [`MergePolicy`] table naming the rule for every
//! field. Entities apply the table in their own `merge` method, so the rules
//! are data and can be inspected and tested apart from the entity code.

/// How a single field reacts to an update payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Take the patch value when present, otherwise keep the stored value.
    #[default]
    Coalesce,
    /// Take the patch value only when present and not blank.
    SkipBlank,
    /// Always take the patch value; an absent value clears the field.
    Replace,
}

impl FieldPolicy {
    /// Resolve an optional field.
    pub fn resolve<T: Blank>(self, current: Option<T>, patch: Option<T>) -> Option<T> {
        match self {
            FieldPolicy::Coalesce => patch.or(current),
            FieldPolicy::SkipBlank => patch.filter(|value| !value.is_blank()).or(current),
            FieldPolicy::Replace => patch,
        }
    }

    /// Resolve a field that always holds a value.
    ///
    /// A required field can never be cleared, so `Replace` keeps the stored
    /// value when the patch has none.
    pub fn resolve_required<T: Blank>(self, current: T, patch: Option<T>) -> T {
        match self {
            FieldPolicy::Coalesce | FieldPolicy::Replace => patch.unwrap_or(current),
            FieldPolicy::SkipBlank => patch.filter(|value| !value.is_blank()).unwrap_or(current),
        }
    }
}

/// Values that may count as "blank" for [`FieldPolicy::SkipBlank`].
pub trait Blank {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for bool {}
impl Blank for i32 {}
impl Blank for f64 {}

/// Per-entity table of field name to [`FieldPolicy`].
#[derive(Debug, Clone, Copy)]
pub struct MergePolicy {
    entity: &'static str,
    fields: &'static [(&'static str, FieldPolicy)],
}

impl MergePolicy {
    pub const fn new(entity: &'static str, fields: &'static [(&'static str, FieldPolicy)]) -> Self {
        Self { entity, fields }
    }

    /// Rule for `field`.
    ///
    /// Every field an entity merges must be listed; debug builds panic on an
    /// unlisted name, release builds fall back to [`FieldPolicy::Coalesce`].
    pub fn rule(&self, field: &str) -> FieldPolicy {
        let rule = self
            .fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, policy)| *policy);
        debug_assert!(
            rule.is_some(),
            "{} merge policy has no rule for '{field}'",
            self.entity
        );
        rule.unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coalesce_keeps_current_on_absent_patch() {
        let policy = FieldPolicy::Coalesce;
        assert_eq!(policy.resolve(Some(3), None), Some(3));
        assert_eq!(policy.resolve(Some(3), Some(4)), Some(4));
        assert_eq!(policy.resolve(None::<i32>, None), None);
    }

    #[test]
    fn coalesce_accepts_blank_strings() {
        let policy = FieldPolicy::Coalesce;
        assert_eq!(
            policy.resolve_required("Rex".to_string(), Some(String::new())),
            ""
        );
    }

    #[test]
    fn skip_blank_ignores_whitespace_and_empty_lists() {
        let policy = FieldPolicy::SkipBlank;
        assert_eq!(
            policy.resolve_required("Dune".to_string(), Some("   ".to_string())),
            "Dune"
        );
        assert_eq!(
            policy.resolve_required(vec!["sf".to_string()], Some(vec![])),
            vec!["sf".to_string()]
        );
        assert_eq!(
            policy.resolve_required("Dune".to_string(), Some("Emma".to_string())),
            "Emma"
        );
    }

    #[test]
    fn replace_clears_optional_fields() {
        let policy = FieldPolicy::Replace;
        assert_eq!(policy.resolve(Some("Lab".to_string()), None), None);
        assert_eq!(policy.resolve(Some(4.5), Some(5.0)), Some(5.0));
    }

    #[test]
    fn replace_never_clears_required_fields() {
        assert_eq!(FieldPolicy::Replace.resolve_required(7, None), 7);
    }

    const WIDGET: MergePolicy = MergePolicy::new(
        "Widget",
        &[("name", FieldPolicy::SkipBlank), ("color", FieldPolicy::Coalesce)],
    );

    #[test]
    fn rule_reads_the_table() {
        assert_eq!(WIDGET.rule("name"), FieldPolicy::SkipBlank);
        assert_eq!(WIDGET.rule("color"), FieldPolicy::Coalesce);
        assert_eq!(WIDGET.fields().collect::<Vec<_>>(), vec!["name", "color"]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Widget merge policy has no rule for 'colour'")]
    fn misspelled_field_is_caught() {
        WIDGET.rule("colour");
    }
}
