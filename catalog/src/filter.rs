//! Compound filter predicate over certification records.
//!
//! A record is visible iff all five tests pass:
//!
//! 1. search text (case-insensitive substring of code, title, description or any skill)
//! 2. category (explicit, or inferred from the code when absent)
//! 3. product facet
//! 4. role facet
//! 5. credential type facet
//!
//! Within one facet the selected values are OR-ed; across facets the tests are
//! AND-ed. Adding a second product widens the product test, selecting a role
//! for the first time narrows the result. Empty selections never constrain.

use std::collections::BTreeSet;

use crate::category::{BuiltinCategories, CategoryInference};
use crate::types::{CategorySelection, CertificationRecord, FilterState};

/// A filter state compiled for repeated evaluation.
///
/// The search query is lower-cased once up front; category inference is
/// evaluated lazily per record and never cached on it.
pub struct RecordPredicate<'a, C: CategoryInference + ?Sized = BuiltinCategories> {
    state: &'a FilterState,
    query: String,
    categories: &'a C,
}

impl<'a> RecordPredicate<'a, BuiltinCategories> {
    /// Compile `state` using the built-in category rules.
    pub fn new(state: &'a FilterState) -> Self {
        Self::with_categories(state, &BuiltinCategories)
    }
}

impl<'a, C: CategoryInference + ?Sized> RecordPredicate<'a, C> {
    /// Compile `state` with a custom category inference source.
    pub fn with_categories(state: &'a FilterState, categories: &'a C) -> Self {
        Self {
            state,
            query: state.search_query.to_lowercase(),
            categories,
        }
    }

    /// Evaluate all five tests.
    pub fn matches(&self, record: &CertificationRecord) -> bool {
        self.matches_search(record)
            && self.matches_category(record)
            && self.matches_products(record)
            && self.matches_roles(record)
            && self.matches_credential_type(record)
    }

    pub fn matches_search(&self, record: &CertificationRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let hit = |text: &str| text.to_lowercase().contains(&self.query);

        hit(&record.code)
            || hit(&record.title)
            || record.description.as_deref().is_some_and(hit)
            || record.skills.iter().any(|skill| hit(skill))
    }

    pub fn matches_category(&self, record: &CertificationRecord) -> bool {
        match &self.state.selected_category {
            CategorySelection::All => true,
            CategorySelection::Only(selected) => match record.category.as_deref() {
                Some(explicit) => explicit == selected,
                None => self.categories.infer_category(&record.code) == selected,
            },
        }
    }

    pub fn matches_products(&self, record: &CertificationRecord) -> bool {
        intersects(&self.state.selected_products, &record.product)
    }

    pub fn matches_roles(&self, record: &CertificationRecord) -> bool {
        intersects(&self.state.selected_roles, &record.role)
    }

    pub fn matches_credential_type(&self, record: &CertificationRecord) -> bool {
        let selected = &self.state.selected_credential_types;
        selected.is_empty() || selected.contains(record.credential_type_or_default())
    }
}

/// OR-within-facet test. An empty selection is vacuously true.
fn intersects(selected: &BTreeSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|value| selected.contains(value))
}

/// Filter `records` by `state` using the built-in category rules.
///
/// The result preserves the input order and owns its records.
pub fn apply_filters(records: &[CertificationRecord], state: &FilterState) -> Vec<CertificationRecord> {
    apply_filters_with(records, state, &BuiltinCategories)
}

/// Filter `records` by `state`, inferring missing categories with `categories`.
pub fn apply_filters_with<C: CategoryInference + ?Sized>(
    records: &[CertificationRecord],
    state: &FilterState,
    categories: &C,
) -> Vec<CertificationRecord> {
    let predicate = RecordPredicate::with_categories(state, categories);
    let visible: Vec<CertificationRecord> = records
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect();

    tracing::trace!(
        total = records.len(),
        visible = visible.len(),
        category = %state.selected_category,
        "Applied catalog filters"
    );
    visible
}
