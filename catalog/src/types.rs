//! Core types for the certification catalog.
//!
//! Records are immutable snapshots handed over by the data-fetching layer.
//! Filter selections are plain values: every editing operation returns a new
//! [`FilterState`] instead of mutating shared UI state.
//!
//! With the `typescript` feature enabled, these types can be exported to
//! TypeScript using ts-rs so the frontend shares one definition.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Credential type assumed for records that do not carry one.
pub const DEFAULT_CREDENTIAL_TYPE: &str = "Certification";

/// Sentinel value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";

/// A certification as listed by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CertificationRecord {
    /// Unique identifier
    pub id: String,
    /// Exam code, e.g. "AZ-104". May encode a level hint.
    pub code: String,
    /// Display title
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit category facet value, if the API supplied one
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_exams: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Vec<String>,
    #[serde(default)]
    pub credential_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic_count: u32,
}

impl CertificationRecord {
    /// Create a record with only the required fields set.
    pub fn new(id: impl Into<String>, code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            title: title.into(),
            description: None,
            category: None,
            level: None,
            required_exams: Vec::new(),
            skills: Vec::new(),
            product: Vec::new(),
            role: Vec::new(),
            credential_type: None,
            topic_count: 0,
        }
    }

    /// Credential type with the catalog default applied.
    ///
    /// An empty string counts as absent.
    pub fn credential_type_or_default(&self) -> &str {
        self.credential_type
            .as_deref()
            .filter(|credential_type| !credential_type.is_empty())
            .unwrap_or(DEFAULT_CREDENTIAL_TYPE)
    }

    /// Builder: set description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: set explicit category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: set level.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Builder: set skills.
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set products.
    pub fn with_products<I, S>(mut self, products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product = products.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set roles.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.role = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: set credential type.
    pub fn with_credential_type(mut self, credential_type: impl Into<String>) -> Self {
        self.credential_type = Some(credential_type.into());
        self
    }

    /// Builder: set topic count.
    pub fn with_topic_count(mut self, topic_count: u32) -> Self {
        self.topic_count = topic_count;
        self
    }
}

/// Decode an explicit `null` the same way as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Category selection: either the "all" sentinel or one category id.
///
/// Serialized as a bare string so it matches the frontend's radio value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategorySelection {
    #[default]
    All,
    Only(String),
}

impl CategorySelection {
    /// Select a single category. Passing the sentinel yields [`CategorySelection::All`].
    pub fn only(category: impl Into<String>) -> Self {
        Self::from(category.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category,
        }
    }
}

impl From<String> for CategorySelection {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<CategorySelection> for String {
    fn from(value: CategorySelection) -> Self {
        match value {
            CategorySelection::All => ALL_CATEGORIES.to_string(),
            CategorySelection::Only(category) => category,
        }
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current search text and facet selections.
///
/// An empty facet set means "no constraint on that facet", never "exclude
/// everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Free text, matched case-insensitively
    pub search_query: String,
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub selected_category: CategorySelection,
    pub selected_products: BTreeSet<String>,
    pub selected_roles: BTreeSet<String>,
    pub selected_credential_types: BTreeSet<String>,
}

impl FilterState {
    /// An unconstrained filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the search query.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Builder: set the category selection.
    pub fn with_category(mut self, selection: CategorySelection) -> Self {
        self.selected_category = selection;
        self
    }

    /// Builder: add a product selection.
    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.selected_products.insert(product.into());
        self
    }

    /// Builder: add a role selection.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.selected_roles.insert(role.into());
        self
    }

    /// Builder: add a credential type selection.
    pub fn with_credential_type(mut self, credential_type: impl Into<String>) -> Self {
        self.selected_credential_types.insert(credential_type.into());
        self
    }

    /// Return a copy with `product` selected if it was not, deselected if it was.
    pub fn toggle_product(&self, product: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_products, product);
        next
    }

    /// Return a copy with `role` toggled.
    pub fn toggle_role(&self, role: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_roles, role);
        next
    }

    /// Return a copy with `credential_type` toggled.
    pub fn toggle_credential_type(&self, credential_type: &str) -> Self {
        let mut next = self.clone();
        toggle(&mut next.selected_credential_types, credential_type);
        next
    }

    /// Reset everything, including the search query.
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Whether any facet or category constraint is active.
    ///
    /// Search text is not a facet and does not count here.
    pub fn has_active_filters(&self) -> bool {
        !self.selected_products.is_empty()
            || !self.selected_roles.is_empty()
            || !self.selected_credential_types.is_empty()
            || !self.selected_category.is_all()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
