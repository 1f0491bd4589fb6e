//! Certification categories and the exam-code inference heuristic.
//!
//! Records usually carry an explicit category. When they don't, a category is
//! inferred from substrings of the exam code. Rules are checked in order and
//! the first match wins, so a code containing both "900" and "305" is
//! "fundamentals".

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Category assigned when no rule matches.
pub const FALLBACK_CATEGORY: &str = "specialty";

/// Built-in inference table, in evaluation order.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    ("fundamentals", &["900"]),
    ("associate", &["102", "104", "204"]),
    ("expert", &["305", "400"]),
];

/// The four catalog categories, with display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum CertificationCategory {
    Fundamentals,
    Associate,
    Expert,
    Specialty,
}

impl CertificationCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [
        Self::Fundamentals,
        Self::Associate,
        Self::Expert,
        Self::Specialty,
    ];

    /// Category id as used in filter selections.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Fundamentals => "fundamentals",
            Self::Associate => "associate",
            Self::Expert => "expert",
            Self::Specialty => "specialty",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fundamentals => "Fundamentals",
            Self::Associate => "Associate",
            Self::Expert => "Expert",
            Self::Specialty => "Specialty",
        }
    }

    /// Look up a category by id. Ids are case-sensitive.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// Infer a category from an exam code using the built-in rules.
pub fn infer_category(code: &str) -> &'static str {
    DEFAULT_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|needle| code.contains(needle)))
        .map(|(category, _)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Source of inferred categories for records without an explicit one.
pub trait CategoryInference {
    /// Category for `code`. Must be deterministic.
    fn infer_category<'a>(&'a self, code: &str) -> &'a str;
}

/// The built-in rule table, without allocating.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCategories;

impl CategoryInference for BuiltinCategories {
    fn infer_category<'a>(&'a self, code: &str) -> &'a str {
        infer_category(code)
    }
}

/// One inference rule: codes containing any needle map to `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CategoryRule {
    pub category: String,
    pub needles: Vec<String>,
}

impl CategoryRule {
    pub fn new<I, S>(category: impl Into<String>, needles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            needles: needles.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this rule claims `code`.
    pub fn matches(&self, code: &str) -> bool {
        self.needles.iter().any(|needle| code.contains(needle.as_str()))
    }
}

/// Ordered rule table with a fallback category.
///
/// The default table reproduces [`infer_category`] exactly; a configured table
/// lets deployments with different exam numbering swap rules without touching
/// the filter predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl CategoryRules {
    pub fn new(rules: Vec<CategoryRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// The built-in rules as owned values.
    pub fn default_rules() -> Vec<CategoryRule> {
        DEFAULT_RULES
            .iter()
            .map(|(category, needles)| CategoryRule::new(*category, needles.iter().copied()))
            .collect()
    }

    /// Infer a category for `code`. First matching rule wins.
    pub fn infer<'a>(&'a self, code: &str) -> &'a str {
        self.rules
            .iter()
            .find(|rule| rule.matches(code))
            .map(|rule| rule.category.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

impl CategoryInference for CategoryRules {
    fn infer_category<'a>(&'a self, code: &str) -> &'a str {
        self.infer(code)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::new(Self::default_rules(), FALLBACK_CATEGORY)
    }
}
