//! Configuration for the discovery engine.

use serde::{Deserialize, Serialize};

use catalog::{CategoryRule, CategoryRules, FALLBACK_CATEGORY};
use coaching::DEFAULT_WEAKEST_LIMIT;

use crate::error::{DiscoveryError, Result};

/// Engine configuration. Every section is optional in YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Catalog filtering configuration
    pub catalog: CatalogConfig,
    /// Coach summary configuration
    pub coaching: CoachingConfig,
}

impl DiscoveryConfig {
    /// Load and validate config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        tracing::debug!(
            category_rules = config.catalog.category_rules.len(),
            weakest_skill_limit = config.coaching.weakest_skill_limit,
            "Loaded discovery configuration"
        );
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        self.catalog.validate()?;
        self.coaching.validate()
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Ordered exam-code rules; the first match wins
    pub category_rules: Vec<CategoryRule>,
    /// Category for codes no rule matches
    pub fallback_category: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            category_rules: CategoryRules::default_rules(),
            fallback_category: FALLBACK_CATEGORY.to_string(),
        }
    }
}

impl CatalogConfig {
    fn validate(&self) -> Result<()> {
        if self.fallback_category.is_empty() {
            return Err(DiscoveryError::InvalidConfiguration(
                "catalog.fallback_category must not be empty".to_string(),
            ));
        }
        for (index, rule) in self.category_rules.iter().enumerate() {
            if rule.category.is_empty() {
                return Err(DiscoveryError::InvalidConfiguration(format!(
                    "catalog.category_rules[{index}] has an empty category"
                )));
            }
            // An empty needle would match every code
            if rule.needles.is_empty() || rule.needles.iter().any(String::is_empty) {
                return Err(DiscoveryError::InvalidConfiguration(format!(
                    "catalog.category_rules[{index}] ({}) needs at least one non-empty needle",
                    rule.category
                )));
            }
        }
        Ok(())
    }

    /// Build the rule table.
    pub fn category_rules(&self) -> CategoryRules {
        CategoryRules::new(self.category_rules.clone(), self.fallback_category.clone())
    }
}

/// Coach summary configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachingConfig {
    /// Maximum weakest skills to surface
    pub weakest_skill_limit: usize,
}

impl Default for CoachingConfig {
    fn default() -> Self {
        Self {
            weakest_skill_limit: DEFAULT_WEAKEST_LIMIT,
        }
    }
}

impl CoachingConfig {
    fn validate(&self) -> Result<()> {
        if self.weakest_skill_limit == 0 {
            return Err(DiscoveryError::InvalidConfiguration(
                "coaching.weakest_skill_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
