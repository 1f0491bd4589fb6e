//! The discovery engine facade used by presentation code.
//!
//! Holds only immutable configuration. Every call receives its own input
//! snapshot and returns freshly allocated output, so one engine can be shared
//! freely between views and threads.

use serde::Deserialize;

use catalog::{
    apply_filters_with, compute_facet_index, CategoryRules, CertificationRecord, FacetIndex,
    FilterState,
};
use coaching::{CoachingSummary, LabDescriptor, MasteryMap, MicroDrill, Summarizer, TutorPayload};

use crate::config::DiscoveryConfig;
use crate::error::Result;

/// Catalog listing as returned by the exams endpoint.
#[derive(Deserialize)]
struct CatalogListing {
    exams: Vec<CertificationRecord>,
}

/// Catalog discovery and coach summaries behind one configured entry point.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryEngine {
    categories: CategoryRules,
    summarizer: Summarizer,
}

impl DiscoveryEngine {
    /// Create an engine with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from validated configuration.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            categories: config.catalog.category_rules(),
            summarizer: Summarizer::with_weakest_limit(config.coaching.weakest_skill_limit),
        })
    }

    /// Load configuration from YAML and build an engine.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_config(&DiscoveryConfig::from_yaml(yaml)?)
    }

    /// Distinct facet values for the sidebar.
    pub fn compute_facet_index(&self, records: &[CertificationRecord]) -> FacetIndex {
        let index = compute_facet_index(records);
        tracing::debug!(
            records = records.len(),
            fingerprint = %index.fingerprint(),
            "Facet index ready"
        );
        index
    }

    /// Records matching `state`, in their original order.
    pub fn apply_filters(
        &self,
        records: &[CertificationRecord],
        state: &FilterState,
    ) -> Vec<CertificationRecord> {
        let visible = apply_filters_with(records, state, &self.categories);
        tracing::debug!(
            total = records.len(),
            visible = visible.len(),
            active_filters = state.has_active_filters(),
            "Filtered catalog"
        );
        visible
    }

    /// Category for an exam code under this engine's rules.
    pub fn infer_category<'a>(&'a self, code: &str) -> &'a str {
        self.categories.infer(code)
    }

    /// Coach panel summary.
    pub fn summarize_coaching(
        &self,
        mastery: Option<&MasteryMap>,
        labs: &[LabDescriptor],
        drill: Option<&MicroDrill>,
    ) -> CoachingSummary {
        let summary = self.summarizer.summarize(mastery, labs, drill);
        tracing::debug!(
            assessed_skills = mastery.map_or(0, MasteryMap::len),
            average_mastery = summary.average_mastery,
            actions = summary.next_actions.len(),
            "Coaching summary ready"
        );
        summary
    }

    /// Decode a tutor payload and summarize it.
    pub fn summarize_payload(&self, json: &str) -> Result<CoachingSummary> {
        let payload = TutorPayload::from_json(json)?;
        Ok(self.summarize_coaching(
            payload.mastery.as_ref(),
            &payload.labs,
            payload.drill.as_ref(),
        ))
    }

    /// Decode a catalog listing, either `{"exams": [...]}` or a bare array.
    ///
    /// The shape is chosen from the first token, so decode errors keep the
    /// offending field and position.
    pub fn decode_catalog(json: &str) -> Result<Vec<CertificationRecord>> {
        let decoded = if json.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<CertificationRecord>>(json)
        } else {
            serde_json::from_str::<CatalogListing>(json).map(|listing| listing.exams)
        };
        let exams = decoded.map_err(|e| {
            tracing::warn!(error = %e, "Rejected catalog payload");
            e
        })?;
        tracing::debug!(records = exams.len(), "Decoded catalog listing");
        Ok(exams)
    }
}
