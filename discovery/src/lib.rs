//! Discovery & Coaching Engine for the certification-prep client.
//!
//! Single entry point for presentation code, combining:
//!
//! - **Catalog discovery** ([`catalog`]): facet index and compound filtering
//! - **Coaching** ([`coaching`]): mastery summary, lab progress, drill grading
//! - **Configuration** ([`DiscoveryConfig`]): YAML-loaded category rules and limits
//! - **Payload decoding**: catalog listings and tutor payloads from the API
//!
//! The engine is pure: no I/O, no background work, no interior state.
//!
//! # Example
//!
//! ```
//! use discovery::{DiscoveryEngine, FilterState};
//!
//! let engine = DiscoveryEngine::new();
//! let records = DiscoveryEngine::decode_catalog(
//!     r#"{"exams": [{"id": "1", "code": "AZ-104", "title": "Azure Administrator",
//!                    "product": ["Azure"], "topicCount": 8}]}"#,
//! )?;
//!
//! let facets = engine.compute_facet_index(&records);
//! assert_eq!(facets.credential_types, vec!["Certification"]);
//!
//! let state = FilterState::new().with_search("admin");
//! assert_eq!(engine.apply_filters(&records, &state).len(), 1);
//!
//! let summary = engine.summarize_payload(r#"{"mastery": null, "labs": [], "drill": null}"#)?;
//! assert_eq!(summary.confidence_label, "Low");
//! # Ok::<(), discovery::DiscoveryError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use catalog;
pub use coaching;

// Re-export main types
pub use catalog::{
    apply_filters, compute_facet_index, infer_category, level_label, CategorySelection,
    CertificationCategory, CertificationRecord, FacetIndex, FilterState,
};
pub use coaching::{
    grade_drill, summarize_coaching, CoachingSummary, LabDescriptor, LabProgress, MasteryEntry,
    MasteryMap, MicroDrill, NextAction, TutorPayload, WeakSkill,
};
pub use config::{CatalogConfig, CoachingConfig, DiscoveryConfig};
pub use engine::DiscoveryEngine;
pub use error::{DiscoveryError, Result};
