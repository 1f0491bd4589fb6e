//! Certification catalog discovery for the learning client.
//!
//! Turns a raw certification listing into the facet lists shown in the filter
//! sidebar and the subset of records matching the learner's current search
//! and selections.
//!
//! - [`compute_facet_index`]: distinct product, role and credential type values
//! - [`apply_filters`]: order-preserving compound filter
//! - [`infer_category`]: exam-code heuristic for records without a category
//! - [`FilterState`]: immutable selection state with toggle/clear helpers
//!
//! Everything here is pure and synchronous. Missing optional fields are
//! defaulted, never rejected.
//!
//! # Example
//!
//! ```
//! use catalog::{apply_filters, compute_facet_index, CertificationRecord, FilterState};
//!
//! let records = vec![
//!     CertificationRecord::new("1", "AZ-900", "Azure Fundamentals").with_products(["Azure"]),
//!     CertificationRecord::new("2", "PL-300", "Power BI Data Analyst").with_products(["Power BI"]),
//! ];
//!
//! let facets = compute_facet_index(&records);
//! assert_eq!(facets.products, vec!["Azure", "Power BI"]);
//!
//! let state = FilterState::new().toggle_product("Azure");
//! let visible = apply_filters(&records, &state);
//! assert_eq!(visible.len(), 1);
//! ```

pub mod category;
pub mod facets;
pub mod filter;
pub mod level;
pub mod types;

// Re-export main types
pub use category::{
    infer_category, BuiltinCategories, CategoryInference, CategoryRule, CategoryRules,
    CertificationCategory, FALLBACK_CATEGORY,
};
pub use facets::{compute_facet_index, FacetIndex};
pub use filter::{apply_filters, apply_filters_with, RecordPredicate};
pub use level::level_label;
pub use types::*;
