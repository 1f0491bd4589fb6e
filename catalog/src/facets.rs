//! Facet extraction.
//!
//! The facet index lists every distinct product, role and credential type
//! present in the current catalog, sorted for stable display. It is derived on
//! demand and never stored.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::CertificationRecord;

/// Distinct facet values observed across a record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct FacetIndex {
    pub products: Vec<String>,
    pub roles: Vec<String>,
    pub credential_types: Vec<String>,
}

impl FacetIndex {
    /// True when no record contributed any facet value.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.roles.is_empty() && self.credential_types.is_empty()
    }

    /// Stable SHA-256 digest of the index contents.
    ///
    /// Equal indexes always produce equal fingerprints, so callers can compare
    /// a single string to decide whether facet lists need re-rendering.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        for group in [&self.products, &self.roles, &self.credential_types] {
            for value in group {
                hasher.update((value.len() as u64).to_le_bytes());
                hasher.update(value.as_bytes());
            }
            // Group separator so ["a"], [] never collides with [], ["a"]
            hasher.update([0xffu8]);
        }

        hex::encode(hasher.finalize())
    }
}

/// Collect the distinct product, role and credential type values.
///
/// Records without a credential type contribute the default
/// ("Certification"). Values are compared exactly, without case folding.
pub fn compute_facet_index(records: &[CertificationRecord]) -> FacetIndex {
    let mut products = BTreeSet::new();
    let mut roles = BTreeSet::new();
    let mut credential_types = BTreeSet::new();

    for record in records {
        products.extend(record.product.iter().cloned());
        roles.extend(record.role.iter().cloned());
        credential_types.insert(record.credential_type_or_default().to_string());
    }

    tracing::trace!(
        records = records.len(),
        products = products.len(),
        roles = roles.len(),
        credential_types = credential_types.len(),
        "Computed facet index"
    );

    FacetIndex {
        products: products.into_iter().collect(),
        roles: roles.into_iter().collect(),
        credential_types: credential_types.into_iter().collect(),
    }
}
