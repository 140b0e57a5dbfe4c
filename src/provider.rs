//! Domain-shaped façade over the raw API client.
//!
//! [`DataProvider`] is the only surface an interactive front end needs:
//! three queries, each returning the data-model types from
//! [`crate::models`]. The trait keeps the raw query-string vocabulary out
//! of callers and gives tests a seam for a stub implementation.

use crate::api::{ApiParams, Client};
use crate::models::{BoundaryCollection, DrugDetail, SpendRecord};
use anyhow::Result;

/// Capability set consumed by the presentation layer.
pub trait DataProvider {
    /// Boundaries of all Sub-ICB Locations.
    fn location_boundaries(&self) -> Result<BoundaryCollection>;

    /// Prescription spending for a chemical in one location.
    ///
    /// `chemical` is a BNF chemical code, `location` an ODS code.
    fn chemical_spending_for_location(
        &self,
        chemical: &str,
        location: &str,
    ) -> Result<Vec<SpendRecord>>;

    /// BNF sections, chemicals, and presentations matching a name
    /// (case-insensitive) or a code.
    fn drug_details(&self, query: &str, exact: bool) -> Result<Vec<DrugDetail>>;
}

/// [`DataProvider`] backed by the OpenPrescribing HTTP API.
#[derive(Debug, Clone, Default)]
pub struct HttpDataProvider {
    api: Client,
}

impl HttpDataProvider {
    pub fn new(api: Client) -> Self {
        Self { api }
    }
}

impl DataProvider for HttpDataProvider {
    fn location_boundaries(&self) -> Result<BoundaryCollection> {
        // The API still filters by the former area identifier (CCG).
        let params = ApiParams::from([("org_type".into(), "ccg".into())]);
        self.api.query_org_location(Some(&params))
    }

    fn chemical_spending_for_location(
        &self,
        chemical: &str,
        location: &str,
    ) -> Result<Vec<SpendRecord>> {
        let params = ApiParams::from([
            ("code".into(), chemical.into()),
            ("org".into(), location.into()),
        ]);
        self.api.query_spending_by_location(Some(&params))
    }

    fn drug_details(&self, query: &str, exact: bool) -> Result<Vec<DrugDetail>> {
        let params = ApiParams::from([
            ("q".into(), query.into()),
            ("exact".into(), if exact { "true" } else { "false" }.into()),
        ]);
        self.api.query_drug_details(Some(&params))
    }
}
