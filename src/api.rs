//! Synchronous client for the **OpenPrescribing API (v1.0)**.
//!
//! Every query is a single blocking GET against
//! `https://openprescribing.net/api/1.0/<path>` with `format=json` merged
//! into the query string (caller-supplied parameters win on conflict).
//! A non-2xx status is surfaced as an error; there is no retry, backoff,
//! caching, or pagination — the endpoints return complete bodies.
//!
//! Typical usage:
//! ```no_run
//! # use open_prescribing::{ApiParams, Client};
//! let client = Client::default();
//! let params = ApiParams::from([("org_type".into(), "ccg".into())]);
//! let boundaries = client.query_org_location(Some(&params))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::{BoundaryCollection, DrugDetail, FeatureCollection, SpendRecord};
use anyhow::{Context, Result, bail};
use log::debug;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

const SERVICE_BASE_URL: &str = "https://openprescribing.net";
const API_VERSION: &str = "1.0";

/// Query parameters sent with a GET request.
pub type ApiParams = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Client {
    /// Build a client with a persistent HTTP session.
    ///
    /// `headers` are sent with every request (none by default).
    pub fn new(headers: Option<HeaderMap>) -> Self {
        let mut builder = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("open_prescribing/", env!("CARGO_PKG_VERSION")));
        if let Some(headers) = headers {
            builder = builder.default_headers(headers);
        }
        let http = builder.build().expect("reqwest client build");
        Self {
            base_url: SERVICE_BASE_URL.into(),
            http,
        }
    }

    /// Boundaries of Sub-ICB Locations, or the location of a practice, by code.
    ///
    /// GET `org_location`; the response is GeoJSON.
    pub fn query_org_location(
        &self,
        api_params: Option<&ApiParams>,
    ) -> Result<BoundaryCollection> {
        let collection: FeatureCollection = self.search("org_location", api_params)?;
        BoundaryCollection::new(collection).context("build boundary collection")
    }

    /// Monthly spending and items per Sub-ICB Location over the last five years.
    ///
    /// GET `spending_by_sicbl`; rows come back in server order, one
    /// [`SpendRecord`] per JSON array element.
    pub fn query_spending_by_location(
        &self,
        api_params: Option<&ApiParams>,
    ) -> Result<Vec<SpendRecord>> {
        self.search("spending_by_sicbl", api_params)
    }

    /// Total spending and items by month for a BNF code.
    ///
    /// The service does not expose this endpoint in v1.0; the call fails
    /// unconditionally rather than guessing its shape.
    pub fn query_spending_by_code(
        &self,
        _api_params: Option<&ApiParams>,
    ) -> Result<Vec<SpendRecord>> {
        bail!("spending by code is not supported by this client version")
    }

    /// Official names and codes of BNF sections, chemicals, and presentations.
    ///
    /// GET `bnf_code`.
    pub fn query_drug_details(&self, api_params: Option<&ApiParams>) -> Result<Vec<DrugDetail>> {
        self.search("bnf_code", api_params)
    }

    /// Perform one GET request and decode the JSON body.
    fn search<T: DeserializeOwned>(&self, path: &str, api_params: Option<&ApiParams>) -> Result<T> {
        let params = merge_params(api_params);
        let url = format!("{}/api/{}/{}", self.base_url, API_VERSION, path);
        debug!("request GET: {url} query_params: {params:?}");
        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .with_context(|| format!("GET {url}"))?;
        let status = response.status();
        if !status.is_success() {
            bail!("request failed with HTTP {status} for {url}");
        }
        response.json().context("decode json")
    }
}

/// Layer caller parameters over the `format=json` default; the caller's
/// value wins for any key it supplies, `format` included.
fn merge_params(api_params: Option<&ApiParams>) -> ApiParams {
    let mut params = ApiParams::from([("format".to_string(), "json".to_string())]);
    if let Some(extra) = api_params {
        for (key, value) in extra {
            params.insert(key.clone(), value.clone());
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(pairs: &[(&str, &str)]) -> ApiParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn merge_defaults_to_json_format() {
        assert_eq!(merge_params(None), owned(&[("format", "json")]));
    }

    #[test]
    fn merge_keeps_caller_params() {
        let extra = owned(&[("add", "me")]);
        assert_eq!(
            merge_params(Some(&extra)),
            owned(&[("format", "json"), ("add", "me")])
        );
    }

    #[test]
    fn merge_lets_caller_override_format() {
        let extra = owned(&[("format", "csv"), ("still", "json")]);
        assert_eq!(
            merge_params(Some(&extra)),
            owned(&[("format", "csv"), ("still", "json")])
        );
    }

    #[test]
    fn spending_by_code_is_unsupported() {
        let client = Client::default();
        let err = client.query_spending_by_code(None).unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }
}
