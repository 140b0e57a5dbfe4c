//! open_prescribing
//!
//! A lightweight Rust library for querying UK prescribing data from the
//! OpenPrescribing REST API. Pairs with the `oprs` CLI.
//!
//! ### Features
//! - Sub-ICB Location boundaries as GeoJSON, indexed by location code
//! - Monthly prescribing spend for a chemical in a location
//! - Free-text drug search across BNF sections, chemicals, and presentations
//! - A shared rate limiter for interactive call sites
//! - Save fetched rows as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use open_prescribing::{DataProvider, HttpDataProvider};
//!
//! let provider = HttpDataProvider::default();
//! let drugs = provider.drug_details("lipid", false)?;
//! for drug in &drugs {
//!     println!("{} {} {}", drug.kind(), drug.id(), drug.name());
//! }
//! let spend = provider.chemical_spending_for_location("0212000AA", "14L")?;
//! open_prescribing::storage::save_csv(&spend, "spend.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod models;
pub mod provider;
pub mod rate_limit;
pub mod storage;

pub use api::{ApiParams, Client};
pub use models::{BoundaryCollection, BoundaryError, DrugDetail, DrugKind, SpendRecord};
pub use provider::{DataProvider, HttpDataProvider};
pub use rate_limit::RateLimiter;
