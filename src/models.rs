use ahash::AHashMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by [`BoundaryCollection`] construction and lookup.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundaryError {
    /// No feature in the collection carries this code.
    #[error("no boundary feature with code `{0}`")]
    UnknownCode(String),
    /// Two features in the source collection share a code.
    #[error("duplicate boundary feature code `{0}`")]
    DuplicateCode(String),
}

/// One month of prescribing spend reported for one organization.
///
/// Deserialized directly from an element of the API's `spending_by_sicbl`
/// JSON array. The `date` field arrives as `YYYY-MM-DD` text; anything else
/// fails deserialization and no record is produced. Fields are private, so a
/// record cannot be altered after it is parsed:
///
/// ```compile_fail
/// let raw = r#"{"items":1,"quantity":1.0,"actual_cost":1.0,
///               "date":"2022-01-01","row_id":"A","row_name":"B"}"#;
/// let mut record: open_prescribing::SpendRecord = serde_json::from_str(raw).unwrap();
/// record.items = 1_000; // private field
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendRecord {
    items: u64,
    quantity: f64,
    actual_cost: f64,
    date: NaiveDate,
    row_id: String,
    row_name: String,
}

impl SpendRecord {
    /// Number of prescribed items.
    pub fn items(&self) -> u64 {
        self.items
    }

    /// Quantity prescribed; the unit depends on the drug formulation.
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Actual cost in pounds sterling.
    pub fn actual_cost(&self) -> f64 {
        self.actual_cost
    }

    /// Reporting month.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// ODS code of the reporting organization.
    pub fn row_id(&self) -> &str {
        &self.row_id
    }

    /// Human-readable name of the reporting organization.
    pub fn row_name(&self) -> &str {
        &self.row_name
    }
}

/// Classification level of a BNF code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrugKind {
    #[serde(rename = "BNF chapter")]
    BnfChapter,
    #[serde(rename = "BNF section")]
    BnfSection,
    #[serde(rename = "BNF paragraph")]
    BnfParagraph,
    #[serde(rename = "chemical")]
    Chemical,
    #[serde(rename = "product")]
    Product,
    #[serde(rename = "product format")]
    ProductFormat,
}

impl std::fmt::Display for DrugKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DrugKind::BnfChapter => "BNF chapter",
            DrugKind::BnfSection => "BNF section",
            DrugKind::BnfParagraph => "BNF paragraph",
            DrugKind::Chemical => "chemical",
            DrugKind::Product => "product",
            DrugKind::ProductFormat => "product format",
        };
        f.pad(s)
    }
}

/// Official name and code of a BNF section, chemical, or presentation.
///
/// Some response variants carry extra fields (`section` on chemicals,
/// `is_generic` on products); those are accepted and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrugDetail {
    #[serde(rename = "type")]
    kind: DrugKind,
    id: String,
    name: String,
}

impl DrugDetail {
    pub fn kind(&self) -> DrugKind {
        self.kind
    }

    /// BNF code string.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Coordinate reference system of a GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crs {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: CrsProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrsProperties {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    pub name: String,
    pub code: String,
    pub ons_code: Option<String>,
    pub org_type: String,
}

/// Polygon geometry: rings of `[x, y]` positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

/// GeoJSON `FeatureCollection` as returned by the `org_location` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub crs: Crs,
    pub features: Vec<Feature>,
}

/// Boundaries of all Sub-ICB Locations, indexed by location code.
///
/// Takes ownership of the source [`FeatureCollection`] at construction, so
/// nothing outside the collection can change it afterwards. Accessors hand
/// out references or fresh copies only.
#[derive(Debug, Clone)]
pub struct BoundaryCollection {
    collection: FeatureCollection,
    code_index: AHashMap<String, usize>,
}

impl BoundaryCollection {
    /// Build the code index over a feature collection.
    ///
    /// Every feature's `code` must be unique; a duplicate is a
    /// [`BoundaryError::DuplicateCode`].
    pub fn new(collection: FeatureCollection) -> Result<Self, BoundaryError> {
        let mut code_index = AHashMap::with_capacity(collection.features.len());
        for (i, feature) in collection.features.iter().enumerate() {
            let code = &feature.properties.code;
            if code_index.insert(code.clone(), i).is_some() {
                return Err(BoundaryError::DuplicateCode(code.clone()));
            }
        }
        Ok(Self {
            collection,
            code_index,
        })
    }

    /// Coordinate reference system identifier, e.g. `EPSG:4326`.
    pub fn crs(&self) -> &str {
        &self.collection.crs.properties.name
    }

    pub fn len(&self) -> usize {
        self.collection.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.features.is_empty()
    }

    /// Iterate the features in the order the service returned them.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.collection.features.iter()
    }

    /// The underlying feature collection, read-only.
    pub fn as_feature_collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Construct a new single-feature collection for one location code.
    ///
    /// Unknown codes are a [`BoundaryError::UnknownCode`], never an empty
    /// collection.
    pub fn by_code(&self, code: &str) -> Result<FeatureCollection, BoundaryError> {
        let &i = self
            .code_index
            .get(code)
            .ok_or_else(|| BoundaryError::UnknownCode(code.to_string()))?;
        Ok(FeatureCollection {
            kind: self.collection.kind.clone(),
            crs: self.collection.crs.clone(),
            features: vec![self.collection.features[i].clone()],
        })
    }
}

impl<'a> IntoIterator for &'a BoundaryCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.collection.features.iter()
    }
}
