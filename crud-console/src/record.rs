//! Records exchanged with the backend and the two resource kinds they belong to.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};

/// Name of the identifier field every backend record carries.
pub const ID_FIELD: &str = "id";

/// A single field value. Only flat scalars travel through this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn text(value: impl Into<String>) -> Self {
        Scalar::Text(value.into())
    }

    fn from_json(field: &str, value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Null => Ok(Scalar::Null),
            serde_json::Value::Bool(b) => Ok(Scalar::Bool(b)),
            serde_json::Value::Number(n) => Ok(Scalar::Number(n)),
            serde_json::Value::String(s) => Ok(Scalar::Text(s)),
            _ => Err(ConsoleError::MalformedResponse(format!(
                "field '{}' is not a scalar",
                field
            ))),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Number(value.into())
    }
}

/// Flat mapping of field name to scalar value for one resource instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Scalar>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<Scalar>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Scalar>) {
        self.fields.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Scalar> {
        self.fields.get(field)
    }

    pub fn id(&self) -> Option<&Scalar> {
        self.get(ID_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Decode a backend record. The value must be a flat JSON object of
    /// scalars that carries an identifier.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let object = match value {
            serde_json::Value::Object(object) => object,
            other => {
                return Err(ConsoleError::MalformedResponse(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut record = Record::new();
        for (field, value) in object {
            let scalar = Scalar::from_json(&field, value)?;
            record.fields.insert(field, scalar);
        }

        match record.id() {
            None | Some(Scalar::Null) => Err(ConsoleError::MalformedResponse(format!(
                "record is missing the '{}' field",
                ID_FIELD
            ))),
            Some(_) => Ok(record),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Table column: record field plus its header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub header: &'static str,
}

const PRODUCT_COLUMNS: &[Column] = &[
    Column { field: "id", header: "ID" },
    Column { field: "name", header: "Name" },
    Column { field: "category", header: "Category" },
    Column { field: "description", header: "Description" },
    Column { field: "price", header: "Price" },
    Column { field: "like", header: "Like" },
];

const PET_COLUMNS: &[Column] = &[
    Column { field: "id", header: "ID" },
    Column { field: "name", header: "Name" },
    Column { field: "category", header: "Category" },
    Column { field: "available", header: "Available" },
    Column { field: "gender", header: "Gender" },
    Column { field: "birthday", header: "Birthday" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Product,
    Pet,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Product => "Product",
            ResourceKind::Pet => "Pet",
        }
    }

    pub fn collection_path(&self) -> &'static str {
        match self {
            ResourceKind::Product => "/products",
            ResourceKind::Pet => "/pets",
        }
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id)
    }

    pub fn like_path(&self, id: &str) -> String {
        format!("{}/like", self.item_path(id))
    }

    /// Collection path with an optional query suffix. An empty query still
    /// produces the bare collection path.
    pub fn query_path(&self, query: &str) -> String {
        if query.is_empty() {
            self.collection_path().to_string()
        } else {
            format!("{}?{}", self.collection_path(), query)
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            ResourceKind::Product => PRODUCT_COLUMNS,
            ResourceKind::Pet => PET_COLUMNS,
        }
    }
}
