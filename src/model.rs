use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};


// Canonical dish identifier. Ids arrive as JSON numbers or strings and are
// stored as their string form, so cart keys and catalog ids always compare
// by the same type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DishId(String);

impl DishId {
    pub fn new(id: impl Into<String>) -> Self {
        DishId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DishId {
    fn from(id: &str) -> Self {
        DishId::new(id)
    }
}

impl From<u64> for DishId {
    fn from(id: u64) -> Self {
        DishId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for DishId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => DishId(n.to_string()),
            RawId::Text(s) => DishId(s),
        })
    }
}


// Inbound structure handed to the screen at entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MenuInput {
    #[serde(default)]
    pub categories: Vec<CategoryGroup>,
}

// One category of the inbound catalog
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryGroup {
    pub name: String,
    #[serde(default)]
    pub dishes: Vec<DishInput>,
}

// A dish as delivered by the catalog source; only the first size is used
#[derive(Debug, Clone, Deserialize)]
pub struct DishInput {
    pub id: DishId,
    pub name: String,
    #[serde(default)]
    pub sizes: Vec<SizeInput>,
}

// Price and picture of one dish size
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeInput {
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: u64,
    #[serde(default)]
    pub image_url: Option<String>,
}

// Missing, null, zero, negative or unparsable prices all become 0
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let price = match raw {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f.trunc() as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    };
    Ok(price)
}


// Flat projection of a dish with its category denormalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDish {
    pub id: DishId,
    pub name: String,
    pub category: String,
    pub price: u64,
    pub image_url: Option<String>,
}

// Normalized catalog, built once when the screen receives its input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub categories: Vec<String>,
    pub dishes: Vec<NormalizedDish>,
}

impl Catalog {
    // Find a dish by its canonical id
    pub fn dish(&self, id: &DishId) -> Option<&NormalizedDish> {
        self.dishes.iter().find(|d| &d.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty() && self.categories.is_empty()
    }
}
