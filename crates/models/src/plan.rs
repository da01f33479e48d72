use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::shape::{self, Document, DocumentShape};

/// A pricing tier shown on the storefront.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    /// Monthly price, never negative.
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub best_value: bool,
}

impl Plan {
    pub fn new(name: &str, price: f64, description: &str, features: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            price,
            description: Some(description.to_string()),
            features: features.iter().map(|f| f.to_string()).collect(),
            best_value: false,
        }
    }

    pub fn best_value(mut self) -> Self {
        self.best_value = true;
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_price(self.price)?;
        if self.name.trim().is_empty() {
            return Err(ModelError::validation("plan name required"));
        }
        Ok(())
    }
}

pub fn validate_price(price: f64) -> Result<(), ModelError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ModelError::validation(format!("price must be a non-negative number, got {price}")));
    }
    Ok(())
}

impl DocumentShape for Plan {
    const COLLECTION: &'static str = "plan";

    fn from_document(doc: &Document) -> Result<Self, ModelError> {
        let plan = Plan {
            name: shape::required_str(doc, "name")?,
            price: shape::decimal(doc, "price", 0.0)?,
            description: shape::optional_str(doc, "description")?,
            features: shape::string_list(doc, "features")?,
            best_value: shape::flag(doc, "best_value", false)?,
        };
        validate_price(plan.price)?;
        Ok(plan)
    }
}
