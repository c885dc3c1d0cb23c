//! Sock records and the request bodies that create or change them

use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, Result};

/// Upper bound for cotton percentage (inclusive)
pub const MAX_COTTON_PERCENTAGE: f64 = 100.0;

/// A stored inventory bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sock {
    pub id: i64,
    pub color: String,
    pub cotton_percentage: f64,
    pub amount: i64,
}

/// A quantity of socks of one color and cotton percentage.
///
/// Used as the body of arrival and departure requests and as the row type
/// produced by bulk import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SockBatch {
    pub color: String,
    pub cotton_percentage: f64,
    pub amount: i64,
}

impl SockBatch {
    pub fn new(color: impl Into<String>, cotton_percentage: f64, amount: i64) -> Self {
        Self {
            color: color.into(),
            cotton_percentage,
            amount,
        }
    }

    /// Checks an arrival/departure request: amount must be positive
    pub fn validate(&self) -> Result<()> {
        validate_color(&self.color)?;
        validate_cotton_percentage(self.cotton_percentage)?;
        if self.amount <= 0 {
            return Err(InventoryError::Validation(
                "Amount of socks must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Checks an imported row: zero stock is allowed, negative is not
    pub fn validate_stored(&self) -> Result<()> {
        validate_color(&self.color)?;
        validate_cotton_percentage(self.cotton_percentage)?;
        if self.amount < 0 {
            return Err(InventoryError::Validation(
                "Amount of socks cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Body of an update request; amount is never touched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SockUpdate {
    pub color: String,
    pub cotton_percentage: f64,
}

impl SockUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_color(&self.color)?;
        validate_cotton_percentage(self.cotton_percentage)
    }
}

pub fn validate_color(color: &str) -> Result<()> {
    if color.trim().is_empty() {
        return Err(InventoryError::Validation(
            "Color of socks must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Cotton percentage must be a finite number in 0..=100
pub fn validate_cotton_percentage(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(InventoryError::Validation(
            "Cotton percentage cannot be negative".to_string(),
        ));
    }
    if value > MAX_COTTON_PERCENTAGE {
        return Err(InventoryError::Validation(
            "Cotton percentage cannot be greater than 100".to_string(),
        ));
    }
    Ok(())
}
