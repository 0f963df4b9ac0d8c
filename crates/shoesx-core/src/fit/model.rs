//! Foot measurement and size recommendation models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{Result, ShopError};

pub const MIN_LENGTH_CM: f64 = 10.0;
pub const MAX_LENGTH_CM: f64 = 40.0;
pub const MIN_WIDTH_CM: f64 = 5.0;
pub const MAX_WIDTH_CM: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PreferredFit {
    Snug,
    #[default]
    Regular,
    Relaxed,
}

/// Measurements kept on the user's profile document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootMeasurements {
    pub gender: Gender,
    /// Foot length in centimetres
    #[serde(rename = "length")]
    pub length_cm: f64,
    /// Foot width in centimetres
    #[serde(rename = "width")]
    pub width_cm: f64,
    #[serde(default)]
    pub preferred_fit: PreferredFit,
}

impl FootMeasurements {
    pub fn new(gender: Gender, length_cm: f64, width_cm: f64, preferred_fit: PreferredFit) -> Self {
        Self {
            gender,
            length_cm,
            width_cm,
            preferred_fit,
        }
    }

    /// Checks that length and width fall in the measurable range.
    pub fn validate(&self) -> Result<()> {
        if !self.length_cm.is_finite() || !(MIN_LENGTH_CM..=MAX_LENGTH_CM).contains(&self.length_cm) {
            return Err(ShopError::invalid_argument(format!(
                "Foot length must be between {} and {} cm",
                MIN_LENGTH_CM, MAX_LENGTH_CM
            )));
        }
        if !self.width_cm.is_finite() || !(MIN_WIDTH_CM..=MAX_WIDTH_CM).contains(&self.width_cm) {
            return Err(ShopError::invalid_argument(format!(
                "Foot width must be between {} and {} cm",
                MIN_WIDTH_CM, MAX_WIDTH_CM
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ReturnRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeRecommendation {
    /// UK size label such as `UK 8` or `UK 6.5`
    pub size: String,
    /// Percentage in 70..=95
    pub confidence: u32,
    pub return_risk: ReturnRisk,
}
