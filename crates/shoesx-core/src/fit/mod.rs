//! Size recommendation from foot measurements.

mod model;

pub use model::{
    FootMeasurements, Gender, MAX_LENGTH_CM, MAX_WIDTH_CM, MIN_LENGTH_CM, MIN_WIDTH_CM, PreferredFit, ReturnRisk,
    SizeRecommendation,
};

use crate::error::{Result, ShopError};

/// Recommends a UK size for `measurements` in `category`.
///
/// Length picks the base size; women's sizes sit 1.5 below (never under 3).
/// Width drives the return-risk estimate.
pub fn recommend_size(measurements: &FootMeasurements, category: &str) -> Result<SizeRecommendation> {
    if category.trim().is_empty() {
        return Err(ShopError::invalid_argument("Category is required"));
    }
    measurements.validate()?;

    let length = measurements.length_cm;
    let width = measurements.width_cm;

    let base: f64 = if length > 28.5 {
        10.0
    } else if length > 27.0 {
        9.0
    } else if length > 25.5 {
        8.0
    } else if length < 25.0 {
        6.0
    } else {
        7.0
    };

    let uk_size = match measurements.gender {
        Gender::Female => (base - 1.5).max(3.0),
        Gender::Male | Gender::Unisex => base,
    };

    let confidence = (75.0 + ((length + width) % 25.0).round()).clamp(70.0, 95.0) as u32;

    let return_risk = if width > 11.5 {
        ReturnRisk::High
    } else if width > 10.5 {
        ReturnRisk::Medium
    } else {
        ReturnRisk::Low
    };

    tracing::debug!(
        "[Fit] {} cm x {} cm ({}) -> UK {}",
        length,
        width,
        category,
        uk_size
    );

    Ok(SizeRecommendation {
        size: format!("UK {}", uk_size),
        confidence,
        return_risk,
    })
}
