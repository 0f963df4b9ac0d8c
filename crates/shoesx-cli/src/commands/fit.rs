use std::sync::Arc;

use anyhow::Result;
use shoesx_application::ProfileService;
use shoesx_core::fit::{FootMeasurements, recommend_size};

use super::AppContext;

/// Prints a size recommendation, saving the measurements to `user`'s profile when given.
pub async fn run(
    ctx: &AppContext,
    measurements: FootMeasurements,
    category: &str,
    user: Option<&str>,
) -> Result<()> {
    let recommendation = recommend_size(&measurements, category)?;

    if let Some(user) = user {
        let profile = ProfileService::new(Arc::new(ctx.remote_store()?));
        profile.save_measurements(user, &measurements).await?;
        println!("Measurements saved for {}.", user);
    }

    println!("Recommended size: {}", recommendation.size);
    println!("Confidence:       {}%", recommendation.confidence);
    println!("Return risk:      {}", recommendation.return_risk);
    Ok(())
}
