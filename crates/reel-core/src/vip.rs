//! VIP plans screen

use crate::error::StorefrontResult;
use chrono::{DateTime, Duration, Utc};
use reel_entitlement::Viewer;
use reel_store::{CatalogProvider, VipPlan};
use serde::Serialize;

/// VIP screen contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VipPage {
    /// Ascending by price
    pub plans: Vec<VipPlan>,
    /// Viewer's current state, when signed in
    pub viewer: Option<Viewer>,
}

impl VipPage {
    /// The plan flagged as most popular
    #[must_use]
    pub fn popular(&self) -> Option<&VipPlan> {
        self.plans.iter().find(|p| p.is_popular)
    }
}

/// Expiry for a subscription to `plan` starting at `now`
#[must_use]
pub fn plan_expiry(plan: &VipPlan, now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(i64::from(plan.duration_days))
}

/// Load VIP plans
///
/// # Errors
/// Store failures reading plans
pub async fn load_vip_page(
    catalog: &dyn CatalogProvider,
    viewer: Option<Viewer>,
) -> StorefrontResult<VipPage> {
    let mut plans = catalog.vip_plans().await?;
    plans.sort_by_key(|p| p.price);
    Ok(VipPage { plans, viewer })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_store::MemoryBackend;

    #[tokio::test]
    async fn default_plans_by_price() {
        let backend = MemoryBackend::with_default_plans();
        let page = load_vip_page(&backend, None).await.unwrap();

        let prices: Vec<u32> = page.plans.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![99, 299, 999]);
        assert_eq!(page.popular().map(|p| p.duration_days), Some(30));
    }

    #[test]
    fn expiry_adds_plan_days() {
        let now = Utc::now();
        let plan = reel_store::default_vip_plans().remove(0);
        assert_eq!(plan_expiry(&plan, now) - now, Duration::days(7));
    }
}
