//! Brand and NIL valuation
//!
//! Social reach normalized per platform (platforms have different scale
//! distributions), blended with engagement quality, then converted to an NIL
//! dollar estimate with an explicit confidence interval. Interval width grows
//! with data staleness and incompleteness.

use std::collections::BTreeMap;

use crate::config::{BrandConfig, ValuationConfig};
use crate::error::Result;
use crate::models::player::PlayerProfile;
use crate::models::scheme::MarketTier;
use crate::models::score::ComponentScore;
use crate::models::valuation::NilEstimate;

#[derive(Debug, Clone)]
pub struct BrandCalculator {
    cfg: BrandConfig,
}

impl BrandCalculator {
    pub fn new(config: &ValuationConfig) -> Self {
        Self { cfg: config.brand.clone() }
    }

    /// Brand score plus NIL estimate for a given program market tier.
    pub fn value(
        &self,
        profile: &PlayerProfile,
        market_tier: MarketTier,
    ) -> Result<(ComponentScore, NilEstimate)> {
        let mut breakdown = BTreeMap::new();
        let mut composite_sum = 0.0;
        for reach in &profile.social.platforms {
            let cap = reach.platform.log_follower_cap();
            let reach_score =
                100.0 * (((reach.followers as f64) + 1.0).log10() / cap).min(1.0);
            let engagement_ratio =
                (reach.engagement_rate / reach.platform.typical_engagement()).min(1.5);
            let engagement_score = 100.0 * engagement_ratio / 1.5;
            let composite = self.cfg.reach_weight * reach_score
                + self.cfg.engagement_weight * engagement_score;
            breakdown.insert(reach.platform.to_string(), composite);
            composite_sum += composite;
        }
        let platform_count = profile.social.platforms.len();
        let score = if platform_count == 0 {
            0.0
        } else {
            composite_sum / platform_count as f64
        };

        let completeness = (platform_count as f64 / self.cfg.expected_platforms).min(1.0);
        let staleness = (profile.social.data_age_days as f64 / 365.0).min(1.0);
        let width = (self.cfg.base_interval_width
            + self.cfg.staleness_width * staleness
            + self.cfg.completeness_width * (1.0 - completeness))
            .min(self.cfg.max_interval_width);

        let premium = self.cfg.position_premiums.for_group(profile.position.group());
        let market = self.cfg.market_multipliers.for_tier(market_tier);
        let point = self.cfg.nil_base
            * (score / 100.0).powf(self.cfg.nil_exponent)
            * premium
            * market;
        let estimate = NilEstimate {
            point,
            low: point * (1.0 - width),
            high: point * (1.0 + width),
        };

        breakdown.insert("position_premium".to_string(), premium);
        breakdown.insert("market_multiplier".to_string(), market);
        breakdown.insert("interval_width".to_string(), width);

        // Narrow interval and full platform coverage both push confidence up.
        let confidence =
            0.6 * (1.0 - width / self.cfg.max_interval_width) + 0.4 * completeness;
        Ok((ComponentScore::new(score, confidence, breakdown), estimate))
    }
}
