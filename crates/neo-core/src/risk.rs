//! Risk-tier classification and the color lookup shared by every view,
//! so a given record renders identically colored everywhere within one
//! render pass.

/// Lower bound of the high tier (inclusive).
pub const HIGH_TIER_MIN: f64 = 70.0;
/// Lower bound of the medium tier (inclusive).
pub const MEDIUM_TIER_MIN: f64 = 40.0;

/// Discrete tier derived from a continuous PAIR risk score. Never
/// stored; recomputed on demand as a pure function of the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// Plain sRGB triple used by the view models. The frontends convert
/// it into their own color types at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Tier fill colors for the bar chart and scatter plot.
pub const HIGH_TIER_COLOR: Rgb8 = Rgb8::new(0xdc, 0x35, 0x45);
pub const MEDIUM_TIER_COLOR: Rgb8 = Rgb8::new(0xff, 0xc1, 0x07);
pub const LOW_TIER_COLOR: Rgb8 = Rgb8::new(0x20, 0xc9, 0x97);

/// Table row backgrounds relative to the user threshold.
pub const ROW_ABOVE_THRESHOLD: Rgb8 = Rgb8::new(0xff, 0xcc, 0xcc);
pub const ROW_BELOW_THRESHOLD: Rgb8 = Rgb8::new(0xe6, 0xff, 0xfa);

/// Binary colors for the 3D scene, keyed on the hazardous flag rather
/// than the three-tier classification.
pub const HAZARDOUS_COLOR: Rgb8 = Rgb8::new(0xff, 0x44, 0x44);
pub const BENIGN_COLOR: Rgb8 = Rgb8::new(0xaa, 0xaa, 0xaa);

impl RiskTier {
    /// Fixed breakpoints, inclusive at the lower edge of each tier.
    /// Any finite score classifies; no upper bound is assumed.
    /// Non-finite scores are excluded upstream by record validation.
    pub fn classify(score: f64) -> Self {
        if score >= HIGH_TIER_MIN {
            RiskTier::High
        } else if score >= MEDIUM_TIER_MIN {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    pub fn color(self) -> Rgb8 {
        match self {
            RiskTier::Low => LOW_TIER_COLOR,
            RiskTier::Medium => MEDIUM_TIER_COLOR,
            RiskTier::High => HIGH_TIER_COLOR,
        }
    }
}

/// Threshold comparison used for table highlighting. The threshold is
/// a runtime value in the score's native range.
pub fn is_above_threshold(score: f64, threshold: f64) -> bool {
    score >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_are_inclusive_at_the_lower_edge() {
        assert_eq!(RiskTier::classify(70.0), RiskTier::High);
        assert_eq!(RiskTier::classify(69.999), RiskTier::Medium);
        assert_eq!(RiskTier::classify(40.0), RiskTier::Medium);
        assert_eq!(RiskTier::classify(39.999), RiskTier::Low);
        assert_eq!(RiskTier::classify(0.0), RiskTier::Low);
        assert_eq!(RiskTier::classify(-10.0), RiskTier::Low);
    }

    #[test]
    fn scores_above_the_observed_range_still_classify() {
        assert_eq!(RiskTier::classify(100.0), RiskTier::High);
        assert_eq!(RiskTier::classify(10_000.0), RiskTier::High);
    }

    #[test]
    fn threshold_comparison_is_greater_or_equal() {
        assert!(is_above_threshold(70.0, 70.0));
        assert!(is_above_threshold(71.0, 70.0));
        assert!(!is_above_threshold(69.9, 70.0));
        assert!(is_above_threshold(5.0, 0.0));
    }

    #[test]
    fn each_tier_has_one_color() {
        assert_eq!(RiskTier::High.color(), HIGH_TIER_COLOR);
        assert_eq!(RiskTier::Medium.color(), MEDIUM_TIER_COLOR);
        assert_eq!(RiskTier::Low.color(), LOW_TIER_COLOR);
    }
}
