//! Opportunity scoring
//!
//! Blends market size, growth, adoption and investment priority into a
//! single 0-100 score. Market size is log-scaled so a ~$999B market
//! saturates near 1.0; growth saturates at 50% CAGR.

/// Weight of the log-scaled market size term
pub const MARKET_WEIGHT: f64 = 0.30;
/// Weight of the growth term
pub const GROWTH_WEIGHT: f64 = 0.25;
/// Weight of the adoption term
pub const ADOPTION_WEIGHT: f64 = 0.20;
/// Weight of the investment focus term
pub const INVESTMENT_WEIGHT: f64 = 0.25;

/// CAGR (percent) at which the growth term saturates
const GROWTH_SATURATION: f64 = 50.0;

/// Composite opportunity score in [0, 100].
///
/// Inputs outside their documented ranges are not rejected: negative or
/// non-finite values count as zero and the result is capped at 100.
pub fn opportunity_score(
    market_size_billion: f64,
    growth_rate_pct: f64,
    adoption_rate_pct: f64,
    investment_focus: f64,
) -> f64 {
    let market = (non_negative(market_size_billion) + 1.0).log10() / 1000f64.log10();
    let growth = (non_negative(growth_rate_pct) / GROWTH_SATURATION).min(1.0);
    let adoption = non_negative(adoption_rate_pct) / 100.0;
    let investment = non_negative(investment_focus) / 10.0;

    let score = (market * MARKET_WEIGHT
        + growth * GROWTH_WEIGHT
        + adoption * ADOPTION_WEIGHT
        + investment * INVESTMENT_WEIGHT)
        * 100.0;

    if score.is_nan() {
        0.0
    } else {
        score.min(100.0)
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let total = MARKET_WEIGHT + GROWTH_WEIGHT + ADOPTION_WEIGHT + INVESTMENT_WEIGHT;
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_inputs_score_zero() {
        assert_eq!(opportunity_score(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_known_value() {
        // Agentic AI platforms with the assumed 50% adoption
        let score = opportunity_score(285.0, 28.5, 50.0, 9.2);
        let market = 286f64.log10() / 3.0;
        let expected = (market * 0.30 + 0.57 * 0.25 + 0.5 * 0.20 + 0.92 * 0.25) * 100.0;
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_saturated_inputs_cap_at_100() {
        assert_eq!(opportunity_score(1e9, 500.0, 100.0, 10.0), 100.0);
        assert_eq!(opportunity_score(f64::INFINITY, 60.0, 100.0, 10.0), 100.0);
    }

    #[test]
    fn test_growth_saturates_at_50_percent() {
        let at_50 = opportunity_score(100.0, 50.0, 40.0, 7.0);
        let at_120 = opportunity_score(100.0, 120.0, 40.0, 7.0);
        assert_eq!(at_50, at_120);
    }

    #[test]
    fn test_out_of_range_inputs_stay_bounded() {
        for &(size, growth, adoption, focus) in &[
            (-5.0, -10.0, -1.0, -3.0),
            (f64::NAN, 20.0, 50.0, 5.0),
            (10.0, f64::NAN, f64::NAN, f64::NAN),
            (500.0, 30.0, 250.0, 40.0),
        ] {
            let score = opportunity_score(size, growth, adoption, focus);
            assert!(score.is_finite());
            assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_monotonic_in_each_input() {
        let base = [120.0, 25.0, 40.0, 6.0];
        let steps = [0.0, 1.0, 10.0, 100.0, 999.0, 5000.0];

        for input in 0..4 {
            let mut previous = f64::NEG_INFINITY;
            for step in steps {
                let mut args = base;
                args[input] = step;
                let score = opportunity_score(args[0], args[1], args[2], args[3]);
                assert!(
                    score >= previous,
                    "score decreased for input {} at {}",
                    input,
                    step
                );
                previous = score;
            }
        }
    }
}
