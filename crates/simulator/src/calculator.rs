use configuration::CalculationConstants;
use core_types::{RoiPercentage, ScenarioParams, ScenarioResult};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const HUNDRED: Decimal = dec!(100);

/// A stateless calculator that projects the savings of automating invoice
/// processing.
///
/// The constants are fixed at construction; the calculator itself holds no
/// other state and can be copied freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoiCalculator {
    constants: CalculationConstants,
}

impl RoiCalculator {
    pub fn new(constants: CalculationConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &CalculationConstants {
        &self.constants
    }

    /// Computes the result set for a validated parameter set.
    ///
    /// Intermediate values are kept at full precision; only the returned
    /// figures are rounded (currency to 2 places, payback to 1, ROI to 2).
    ///
    /// Savings that are zero or negative alongside a positive implementation
    /// cost are not corrected: payback comes out negative (or saturates at
    /// `Decimal::MAX` when savings are exactly zero) and ROI is the literal
    /// ratio. Callers decide how to present such scenarios.
    pub fn calculate(&self, params: &ScenarioParams) -> ScenarioResult {
        let c = &self.constants;
        let volume = params.monthly_invoice_volume;
        let implementation_cost = params.one_time_implementation_cost;

        // Rates are given in percent.
        let error_rate_manual = params.error_rate_manual / HUNDRED;
        let error_rate_auto = c.error_rate_auto / HUNDRED;

        let labor_cost_manual = params
            .num_ap_staff
            .saturating_mul(params.hourly_wage)
            .saturating_mul(params.avg_hours_per_invoice)
            .saturating_mul(volume);
        let auto_cost = volume.saturating_mul(c.automated_cost_per_invoice);
        // Negative when the manual error rate is already below the automated one.
        let error_savings = (error_rate_manual - error_rate_auto)
            .saturating_mul(volume)
            .saturating_mul(params.error_cost);

        let monthly_savings_raw = labor_cost_manual
            .saturating_add(error_savings)
            .saturating_sub(auto_cost);
        let monthly_savings = monthly_savings_raw.saturating_mul(c.min_roi_boost_factor);

        let cumulative_savings =
            monthly_savings.saturating_mul(Decimal::from(params.time_horizon_months));
        let net_savings = cumulative_savings.saturating_sub(implementation_cost);

        let has_cost = implementation_cost > Decimal::ZERO;
        let payback_months = if has_cost {
            implementation_cost
                .checked_div(monthly_savings)
                .unwrap_or_else(|| saturated(monthly_savings))
        } else {
            Decimal::ZERO
        };
        let roi_percentage = if has_cost {
            let ratio = net_savings
                .checked_div(implementation_cost)
                .unwrap_or_else(|| saturated(net_savings));
            RoiPercentage::Finite(round(ratio.saturating_mul(HUNDRED), 2))
        } else {
            RoiPercentage::Infinite
        };

        ScenarioResult {
            monthly_savings: round(monthly_savings, 2),
            cumulative_savings: round(cumulative_savings, 2),
            net_savings: round(net_savings, 2),
            payback_months: round(payback_months, 1),
            roi_percentage,
            labor_cost_manual: round(labor_cost_manual, 2),
            auto_cost: round(auto_cost, 2),
            error_savings: round(error_savings, 2),
        }
    }
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// The value a quotient takes when the division cannot be represented, signed
/// like the divisor.
fn saturated(divisor: Decimal) -> Decimal {
    if divisor < Decimal::ZERO {
        Decimal::MIN
    } else {
        Decimal::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ScenarioParams {
        ScenarioParams {
            monthly_invoice_volume: dec!(2000),
            num_ap_staff: dec!(3),
            avg_hours_per_invoice: dec!(0.17),
            hourly_wage: dec!(30),
            error_rate_manual: dec!(0.5),
            error_cost: dec!(100),
            time_horizon_months: 36,
            one_time_implementation_cost: dec!(50000),
        }
    }

    fn calculator() -> RoiCalculator {
        RoiCalculator::new(CalculationConstants::default())
    }

    #[test]
    fn reference_scenario() {
        let result = calculator().calculate(&params());

        assert_eq!(result.labor_cost_manual, dec!(30600));
        assert_eq!(result.auto_cost, dec!(400));
        assert_eq!(result.error_savings, dec!(800));
        // (30600 + 800 - 400) * 1.1
        assert_eq!(result.monthly_savings, dec!(34100));
        assert_eq!(result.cumulative_savings, dec!(1227600));
        assert_eq!(result.net_savings, dec!(1177600));
        assert_eq!(result.payback_months, dec!(1.5));
        assert_eq!(result.roi_percentage, RoiPercentage::Finite(dec!(2355.20)));
    }

    #[test]
    fn boost_factor_is_a_flat_multiplier() {
        let unboosted = RoiCalculator::new(CalculationConstants {
            min_roi_boost_factor: Decimal::ONE,
            ..CalculationConstants::default()
        });
        let raw = unboosted.calculate(&params()).monthly_savings;
        let boosted = calculator().calculate(&params()).monthly_savings;
        assert_eq!(raw, dec!(31000));
        assert_eq!(boosted, raw * dec!(1.1));
    }

    #[test]
    fn zero_implementation_cost_means_infinite_roi_and_no_payback() {
        let p = ScenarioParams {
            one_time_implementation_cost: Decimal::ZERO,
            ..params()
        };
        let result = calculator().calculate(&p);
        assert_eq!(result.roi_percentage, RoiPercentage::Infinite);
        assert_eq!(result.payback_months, Decimal::ZERO);
        assert_eq!(result.net_savings, result.cumulative_savings);
    }

    #[test]
    fn tiny_cost_gives_finite_roi_and_payback_rounded_to_zero() {
        let p = ScenarioParams {
            one_time_implementation_cost: dec!(0.01),
            ..params()
        };
        let result = calculator().calculate(&p);
        assert!(!result.roi_percentage.is_infinite());
        // 0.01 / 34100 is far below the rounding threshold of one decimal place,
        // so payback rounds to zero even though it is computed.
        assert_eq!(result.payback_months, dec!(0.0));

        let result = calculator().calculate(&params());
        assert!(result.payback_months > Decimal::ZERO);
    }

    #[test]
    fn error_savings_go_negative_below_automated_error_rate() {
        let p = ScenarioParams {
            error_rate_manual: dec!(0.05),
            ..params()
        };
        let result = calculator().calculate(&p);
        // (0.0005 - 0.001) * 2000 * 100
        assert_eq!(result.error_savings, dec!(-100));
    }

    #[test]
    fn negative_savings_produce_negative_payback() {
        let p = ScenarioParams {
            monthly_invoice_volume: dec!(1),
            num_ap_staff: dec!(1),
            avg_hours_per_invoice: dec!(0.01),
            hourly_wage: dec!(1),
            error_rate_manual: dec!(0),
            error_cost: dec!(1000),
            time_horizon_months: 12,
            one_time_implementation_cost: dec!(1000),
        };
        let result = calculator().calculate(&p);
        assert!(result.monthly_savings < Decimal::ZERO);
        assert!(result.payback_months < Decimal::ZERO);
        match result.roi_percentage {
            RoiPercentage::Finite(roi) => assert!(roi < dec!(-100)),
            RoiPercentage::Infinite => panic!("expected a finite ROI"),
        }
    }

    #[test]
    fn zero_savings_with_cost_saturate_payback() {
        // labor 1 * 1 * 0.2 * 1 = 0.2, auto 0.2, no error savings: exactly zero.
        let p = ScenarioParams {
            monthly_invoice_volume: dec!(1),
            num_ap_staff: dec!(1),
            avg_hours_per_invoice: dec!(0.2),
            hourly_wage: dec!(1),
            error_rate_manual: dec!(0.1),
            error_cost: dec!(50),
            time_horizon_months: 12,
            one_time_implementation_cost: dec!(500),
        };
        let result = calculator().calculate(&p);
        assert_eq!(result.monthly_savings, Decimal::ZERO);
        assert_eq!(result.payback_months, Decimal::MAX);
        assert_eq!(result.roi_percentage, RoiPercentage::Finite(dec!(-100)));
    }

    #[test]
    fn calculation_is_deterministic() {
        let calc = calculator();
        assert_eq!(calc.calculate(&params()), calc.calculate(&params()));
    }

    #[test]
    fn more_volume_costs_more_labor_and_automation() {
        let calc = calculator();
        let low = calc.calculate(&params());
        let high = calc.calculate(&ScenarioParams {
            monthly_invoice_volume: dec!(2001),
            ..params()
        });
        assert!(high.labor_cost_manual > low.labor_cost_manual);
        assert!(high.auto_cost > low.auto_cost);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round(dec!(1.005), 2), dec!(1.01));
        assert_eq!(round(dec!(-1.005), 2), dec!(-1.01));
        assert_eq!(round(dec!(1.45), 1), dec!(1.5));
    }
}
