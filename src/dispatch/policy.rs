//! Fixed-threshold decision policy.
//!
//! Classification is deliberately decoupled from the battery parameters:
//! the policy decides *when* to act, the assembler decides *how much*.

/// Charge when a sample's consumption is strictly below this (kWh).
pub const CHARGE_BELOW_KWH: f64 = 1.5;

/// Discharge when a sample's consumption is strictly above this (kWh).
pub const DISCHARGE_ABOVE_KWH: f64 = 2.5;

/// Dispatch decision for a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Low consumption: route energy into the battery.
    Charge,
    /// High consumption: draw energy from the battery.
    Discharge,
    /// Normal consumption: no battery action.
    Hold,
}

/// Classifies one consumption value into a dispatch regime.
///
/// Both thresholds use strict inequality, so consumption exactly at a
/// threshold holds. Negative values count as very low and charge.
pub fn classify(consumption_kwh: f64) -> Regime {
    if consumption_kwh < CHARGE_BELOW_KWH {
        Regime::Charge
    } else if consumption_kwh > DISCHARGE_ABOVE_KWH {
        Regime::Discharge
    } else {
        Regime::Hold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_consumption_charges() {
        assert_eq!(classify(1.0), Regime::Charge);
        assert_eq!(classify(0.0), Regime::Charge);
    }

    #[test]
    fn high_consumption_discharges() {
        assert_eq!(classify(3.0), Regime::Discharge);
        assert_eq!(classify(100.0), Regime::Discharge);
    }

    #[test]
    fn normal_consumption_holds() {
        assert_eq!(classify(2.0), Regime::Hold);
    }

    #[test]
    fn thresholds_are_strict_on_both_sides() {
        assert_eq!(classify(CHARGE_BELOW_KWH), Regime::Hold);
        assert_eq!(classify(DISCHARGE_ABOVE_KWH), Regime::Hold);
    }

    #[test]
    fn just_inside_thresholds() {
        assert_eq!(classify(1.499), Regime::Charge);
        assert_eq!(classify(2.501), Regime::Discharge);
    }

    #[test]
    fn negative_consumption_counts_as_very_low() {
        assert_eq!(classify(-4.2), Regime::Charge);
    }
}
