//! Household consumption and EV charging demand models.

use std::fmt;

/// Days per year for EV demand annualization.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Typical EV consumption per mile driven.
pub const EV_KWH_PER_MILE: f64 = 0.3;

/// Monthly consumption profile for gas/oil heated homes (sums to 1.0).
///
/// Relatively flat, with a slight winter increase for lighting.
const PROFILE_GAS: [f64; 12] = [
    0.09, 0.085, 0.08, 0.075, 0.07, 0.07, 0.07, 0.07, 0.075, 0.08, 0.085, 0.09,
];

/// Monthly consumption profile for electrically heated homes (sums to 1.0).
///
/// Heavily winter-weighted: roughly 60% of annual usage is heating,
/// concentrated in October through March.
const PROFILE_ELECTRIC: [f64; 12] = [
    0.14, 0.13, 0.11, 0.07, 0.05, 0.04, 0.04, 0.04, 0.06, 0.09, 0.11, 0.12,
];

/// Heating system of the household.
///
/// Electric heating both reshapes the monthly profile and scales total
/// electricity usage via [`HeatingType::usage_multiplier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatingType {
    /// Traditional gas or oil central heating.
    Gas,
    /// Air or ground source heat pump.
    HeatPump,
    /// Storage heaters or direct electric.
    ElectricResistive,
}

impl HeatingType {
    /// Config names accepted by [`HeatingType::from_name`].
    pub const NAMES: &[&str] = &["gas", "heat_pump", "electric_resistive"];

    /// Parses a heating type from its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "gas" => Some(Self::Gas),
            "heat_pump" => Some(Self::HeatPump),
            "electric_resistive" => Some(Self::ElectricResistive),
            _ => None,
        }
    }

    /// Monthly share of annual consumption for this heating type.
    pub fn profile(self) -> &'static [f64; 12] {
        match self {
            Self::Gas => &PROFILE_GAS,
            Self::HeatPump | Self::ElectricResistive => &PROFILE_ELECTRIC,
        }
    }

    /// Multiplier applied to base electricity usage.
    ///
    /// Heat pumps add roughly 50% to base usage; resistive heating is far
    /// less efficient and multiplies usage by 2.5.
    pub fn usage_multiplier(self) -> f64 {
        match self {
            Self::Gas => 1.0,
            Self::HeatPump => 1.5,
            Self::ElectricResistive => 2.5,
        }
    }

    /// Human-readable label for reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Gas => "Gas/Oil boiler",
            Self::HeatPump => "Heat pump",
            Self::ElectricResistive => "Electric resistive",
        }
    }
}

impl fmt::Display for HeatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Total annual electricity usage after accounting for electric heating.
pub fn adjusted_annual_kwh(base_kwh: f64, heating: HeatingType) -> f64 {
    base_kwh * heating.usage_multiplier()
}

/// Distributes annual consumption across the 12 months.
pub fn monthly_consumption(annual_kwh: f64, heating: HeatingType) -> [f64; 12] {
    heating.profile().map(|frac| annual_kwh * frac)
}

/// Annual EV charging demand met at home.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvDemand {
    /// Total daily charging need across all locations (kWh).
    pub daily_kwh_total: f64,
    /// Daily charging done at home (kWh).
    pub daily_kwh_home: f64,
    /// Annualized home charging demand (kWh).
    pub annual_kwh: f64,
}

impl EvDemand {
    /// No EV: all demand fields zero.
    pub fn none() -> Self {
        Self::default()
    }

    /// Derives home charging demand from daily mileage.
    ///
    /// `home_charging_share` is the fraction of charging done at home
    /// rather than at work or public chargers.
    pub fn from_usage(daily_miles: f64, home_charging_share: f64) -> Self {
        let daily_kwh_total = daily_miles * EV_KWH_PER_MILE;
        let daily_kwh_home = daily_kwh_total * home_charging_share;
        Self {
            daily_kwh_total,
            daily_kwh_home,
            annual_kwh: daily_kwh_home * DAYS_PER_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_sum_to_one() {
        for heating in [
            HeatingType::Gas,
            HeatingType::HeatPump,
            HeatingType::ElectricResistive,
        ] {
            let sum: f64 = heating.profile().iter().sum();
            assert!((sum - 1.0).abs() < 1e-12, "{heating} profile should sum to 1");
        }
    }

    #[test]
    fn electric_profiles_are_winter_weighted() {
        let profile = HeatingType::HeatPump.profile();
        // January share far above June share
        assert!(profile[0] > 3.0 * profile[5]);
        // Gas profile is comparatively flat
        let gas = HeatingType::Gas.profile();
        assert!(gas[0] < 1.5 * gas[5]);
    }

    #[test]
    fn heating_multipliers() {
        assert_eq!(adjusted_annual_kwh(3500.0, HeatingType::Gas), 3500.0);
        assert_eq!(adjusted_annual_kwh(3500.0, HeatingType::HeatPump), 5250.0);
        assert_eq!(adjusted_annual_kwh(3500.0, HeatingType::ElectricResistive), 8750.0);
    }

    #[test]
    fn monthly_consumption_sums_to_annual() {
        let months = monthly_consumption(3500.0, HeatingType::Gas);
        let sum: f64 = months.iter().sum();
        assert!((sum - 3500.0).abs() < 1e-9);
    }

    #[test]
    fn heating_names_round_trip() {
        for name in HeatingType::NAMES {
            assert!(
                HeatingType::from_name(name).is_some(),
                "heating {name} should parse"
            );
        }
        assert!(HeatingType::from_name("district").is_none());
    }

    #[test]
    fn ev_demand_from_usage() {
        // 30 miles/day * 0.3 kWh/mile = 9 kWh total, 80% at home = 7.2 kWh
        let ev = EvDemand::from_usage(30.0, 0.8);
        assert!((ev.daily_kwh_total - 9.0).abs() < 1e-12);
        assert!((ev.daily_kwh_home - 7.2).abs() < 1e-12);
        assert!((ev.annual_kwh - 7.2 * 365.0).abs() < 1e-9);
    }

    #[test]
    fn ev_demand_none_is_zero() {
        let ev = EvDemand::none();
        assert_eq!(ev.annual_kwh, 0.0);
        assert_eq!(ev.daily_kwh_home, 0.0);
    }
}
