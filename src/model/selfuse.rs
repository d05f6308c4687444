//! Self-consumption and battery dispatch heuristic.
//!
//! Works on annual energy totals rather than a timestep simulation: the
//! battery is modelled as one charge/discharge cycle per day, capped by the
//! average daily generation surplus. Surplus routed through the battery
//! serves remaining household demand first, then overnight EV charging.

use crate::model::consumption::DAYS_PER_YEAR;

/// Cap on the direct self-consumption fraction of generation.
///
/// Even with high daytime usage, timing mismatch within the day prevents
/// consuming everything as it is generated.
const DIRECT_FRACTION_CAP: f64 = 0.8;

/// Fraction of post-battery surplus available for daytime EV charging.
const EV_DIRECT_SURPLUS_SHARE: f64 = 0.3;

/// Cap on daytime EV charging as a fraction of annual EV demand.
const EV_DIRECT_DEMAND_CAP: f64 = 0.2;

/// Annual energy flows with and without battery storage.
///
/// All fields are annual kWh totals and non-negative.
#[derive(Debug, Clone, Copy)]
pub struct EnergyBalance {
    /// Annual solar generation (kWh).
    pub generation_kwh: f64,
    /// Household consumption excluding EV (kWh).
    pub household_kwh: f64,
    /// Home EV charging demand (kWh).
    pub ev_kwh: f64,
    /// Household plus EV demand (kWh).
    pub total_demand_kwh: f64,
    /// Generation consumed directly as it is produced (kWh).
    pub self_direct_kwh: f64,
    /// Export without a battery (kWh).
    pub export_no_battery_kwh: f64,
    /// Grid import without a battery (kWh).
    pub grid_import_no_battery_kwh: f64,
    /// Generation consumed via the battery and daytime EV charging (kWh).
    pub battery_self_kwh: f64,
    /// Export with the battery installed (kWh).
    pub export_with_battery_kwh: f64,
    /// Grid import with the battery installed (kWh).
    pub grid_import_with_battery_kwh: f64,
    /// EV charging met from solar or battery (kWh).
    pub ev_from_solar_kwh: f64,
    /// EV charging met from the grid (kWh).
    pub ev_from_grid_kwh: f64,
}

impl EnergyBalance {
    /// Computes the annual energy balance.
    ///
    /// # Arguments
    ///
    /// * `generation_kwh` - Annual solar generation
    /// * `household_kwh` - Annual household consumption excluding EV
    /// * `daytime_share` - Fraction of household consumption during daylight
    /// * `battery_kwh` - Usable battery capacity (0 for no battery)
    /// * `ev_annual_kwh` - Annual home EV charging demand
    /// * `ev_solar_share` - Fraction of EV charging timed to use solar/battery
    pub fn compute(
        generation_kwh: f64,
        household_kwh: f64,
        daytime_share: f64,
        battery_kwh: f64,
        ev_annual_kwh: f64,
        ev_solar_share: f64,
    ) -> Self {
        let total_demand_kwh = household_kwh + ev_annual_kwh;

        // Direct self-consumption, household only
        let daytime_kwh = household_kwh * daytime_share;
        let direct_fraction = if generation_kwh > 0.0 {
            (DIRECT_FRACTION_CAP * daytime_kwh / generation_kwh).min(DIRECT_FRACTION_CAP)
        } else {
            0.0
        };
        let self_direct_kwh = generation_kwh * direct_fraction;
        let export_no_battery_kwh = (generation_kwh - self_direct_kwh).max(0.0);
        let grid_import_no_battery_kwh = (total_demand_kwh - self_direct_kwh).max(0.0);

        // Battery: one full cycle per day at most, limited by daily surplus
        let daily_surplus_kwh = ((generation_kwh - self_direct_kwh) / DAYS_PER_YEAR).max(0.0);
        let battery_daily_kwh = daily_surplus_kwh.min(battery_kwh);
        let battery_annual_kwh = battery_daily_kwh * DAYS_PER_YEAR;

        // Battery serves remaining household demand first
        let household_remaining_kwh = (household_kwh - self_direct_kwh).max(0.0);
        let battery_to_house_kwh = battery_annual_kwh.min(household_remaining_kwh);

        // Leftover battery energy charges the EV overnight
        let battery_remaining_kwh = battery_annual_kwh - battery_to_house_kwh;
        let ev_from_battery_kwh = battery_remaining_kwh.min(ev_annual_kwh * ev_solar_share);

        // Some EV charging also happens directly during daylight
        let post_battery_surplus_kwh =
            (generation_kwh - self_direct_kwh - battery_annual_kwh).max(0.0);
        let ev_direct_kwh = (post_battery_surplus_kwh * EV_DIRECT_SURPLUS_SHARE)
            .min(ev_annual_kwh * EV_DIRECT_DEMAND_CAP);

        let ev_from_solar_kwh = ev_from_battery_kwh + ev_direct_kwh;
        let battery_self_kwh = battery_to_house_kwh + ev_from_solar_kwh;

        let export_with_battery_kwh =
            (generation_kwh - self_direct_kwh - battery_self_kwh).max(0.0);
        let grid_import_with_battery_kwh =
            (total_demand_kwh - self_direct_kwh - battery_self_kwh).max(0.0);
        let ev_from_grid_kwh = (ev_annual_kwh - ev_from_solar_kwh).max(0.0);

        Self {
            generation_kwh,
            household_kwh,
            ev_kwh: ev_annual_kwh,
            total_demand_kwh,
            self_direct_kwh,
            export_no_battery_kwh,
            grid_import_no_battery_kwh,
            battery_self_kwh,
            export_with_battery_kwh,
            grid_import_with_battery_kwh,
            ev_from_solar_kwh,
            ev_from_grid_kwh,
        }
    }

    /// Fraction of generation consumed on-site with the battery installed.
    pub fn self_consumption_share(&self) -> f64 {
        if self.generation_kwh > 0.0 {
            (self.self_direct_kwh + self.battery_self_kwh) / self.generation_kwh
        } else {
            0.0
        }
    }
}
