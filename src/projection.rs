//! Scenario orchestration: runs every model from a validated config and
//! carries the results used by reports, exports, the API, and the TUI.

use std::fmt;

use serde::Serialize;

use crate::config::ScenarioConfig;
use crate::model::consumption::{self, EvDemand, HeatingType};
use crate::model::finance::{
    AnnualFinancials, CashflowParams, CashflowProjection, FinanceMode,
};
use crate::model::generation::{self, GenerationEstimate, Orientation, Region};
use crate::model::selfuse::EnergyBalance;

/// Full projection for one scenario.
///
/// Always carries both the PV-only and PV+battery variants so that the
/// comparison views do not need to recompute anything.
#[derive(Debug, Clone)]
pub struct Projection {
    /// Resolved region (defaults to south on an unrecognized name).
    pub region: Region,
    /// Resolved orientation (defaults to south).
    pub orientation: Orientation,
    /// Resolved heating type (defaults to gas).
    pub heating: HeatingType,
    /// Annual generation estimate.
    pub generation: GenerationEstimate,
    /// Monthly generation (kWh).
    pub monthly_generation_kwh: [f64; 12],
    /// Monthly household consumption (kWh), heating-adjusted, excluding EV.
    pub monthly_consumption_kwh: [f64; 12],
    /// Heating-adjusted annual household consumption excluding EV (kWh).
    pub household_kwh: f64,
    /// EV home charging demand.
    pub ev: EvDemand,
    /// Annual energy flows for both variants.
    pub balance: EnergyBalance,
    /// Year-1 financials without a battery.
    pub annual_pv_only: AnnualFinancials,
    /// Year-1 financials with the configured battery.
    pub annual_with_battery: AnnualFinancials,
    /// Multi-year cashflow without a battery.
    pub cashflow_pv_only: CashflowProjection,
    /// Multi-year cashflow with the configured battery.
    pub cashflow_with_battery: CashflowProjection,
    /// Whether the scenario configures a battery.
    pub has_battery: bool,
}

impl Projection {
    /// Runs all models for a scenario.
    ///
    /// Expects a validated config; unrecognized enum names fall back to
    /// their defaults rather than failing.
    pub fn from_scenario(cfg: &ScenarioConfig) -> Self {
        let region = Region::from_name(&cfg.system.location).unwrap_or(Region::South);
        let orientation =
            Orientation::from_name(&cfg.system.orientation).unwrap_or(Orientation::South);
        let heating = HeatingType::from_name(&cfg.demand.heating).unwrap_or(HeatingType::Gas);

        let generation = GenerationEstimate::for_system(cfg.system.kwp, region, orientation);
        let monthly_generation_kwh = generation::monthly_generation(generation.realistic_kwh);

        let household_kwh = consumption::adjusted_annual_kwh(cfg.demand.annual_kwh, heating);
        let monthly_consumption_kwh = consumption::monthly_consumption(household_kwh, heating);

        let ev = if cfg.ev.enabled {
            EvDemand::from_usage(cfg.ev.daily_miles, cfg.ev.home_charging_share)
        } else {
            EvDemand::none()
        };

        let balance = EnergyBalance::compute(
            generation.realistic_kwh,
            household_kwh,
            cfg.demand.daytime_share,
            cfg.system.battery_kwh,
            ev.annual_kwh,
            cfg.ev.solar_charging_share,
        );

        let annual_pv_only = AnnualFinancials::compute(
            balance.total_demand_kwh,
            balance.grid_import_no_battery_kwh,
            balance.export_no_battery_kwh,
            cfg.tariff.grid_price_p_per_kwh,
            cfg.tariff.export_price_p_per_kwh,
        );
        let annual_with_battery = AnnualFinancials::compute(
            balance.total_demand_kwh,
            balance.grid_import_with_battery_kwh,
            balance.export_with_battery_kwh,
            cfg.tariff.grid_price_p_per_kwh,
            cfg.tariff.export_price_p_per_kwh,
        );

        let mode = finance_mode(cfg);
        let cashflow_pv_only = CashflowProjection::project(&CashflowParams {
            install_cost_gbp: cfg.costs.pv_install_gbp,
            annual_demand_kwh: balance.total_demand_kwh,
            grid_import_kwh: balance.grid_import_no_battery_kwh,
            export_kwh: balance.export_no_battery_kwh,
            grid_price_p: cfg.tariff.grid_price_p_per_kwh,
            export_price_p: cfg.tariff.export_price_p_per_kwh,
            annual_growth_pct: cfg.tariff.annual_growth_pct,
            horizon_years: cfg.analysis.horizon_years,
            discount_rate_pct: cfg.analysis.discount_rate_pct,
            mode,
        });
        let battery_install = if cfg.has_battery() {
            cfg.costs.battery_install_gbp
        } else {
            0.0
        };
        let cashflow_with_battery = CashflowProjection::project(&CashflowParams {
            install_cost_gbp: cfg.costs.pv_install_gbp + battery_install,
            annual_demand_kwh: balance.total_demand_kwh,
            grid_import_kwh: balance.grid_import_with_battery_kwh,
            export_kwh: balance.export_with_battery_kwh,
            grid_price_p: cfg.tariff.grid_price_p_per_kwh,
            export_price_p: cfg.tariff.export_price_p_per_kwh,
            annual_growth_pct: cfg.tariff.annual_growth_pct,
            horizon_years: cfg.analysis.horizon_years,
            discount_rate_pct: cfg.analysis.discount_rate_pct,
            mode,
        });

        Self {
            region,
            orientation,
            heating,
            generation,
            monthly_generation_kwh,
            monthly_consumption_kwh,
            household_kwh,
            ev,
            balance,
            annual_pv_only,
            annual_with_battery,
            cashflow_pv_only,
            cashflow_with_battery,
            has_battery: cfg.has_battery(),
        }
    }

    /// Year-1 financials for the configured variant.
    pub fn active_annual(&self) -> &AnnualFinancials {
        if self.has_battery {
            &self.annual_with_battery
        } else {
            &self.annual_pv_only
        }
    }

    /// Cashflow for the configured variant.
    pub fn active_cashflow(&self) -> &CashflowProjection {
        if self.has_battery {
            &self.cashflow_with_battery
        } else {
            &self.cashflow_pv_only
        }
    }

    /// Grid import for the configured variant (kWh).
    pub fn active_grid_import_kwh(&self) -> f64 {
        if self.has_battery {
            self.balance.grid_import_with_battery_kwh
        } else {
            self.balance.grid_import_no_battery_kwh
        }
    }

    /// Export for the configured variant (kWh).
    pub fn active_export_kwh(&self) -> f64 {
        if self.has_battery {
            self.balance.export_with_battery_kwh
        } else {
            self.balance.export_no_battery_kwh
        }
    }

    /// Headline figures for reports and the API.
    pub fn summary(&self) -> Summary {
        let cf = self.active_cashflow();
        Summary {
            annual_generation_kwh: self.generation.realistic_kwh,
            kwh_per_kwp: self.generation.kwh_per_kwp,
            annual_demand_kwh: self.balance.total_demand_kwh,
            self_consumption_share: self.balance.self_consumption_share(),
            grid_import_kwh: self.active_grid_import_kwh(),
            export_kwh: self.active_export_kwh(),
            annual_saving_gbp: self.active_annual().net_saving_gbp,
            install_cost_gbp: cf.install_cost_gbp,
            payback_year: cf.payback_year,
            npv_gbp: cf.npv_gbp,
            lifetime_benefit_gbp: cf
                .years
                .last()
                .map(|y| y.cumulative_gbp)
                .unwrap_or(0.0),
        }
    }

    /// Renders the PV-only vs PV+battery comparison table.
    pub fn comparison_table(&self) -> String {
        let b = &self.balance;
        let mut out = String::new();
        out.push_str("                          PV only    PV + battery\n");
        out.push_str(&format!(
            "Self-consumed (kWh):   {:>10.0}    {:>12.0}\n",
            b.self_direct_kwh,
            b.self_direct_kwh + b.battery_self_kwh
        ));
        out.push_str(&format!(
            "Grid import (kWh):     {:>10.0}    {:>12.0}\n",
            b.grid_import_no_battery_kwh, b.grid_import_with_battery_kwh
        ));
        out.push_str(&format!(
            "Export (kWh):          {:>10.0}    {:>12.0}\n",
            b.export_no_battery_kwh, b.export_with_battery_kwh
        ));
        out.push_str(&format!(
            "Annual saving (GBP):   {:>10.2}    {:>12.2}\n",
            self.annual_pv_only.net_saving_gbp, self.annual_with_battery.net_saving_gbp
        ));
        out.push_str(&format!(
            "Install cost (GBP):    {:>10.0}    {:>12.0}\n",
            self.cashflow_pv_only.install_cost_gbp, self.cashflow_with_battery.install_cost_gbp
        ));
        out.push_str(&format!(
            "Payback (years):       {:>10}    {:>12}\n",
            payback_cell(self.cashflow_pv_only.payback_year),
            payback_cell(self.cashflow_with_battery.payback_year)
        ));
        out.push_str(&format!(
            "NPV (GBP):             {:>10.2}    {:>12.2}\n",
            self.cashflow_pv_only.npv_gbp, self.cashflow_with_battery.npv_gbp
        ));
        out
    }
}

fn payback_cell(year: Option<usize>) -> String {
    match year {
        Some(y) => y.to_string(),
        None => "none".to_string(),
    }
}

/// Resolves the configured finance mode, defaulting to purchase.
fn finance_mode(cfg: &ScenarioConfig) -> FinanceMode {
    match cfg.finance.mode.as_str() {
        "loan" => FinanceMode::Loan {
            deposit_pct: cfg.finance.deposit_pct,
            term_years: cfg.finance.loan_term_years,
            rate_pct: cfg.finance.loan_rate_pct,
        },
        "lease" => FinanceMode::Lease {
            term_years: cfg.finance.lease_term_years,
            monthly_gbp: cfg.finance.monthly_lease_gbp,
        },
        _ => FinanceMode::Purchase,
    }
}

/// Headline figures for the configured variant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Summary {
    /// Weather-adjusted annual generation (kWh).
    pub annual_generation_kwh: f64,
    /// Specific yield (kWh per installed kWp).
    pub kwh_per_kwp: f64,
    /// Household plus EV demand (kWh).
    pub annual_demand_kwh: f64,
    /// Fraction of generation consumed on-site.
    pub self_consumption_share: f64,
    /// Annual grid import (kWh).
    pub grid_import_kwh: f64,
    /// Annual export (kWh).
    pub export_kwh: f64,
    /// Year-1 bill saving plus export income (GBP).
    pub annual_saving_gbp: f64,
    /// Upfront system cost (GBP).
    pub install_cost_gbp: f64,
    /// First year the investment is recovered, if within the horizon.
    pub payback_year: Option<usize>,
    /// Net present value over the horizon (GBP).
    pub npv_gbp: f64,
    /// Undiscounted cumulative position at the end of the horizon (GBP).
    pub lifetime_benefit_gbp: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Solar Economics Summary ---")?;
        writeln!(f, "Annual generation: {:.0} kWh", self.annual_generation_kwh)?;
        writeln!(f, "Specific yield: {:.0} kWh/kWp", self.kwh_per_kwp)?;
        writeln!(f, "Annual demand: {:.0} kWh", self.annual_demand_kwh)?;
        writeln!(
            f,
            "Self-consumption: {:.1}%",
            self.self_consumption_share * 100.0
        )?;
        writeln!(f, "Grid import: {:.0} kWh", self.grid_import_kwh)?;
        writeln!(f, "Export: {:.0} kWh", self.export_kwh)?;
        writeln!(f, "Annual saving: {:.2} GBP", self.annual_saving_gbp)?;
        writeln!(f, "Install cost: {:.0} GBP", self.install_cost_gbp)?;
        match self.payback_year {
            Some(y) => writeln!(f, "Payback: year {y}")?,
            None => writeln!(f, "Payback: beyond horizon")?,
        }
        writeln!(f, "NPV: {:.2} GBP", self.npv_gbp)?;
        write!(
            f,
            "Lifetime benefit: {:.2} GBP",
            self.lifetime_benefit_gbp
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_projection_known_values() {
        let proj = Projection::from_scenario(&ScenarioConfig::baseline());
        assert!((proj.generation.realistic_kwh - 4555.2).abs() < 1e-9);
        assert!((proj.household_kwh - 3500.0).abs() < 1e-9);
        assert_eq!(proj.ev.annual_kwh, 0.0);
        assert!(proj.has_battery);
        // Battery variant carries PV + battery install cost
        assert!((proj.cashflow_with_battery.install_cost_gbp - 10_000.0).abs() < 1e-9);
        assert!((proj.cashflow_pv_only.install_cost_gbp - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn battery_variant_saves_more_per_year() {
        let proj = Projection::from_scenario(&ScenarioConfig::baseline());
        assert!(
            proj.annual_with_battery.net_saving_gbp > proj.annual_pv_only.net_saving_gbp,
            "battery should raise the annual saving"
        );
    }

    #[test]
    fn active_variant_tracks_battery_config() {
        let mut cfg = ScenarioConfig::baseline();
        let with = Projection::from_scenario(&cfg);
        assert!(
            (with.active_annual().net_saving_gbp - with.annual_with_battery.net_saving_gbp).abs()
                < 1e-12
        );

        cfg.system.battery_kwh = 0.0;
        let without = Projection::from_scenario(&cfg);
        assert!(!without.has_battery);
        assert!(
            (without.active_annual().net_saving_gbp - without.annual_pv_only.net_saving_gbp).abs()
                < 1e-12
        );
        // No battery install cost charged
        assert!((without.cashflow_with_battery.install_cost_gbp - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn heat_pump_raises_demand() {
        let base = Projection::from_scenario(&ScenarioConfig::baseline());
        let hp = Projection::from_scenario(&ScenarioConfig::heat_pump_ev());
        assert!(hp.balance.total_demand_kwh > base.balance.total_demand_kwh);
        assert!(hp.ev.annual_kwh > 0.0);
    }

    #[test]
    fn ev_demand_included_in_totals() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.ev.enabled = true;
        let proj = Projection::from_scenario(&cfg);
        // 30 miles/day * 0.3 * 0.8 home share * 365
        assert!((proj.ev.annual_kwh - 2628.0).abs() < 1e-9);
        assert!(
            (proj.balance.total_demand_kwh - (3500.0 + 2628.0)).abs() < 1e-9,
            "EV demand should be part of total demand"
        );
    }

    #[test]
    fn monthly_series_sum_to_annual_totals() {
        let proj = Projection::from_scenario(&ScenarioConfig::heat_pump_ev());
        let gen_sum: f64 = proj.monthly_generation_kwh.iter().sum();
        let cons_sum: f64 = proj.monthly_consumption_kwh.iter().sum();
        assert!((gen_sum - proj.generation.realistic_kwh).abs() < 1e-9);
        assert!((cons_sum - proj.household_kwh).abs() < 1e-9);
    }

    #[test]
    fn summary_matches_active_variant() {
        let proj = Projection::from_scenario(&ScenarioConfig::baseline());
        let summary = proj.summary();
        assert!((summary.annual_saving_gbp - proj.annual_with_battery.net_saving_gbp).abs() < 1e-12);
        assert_eq!(summary.payback_year, proj.cashflow_with_battery.payback_year);
        assert!((summary.install_cost_gbp - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn financed_preset_uses_loan_mode() {
        let proj = Projection::from_scenario(&ScenarioConfig::financed());
        assert!(proj.cashflow_with_battery.deposit_gbp > 0.0);
        assert!(proj.cashflow_with_battery.annual_loan_payment_gbp > 0.0);
        // Purchase preset has no loan
        let base = Projection::from_scenario(&ScenarioConfig::baseline());
        assert_eq!(base.cashflow_with_battery.annual_loan_payment_gbp, 0.0);
    }

    #[test]
    fn summary_display_contains_headline_lines() {
        let proj = Projection::from_scenario(&ScenarioConfig::baseline());
        let text = proj.summary().to_string();
        assert!(text.contains("Annual generation:"));
        assert!(text.contains("Payback:"));
        assert!(text.contains("NPV:"));
    }

    #[test]
    fn comparison_table_lists_both_variants() {
        let proj = Projection::from_scenario(&ScenarioConfig::baseline());
        let table = proj.comparison_table();
        assert!(table.contains("PV only"));
        assert!(table.contains("PV + battery"));
        assert!(table.contains("Payback"));
    }
}
