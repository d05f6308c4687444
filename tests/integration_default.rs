//! Integration tests for the full projection pipeline.

mod common;

use solar_econ::config::ScenarioConfig;
use solar_econ::io::export::{write_cashflow_csv, write_energy_csv};
use solar_econ::projection::Projection;
use solar_econ::quote::{QuoteRequest, render_quote};

#[test]
fn baseline_pipeline_known_values() {
    let proj = common::baseline_projection();

    // Generation: 4 kWp, south region, ideal orientation
    assert!((proj.generation.theoretical_kwh - 35_040.0).abs() < 1e-9);
    assert!((proj.generation.realistic_kwh - 4555.2).abs() < 1e-9);
    assert!((proj.generation.kwh_per_kwp - 1138.8).abs() < 1e-9);

    // Energy balance heuristic
    assert!((proj.balance.self_direct_kwh - 1120.0).abs() < 1e-9);
    assert!((proj.balance.battery_self_kwh - 1825.0).abs() < 1e-9);
    assert!((proj.balance.grid_import_with_battery_kwh - 555.0).abs() < 1e-9);
    assert!((proj.balance.export_with_battery_kwh - 1610.2).abs() < 1e-9);

    // Year-1 financials for the battery variant
    assert!((proj.annual_with_battery.cost_baseline_gbp - 980.0).abs() < 1e-9);
    assert!((proj.annual_with_battery.net_saving_gbp - 1066.13).abs() < 1e-6);
}

#[test]
fn projection_is_deterministic() {
    let a = common::baseline_projection();
    let b = common::baseline_projection();
    assert_eq!(a.generation.realistic_kwh, b.generation.realistic_kwh);
    assert_eq!(a.cashflow_with_battery.npv_gbp, b.cashflow_with_battery.npv_gbp);
    for (ya, yb) in a
        .cashflow_with_battery
        .years
        .iter()
        .zip(b.cashflow_with_battery.years.iter())
    {
        assert_eq!(ya.cumulative_gbp, yb.cumulative_gbp);
        assert_eq!(ya.discounted_gbp, yb.discounted_gbp);
    }
}

#[test]
fn battery_variant_trades_upfront_cost_for_savings() {
    let proj = common::baseline_projection();
    // The battery raises both the install cost and the annual saving
    assert!(
        proj.cashflow_with_battery.install_cost_gbp > proj.cashflow_pv_only.install_cost_gbp
    );
    assert!(
        proj.annual_with_battery.net_saving_gbp > proj.annual_pv_only.net_saving_gbp
    );
    // Import falls and export falls when the battery keeps energy on-site
    assert!(
        proj.balance.grid_import_with_battery_kwh < proj.balance.grid_import_no_battery_kwh
    );
    assert!(proj.balance.export_with_battery_kwh < proj.balance.export_no_battery_kwh);
}

#[test]
fn custom_toml_scenario_runs_end_to_end() {
    let cfg = ScenarioConfig::from_toml_str(common::custom_scenario_toml())
        .expect("custom scenario should parse");
    assert!(cfg.validate().is_empty());

    let proj = Projection::from_scenario(&cfg);
    // Midlands east/west: capacity factor 0.12 * 0.8
    assert!((proj.generation.capacity_factor - 0.096).abs() < 1e-12);
    // Heat pump multiplies base demand by 1.5
    assert!((proj.household_kwh - 6300.0).abs() < 1e-9);
    // EV: 40 miles * 0.3 kWh/mile * 0.8 home * 365
    assert!((proj.ev.annual_kwh - 3504.0).abs() < 1e-9);
    assert!(proj.balance.total_demand_kwh > proj.household_kwh);
}

#[test]
fn csv_exports_agree_with_projection() {
    let proj = common::baseline_projection();

    let mut buf = Vec::new();
    write_cashflow_csv(&proj.cashflow_with_battery.years, &mut buf)
        .expect("cashflow export should succeed");
    let text = String::from_utf8(buf).expect("CSV should be UTF-8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1 + proj.cashflow_with_battery.years.len());
    // First data row starts at year 1
    assert!(lines[1].starts_with("1,"));

    let mut buf = Vec::new();
    write_energy_csv(
        &proj.monthly_generation_kwh,
        &proj.monthly_consumption_kwh,
        &mut buf,
    )
    .expect("energy export should succeed");
    let text = String::from_utf8(buf).expect("CSV should be UTF-8");
    assert_eq!(text.lines().count(), 13);
}

#[test]
fn quote_renders_for_every_preset() {
    for name in ScenarioConfig::PRESETS {
        let cfg = ScenarioConfig::from_preset(name).expect("preset should load");
        let proj = Projection::from_scenario(&cfg);
        let req = QuoteRequest::with_reference("Q-INTEGRATION", "1 January 2026");
        let mut buf = Vec::new();
        render_quote(&req, &cfg, &proj, &mut buf).expect("quote should render");
        let text = String::from_utf8(buf).expect("quote should be UTF-8");
        assert!(text.contains("System Specification"), "preset {name}");
        assert!(text.contains("Projected Savings"), "preset {name}");
    }
}

#[test]
fn summary_figures_are_finite() {
    for name in ScenarioConfig::PRESETS {
        let cfg = ScenarioConfig::from_preset(name).expect("preset should load");
        let summary = Projection::from_scenario(&cfg).summary();
        assert!(summary.annual_generation_kwh.is_finite());
        assert!(summary.annual_demand_kwh.is_finite());
        assert!(summary.annual_saving_gbp.is_finite());
        assert!(summary.npv_gbp.is_finite());
        assert!(summary.lifetime_benefit_gbp.is_finite());
        assert!((0.0..=1.0).contains(&summary.self_consumption_share));
    }
}

#[test]
fn pv_only_scenario_has_single_effective_variant() {
    let proj = Projection::from_scenario(&common::pv_only_scenario());
    assert!(!proj.has_battery);
    // With no battery capacity both cashflows carry the same install cost
    assert_eq!(
        proj.cashflow_pv_only.install_cost_gbp,
        proj.cashflow_with_battery.install_cost_gbp
    );
    assert_eq!(proj.balance.battery_self_kwh, 0.0);
}
