//! Shared test fixtures for integration tests.

use solar_econ::config::ScenarioConfig;
use solar_econ::projection::Projection;

/// Baseline scenario: 4 kWp south-facing, 5 kWh battery, gas heating.
pub fn baseline_scenario() -> ScenarioConfig {
    ScenarioConfig::baseline()
}

/// Projection for the baseline scenario.
pub fn baseline_projection() -> Projection {
    Projection::from_scenario(&baseline_scenario())
}

/// A purchase scenario with no battery, used for variant comparisons.
pub fn pv_only_scenario() -> ScenarioConfig {
    let mut cfg = ScenarioConfig::baseline();
    cfg.system.battery_kwh = 0.0;
    cfg
}

/// A scenario TOML string with a larger all-electric household.
pub fn custom_scenario_toml() -> &'static str {
    r#"
[system]
location = "midlands"
orientation = "east_west"
kwp = 6.0
battery_kwh = 10.0

[costs]
pv_install_gbp = 8000
battery_install_gbp = 5500

[demand]
annual_kwh = 4200
daytime_share = 0.45
heating = "heat_pump"

[ev]
enabled = true
daily_miles = 40
"#
}
