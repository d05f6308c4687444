//! Dashboard application state and scenario editing.

use crate::config::ScenarioConfig;
use crate::model::consumption::HeatingType;
use crate::projection::Projection;

/// Smallest adjustable array size (kWp).
const KWP_MIN: f64 = 1.0;
/// Largest adjustable array size (kWp).
const KWP_MAX: f64 = 10.0;
/// Largest adjustable battery capacity (kWh).
const BATTERY_MAX: f64 = 20.0;

/// Which chart the main panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    /// Cumulative cashflow, PV-only vs PV + battery.
    Cashflow,
    /// Monthly generation vs consumption.
    MonthlyEnergy,
}

/// Dashboard application state.
pub struct App {
    /// Scenario being edited.
    pub scenario: ScenarioConfig,
    /// Projection for the current scenario, recomputed on every edit.
    pub projection: Projection,
    /// Name of the preset the scenario started from.
    pub preset_name: String,
    /// Active chart view.
    pub view: ChartView,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates a new app from a preset name, falling back to baseline.
    pub fn new(preset: &str) -> Self {
        let scenario =
            ScenarioConfig::from_preset(preset).unwrap_or_else(|_| ScenarioConfig::baseline());
        Self::from_scenario(scenario, preset)
    }

    /// Creates an app from an already loaded scenario.
    ///
    /// `preset` names the preset the `r` key restarts to, so a scenario
    /// loaded from a file or sized by a package is shown as-is.
    pub fn from_scenario(scenario: ScenarioConfig, preset: &str) -> Self {
        let projection = Projection::from_scenario(&scenario);
        Self {
            scenario,
            projection,
            preset_name: preset.to_string(),
            view: ChartView::Cashflow,
            quit: false,
        }
    }

    /// Recomputes the projection after a scenario edit.
    fn recompute(&mut self) {
        self.projection = Projection::from_scenario(&self.scenario);
    }

    /// Adjusts the array size, clamped to [1.0, 10.0] kWp.
    pub fn adjust_kwp(&mut self, delta: f64) {
        self.scenario.system.kwp = (self.scenario.system.kwp + delta).clamp(KWP_MIN, KWP_MAX);
        self.recompute();
    }

    /// Adjusts the battery capacity, clamped to [0, 20] kWh.
    pub fn adjust_battery(&mut self, delta: f64) {
        self.scenario.system.battery_kwh =
            (self.scenario.system.battery_kwh + delta).clamp(0.0, BATTERY_MAX);
        self.recompute();
    }

    /// Toggles EV charging on or off.
    pub fn toggle_ev(&mut self) {
        self.scenario.ev.enabled = !self.scenario.ev.enabled;
        self.recompute();
    }

    /// Cycles through the heating types.
    pub fn cycle_heating(&mut self) {
        let current = HeatingType::from_name(&self.scenario.demand.heating)
            .unwrap_or(HeatingType::Gas);
        let next = match current {
            HeatingType::Gas => "heat_pump",
            HeatingType::HeatPump => "electric_resistive",
            HeatingType::ElectricResistive => "gas",
        };
        self.scenario.demand.heating = next.to_string();
        self.recompute();
    }

    /// Switches between the chart views.
    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ChartView::Cashflow => ChartView::MonthlyEnergy,
            ChartView::MonthlyEnergy => ChartView::Cashflow,
        };
    }

    /// Switches to a different preset, discarding edits.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        self.scenario = scenario;
        self.preset_name = name.to_string();
        self.recompute();
    }

    /// Reloads the current preset, discarding edits.
    pub fn restart(&mut self) {
        let name = self.preset_name.clone();
        self.switch_preset(&name);
    }

    /// Heating type label for the header.
    pub fn heating_label(&self) -> &'static str {
        HeatingType::from_name(&self.scenario.demand.heating)
            .unwrap_or(HeatingType::Gas)
            .label()
    }
}
