//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::consumption::HeatingType;
use crate::model::generation::{Orientation, Region};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// PV system and site parameters.
    #[serde(default)]
    pub system: SystemConfig,
    /// Installation costs.
    #[serde(default)]
    pub costs: CostConfig,
    /// Import and export tariff parameters.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Household demand parameters.
    #[serde(default)]
    pub demand: DemandConfig,
    /// EV charging parameters.
    #[serde(default)]
    pub ev: EvConfig,
    /// Payment structure parameters.
    #[serde(default)]
    pub finance: FinanceConfig,
    /// Projection horizon and discounting.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// PV system and site parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// UK region: `"south"`, `"midlands"`, or `"north"`.
    pub location: String,
    /// Roof orientation: `"south"`, `"se_sw"`, `"east_west"`, or `"north_shaded"`.
    pub orientation: String,
    /// Solar peak capacity (kWp, must be > 0).
    pub kwp: f64,
    /// Usable battery capacity (kWh, 0 for no battery).
    pub battery_kwh: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            location: "south".to_string(),
            orientation: "south".to_string(),
            kwp: 4.0,
            battery_kwh: 5.0,
        }
    }
}

/// Installation costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostConfig {
    /// PV install cost (GBP).
    pub pv_install_gbp: f64,
    /// Battery install cost (GBP), charged only when a battery is configured.
    pub battery_install_gbp: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            pv_install_gbp: 6000.0,
            battery_install_gbp: 4000.0,
        }
    }
}

/// Import and export tariff parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Grid import price (pence/kWh).
    pub grid_price_p_per_kwh: f64,
    /// Smart Export Guarantee price (pence/kWh).
    pub export_price_p_per_kwh: f64,
    /// Annual grid price growth (%).
    pub annual_growth_pct: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            grid_price_p_per_kwh: 28.0,
            export_price_p_per_kwh: 15.0,
            annual_growth_pct: 3.0,
        }
    }
}

/// Household demand parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemandConfig {
    /// Base annual electricity usage before heating adjustment (kWh).
    pub annual_kwh: f64,
    /// Fraction of consumption during daylight hours (0.0-1.0).
    pub daytime_share: f64,
    /// Heating type: `"gas"`, `"heat_pump"`, or `"electric_resistive"`.
    pub heating: String,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            annual_kwh: 3500.0,
            daytime_share: 0.4,
            heating: "gas".to_string(),
        }
    }
}

/// EV charging parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvConfig {
    /// Whether the household charges an EV at home.
    pub enabled: bool,
    /// Average daily miles driven.
    pub daily_miles: f64,
    /// Fraction of charging done at home (0.0-1.0).
    pub home_charging_share: f64,
    /// Fraction of EV charging timed to use solar/battery (0.0-1.0).
    pub solar_charging_share: f64,
}

impl Default for EvConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            daily_miles: 30.0,
            home_charging_share: 0.8,
            solar_charging_share: 0.3,
        }
    }
}

/// Payment structure parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinanceConfig {
    /// Payment mode: `"purchase"`, `"loan"`, or `"lease"`.
    pub mode: String,
    /// Deposit percentage for loan mode (0-100).
    pub deposit_pct: f64,
    /// Loan repayment term (years).
    pub loan_term_years: usize,
    /// Annual loan interest rate (%).
    pub loan_rate_pct: f64,
    /// Lease term (years).
    pub lease_term_years: usize,
    /// Monthly lease payment (GBP).
    pub monthly_lease_gbp: f64,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            mode: "purchase".to_string(),
            deposit_pct: 25.0,
            loan_term_years: 10,
            loan_rate_pct: 5.0,
            lease_term_years: 10,
            monthly_lease_gbp: 0.0,
        }
    }
}

/// Projection horizon and discounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Time horizon (years, must be > 0).
    pub horizon_years: usize,
    /// Discount rate for NPV (%).
    pub discount_rate_pct: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            horizon_years: 25,
            discount_rate_pct: 3.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"system.kwp"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a 4 kWp south-facing system with a
    /// 5 kWh battery in a gas-heated home, purchased upfront.
    pub fn baseline() -> Self {
        Self {
            system: SystemConfig::default(),
            costs: CostConfig::default(),
            tariff: TariffConfig::default(),
            demand: DemandConfig::default(),
            ev: EvConfig::default(),
            finance: FinanceConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }

    /// Returns the heat-pump-and-EV preset: large all-electric household
    /// with a bigger array and battery.
    pub fn heat_pump_ev() -> Self {
        Self {
            system: SystemConfig {
                kwp: 6.0,
                battery_kwh: 10.0,
                ..SystemConfig::default()
            },
            costs: CostConfig {
                pv_install_gbp: 8000.0,
                battery_install_gbp: 5500.0,
            },
            demand: DemandConfig {
                heating: "heat_pump".to_string(),
                daytime_share: 0.45,
                ..DemandConfig::default()
            },
            ev: EvConfig {
                enabled: true,
                ..EvConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the financed preset: baseline system paid for with a
    /// 25% deposit and a 10-year loan.
    pub fn financed() -> Self {
        Self {
            finance: FinanceConfig {
                mode: "loan".to_string(),
                ..FinanceConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "heat_pump_ev", "financed"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "heat_pump_ev" => Ok(Self::heat_pump_ev()),
            "financed" => Ok(Self::financed()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let sys = &self.system;
        if Region::from_name(&sys.location).is_none() {
            errors.push(ConfigError {
                field: "system.location".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    Region::NAMES.join(", "),
                    sys.location
                ),
            });
        }
        if Orientation::from_name(&sys.orientation).is_none() {
            errors.push(ConfigError {
                field: "system.orientation".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    Orientation::NAMES.join(", "),
                    sys.orientation
                ),
            });
        }
        if sys.kwp <= 0.0 {
            errors.push(ConfigError {
                field: "system.kwp".into(),
                message: "must be > 0".into(),
            });
        }
        if sys.battery_kwh < 0.0 {
            errors.push(ConfigError {
                field: "system.battery_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        let costs = &self.costs;
        if costs.pv_install_gbp < 0.0 {
            errors.push(ConfigError {
                field: "costs.pv_install_gbp".into(),
                message: "must be >= 0".into(),
            });
        }
        if costs.battery_install_gbp < 0.0 {
            errors.push(ConfigError {
                field: "costs.battery_install_gbp".into(),
                message: "must be >= 0".into(),
            });
        }

        let tariff = &self.tariff;
        if tariff.grid_price_p_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "tariff.grid_price_p_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }
        if tariff.export_price_p_per_kwh < 0.0 {
            errors.push(ConfigError {
                field: "tariff.export_price_p_per_kwh".into(),
                message: "must be >= 0".into(),
            });
        }

        let demand = &self.demand;
        if demand.annual_kwh <= 0.0 {
            errors.push(ConfigError {
                field: "demand.annual_kwh".into(),
                message: "must be > 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&demand.daytime_share) {
            errors.push(ConfigError {
                field: "demand.daytime_share".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if HeatingType::from_name(&demand.heating).is_none() {
            errors.push(ConfigError {
                field: "demand.heating".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    HeatingType::NAMES.join(", "),
                    demand.heating
                ),
            });
        }

        let ev = &self.ev;
        if ev.daily_miles < 0.0 {
            errors.push(ConfigError {
                field: "ev.daily_miles".into(),
                message: "must be >= 0".into(),
            });
        }
        if !(0.0..=1.0).contains(&ev.home_charging_share) {
            errors.push(ConfigError {
                field: "ev.home_charging_share".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if !(0.0..=1.0).contains(&ev.solar_charging_share) {
            errors.push(ConfigError {
                field: "ev.solar_charging_share".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }

        let fin = &self.finance;
        match fin.mode.as_str() {
            "purchase" => {}
            "loan" => {
                if !(0.0..=100.0).contains(&fin.deposit_pct) {
                    errors.push(ConfigError {
                        field: "finance.deposit_pct".into(),
                        message: "must be in [0, 100]".into(),
                    });
                }
                if fin.loan_term_years == 0 {
                    errors.push(ConfigError {
                        field: "finance.loan_term_years".into(),
                        message: "must be > 0 in loan mode".into(),
                    });
                }
                if fin.loan_rate_pct < 0.0 {
                    errors.push(ConfigError {
                        field: "finance.loan_rate_pct".into(),
                        message: "must be >= 0".into(),
                    });
                }
            }
            "lease" => {
                if fin.lease_term_years == 0 {
                    errors.push(ConfigError {
                        field: "finance.lease_term_years".into(),
                        message: "must be > 0 in lease mode".into(),
                    });
                }
                if fin.monthly_lease_gbp < 0.0 {
                    errors.push(ConfigError {
                        field: "finance.monthly_lease_gbp".into(),
                        message: "must be >= 0".into(),
                    });
                }
            }
            other => {
                errors.push(ConfigError {
                    field: "finance.mode".into(),
                    message: format!(
                        "must be \"purchase\", \"loan\", or \"lease\", got \"{other}\""
                    ),
                });
            }
        }

        let analysis = &self.analysis;
        if analysis.horizon_years == 0 {
            errors.push(ConfigError {
                field: "analysis.horizon_years".into(),
                message: "must be > 0".into(),
            });
        }
        if analysis.discount_rate_pct < 0.0 {
            errors.push(ConfigError {
                field: "analysis.discount_rate_pct".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }

    /// Whether the scenario includes battery storage.
    pub fn has_battery(&self) -> bool {
        self.system.battery_kwh > 0.0
    }
}
