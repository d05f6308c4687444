//! Equipment catalog and system builder.
//!
//! Prices come from a supplier pricing snapshot and are indicative. A
//! selection is a set of references into the static option tables;
//! costing, system sizing, and compatibility checks all work from the
//! same selection.

use std::fmt;

/// A panel array option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelOption {
    /// Catalog identifier.
    pub id: &'static str,
    /// Number of panels.
    pub count: usize,
    /// Rated power per panel (W).
    pub watts_each: f64,
    /// Array peak capacity (kWp).
    pub kwp: f64,
    /// Supply price (GBP).
    pub price_gbp: f64,
    /// Short sales description.
    pub description: &'static str,
}

/// String or per-panel micro inverter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverterKind {
    /// Single string inverter for the whole array.
    String,
    /// One micro-inverter per panel, priced per panel.
    Micro,
}

/// An inverter option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverterOption {
    /// Catalog identifier.
    pub id: &'static str,
    pub kind: InverterKind,
    /// Rated power (kW; per panel for micro-inverters).
    pub power_kw: f64,
    /// Manufacturer warranty (years).
    pub warranty_years: usize,
    /// Supply price (GBP; total for string, per panel for micro).
    pub price_gbp: f64,
    /// Largest array this inverter is recommended for.
    pub max_panels: usize,
    /// Short sales description.
    pub description: &'static str,
}

/// A battery option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryOption {
    /// Catalog identifier.
    pub id: &'static str,
    /// Usable capacity (kWh).
    pub capacity_kwh: f64,
    /// Supply price (GBP).
    pub price_gbp: f64,
    /// Manufacturer warranty (years).
    pub warranty_years: usize,
    /// Whether the unit ships with a hybrid inverter.
    pub includes_inverter: bool,
    /// Short sales description.
    pub description: &'static str,
}

/// An EV charger option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvChargerOption {
    /// Catalog identifier.
    pub id: &'static str,
    /// Rated charging power (kW).
    pub power_kw: f64,
    /// Supply price including install (GBP).
    pub price_gbp: f64,
    /// Supply phases required (1 or 3).
    pub phases: u8,
    /// Short sales description.
    pub description: &'static str,
}

/// ~460W Aiko panel arrays.
pub const PANEL_OPTIONS: &[PanelOption] = &[
    PanelOption {
        id: "aiko_6x460",
        count: 6,
        watts_each: 460.0,
        kwp: 2.76,
        price_gbp: 3500.0,
        description: "Entry-level system, suitable for smaller roofs",
    },
    PanelOption {
        id: "aiko_10x460",
        count: 10,
        watts_each: 460.0,
        kwp: 4.6,
        price_gbp: 4500.0,
        description: "Standard system, most popular choice",
    },
    PanelOption {
        id: "aiko_13x460",
        count: 13,
        watts_each: 460.0,
        kwp: 5.98,
        price_gbp: 5500.0,
        description: "Premium system, maximum generation",
    },
];

pub const INVERTER_OPTIONS: &[InverterOption] = &[
    InverterOption {
        id: "sungrow_3_6",
        kind: InverterKind::String,
        power_kw: 3.6,
        warranty_years: 10,
        price_gbp: 800.0,
        max_panels: 10,
        description: "10-year warranty, suits up to 10 panels",
    },
    InverterOption {
        id: "sungrow_5_0",
        kind: InverterKind::String,
        power_kw: 5.0,
        warranty_years: 10,
        price_gbp: 950.0,
        max_panels: 15,
        description: "10-year warranty, suits larger systems",
    },
    InverterOption {
        id: "enphase_micro",
        kind: InverterKind::Micro,
        power_kw: 0.46,
        warranty_years: 25,
        price_gbp: 180.0,
        max_panels: 20,
        description: "25-year warranty, panel-level optimisation",
    },
];

pub const BATTERY_OPTIONS: &[BatteryOption] = &[
    BatteryOption {
        id: "battery_2_6",
        capacity_kwh: 2.6,
        price_gbp: 2400.0,
        warranty_years: 10,
        includes_inverter: false,
        description: "Entry-level storage",
    },
    BatteryOption {
        id: "enphase_5_0",
        capacity_kwh: 5.0,
        price_gbp: 3800.0,
        warranty_years: 15,
        includes_inverter: false,
        description: "15-year warranty, premium option",
    },
    BatteryOption {
        id: "battery_5_2",
        capacity_kwh: 5.2,
        price_gbp: 3200.0,
        warranty_years: 10,
        includes_inverter: false,
        description: "Standard home storage",
    },
    BatteryOption {
        id: "sungrow_6_4",
        capacity_kwh: 6.4,
        price_gbp: 4315.0,
        warranty_years: 10,
        includes_inverter: true,
        description: "Includes hybrid inverter, suits up to 10 panels",
    },
    BatteryOption {
        id: "battery_9_5",
        capacity_kwh: 9.5,
        price_gbp: 4800.0,
        warranty_years: 10,
        includes_inverter: false,
        description: "Large capacity for higher usage",
    },
    BatteryOption {
        id: "sungrow_9_6",
        capacity_kwh: 9.6,
        price_gbp: 5101.0,
        warranty_years: 10,
        includes_inverter: true,
        description: "Includes hybrid inverter, suits up to 15 panels",
    },
    BatteryOption {
        id: "sungrow_12_8",
        capacity_kwh: 12.8,
        price_gbp: 5886.0,
        warranty_years: 10,
        includes_inverter: true,
        description: "Includes hybrid inverter, suits 15+ panels",
    },
];

pub const EV_CHARGER_OPTIONS: &[EvChargerOption] = &[
    EvChargerOption {
        id: "wallbox_7_4",
        power_kw: 7.4,
        price_gbp: 1945.0,
        phases: 1,
        description: "Entry-level home charger, ~5m cable",
    },
    EvChargerOption {
        id: "wallbox_11",
        power_kw: 11.0,
        price_gbp: 2110.0,
        phases: 3,
        description: "Mid-range charger, requires 3-phase",
    },
    EvChargerOption {
        id: "wallbox_22",
        power_kw: 22.0,
        price_gbp: 2148.0,
        phases: 3,
        description: "High-power charger, requires 3-phase",
    },
];

/// Installation labour rates (GBP).
pub mod install {
    /// Base installation charge.
    pub const BASE_GBP: f64 = 1200.0;
    /// Additional charge per panel.
    pub const PER_PANEL_GBP: f64 = 50.0;
    /// Standard scaffolding.
    pub const SCAFFOLDING_GBP: f64 = 400.0;
    /// Battery installation, charged when a battery is selected.
    pub const BATTERY_GBP: f64 = 300.0;
}

/// A pre-configured package with a bundled discount price.
#[derive(Debug, Clone, Copy)]
pub struct Package {
    /// Catalog identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    pub panels: &'static str,
    pub inverter: &'static str,
    /// Battery option id, if the package includes one.
    pub battery: Option<&'static str>,
    /// EV charger option id, if the package includes one.
    pub ev_charger: Option<&'static str>,
    /// Bundled price including installation (GBP).
    pub price_gbp: f64,
    /// Short sales description.
    pub description: &'static str,
}

pub const PACKAGES: &[Package] = &[
    Package {
        id: "entry",
        name: "Package 1 - Entry (6 panels + 2.6 kWh)",
        panels: "aiko_6x460",
        inverter: "sungrow_3_6",
        battery: Some("battery_2_6"),
        ev_charger: None,
        price_gbp: 6392.0,
        description: "Entry-level solar + battery system",
    },
    Package {
        id: "standard",
        name: "Package 2 - Standard (10 panels + 5.2 kWh)",
        panels: "aiko_10x460",
        inverter: "sungrow_3_6",
        battery: Some("battery_5_2"),
        ev_charger: None,
        price_gbp: 6846.0,
        description: "Most popular choice",
    },
    Package {
        id: "premium",
        name: "Package 3 - Premium (13 panels + 9.5 kWh)",
        panels: "aiko_13x460",
        inverter: "sungrow_5_0",
        battery: Some("battery_9_5"),
        ev_charger: None,
        price_gbp: 8420.0,
        description: "Maximum generation and storage",
    },
    Package {
        id: "sungrow_hybrid",
        name: "Sungrow Package (10 panels + 6.4 kWh)",
        panels: "aiko_10x460",
        inverter: "sungrow_3_6",
        battery: Some("sungrow_6_4"),
        ev_charger: None,
        price_gbp: 7749.0,
        description: "Sungrow hybrid system",
    },
    Package {
        id: "sungrow_ev",
        name: "Sungrow + EV Package",
        panels: "aiko_10x460",
        inverter: "sungrow_3_6",
        battery: Some("sungrow_6_4"),
        ev_charger: Some("wallbox_7_4"),
        price_gbp: 8699.0,
        description: "Complete solar + battery + EV solution",
    },
    Package {
        id: "enphase_ev",
        name: "Enphase Premium + EV Package",
        panels: "aiko_10x460",
        inverter: "enphase_micro",
        battery: Some("enphase_5_0"),
        ev_charger: Some("wallbox_7_4"),
        price_gbp: 10399.0,
        description: "Premium Enphase system with 25yr warranty",
    },
];

/// Looks up a panel option by id.
pub fn panel_by_id(id: &str) -> Option<&'static PanelOption> {
    PANEL_OPTIONS.iter().find(|p| p.id == id)
}

/// Looks up an inverter option by id.
pub fn inverter_by_id(id: &str) -> Option<&'static InverterOption> {
    INVERTER_OPTIONS.iter().find(|i| i.id == id)
}

/// Looks up a battery option by id.
pub fn battery_by_id(id: &str) -> Option<&'static BatteryOption> {
    BATTERY_OPTIONS.iter().find(|b| b.id == id)
}

/// Looks up an EV charger option by id.
pub fn ev_charger_by_id(id: &str) -> Option<&'static EvChargerOption> {
    EV_CHARGER_OPTIONS.iter().find(|c| c.id == id)
}

/// Looks up a package by id.
pub fn package_by_id(id: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.id == id)
}

/// One chosen configuration of catalog components.
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub panels: Option<&'static PanelOption>,
    pub inverter: Option<&'static InverterOption>,
    pub battery: Option<&'static BatteryOption>,
    pub ev_charger: Option<&'static EvChargerOption>,
}

/// Itemized cost of a selection (GBP).
#[derive(Debug, Clone, Copy)]
pub struct CostBreakdown {
    pub panels_gbp: f64,
    pub inverter_gbp: f64,
    pub battery_gbp: f64,
    pub ev_charger_gbp: f64,
    pub installation_gbp: f64,
    pub total_gbp: f64,
}

/// Headline specifications of a selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpecs {
    pub kwp: f64,
    pub panel_count: usize,
    pub battery_kwh: f64,
    pub inverter_warranty_years: usize,
    pub battery_warranty_years: usize,
    pub ev_charger_kw: f64,
}

/// Compatibility check result for a selection.
#[derive(Debug, Clone, Default)]
pub struct SelectionReport {
    /// Problems that make the selection unbuildable.
    pub errors: Vec<String>,
    /// Issues worth flagging that do not block the selection.
    pub warnings: Vec<String>,
}

impl SelectionReport {
    /// Whether the selection has no blocking errors.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.errors {
            writeln!(f, "error: {e}")?;
        }
        for w in &self.warnings {
            writeln!(f, "warning: {w}")?;
        }
        Ok(())
    }
}

impl Selection {
    /// Resolves a package into its component selection.
    pub fn from_package(pkg: &Package) -> Self {
        Self {
            panels: panel_by_id(pkg.panels),
            inverter: inverter_by_id(pkg.inverter),
            battery: pkg.battery.and_then(battery_by_id),
            ev_charger: pkg.ev_charger.and_then(ev_charger_by_id),
        }
    }

    /// Itemizes the component and installation cost of the selection.
    ///
    /// Micro-inverters are priced per panel; packages carry their own
    /// bundled price instead and should not be costed through here.
    pub fn component_total(&self) -> CostBreakdown {
        let panel_count = self.panels.map_or(0, |p| p.count);
        let panels_gbp = self.panels.map_or(0.0, |p| p.price_gbp);

        let inverter_gbp = self.inverter.map_or(0.0, |inv| match inv.kind {
            InverterKind::Micro => inv.price_gbp * panel_count as f64,
            InverterKind::String => inv.price_gbp,
        });

        let battery_gbp = self.battery.map_or(0.0, |b| b.price_gbp);
        let ev_charger_gbp = self.ev_charger.map_or(0.0, |c| c.price_gbp);

        let mut installation_gbp =
            install::BASE_GBP + install::PER_PANEL_GBP * panel_count as f64 + install::SCAFFOLDING_GBP;
        if battery_gbp > 0.0 {
            installation_gbp += install::BATTERY_GBP;
        }

        let total_gbp =
            panels_gbp + inverter_gbp + battery_gbp + ev_charger_gbp + installation_gbp;

        CostBreakdown {
            panels_gbp,
            inverter_gbp,
            battery_gbp,
            ev_charger_gbp,
            installation_gbp,
            total_gbp,
        }
    }

    /// Derives headline specs from the selection.
    pub fn system_specs(&self) -> SystemSpecs {
        SystemSpecs {
            kwp: self.panels.map_or(0.0, |p| p.kwp),
            panel_count: self.panels.map_or(0, |p| p.count),
            battery_kwh: self.battery.map_or(0.0, |b| b.capacity_kwh),
            inverter_warranty_years: self.inverter.map_or(0, |i| i.warranty_years),
            battery_warranty_years: self.battery.map_or(0, |b| b.warranty_years),
            ev_charger_kw: self.ev_charger.map_or(0.0, |c| c.power_kw),
        }
    }

    /// Checks the selection for compatibility problems.
    pub fn validate(&self) -> SelectionReport {
        let mut report = SelectionReport::default();

        let Some(panels) = self.panels else {
            report.errors.push("a panel array must be selected".to_string());
            return report;
        };

        if let Some(inv) = self.inverter {
            if panels.count > inv.max_panels {
                report.warnings.push(format!(
                    "inverter may be undersized for {} panels (recommended max: {})",
                    panels.count, inv.max_panels
                ));
            }
        }

        if let Some(batt) = self.battery {
            if batt.includes_inverter && self.inverter.is_some() {
                report.warnings.push(
                    "battery includes a hybrid inverter, a separate inverter may not be needed"
                        .to_string(),
                );
            }
        }

        let has_inverter =
            self.inverter.is_some() || self.battery.is_some_and(|b| b.includes_inverter);
        if !has_inverter {
            report.errors.push(
                "system requires an inverter, standalone or included with the battery"
                    .to_string(),
            );
        }

        report
    }
}
