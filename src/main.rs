//! Solar economics CLI — scenario loading, reporting, and exports.

use std::path::Path;
use std::process;

use chrono::Utc;

use solar_econ::catalog::{self, Selection};
use solar_econ::config::ScenarioConfig;
use solar_econ::io::export::{export_cashflow_csv, export_energy_csv};
use solar_econ::projection::Projection;
use solar_econ::quote::{QuoteRequest, issue_date, render_quote};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    package: Option<String>,
    cashflow_out: Option<String>,
    energy_out: Option<String>,
    quote_out: Option<String>,
    customer: Option<String>,
    address: Option<String>,
    #[cfg(feature = "tui")]
    tui: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("solar-econ — Residential solar and battery economics dashboard");
    eprintln!();
    eprintln!("Usage: solar-econ [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, heat_pump_ev, financed)");
    eprintln!("  --package <id>           Size and price the system from a catalog package");
    eprintln!("  --cashflow-out <path>    Export year-by-year cashflow to CSV");
    eprintln!("  --energy-out <path>      Export monthly generation/consumption to CSV");
    eprintln!("  --quote-out <path>       Write a customer quotation as plain text");
    eprintln!("  --customer <name>        Customer name for the quotation");
    eprintln!("  --address <address>      Customer address for the quotation");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Launch the interactive dashboard");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        package: None,
        cashflow_out: None,
        energy_out: None,
        quote_out: None,
        customer: None,
        address: None,
        #[cfg(feature = "tui")]
        tui: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--package" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --package requires an id argument");
                    process::exit(1);
                }
                cli.package = Some(args[i].clone());
            }
            "--cashflow-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --cashflow-out requires a path argument");
                    process::exit(1);
                }
                cli.cashflow_out = Some(args[i].clone());
            }
            "--energy-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --energy-out requires a path argument");
                    process::exit(1);
                }
                cli.energy_out = Some(args[i].clone());
            }
            "--quote-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --quote-out requires a path argument");
                    process::exit(1);
                }
                cli.quote_out = Some(args[i].clone());
            }
            "--customer" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --customer requires a name argument");
                    process::exit(1);
                }
                cli.customer = Some(args[i].clone());
            }
            "--address" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --address requires an address argument");
                    process::exit(1);
                }
                cli.address = Some(args[i].clone());
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Overrides system size and costs from a catalog package.
///
/// The bundled price is split into a battery share (the battery component
/// price) and a PV share (the remainder), so the cashflow variants stay
/// comparable.
fn apply_package(scenario: &mut ScenarioConfig, id: &str) {
    let Some(pkg) = catalog::package_by_id(id) else {
        let available: Vec<&str> = catalog::PACKAGES.iter().map(|p| p.id).collect();
        eprintln!(
            "error: unknown package \"{id}\", available: {}",
            available.join(", ")
        );
        process::exit(1);
    };

    let selection = Selection::from_package(pkg);
    let report = selection.validate();
    if !report.is_valid() {
        eprint!("{report}");
        process::exit(1);
    }
    for w in &report.warnings {
        eprintln!("warning: {w}");
    }

    let specs = selection.system_specs();
    let battery_share = selection.battery.map_or(0.0, |b| b.price_gbp);

    scenario.system.kwp = specs.kwp;
    scenario.system.battery_kwh = specs.battery_kwh;
    scenario.costs.pv_install_gbp = pkg.price_gbp - battery_share;
    scenario.costs.battery_install_gbp = battery_share;
    scenario.ev.enabled = scenario.ev.enabled || specs.ev_charger_kw > 0.0;

    eprintln!("Using package: {} ({})", pkg.name, pkg.description);
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    // Apply catalog package sizing and pricing
    if let Some(ref id) = cli.package {
        apply_package(&mut scenario, id);
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    #[cfg(feature = "tui")]
    if cli.tui {
        let preset = cli.preset.as_deref().unwrap_or("baseline");
        solar_econ::tui::run(scenario, preset);
        return;
    }

    let projection = Projection::from_scenario(&scenario);

    // Print summary and variant comparison
    println!("{}", projection.summary());
    println!();
    println!("{}", projection.comparison_table());

    // Exports
    if let Some(ref path) = cli.cashflow_out {
        let years = &projection.active_cashflow().years;
        if let Err(e) = export_cashflow_csv(years, Path::new(path)) {
            eprintln!("error: failed to write cashflow CSV: {e}");
            process::exit(1);
        }
        eprintln!("Cashflow written to {path}");
    }

    if let Some(ref path) = cli.energy_out {
        if let Err(e) = export_energy_csv(
            &projection.monthly_generation_kwh,
            &projection.monthly_consumption_kwh,
            Path::new(path),
        ) {
            eprintln!("error: failed to write energy CSV: {e}");
            process::exit(1);
        }
        eprintln!("Energy series written to {path}");
    }

    if let Some(ref path) = cli.quote_out {
        let now = Utc::now().timestamp();
        let mut req = QuoteRequest::with_reference(format!("Q-{now}"), issue_date(now));
        if let Some(name) = cli.customer {
            req.customer_name = name;
        }
        if let Some(address) = cli.address {
            req.customer_address = address;
        }

        let file = match std::fs::File::create(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("error: failed to create quote file: {e}");
                process::exit(1);
            }
        };
        let mut buf = std::io::BufWriter::new(file);
        if let Err(e) = render_quote(&req, &scenario, &projection, &mut buf) {
            eprintln!("error: failed to write quotation: {e}");
            process::exit(1);
        }
        eprintln!("Quotation written to {path}");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_econ::api::AppState {
            summary: projection.summary(),
            cashflow: projection.active_cashflow().years.clone(),
            scenario,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(solar_econ::api::serve(state, addr));
    }
}
