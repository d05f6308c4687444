//! Plain-text customer quotation rendering.
//!
//! Renders the same sections a printed quote would carry: system
//! specification, energy profile, investment, payment option, projected
//! savings, and assumptions. Output is deterministic for a fixed
//! [`QuoteRequest`], so quotes diff cleanly between runs.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::config::ScenarioConfig;
use crate::model::finance::FinanceMode;
use crate::projection::Projection;

/// Cumulative-benefit milestones shown in the savings section.
const MILESTONE_YEARS: [usize; 3] = [10, 15, 25];

/// Customer and branding details for a quotation.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub customer_name: String,
    pub customer_address: String,
    pub company_name: String,
    /// Quote reference printed in the header.
    pub reference: String,
    /// Issue date printed in the header (e.g. `"26 August 2026"`).
    pub date: String,
}

impl QuoteRequest {
    /// A request with placeholder customer details and the given reference.
    pub fn with_reference(reference: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            customer_name: "Mr & Mrs Smith".to_string(),
            customer_address: "123 Solar Street, Sunnyville, SN1 2AB".to_string(),
            company_name: "SolarTech Solutions".to_string(),
            reference: reference.into(),
            date: date.into(),
        }
    }
}

/// Formats a unix timestamp as the issue date shown in the quote header,
/// e.g. `"26 August 2026"`. Out-of-range timestamps fall back to the epoch.
pub fn issue_date(unix_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(unix_secs, 0)
        .unwrap_or_default()
        .format("%-d %B %Y")
        .to_string()
}

/// Formats a GBP amount with thousands separators, no decimals.
fn gbp(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if negative {
        format!("-£{out}")
    } else {
        format!("£{out}")
    }
}

/// Formats a kWh amount with thousands separators, no decimals.
fn kwh(amount: f64) -> String {
    let digits = format!("{:.0}", amount.max(0.0));
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{out} kWh")
}

fn section(w: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "{title}")?;
    writeln!(w, "{}", "-".repeat(title.len()))
}

fn row(w: &mut impl Write, label: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "  {label:<34} {}", value.as_ref())
}

/// Renders a full quotation for the scenario and its projection.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn render_quote(
    req: &QuoteRequest,
    cfg: &ScenarioConfig,
    proj: &Projection,
    w: &mut impl Write,
) -> io::Result<()> {
    let cf = proj.active_cashflow();
    let fin = proj.active_annual();
    let horizon = cfg.analysis.horizon_years;

    // Header
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w, "{}", req.company_name)?;
    writeln!(w, "Customer Quotation")?;
    writeln!(w, "Quote Ref: {}    Date: {}", req.reference, req.date)?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;
    writeln!(w, "Customer: {}", req.customer_name)?;
    writeln!(w, "Address:  {}", req.customer_address)?;

    section(w, "System Specification")?;
    row(w, "Solar panel capacity:", format!("{} kWp", cfg.system.kwp))?;
    if proj.has_battery {
        row(
            w,
            "Battery storage:",
            format!("{} kWh", cfg.system.battery_kwh),
        )?;
    } else {
        row(w, "Battery storage:", "Not included")?;
    }
    row(w, "Location:", proj.region.label())?;
    row(w, "Roof orientation:", proj.orientation.label())?;
    row(
        w,
        "Expected annual generation:",
        kwh(proj.generation.realistic_kwh),
    )?;
    row(
        w,
        "Capacity factor:",
        format!("{:.1}%", proj.generation.capacity_factor * 100.0),
    )?;

    section(w, "Your Energy Profile")?;
    row(w, "Heating type:", proj.heating.label())?;
    row(
        w,
        "Base electricity usage:",
        format!("{}/year", kwh(cfg.demand.annual_kwh)),
    )?;
    row(
        w,
        "Total household consumption:",
        format!("{}/year", kwh(proj.household_kwh)),
    )?;
    if cfg.ev.enabled {
        row(
            w,
            "EV daily mileage:",
            format!("{} miles", cfg.ev.daily_miles),
        )?;
        row(
            w,
            "EV charging (home):",
            format!("{}/year", kwh(proj.ev.annual_kwh)),
        )?;
        row(
            w,
            "Total demand (incl. EV):",
            format!("{}/year", kwh(proj.balance.total_demand_kwh)),
        )?;
    }

    section(w, "Investment")?;
    row(w, "Solar PV system:", gbp(cfg.costs.pv_install_gbp))?;
    if proj.has_battery {
        row(w, "Battery storage:", gbp(cfg.costs.battery_install_gbp))?;
    }
    row(w, "Total system cost:", gbp(cf.install_cost_gbp))?;

    section(w, "Payment Option")?;
    match finance_mode_of(cfg) {
        FinanceMode::Loan {
            deposit_pct,
            term_years,
            rate_pct,
        } => {
            row(w, "Payment method:", "Finance")?;
            row(
                w,
                "Deposit:",
                format!("{} ({deposit_pct}%)", gbp(cf.deposit_gbp)),
            )?;
            row(w, "Loan amount:", gbp(cf.loan_amount_gbp))?;
            row(w, "Loan term:", format!("{term_years} years"))?;
            row(w, "Interest rate:", format!("{rate_pct}% APR"))?;
            row(
                w,
                "Monthly payment:",
                gbp(cf.annual_loan_payment_gbp / 12.0),
            )?;
            row(w, "Annual payment:", gbp(cf.annual_loan_payment_gbp))?;
            row(w, "Total interest:", gbp(cf.total_interest_gbp))?;
            row(
                w,
                "Total cost of finance:",
                gbp(cf.deposit_gbp + cf.loan_amount_gbp + cf.total_interest_gbp),
            )?;
        }
        FinanceMode::Lease {
            term_years,
            monthly_gbp,
        } => {
            row(w, "Payment method:", "Lease")?;
            row(w, "Lease term:", format!("{term_years} years"))?;
            row(w, "Monthly payment:", gbp(monthly_gbp))?;
            row(w, "Total lease cost:", gbp(cf.total_lease_cost_gbp))?;
        }
        FinanceMode::Purchase => {
            row(w, "Payment method:", "Upfront Purchase")?;
            row(w, "Amount due:", gbp(cf.install_cost_gbp))?;
        }
    }

    section(w, "Projected Savings")?;
    row(w, "Year 1 savings:", gbp(fin.net_saving_gbp))?;
    row(w, "Year 1 export income:", gbp(fin.export_income_gbp))?;
    match cf.payback_year {
        Some(y) => row(w, "Payback period:", format!("{y} years"))?,
        None => row(w, "Payback period:", format!(">{horizon} years"))?,
    }
    row(
        w,
        &format!(
            "NPV ({horizon} years @ {}%):",
            cfg.analysis.discount_rate_pct
        ),
        gbp(cf.npv_gbp),
    )?;
    for milestone in MILESTONE_YEARS {
        if milestone > horizon {
            continue;
        }
        if let Some(year) = cf.years.get(milestone - 1) {
            row(
                w,
                &format!("Cumulative benefit (year {milestone}):"),
                gbp(year.cumulative_gbp),
            )?;
        }
    }

    // EV benefits only make sense with both an EV and a battery
    if cfg.ev.enabled && proj.has_battery {
        let b = &proj.balance;
        let solar_pct = if b.ev_kwh > 0.0 {
            b.ev_from_solar_kwh / b.ev_kwh * 100.0
        } else {
            0.0
        };
        let fuel_saving = b.ev_from_solar_kwh * cfg.tariff.grid_price_p_per_kwh / 100.0;

        section(w, "EV Charging Benefits")?;
        row(
            w,
            "EV charging from solar/battery:",
            format!("{} ({solar_pct:.0}%)", kwh(b.ev_from_solar_kwh)),
        )?;
        row(w, "EV charging from grid:", kwh(b.ev_from_grid_kwh))?;
        row(w, "Annual EV fuel saving:", gbp(fuel_saving))?;
    }

    section(w, "Assumptions & Notes")?;
    writeln!(w, "This quotation is based on the following assumptions:")?;
    writeln!(
        w,
        "  - Electricity price: {}p/kWh with {}% annual increase",
        cfg.tariff.grid_price_p_per_kwh, cfg.tariff.annual_growth_pct
    )?;
    writeln!(
        w,
        "  - Export tariff (SEG): {}p/kWh",
        cfg.tariff.export_price_p_per_kwh
    )?;
    writeln!(
        w,
        "  - Daytime usage: {:.0}% of consumption during daylight hours",
        cfg.demand.daytime_share * 100.0
    )?;
    writeln!(w, "  - Analysis period: {horizon} years")?;
    writeln!(w)?;
    writeln!(
        w,
        "Actual savings will depend on your usage patterns, weather"
    )?;
    writeln!(
        w,
        "conditions, and future energy prices. This quotation is valid"
    )?;
    writeln!(w, "for 30 days from the date shown above.")?;

    Ok(())
}

/// Resolves the finance mode for the payment section, defaulting to purchase.
fn finance_mode_of(cfg: &ScenarioConfig) -> FinanceMode {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn render(cfg: &ScenarioConfig) -> String {
        let proj = Projection::from_scenario(cfg);
        let req = QuoteRequest::with_reference("Q-TEST-001", "26 August 2026");
        let mut buf = Vec::new();
        render_quote(&req, cfg, &proj, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn issue_date_formatting() {
        assert_eq!(issue_date(1_700_000_000), "14 November 2023");
        // single-digit day has no zero padding
        assert_eq!(issue_date(1_704_067_200), "1 January 2024");
        assert_eq!(issue_date(0), "1 January 1970");
    }

    #[test]
    fn gbp_formatting() {
        assert_eq!(gbp(0.0), "£0");
        assert_eq!(gbp(999.4), "£999");
        assert_eq!(gbp(1000.0), "£1,000");
        assert_eq!(gbp(10_399.0), "£10,399");
        assert_eq!(gbp(1_234_567.0), "£1,234,567");
        assert_eq!(gbp(-2500.0), "-£2,500");
    }

    #[test]
    fn kwh_formatting() {
        assert_eq!(kwh(4555.2), "4,555 kWh");
        assert_eq!(kwh(555.0), "555 kWh");
    }

    #[test]
    fn baseline_quote_sections() {
        let text = render(&ScenarioConfig::baseline());
        assert!(text.contains("Quote Ref: Q-TEST-001"));
        assert!(text.contains("System Specification"));
        assert!(text.contains("Your Energy Profile"));
        assert!(text.contains("Investment"));
        assert!(text.contains("Payment Option"));
        assert!(text.contains("Projected Savings"));
        assert!(text.contains("Assumptions & Notes"));
        // Purchase mode
        assert!(text.contains("Upfront Purchase"));
        assert!(text.contains("£10,000"));
        // Battery present
        assert!(text.contains("Battery storage:"));
        assert!(text.contains("5 kWh"));
        // No EV section in the baseline
        assert!(!text.contains("EV Charging Benefits"));
    }

    #[test]
    fn quote_without_battery_says_not_included() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.system.battery_kwh = 0.0;
        let text = render(&cfg);
        assert!(text.contains("Not included"));
        // Battery install cost line dropped
        assert!(text.contains("£6,000"));
        assert!(!text.contains("£4,000"));
    }

    #[test]
    fn financed_quote_has_loan_breakdown() {
        let text = render(&ScenarioConfig::financed());
        assert!(text.contains("Payment method:"));
        assert!(text.contains("Finance"));
        assert!(text.contains("Deposit:"));
        assert!(text.contains("£2,500 (25%)"));
        assert!(text.contains("Loan amount:"));
        assert!(text.contains("£7,500"));
        assert!(text.contains("Total interest:"));
    }

    #[test]
    fn leased_quote_has_lease_breakdown() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.finance.mode = "lease".to_string();
        cfg.finance.lease_term_years = 10;
        cfg.finance.monthly_lease_gbp = 80.0;
        let text = render(&cfg);
        assert!(text.contains("Payment method:"));
        assert!(text.contains("Lease"));
        assert!(text.contains("Lease term:"));
        assert!(text.contains("10 years"));
        assert!(text.contains("Monthly payment:"));
        assert!(text.contains("£80"));
        // 80 * 12 * 10
        assert!(text.contains("Total lease cost:"));
        assert!(text.contains("£9,600"));
        // No loan or purchase lines
        assert!(!text.contains("Deposit:"));
        assert!(!text.contains("Amount due:"));
    }

    #[test]
    fn ev_benefits_need_ev_and_battery() {
        let with_both = render(&ScenarioConfig::heat_pump_ev());
        assert!(with_both.contains("EV Charging Benefits"));
        assert!(with_both.contains("Annual EV fuel saving:"));

        let mut ev_no_battery = ScenarioConfig::heat_pump_ev();
        ev_no_battery.system.battery_kwh = 0.0;
        let text = render(&ev_no_battery);
        assert!(!text.contains("EV Charging Benefits"));
        // The profile section still lists EV demand
        assert!(text.contains("EV charging (home):"));
    }

    #[test]
    fn savings_milestones_respect_horizon() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.analysis.horizon_years = 12;
        let text = render(&cfg);
        assert!(text.contains("Cumulative benefit (year 10):"));
        assert!(!text.contains("Cumulative benefit (year 15):"));
        assert!(!text.contains("Cumulative benefit (year 25):"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render(&ScenarioConfig::baseline());
        let b = render(&ScenarioConfig::baseline());
        assert_eq!(a, b);
    }
}
