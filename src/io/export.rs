//! CSV export for cashflow and monthly energy series.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::finance::YearCashflow;
use crate::model::generation::MONTH_NAMES;

/// Column header for the cashflow CSV.
const CASHFLOW_HEADER: &str =
    "year,grid_price_p,saving_gbp,net_benefit_gbp,cumulative_gbp,discounted_gbp";

/// Column header for the monthly energy CSV.
const ENERGY_HEADER: &str = "month,generation_kwh,consumption_kwh";

/// Exports the year-by-year cashflow to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_cashflow_csv(years: &[YearCashflow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_cashflow_csv(years, buf)
}

/// Writes the year-by-year cashflow as CSV to any writer.
///
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_cashflow_csv(years: &[YearCashflow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(CASHFLOW_HEADER.split(','))?;

    for y in years {
        wtr.write_record(&[
            y.year.to_string(),
            format!("{:.2}", y.grid_price_p),
            format!("{:.2}", y.saving_gbp),
            format!("{:.2}", y.net_benefit_gbp),
            format!("{:.2}", y.cumulative_gbp),
            format!("{:.2}", y.discounted_gbp),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the monthly generation and consumption series to a CSV file.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_energy_csv(
    generation_kwh: &[f64; 12],
    consumption_kwh: &[f64; 12],
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_energy_csv(generation_kwh, consumption_kwh, buf)
}

/// Writes the monthly generation and consumption series as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_energy_csv(
    generation_kwh: &[f64; 12],
    consumption_kwh: &[f64; 12],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(ENERGY_HEADER.split(','))?;

    for (i, month) in MONTH_NAMES.iter().enumerate() {
        wtr.write_record(&[
            month.to_string(),
            format!("{:.1}", generation_kwh[i]),
            format!("{:.1}", consumption_kwh[i]),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
