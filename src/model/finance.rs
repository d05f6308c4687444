//! Annual financials and multi-year cashflow projection.
//!
//! Tariff inputs are pence per kWh; all monetary outputs are pounds.
//! Grid prices escalate annually while the export tariff stays flat.

use serde::Serialize;

/// Year-1 cost and income summary for a given set of energy flows.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnnualFinancials {
    /// What the household would pay with no solar at all (GBP).
    pub cost_baseline_gbp: f64,
    /// Grid import cost with the PV system (GBP).
    pub cost_with_pv_gbp: f64,
    /// Export tariff income (GBP).
    pub export_income_gbp: f64,
    /// Avoided import cost plus export income (GBP).
    pub net_saving_gbp: f64,
}

impl AnnualFinancials {
    /// Computes year-1 financials from annual energy flows.
    pub fn compute(
        annual_demand_kwh: f64,
        grid_import_kwh: f64,
        export_kwh: f64,
        grid_price_p: f64,
        export_price_p: f64,
    ) -> Self {
        let p_grid = grid_price_p / 100.0;
        let p_export = export_price_p / 100.0;

        let cost_baseline_gbp = annual_demand_kwh * p_grid;
        let cost_with_pv_gbp = grid_import_kwh * p_grid;
        let export_income_gbp = export_kwh * p_export;
        let net_saving_gbp = (cost_baseline_gbp - cost_with_pv_gbp) + export_income_gbp;

        Self {
            cost_baseline_gbp,
            cost_with_pv_gbp,
            export_income_gbp,
            net_saving_gbp,
        }
    }
}

/// Annual payment on an amortized loan.
///
/// Falls back to straight-line repayment at 0% interest and returns 0
/// for a zero-year term.
pub fn loan_payment(principal_gbp: f64, annual_rate_pct: f64, term_years: usize) -> f64 {
    if term_years == 0 {
        return 0.0;
    }
    if annual_rate_pct == 0.0 {
        return principal_gbp / term_years as f64;
    }
    let r = annual_rate_pct / 100.0;
    let growth = (1.0 + r).powi(term_years as i32);
    principal_gbp * (r * growth) / (growth - 1.0)
}

/// How the installation is paid for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinanceMode {
    /// Full install cost paid upfront.
    Purchase,
    /// Deposit upfront, remainder amortized over the loan term.
    Loan {
        /// Deposit as a percentage of the install cost (0-100).
        deposit_pct: f64,
        /// Loan repayment term in years.
        term_years: usize,
        /// Annual interest rate (%).
        rate_pct: f64,
    },
    /// Fixed monthly payments, no upfront cost and no ownership.
    Lease {
        /// Lease term in years.
        term_years: usize,
        /// Monthly lease payment (GBP).
        monthly_gbp: f64,
    },
}

/// One projected year of the cashflow.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct YearCashflow {
    /// Year number, 1-based.
    pub year: usize,
    /// Escalated grid price for this year (pence/kWh).
    pub grid_price_p: f64,
    /// Energy bill saving plus export income (GBP).
    pub saving_gbp: f64,
    /// Saving minus any loan or lease payment due this year (GBP).
    pub net_benefit_gbp: f64,
    /// Running cashflow position including the upfront payment (GBP).
    pub cumulative_gbp: f64,
    /// Net benefit discounted back to year 0 (GBP).
    pub discounted_gbp: f64,
}

/// Inputs for [`CashflowProjection::project`].
#[derive(Debug, Clone)]
pub struct CashflowParams {
    /// Total install cost for this variant (GBP).
    pub install_cost_gbp: f64,
    /// Annual demand used for the no-solar baseline bill (kWh).
    pub annual_demand_kwh: f64,
    /// Annual grid import with the system (kWh).
    pub grid_import_kwh: f64,
    /// Annual export (kWh).
    pub export_kwh: f64,
    /// Year-0 grid price (pence/kWh).
    pub grid_price_p: f64,
    /// Export tariff (pence/kWh), flat over the horizon.
    pub export_price_p: f64,
    /// Annual grid price growth (%).
    pub annual_growth_pct: f64,
    /// Projection horizon (years).
    pub horizon_years: usize,
    /// Discount rate for NPV (%).
    pub discount_rate_pct: f64,
    /// Payment structure.
    pub mode: FinanceMode,
}

/// Multi-year cashflow projection with payback and NPV.
#[derive(Debug, Clone, Serialize)]
pub struct CashflowProjection {
    /// Total install cost (GBP).
    pub install_cost_gbp: f64,
    /// Deposit paid upfront (GBP, loan mode only).
    pub deposit_gbp: f64,
    /// Amount borrowed (GBP, loan mode only).
    pub loan_amount_gbp: f64,
    /// Annual loan payment during the term (GBP).
    pub annual_loan_payment_gbp: f64,
    /// Interest paid over the whole loan (GBP).
    pub total_interest_gbp: f64,
    /// Annual lease payment during the term (GBP).
    pub annual_lease_payment_gbp: f64,
    /// Total lease payments over the term (GBP).
    pub total_lease_cost_gbp: f64,
    /// One entry per projected year.
    pub years: Vec<YearCashflow>,
    /// First year the cumulative cashflow reaches zero, if within horizon.
    pub payback_year: Option<usize>,
    /// Net present value over the horizon (GBP).
    pub npv_gbp: f64,
}

impl CashflowProjection {
    /// Projects the cashflow over the configured horizon.
    pub fn project(p: &CashflowParams) -> Self {
        let p_export = p.export_price_p / 100.0;
        let growth = 1.0 + p.annual_growth_pct / 100.0;
        let discount = 1.0 + p.discount_rate_pct / 100.0;

        let (deposit_gbp, loan_amount_gbp, annual_loan_payment_gbp, total_interest_gbp) =
            match p.mode {
                FinanceMode::Loan {
                    deposit_pct,
                    term_years,
                    rate_pct,
                } => {
                    let deposit = p.install_cost_gbp * (deposit_pct / 100.0);
                    let amount = p.install_cost_gbp - deposit;
                    let payment = loan_payment(amount, rate_pct, term_years);
                    let interest = payment * term_years as f64 - amount;
                    (deposit, amount, payment, interest)
                }
                _ => (0.0, 0.0, 0.0, 0.0),
            };

        let (annual_lease_payment_gbp, total_lease_cost_gbp) = match p.mode {
            FinanceMode::Lease {
                term_years,
                monthly_gbp,
            } => {
                let annual = monthly_gbp * 12.0;
                (annual, annual * term_years as f64)
            }
            _ => (0.0, 0.0),
        };

        // Upfront cashflow position by payment structure
        let upfront_gbp = match p.mode {
            FinanceMode::Purchase => -p.install_cost_gbp,
            FinanceMode::Loan { .. } => -deposit_gbp,
            FinanceMode::Lease { .. } => 0.0,
        };

        let mut years = Vec::with_capacity(p.horizon_years);
        let mut cumulative_gbp = upfront_gbp;
        let mut discounted_sum = 0.0;

        for year in 1..=p.horizon_years {
            let grid_price_p = p.grid_price_p * growth.powi(year as i32);
            let p_grid = grid_price_p / 100.0;

            let cost_baseline = p.annual_demand_kwh * p_grid;
            let cost_with_pv = p.grid_import_kwh * p_grid;
            let export_income = p.export_kwh * p_export;
            let saving_gbp = (cost_baseline - cost_with_pv) + export_income;

            let payment = match p.mode {
                FinanceMode::Loan { term_years, .. } if year <= term_years => {
                    annual_loan_payment_gbp
                }
                FinanceMode::Lease { term_years, .. } if year <= term_years => {
                    annual_lease_payment_gbp
                }
                _ => 0.0,
            };
            let net_benefit_gbp = saving_gbp - payment;

            cumulative_gbp += net_benefit_gbp;
            let discounted_gbp = net_benefit_gbp / discount.powi(year as i32);
            discounted_sum += discounted_gbp;

            years.push(YearCashflow {
                year,
                grid_price_p,
                saving_gbp,
                net_benefit_gbp,
                cumulative_gbp,
                discounted_gbp,
            });
        }

        let payback_year = years
            .iter()
            .find(|y| y.cumulative_gbp >= 0.0)
            .map(|y| y.year);

        let npv_gbp = upfront_gbp + discounted_sum;

        Self {
            install_cost_gbp: p.install_cost_gbp,
            deposit_gbp,
            loan_amount_gbp,
            annual_loan_payment_gbp,
            total_interest_gbp,
            annual_lease_payment_gbp,
            total_lease_cost_gbp,
            years,
            payback_year,
            npv_gbp,
        }
    }
}
