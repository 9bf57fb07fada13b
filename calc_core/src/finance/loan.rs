//! # Loan Amortization
//!
//! Fixed-rate installment loan (boat, car, mortgage, personal) with an
//! optional extra principal payment each month.
//!
//! ## Assumptions
//!
//! - Interest compounds monthly at `annual_rate / 12`
//! - Payments are made at the end of each period
//! - The final payment is trimmed so the balance lands exactly on zero
//!
//! ## Example
//!
//! ```rust
//! use calc_core::finance::loan::{calculate, LoanInput};
//!
//! let input = LoanInput {
//!     price: 30_000.0,
//!     down_payment: 5_000.0,
//!     annual_rate_pct: 6.0,
//!     term_months: 60.0,
//!     ..LoanInput::default()
//! };
//!
//! let result = calculate(&input);
//! assert!((result.monthly_payment - 483.32).abs() < 0.01);
//! assert_eq!(result.schedule.len(), 60);
//! ```

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::coerce::{lenient, whole_count};

/// Balances smaller than this are treated as paid off
const PAID_OFF_EPSILON: f64 = 1e-7;

/// Longest term accepted (100 years); longer terms are clamped
pub const MAX_TERM_MONTHS: usize = 1_200;

/// Input parameters for an amortized loan.
///
/// ## JSON Example
///
/// ```json
/// {
///   "price": 45000,
///   "down_payment": 5000,
///   "annual_rate_pct": 7.5,
///   "term_months": 120,
///   "extra_monthly_payment": 50,
///   "start_date": "2025-01-01"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanInput {
    /// Purchase price (boat, car, home)
    #[serde(deserialize_with = "lenient")]
    pub price: f64,

    /// Cash paid up front
    #[serde(deserialize_with = "lenient")]
    pub down_payment: f64,

    /// Nominal annual interest rate in percent (e.g. 6.5)
    #[serde(deserialize_with = "lenient")]
    pub annual_rate_pct: f64,

    /// Number of monthly payments (fractions are truncated, capped at `MAX_TERM_MONTHS`)
    #[serde(deserialize_with = "lenient")]
    pub term_months: f64,

    /// Additional principal paid every month
    #[serde(deserialize_with = "lenient")]
    pub extra_monthly_payment: f64,

    /// Date of the first payment, used to date schedule rows
    pub start_date: Option<NaiveDate>,
}

impl Default for LoanInput {
    fn default() -> Self {
        LoanInput {
            price: 0.0,
            down_payment: 0.0,
            annual_rate_pct: 0.0,
            term_months: 0.0,
            extra_monthly_payment: 0.0,
            start_date: None,
        }
    }
}

impl LoanInput {
    /// Amount financed: price less down payment, never negative
    pub fn loan_amount(&self) -> f64 {
        (self.price - self.down_payment).max(0.0)
    }

    /// Periodic (monthly) interest rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_pct.max(0.0) / 100.0 / 12.0
    }
}

/// One payment period in the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based payment number
    pub period: usize,
    /// Due date when the input carried a start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Scheduled payment (principal + interest)
    pub payment: f64,
    /// Portion of the scheduled payment applied to principal
    pub principal: f64,
    /// Interest accrued this period
    pub interest: f64,
    /// Extra principal paid this period
    pub extra_principal: f64,
    /// Balance remaining after this payment
    pub balance: f64,
}

/// Per-year totals derived from the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: usize,
    /// Principal repaid during the year, extra payments included
    pub principal: f64,
    pub interest: f64,
    pub ending_balance: f64,
}

/// Results from a loan calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    /// Everything paid over the life of the loan (excluding down payment)
    pub total_payment: f64,
    pub total_interest: f64,
    /// Months until the balance reaches zero (shorter than the term with extra payments)
    pub payoff_months: usize,
    pub schedule: Vec<AmortizationRow>,
    pub yearly_summary: Vec<YearSummary>,
}

impl LoanResult {
    fn empty(loan_amount: f64) -> Self {
        LoanResult {
            loan_amount,
            monthly_payment: 0.0,
            total_payment: 0.0,
            total_interest: 0.0,
            payoff_months: 0,
            schedule: Vec::new(),
            yearly_summary: Vec::new(),
        }
    }
}

/// Level payment that retires `principal` over `periods` at `rate` per period.
///
/// # Formula
/// M = P·r / (1 − (1 + r)^−n), or P / n when r = 0
///
/// ```rust
/// use calc_core::finance::loan::level_payment;
///
/// assert_eq!(level_payment(1200.0, 0.0, 12), 100.0);
/// assert_eq!(level_payment(1200.0, 0.01, 0), 0.0);
/// ```
pub fn level_payment(principal: f64, rate: f64, periods: usize) -> f64 {
    if periods == 0 || principal <= 0.0 {
        return 0.0;
    }
    let n = periods as f64;
    if rate <= 0.0 {
        return principal / n;
    }
    principal * rate / (1.0 - (1.0 + rate).powf(-n))
}

/// Calculate the payment and full amortization schedule for a loan.
pub fn calculate(input: &LoanInput) -> LoanResult {
    let loan_amount = input.loan_amount();
    let periods = whole_count(input.term_months, 0).min(MAX_TERM_MONTHS);
    let rate = input.monthly_rate();
    let extra = input.extra_monthly_payment.max(0.0);

    let payment = level_payment(loan_amount, rate, periods);
    if payment <= 0.0 {
        return LoanResult::empty(loan_amount);
    }

    let mut schedule = Vec::with_capacity(periods);
    let mut balance = loan_amount;

    for period in 1..=periods {
        if balance <= PAID_OFF_EPSILON {
            break;
        }

        let interest = balance * rate;
        let mut principal = payment - interest;
        let mut extra_principal = extra;

        if period == periods || principal >= balance {
            principal = balance;
            extra_principal = 0.0;
        } else if principal + extra_principal > balance {
            extra_principal = balance - principal;
        }

        balance -= principal + extra_principal;
        if balance <= PAID_OFF_EPSILON {
            balance = 0.0;
        }

        let payment_date = input
            .start_date
            .and_then(|start| start.checked_add_months(Months::new((period - 1) as u32)));

        schedule.push(AmortizationRow {
            period,
            payment_date,
            payment: principal + interest,
            principal,
            interest,
            extra_principal,
            balance,
        });
    }

    let total_interest: f64 = schedule.iter().map(|r| r.interest).sum();
    let total_payment: f64 = schedule
        .iter()
        .map(|r| r.payment + r.extra_principal)
        .sum();

    tracing::trace!(loan_amount, payment, rows = schedule.len(), "amortization schedule built");

    LoanResult {
        loan_amount,
        monthly_payment: payment,
        total_payment,
        total_interest,
        payoff_months: schedule.len(),
        yearly_summary: summarize_by_year(&schedule),
        schedule,
    }
}

/// Aggregate schedule rows into 12-month buckets.
pub fn summarize_by_year(schedule: &[AmortizationRow]) -> Vec<YearSummary> {
    schedule
        .chunks(12)
        .enumerate()
        .map(|(idx, rows)| YearSummary {
            year: idx + 1,
            principal: rows.iter().map(|r| r.principal + r.extra_principal).sum(),
            interest: rows.iter().map(|r| r.interest).sum(),
            ending_balance: rows.last().map_or(0.0, |r| r.balance),
        })
        .collect()
}
