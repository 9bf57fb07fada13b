//! # Finance Calculators
//!
//! - [`loan`] - Amortized loan payment and schedule (boat, car, mortgage)
//! - [`compound_interest`] - Savings growth with monthly contributions
//! - [`cagr`] - Compound annual growth rate
//! - [`tip`] - Tip and bill splitting
//! - [`stamp_duty`] - UK Stamp Duty Land Tax bands
//! - [`insurance`] - Term life premium estimate from a rate table

pub mod cagr;
pub mod compound_interest;
pub mod insurance;
pub mod loan;
pub mod stamp_duty;
pub mod tip;

pub use cagr::{CagrInput, CagrResult};
pub use compound_interest::{CompoundInterestInput, CompoundInterestResult};
pub use insurance::{InsuranceInput, InsuranceResult};
pub use loan::{LoanInput, LoanResult};
pub use stamp_duty::{StampDutyInput, StampDutyResult};
pub use tip::{TipInput, TipResult};
