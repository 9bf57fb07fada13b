//! # Betting Calculators
//!
//! - [`odds`] - Convert between American, decimal, fractional and implied probability
//! - [`parlay`] - Combined odds and payout of a multi-leg bet
//! - [`kelly`] - Kelly criterion stake sizing

pub mod kelly;
pub mod odds;
pub mod parlay;

pub use kelly::{KellyInput, KellyResult};
pub use odds::{convert_odds, OddsFormat, OddsInput, OddsResult};
pub use parlay::{ParlayInput, ParlayResult};
