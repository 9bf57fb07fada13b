//! # Fitness & Nutrition Calculators
//!
//! - [`bmi`] - Body mass index with category and healthy range
//! - [`ffmi`] - Fat-free mass index (raw and height-normalized)
//! - [`energy`] - BMR, TDEE, goal calories and macro split
//! - [`protein`] - Daily protein target from an activity table
//! - [`fiber`] - Daily fiber target from the age/sex table

pub mod bmi;
pub mod energy;
pub mod ffmi;
pub mod fiber;
pub mod protein;

pub use bmi::{BmiInput, BmiResult};
pub use energy::{EnergyInput, EnergyResult};
pub use ffmi::{FfmiInput, FfmiResult};
pub use fiber::{FiberInput, FiberResult};
pub use protein::{ProteinInput, ProteinResult};
