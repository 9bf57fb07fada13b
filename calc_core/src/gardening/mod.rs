//! # Gardening Calculators
//!
//! - [`soil_volume`] - Soil, compost or mulch needed for a bed
//! - [`plant_spacing`] - Plant count for a bed at a given spacing

pub mod plant_spacing;
pub mod soil_volume;

pub use plant_spacing::{PlantSpacingInput, PlantSpacingResult};
pub use soil_volume::{SoilVolumeInput, SoilVolumeResult};
