//! # Unit Types
//!
//! Newtype wrappers for the handful of units the calculators mix: body
//! mass and height (metric and imperial), garden bed lengths, and soil
//! volumes. Each is a plain `f64` on the wire.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{CubicFeet, CubicYards, Kilograms, Pounds};
//!
//! let weight: Kilograms = Pounds(220.0).into();
//! assert!((weight.0 - 99.79).abs() < 0.01);
//!
//! let soil: CubicYards = CubicFeet(54.0).into();
//! assert_eq!(soil.0, 2.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Mul, Sub};

/// Pounds per kilogram (avoirdupois)
pub const LB_PER_KG: f64 = 2.204_622_621_8;

/// Centimeters per inch (exact)
pub const CM_PER_IN: f64 = 2.54;

/// Liters per cubic foot
pub const LITERS_PER_CUFT: f64 = 28.316_846_592;

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb.0 / LB_PER_KG)
    }
}

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg.0 * LB_PER_KG)
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Meters> for Centimeters {
    fn from(m: Meters) -> Self {
        Centimeters(m.0 * 100.0)
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inches.0 * CM_PER_IN)
    }
}

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm.0 / CM_PER_IN)
    }
}

impl From<Inches> for Meters {
    fn from(inches: Inches) -> Self {
        Meters(inches.0 * CM_PER_IN / 100.0)
    }
}

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFeet(pub f64);

/// Volume in cubic yards (27 ft³)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl From<CubicFeet> for CubicYards {
    fn from(cuft: CubicFeet) -> Self {
        CubicYards(cuft.0 / 27.0)
    }
}

impl From<CubicYards> for CubicFeet {
    fn from(cuyd: CubicYards) -> Self {
        CubicFeet(cuyd.0 * 27.0)
    }
}

impl From<CubicFeet> for Liters {
    fn from(cuft: CubicFeet) -> Self {
        Liters(cuft.0 * LITERS_PER_CUFT)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Kilograms);
impl_arithmetic!(Pounds);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(Inches);
impl_arithmetic!(Feet);
impl_arithmetic!(CubicFeet);
impl_arithmetic!(CubicYards);
impl_arithmetic!(Liters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pounds_to_kilograms() {
        let kg: Kilograms = Pounds(100.0).into();
        assert!((kg.0 - 45.359).abs() < 0.001);

        let back: Pounds = kg.into();
        assert!((back.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_inches_to_meters() {
        let m: Meters = Inches(70.0).into();
        assert!((m.0 - 1.778).abs() < 1e-9);
    }

    #[test]
    fn test_cubic_feet_to_yards_and_liters() {
        let yd: CubicYards = CubicFeet(13.5).into();
        assert_eq!(yd.0, 0.5);

        let l: Liters = CubicFeet(1.0).into();
        assert!((l.0 - 28.3168).abs() < 1e-4);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilograms(10.0);
        let b = Kilograms(4.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).value(), 20.0);
    }

    #[test]
    fn test_serialization() {
        let cm = Centimeters(180.5);
        let json = serde_json::to_string(&cm).unwrap();
        assert_eq!(json, "180.5");
    }
}
