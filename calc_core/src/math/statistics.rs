//! # Statistics
//!
//! Two calculators share this module:
//!
//! - **Z-score**: standardizes a value against a normal distribution and
//!   reports its percentile and one/two-tailed p-values.
//! - **Descriptive statistics**: summary of a list of numbers.
//!
//! ## Normal CDF
//!
//! `Φ(z) = ½(1 + erf(z/√2))`, with `erf` from Abramowitz & Stegun 7.1.26
//! (absolute error below 1.5e-7).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::math::statistics::{describe, z_score};
//!
//! let z = z_score(75.0, 70.0, 5.0);
//! assert_eq!(z.z_score, 1.0);
//! assert!((z.percentile - 84.13).abs() < 0.01);
//!
//! let summary = describe(&[2.0, 4.0, 4.0, 5.0]);
//! assert_eq!(summary.median, 4.0);
//! assert_eq!(summary.modes, vec![4.0]);
//! ```

use serde::{Deserialize, Serialize};

use crate::coerce::{finite_or_zero, lenient, lenient_list, parse_list};

// Abramowitz & Stegun 7.1.26
const ERF_P: f64 = 0.327_591_1;
const ERF_A: [f64; 5] = [
    0.254_829_592,
    -0.284_496_736,
    1.421_413_741,
    -1.453_152_027,
    1.061_405_429,
];

/// Error function approximation, |error| < 1.5e-7.
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ERF_A.iter().rev().fold(0.0, |acc, a| acc * t + a) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal cumulative distribution function.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZScoreInput {
    #[serde(deserialize_with = "lenient")]
    pub value: f64,
    #[serde(deserialize_with = "lenient")]
    pub mean: f64,
    #[serde(deserialize_with = "lenient")]
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResult {
    pub z_score: f64,
    /// Share of the distribution below the value, 0-100
    pub percentile: f64,
    pub p_value_one_tailed: f64,
    pub p_value_two_tailed: f64,
}

/// Standardize `x`. A non-positive standard deviation gives z = 0.
pub fn z_score(x: f64, mean: f64, std_dev: f64) -> ZScoreResult {
    let z = if std_dev > 0.0 {
        finite_or_zero((x - mean) / std_dev)
    } else {
        0.0
    };
    let tail = 1.0 - normal_cdf(z.abs());

    ZScoreResult {
        z_score: z,
        percentile: normal_cdf(z) * 100.0,
        p_value_one_tailed: tail,
        p_value_two_tailed: (2.0 * tail).min(1.0),
    }
}

pub fn calculate_z_score(input: &ZScoreInput) -> ZScoreResult {
    z_score(input.value, input.mean, input.std_dev)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptiveInput {
    /// Array of numbers, or text such as `"1, 2 3; 4"`
    #[serde(deserialize_with = "lenient_list")]
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveResult {
    pub count: usize,
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    /// Most frequent values; empty when every value occurs once
    pub modes: Vec<f64>,
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub population_variance: f64,
    pub population_std_dev: f64,
    pub sample_variance: f64,
    pub sample_std_dev: f64,
}

/// Parse a comma, semicolon or whitespace separated list of numbers.
/// Tokens that are not numeric are skipped.
pub fn parse_values(text: &str) -> Vec<f64> {
    parse_list(text)
}

fn modes(sorted: &[f64]) -> Vec<f64> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for &v in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == v => *count += 1,
            _ => runs.push((v, 1)),
        }
    }
    let best = runs.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if best < 2 {
        return Vec::new();
    }
    runs.into_iter()
        .filter(|(_, count)| *count == best)
        .map(|(v, _)| v)
        .collect()
}

/// Summary statistics. Non-finite values are ignored; an empty list gives a
/// zeroed summary.
pub fn describe(values: &[f64]) -> DescriptiveResult {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return DescriptiveResult::default();
    }
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let sum: f64 = sorted.iter().sum();
    let mean = sum / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
    let population_variance = squares / n as f64;
    let sample_variance = if n > 1 { squares / (n - 1) as f64 } else { 0.0 };
    let min = sorted[0];
    let max = sorted[n - 1];

    DescriptiveResult {
        count: n,
        sum,
        mean,
        median,
        modes: modes(&sorted),
        min,
        max,
        range: max - min,
        population_variance,
        population_std_dev: population_variance.sqrt(),
        sample_variance,
        sample_std_dev: sample_variance.sqrt(),
    }
}

pub fn calculate_descriptive(input: &DescriptiveInput) -> DescriptiveResult {
    describe(&input.values)
}
