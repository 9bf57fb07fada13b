//! Quickcalc command-line front end: argument parsing, dispatch and output.

pub mod app;
pub mod config;
pub mod output;
