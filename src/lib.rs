//! # Airline Analyzer Library
//!
//! Exploratory analysis of an airline booking SQLite database: schema
//! inspection, missing-value profiling and booking, fare and occupancy
//! metrics.

pub mod app;
pub mod catalog;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod inspect;
pub mod logging;
pub mod metrics;
pub mod output;
pub mod store;
