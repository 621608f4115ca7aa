//! `grism-forward` library crate.
//!
//! Forward model for slitless (grism) spectroscopy: a theory cube
//! (wavelength × y × x) is dispersed onto a detector through a precomputed
//! sparse pixel response table, and rendered images are scored against
//! registered observations with a chi-squared statistic.
//!
//! The binary (`grism`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - hosts embedding the model only need [`api`] and [`registry`]

pub mod api;
pub mod app;
pub mod cli;
pub mod data;
pub mod diag;
pub mod domain;
pub mod error;
pub mod math;
pub mod registry;
pub mod render;
pub mod report;
pub mod response;
pub mod shape;
