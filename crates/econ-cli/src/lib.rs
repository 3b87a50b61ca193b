//! Command-line front end for the harmonization pipeline.
//!
//! The binary (`econ-harmonize`) is a thin wrapper: argument parsing lives in
//! [`cli`], command bodies in [`commands`], table rendering in [`summary`].

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
