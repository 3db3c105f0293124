//! Foundation types for termfolio.
//!
//! This crate holds the front-end agnostic types shared by the simulator and
//! the terminal UI: input events, configuration, build metadata and errors.

pub mod build_info;
pub mod config;
pub mod error;
pub mod input;
