//! Fuel-stop planner CLI library.
//!
//! Terminal styling, output rendering and logging setup shared by the
//! `fuelstop-cli` binary.

pub mod logging;
pub mod output;
pub mod terminal;
