//! UK residential solar PV + battery economics calculator.

pub mod catalog;
pub mod config;
pub mod io;
pub mod model;
pub mod projection;
pub mod quote;

#[cfg(feature = "api")]
pub mod api;
#[cfg(feature = "tui")]
pub mod tui;
