pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod format;
pub mod io;
pub mod logging;

pub use application::{ReportTitle, Session};
pub use domain::*;
