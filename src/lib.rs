pub mod cli;
pub mod config;
pub mod core;

pub use crate::config::Config;
pub use crate::core::{Employee, EmployeeApi, EmployeeId, Event, HttpEmployeeApi, Session};

#[cfg(feature = "gui")]
pub mod gui;
