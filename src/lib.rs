//! Food Wheel Core
//!
//! Named food lists, a randomized spin over the active list, and AI
//! suggestions to fill a list, as an in-process library for a UI shell.
//!
//! Layered architecture:
//! - domain: entities, ids and errors
//! - repository: pure operations over the collection document
//! - store: key-value slots and the persisted document
//! - engine: spin state machine and wheel geometry
//! - gateway: suggestion services
//! - session: shell-facing state, events and persistence on change

use std::path::PathBuf;

pub mod config;
pub mod domain;
pub mod engine;
pub mod events;
pub mod gateway;
pub mod repository;
pub mod session;
pub mod store;

pub use config::Config;
pub use domain::{Collection, DomainError, DomainResult, FoodItem, FoodList, ItemId, ListId};
pub use engine::{SpinEngine, SpinPlan, SpinRejection, SpinRequest, SpinSettings};
pub use events::{EventReceiver, SessionEvent};
pub use gateway::SuggestionGateway;
pub use session::Session;

/// Name used for the log file
pub const APP_NAME: &str = "FoodWheel";

/// Install the rolling file logger under `config.log_dir`
pub fn init_logging(config: &Config) -> Result<PathBuf, rolling_logger::LoggerError> {
    let path = rolling_logger::init_logger(&config.log_dir, APP_NAME)?;
    let _ = rolling_logger::info(&format!("logging to {}", path.display()));
    Ok(path)
}
