pub mod config;
pub mod error;
pub mod i18n;
pub mod types;

pub use config::KroaddyConfig;
pub use error::{KroaddyError, Result};
pub use i18n::Phrase;
pub use types::*;
