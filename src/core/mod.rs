pub mod config;
pub mod error;
pub mod types;

pub use config::Tuning;
pub use error::{Result, SimError};
pub use types::{AgendaItemId, CharacterId, FactionId, Turn};
