//! External game-state views consumed by the committee core

pub mod character;
pub mod game;

pub use character::{Character, Personality};
pub use game::GameContext;
