pub mod config;
pub mod error;
pub mod kitchen;
pub mod log;

pub use config::Config;
pub use error::{Error, Result};
pub use kitchen::{Chore, JoinStrategy, Kitchen, KitchenEvent, MealReport};
