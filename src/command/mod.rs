mod serialize;
mod types;

pub use self::types::{ChatCommand, Command};
