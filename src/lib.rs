pub mod board;
#[cfg(feature = "cli")]
pub mod config;
pub mod error;
#[cfg(feature = "cli")]
pub mod logger;
pub mod moves;
pub mod play;
pub mod square;
pub mod status;
