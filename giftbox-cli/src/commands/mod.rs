pub mod config;
pub mod odds;
pub mod play;
pub mod prizes;

pub use config::{handle_config_command, ConfigCommands};
pub use odds::show_odds;
pub use play::{play, EffectKind};
pub use prizes::list_prizes;
