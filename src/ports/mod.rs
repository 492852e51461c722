//! Port traits (hexagonal architecture boundaries).

pub mod config_port;
pub mod record_port;
pub mod preferences_port;
pub mod delivery_port;
