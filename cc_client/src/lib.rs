//! Internal modules for the Creature Cup client.
//!
//! This library provides configuration, the PokeAPI roster provider, and the
//! console and terminal front ends used by the cc_client binary.

pub mod api_client;
pub mod config;
pub mod console;
pub mod tui_app;
