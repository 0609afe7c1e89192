//! Pokedex TUI over the PokeAPI catalog.
//!
//! The library exposes the store, effects and views for testing; `main.rs`
//! wires them to a terminal.

pub mod action;
pub mod api;
pub mod catalog;
pub mod components;
pub mod config;
pub mod detail;
pub mod effect;
pub mod logging;
pub mod persist;
pub mod reducer;
pub mod route;
pub mod state;
