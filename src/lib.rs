//! Body-part learning games for the terminal.
//!
//! The engines under [`engine`] are headless and clock-driven; [`games`] wraps them
//! into activities and [`app`] runs those full screen.

pub mod app;
pub mod catalog;
pub mod config;
pub mod effects;
pub mod engine;
pub mod games;
pub mod terminal;
