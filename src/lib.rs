//! Expected value of Path of Exile transfigured gem rolls.
//!
//! `analyzer` is the pure EV engine; `app` wires it to the price, league and
//! catalog sources through the TTL cache in `storage`.

pub mod analyzer;
pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod errors;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod storage;
