//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the IO-heavy parts: SQLite storage, the config file
//! and terminal rendering.

pub mod app_config;
pub mod cli;
pub mod db;
