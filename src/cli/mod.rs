//! Command-line interface

pub mod commands;
pub mod menu;
pub mod output;
