//! CLI command handlers

pub mod commands;

pub use commands::{cart_show, cart_update, list, load, order, parse_sort, watch, CartAction};
