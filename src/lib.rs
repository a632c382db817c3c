//! Configurable XRandR helper for multi-monitor setups.
//!
//! Reads a restricted TOML-style configuration of named monitor layouts,
//! matches them against the outputs the display server reports as
//! connected, fills in unspecified modes from the advertised mode lists,
//! and applies the result through `xrandr`.
//!
//! The crate is organised into four layers:
//!
//! - **[`config`]** — the restricted config grammar, scope tree, and
//!   extraction into layout records
//! - **[`layout`]** — the layout domain: hardware matching, mode
//!   resolution, rotation, and screen geometry
//! - **[`display`]** — the display-server boundary and its `xrandr` backend
//! - **[`commands`]** — top-level orchestration behind the CLI

#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod exec;
pub mod layout;
pub mod logging;
pub mod prompt;
