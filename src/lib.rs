//! Tilt indicator core logic.
//!
//! Everything that decides what the device shows lives here and runs on
//! the host: gesture classification, the display-mode machine, tilt
//! estimation, and frame rendering.  The hardware sits behind the traits
//! in [`hw`].
//!
//! Usage: `cargo test` (host) - the firmware binary in `main.rs` needs
//! `--features embedded` and the `thumbv7em-none-eabihf` target.
//!
//! ## Per-cycle data flow
//!
//! ```text
//! button edges (interrupt) ─▶ gesture ─▶ mode ──┐
//! accelerometer ───────────▶ orientation ───────┴─▶ render ─▶ display
//! ```

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod config;
pub mod error;
pub mod gesture;
pub mod hw;
pub mod mode;
pub mod orientation;
pub mod render;

pub use error::Error;
