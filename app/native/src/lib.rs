//! Shade - status bar, panel and heads-up coordination engine.
//!
//! The library holds the coordination core ([`coordinator::StatusBarCoordinator`]
//! and the components it drives), the tokio actor that runs it against wall
//! time, and the CLI used by the `shade` binary.

// Core components
pub mod animation;
pub mod autohide;
pub mod bar;
pub mod constants;
pub mod flags;
pub mod heads_up;
pub mod interaction;
pub mod notification;
pub mod panel;
pub mod timer;

// Coordination and runtime
pub mod actor;
pub mod coordinator;
pub mod host;
pub mod sim;

// Outer surfaces
pub mod cli;
pub mod config;
pub mod error;
