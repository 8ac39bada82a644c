//! TUI module for interactive terminal interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: data types (App, Focus, Action, Transition)
//! - `update`: transitions driven by actions
//! - `view`: pure rendering
//! - `run`: effects (terminal, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
