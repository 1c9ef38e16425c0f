//! # Othello CLI
//!
//! Othello (Reversi) in the terminal: a human against a greedy single-ply
//! bot, with the board re-rendered after every action.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, move rules, state machine, coordinates
//! - [`ai`] — Agent trait, greedy and random bots, agent-vs-agent matches
//! - [`session`] — Command parsing and the human/bot turn sequencing
//! - [`ui`] — Terminal UI and plain-text board snapshots
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod ui;
