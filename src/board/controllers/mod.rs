//! # Controllers Module
//!
//! Contains the controller that orchestrates the board.

pub mod app_controller;

// Re-export main types for convenience
pub use app_controller::{AppController, LoadMessage, DELETE_CONFIRMATION};
