//! # View Models
//!
//! UI state that sits between the models and the rendered page.

pub mod form_controller;

pub use form_controller::{FormController, FormField, FormFields, FormMode, ModalState, Submission};
