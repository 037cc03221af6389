//! # Board Module
//!
//! Everything the post board is made of, wired leaf-first:
//!
//! - **models**: posts, users and the owned application state
//! - **services**: the remote data gateway talking to the REST API
//! - **views**: HTML rendering of the post list and the full page
//! - **view_models**: the reusable create/edit form and its modal
//! - **events**: UI events and the sources they are read from
//! - **io**: dialog and page sink seams (terminal, file and mock)
//! - **controllers**: the application controller tying it all together

pub mod controllers;
pub mod errors;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use errors::{AppError, GatewayError, Mutation, Operation, Resource, ValidationError};
pub use events::{EventSource, UiEvent};
pub use models::{AppState, Post, PostFields, PostKey, User, UNKNOWN_USER};
pub use services::{HttpGateway, MockGateway, PostGateway};
pub use view_models::{FormController, FormField, FormMode, ModalState};
pub use views::{render_list, render_page, Control, ControlBinding, RenderedList, RenderedPage};
