//! # Views
//!
//! HTML rendering. Every render rebuilds its output from scratch.

pub mod html;
pub mod list_renderer;
pub mod page;

pub use list_renderer::{render_list, Control, ControlBinding, RenderedList, POSTS_CONTAINER_ID};
pub use page::{render_page, RenderedPage};
