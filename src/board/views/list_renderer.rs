//! # List Renderer
//!
//! Projects the application state into the post list fragment. The whole
//! fragment is rebuilt on every call, and so is the set of control bindings:
//! controls from a previous render are never reused.

use super::html::escape;
use crate::board::models::{AppState, PostKey};

/// Id of the element the list is rendered into
pub const POSTS_CONTAINER_ID: &str = "posts-container";

/// Per-post controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Edit,
    Delete,
}

/// A rendered control together with the post it acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlBinding {
    pub control: Control,
    pub key: PostKey,
}

/// Output of one render: markup plus the handlers attached to it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedList {
    pub html: String,
    pub bindings: Vec<ControlBinding>,
}

impl RenderedList {
    /// Whether `control` was rendered for the post addressed by `key`
    pub fn is_bound(&self, control: Control, key: PostKey) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.control == control && binding.key == key)
    }
}

/// Render every post in state order, resolving authors by user id
pub fn render_list(state: &AppState) -> RenderedList {
    let mut rendered = RenderedList::default();

    for (index, post) in state.posts().iter().enumerate() {
        let key = post.key_at(index);
        let user_name = state.display_name(post.user_id);

        rendered.html.push_str(&format!(
            concat!(
                "<div class=\"post\" data-post-id=\"{key}\">\n",
                "  <h2>{title}</h2>\n",
                "  <p>{body}</p>\n",
                "  <p>User: {user}</p>\n",
                "  <button class=\"edit-btn\">Edit</button>\n",
                "  <button class=\"delete-btn\">Delete</button>\n",
                "</div>\n",
            ),
            key = key,
            title = escape(&post.title),
            body = escape(&post.body),
            user = escape(user_name),
        ));

        rendered.bindings.push(ControlBinding {
            control: Control::Edit,
            key,
        });
        rendered.bindings.push(ControlBinding {
            control: Control::Delete,
            key,
        });
    }

    tracing::debug!(
        "Rendered {} posts with {} bindings",
        state.posts().len(),
        rendered.bindings.len()
    );
    rendered
}
