//! # Page Renderer
//!
//! Wraps the post list in the full page: the "Create Post" trigger, the list
//! container and the modal holding the create/edit form.

use super::html::escape;
use super::list_renderer::{render_list, Control, RenderedList, POSTS_CONTAINER_ID};
use crate::board::models::{AppState, PostKey};
use crate::board::view_models::{FormController, FormMode};

/// A fully rendered page; the embedded list carries the per-post handlers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub html: String,
    pub list: RenderedList,
}

impl RenderedPage {
    pub fn is_bound(&self, control: Control, key: PostKey) -> bool {
        self.list.is_bound(control, key)
    }
}

/// Render the whole page from state and form
pub fn render_page(state: &AppState, form: &FormController) -> RenderedPage {
    let list = render_list(state);
    let fields = form.fields();
    let display = if form.is_visible() { "block" } else { "none" };
    let heading = match form.mode() {
        FormMode::Create => "Create Post",
        FormMode::Edit => "Edit Post",
    };

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
    html.push_str("  <title>Posts</title>\n</head>\n<body>\n");
    html.push_str("<button id=\"create-post-btn\">Create Post</button>\n");
    html.push_str(&format!("<div id=\"{POSTS_CONTAINER_ID}\">\n"));
    html.push_str(&list.html);
    html.push_str("</div>\n");
    html.push_str(&format!(
        "<div class=\"modal\" style=\"display: {display}\">\n"
    ));
    html.push_str("  <span class=\"close\">&times;</span>\n");
    html.push_str(&format!("  <h2>{heading}</h2>\n"));
    html.push_str("  <form id=\"post-form\">\n");
    html.push_str(&format!(
        "    <input type=\"hidden\" id=\"post-id\" value=\"{}\">\n",
        escape(&fields.post_id)
    ));
    html.push_str(&format!(
        "    <input type=\"text\" id=\"title\" value=\"{}\">\n",
        escape(&fields.title)
    ));
    html.push_str(&format!(
        "    <textarea id=\"body\">{}</textarea>\n",
        escape(&fields.body)
    ));
    html.push_str(&format!(
        "    <input type=\"number\" id=\"userId\" value=\"{}\">\n",
        escape(&fields.user_id)
    ));
    html.push_str("    <button type=\"submit\">Submit</button>\n");
    html.push_str("  </form>\n</div>\n</body>\n</html>\n");

    RenderedPage { html, list }
}
