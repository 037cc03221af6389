//! # Application State
//!
//! The single owned store of loaded posts and users. Every mutation here is
//! applied only after the server confirmed the corresponding call, so the
//! state is a lagging mirror of the remote data.

use super::post::{Post, PostFields, PostKey};
use super::user::User;

/// Label shown for a post whose author is not (yet) loaded
pub const UNKNOWN_USER: &str = "Unknown User";

/// Loaded posts and users, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    posts: Vec<Post>,
    users: Vec<User>,
}

impl AppState {
    /// Create an empty state (nothing loaded yet)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Replace the loaded users
    pub fn set_users(&mut self, users: Vec<User>) {
        tracing::debug!("State: {} users loaded", users.len());
        self.users = users;
    }

    /// Replace the loaded posts
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        tracing::debug!("State: {} posts loaded", posts.len());
        self.posts = posts;
    }

    /// Append a post at the end of the list
    pub fn add_post(&mut self, post: Post) {
        tracing::debug!("State: post {:?} appended", post.id);
        self.posts.push(post);
    }

    /// Update the fields of the post addressed by `key` in place
    ///
    /// The post keeps its id and position. Returns false when no post matches.
    pub fn merge_post(&mut self, key: PostKey, fields: &PostFields) -> bool {
        match self.position(key) {
            Some(index) => {
                self.posts[index].apply(fields);
                tracing::debug!("State: post {key} merged");
                true
            }
            None => false,
        }
    }

    /// Remove the post(s) addressed by `key`, returning how many were removed
    ///
    /// A server key removes every post carrying that id.
    pub fn remove_post(&mut self, key: PostKey) -> usize {
        let before = self.posts.len();
        match key {
            PostKey::Server(id) => self.posts.retain(|post| post.id != Some(id)),
            PostKey::Local(index) => {
                if self.position(key).is_some() {
                    self.posts.remove(index);
                }
            }
        }
        let removed = before - self.posts.len();
        tracing::debug!("State: {removed} post(s) removed for key {key}");
        removed
    }

    /// Look up the post addressed by `key`
    pub fn find_post(&self, key: PostKey) -> Option<&Post> {
        self.position(key).map(|index| &self.posts[index])
    }

    /// Position of the post addressed by `key`
    ///
    /// A local key only matches an id-less post at exactly that index.
    pub fn position(&self, key: PostKey) -> Option<usize> {
        match key {
            PostKey::Server(id) => self.posts.iter().position(|post| post.id == Some(id)),
            PostKey::Local(index) => self
                .posts
                .get(index)
                .filter(|post| post.id.is_none())
                .map(|_| index),
        }
    }

    /// Name of the user with `user_id`, if loaded
    pub fn user_name(&self, user_id: u64) -> Option<&str> {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.name.as_str())
    }

    /// Name to display as the author of a post
    pub fn display_name(&self, user_id: u64) -> &str {
        self.user_name(user_id).unwrap_or(UNKNOWN_USER)
    }
}
