//! # Post Model
//!
//! Posts as exchanged with the REST API and held in application state,
//! plus the keys rendered controls use to address them.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix marking a key that addresses an id-less post by list position
const LOCAL_KEY_PREFIX: &str = "local-";

/// A post record
///
/// `id` is assigned by the server and stays `None` for a post that only
/// exists locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl Post {
    /// Build a server-confirmed post from the submitted fields
    pub fn confirmed(id: u64, fields: PostFields) -> Self {
        Self {
            id: Some(id),
            title: fields.title,
            body: fields.body,
            user_id: fields.user_id,
        }
    }

    /// Key addressing this post when it is rendered at `index`
    pub fn key_at(&self, index: usize) -> PostKey {
        match self.id {
            Some(id) => PostKey::Server(id),
            None => PostKey::Local(index),
        }
    }

    /// Editable fields of this post
    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            body: self.body.clone(),
            user_id: self.user_id,
        }
    }

    /// Overwrite the editable fields, keeping the id
    pub fn apply(&mut self, fields: &PostFields) {
        self.title.clone_from(&fields.title);
        self.body.clone_from(&fields.body);
        self.user_id = fields.user_id;
    }
}

/// The editable part of a post: a draft on create, the new values on edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

impl PostFields {
    pub fn new(title: impl Into<String>, body: impl Into<String>, user_id: u64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }
}

/// How a rendered control addresses the post it acts on
///
/// `Local` indexes are only meaningful for the render that produced them;
/// every render hands out fresh keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostKey {
    Server(u64),
    Local(usize),
}

impl fmt::Display for PostKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostKey::Server(id) => write!(f, "{id}"),
            PostKey::Local(index) => write!(f, "{LOCAL_KEY_PREFIX}{index}"),
        }
    }
}

impl FromStr for PostKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(index) = s.strip_prefix(LOCAL_KEY_PREFIX) {
            return index
                .parse()
                .map(PostKey::Local)
                .map_err(|_| anyhow::anyhow!("Invalid local post key: {s}"));
        }
        s.parse()
            .map(PostKey::Server)
            .map_err(|_| anyhow::anyhow!("Invalid post id: {s}"))
    }
}
