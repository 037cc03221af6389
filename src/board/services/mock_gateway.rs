//! # Mock Gateway
//!
//! In-memory `PostGateway` for tests. Serves canned users and posts, assigns
//! ids on create, records every call and can be told to fail operations.

use super::gateway::PostGateway;
use crate::board::errors::{GatewayError, Operation};
use crate::board::models::{Post, PostFields, User};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Status reported for operations marked as failing
const FAILURE_STATUS: u16 = 500;

/// A call received by the mock, in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListUsers,
    ListPosts,
    CreatePost(PostFields),
    UpdatePost(u64, PostFields),
    DeletePost(u64),
}

#[derive(Debug)]
struct MockGatewayState {
    users: Vec<User>,
    posts: Vec<Post>,
    next_id: u64,
    failing: HashSet<Operation>,
    calls: Vec<GatewayCall>,
}

/// Shared handle to the mock; clones see the same calls and data
#[derive(Debug, Clone)]
pub struct MockGateway {
    inner: Arc<Mutex<MockGatewayState>>,
}

impl MockGateway {
    /// Create a mock with no data; the first created post gets id 101
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockGatewayState {
                users: Vec::new(),
                posts: Vec::new(),
                next_id: 101,
                failing: HashSet::new(),
                calls: Vec::new(),
            })),
        }
    }

    pub fn with_users(self, users: Vec<User>) -> Self {
        self.lock().users = users;
        self
    }

    pub fn with_posts(self, posts: Vec<Post>) -> Self {
        self.lock().posts = posts;
        self
    }

    /// Id handed out by the next create call
    pub fn with_next_id(self, id: u64) -> Self {
        self.lock().next_id = id;
        self
    }

    /// Make every call of `operation` fail with a server error
    pub fn fail(&self, operation: Operation) {
        self.lock().failing.insert(operation);
    }

    /// Let `operation` succeed again
    pub fn recover(&self, operation: Operation) {
        self.lock().failing.remove(&operation);
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.lock().calls.clone()
    }

    /// Whether any call other than the initial loads was made
    pub fn has_mutations(&self) -> bool {
        self.lock()
            .calls
            .iter()
            .any(|call| !matches!(call, GatewayCall::ListUsers | GatewayCall::ListPosts))
    }

    fn lock(&self) -> MutexGuard<'_, MockGatewayState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `call` and report the configured outcome for `operation`
    fn record(&self, operation: Operation, call: GatewayCall) -> Result<(), GatewayError> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing.contains(&operation) {
            return Err(GatewayError::Status {
                operation,
                status: FAILURE_STATUS,
            });
        }
        Ok(())
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PostGateway for MockGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        self.record(Operation::ListUsers, GatewayCall::ListUsers)?;
        Ok(self.lock().users.clone())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, GatewayError> {
        self.record(Operation::ListPosts, GatewayCall::ListPosts)?;
        Ok(self.lock().posts.clone())
    }

    async fn create_post(&self, draft: &PostFields) -> Result<Post, GatewayError> {
        self.record(
            Operation::CreatePost,
            GatewayCall::CreatePost(draft.clone()),
        )?;
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        Ok(Post::confirmed(id, draft.clone()))
    }

    async fn update_post(&self, id: u64, fields: &PostFields) -> Result<Post, GatewayError> {
        self.record(
            Operation::UpdatePost,
            GatewayCall::UpdatePost(id, fields.clone()),
        )?;
        Ok(Post::confirmed(id, fields.clone()))
    }

    async fn delete_post(&self, id: u64) -> Result<(), GatewayError> {
        self.record(Operation::DeletePost, GatewayCall::DeletePost(id))
    }
}
