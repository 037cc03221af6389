//! # Remote Data Gateway
//!
//! The boundary between the board and the REST API. Every call is a single
//! attempt: no retry, no backoff, no auth. A failed call surfaces as a
//! `GatewayError` naming the operation.

use crate::board::errors::GatewayError;
use crate::board::models::{Post, PostFields, User};
use std::future::Future;

/// Async access to the `/users` and `/posts` resources
///
/// Implementations are cheap to clone so loads can run on spawned tasks.
pub trait PostGateway: Clone + Send + Sync + 'static {
    /// `GET /users`
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, GatewayError>> + Send;

    /// `GET /posts`
    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>, GatewayError>> + Send;

    /// `POST /posts`
    ///
    /// Returns the draft with the id the server assigned.
    fn create_post(
        &self,
        draft: &PostFields,
    ) -> impl Future<Output = Result<Post, GatewayError>> + Send;

    /// `PUT /posts/{id}` with the full post
    ///
    /// Returns the post as submitted; the reply only has to be JSON.
    fn update_post(
        &self,
        id: u64,
        fields: &PostFields,
    ) -> impl Future<Output = Result<Post, GatewayError>> + Send;

    /// `DELETE /posts/{id}`; the response body is discarded
    fn delete_post(&self, id: u64) -> impl Future<Output = Result<(), GatewayError>> + Send;
}
