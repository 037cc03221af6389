//! # HTTP Gateway
//!
//! reqwest implementation of `PostGateway`.

use super::gateway::PostGateway;
use crate::board::errors::{error_chain, GatewayError, Operation};
use crate::board::models::{Post, PostFields, User};
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Content type sent with every request body
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

const USERS: &str = "users";
const POSTS: &str = "posts";

/// Echo of a create call; only the assigned id is trusted
#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: u64,
}

/// Body of a full-replace update
#[derive(Debug, Serialize)]
struct PostReplacement<'a> {
    id: u64,
    #[serde(flatten)]
    fields: &'a PostFields,
}

/// Gateway talking to a JSONPlaceholder-compatible API over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base: Url,
}

impl HttpGateway {
    /// Create a gateway for the API rooted at `base_url`
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry resource paths: {base_url}");
        }

        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        tracing::info!("HTTP gateway created for {base}");

        Ok(Self { client, base })
    }

    /// URL of `segments` below the API root
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // Checked in new(): the base always has path segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn post_endpoint(&self, id: u64) -> Url {
        self.endpoint(&[POSTS, &id.to_string()])
    }

    /// Send a request and require a success status
    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|source| GatewayError::Transport { operation, source })?;

        let status = response.status();
        tracing::debug!("{operation}: HTTP {}", status.as_u16());
        if !status.is_success() {
            return Err(GatewayError::Status {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// Send a request and decode its JSON body
    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = self.send(operation, request).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| GatewayError::Decode { operation, source })
    }

    /// Attach a JSON body with the API's expected content type
    fn with_json_body<B: Serialize + ?Sized>(
        request: RequestBuilder,
        body: &B,
    ) -> RequestBuilder {
        // json() keeps an existing Content-Type, so ours wins
        request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).json(body)
    }

    fn log_failure<T>(result: Result<T, GatewayError>) -> Result<T, GatewayError> {
        if let Err(e) = &result {
            tracing::error!("HTTP request failed: {}", error_chain(e));
        }
        result
    }
}

impl PostGateway for HttpGateway {
    async fn list_users(&self) -> Result<Vec<User>, GatewayError> {
        let url = self.endpoint(&[USERS]);
        tracing::debug!("GET {url}");
        Self::log_failure(self.send_json(Operation::ListUsers, self.client.get(url)).await)
    }

    async fn list_posts(&self) -> Result<Vec<Post>, GatewayError> {
        let url = self.endpoint(&[POSTS]);
        tracing::debug!("GET {url}");
        Self::log_failure(self.send_json(Operation::ListPosts, self.client.get(url)).await)
    }

    async fn create_post(&self, draft: &PostFields) -> Result<Post, GatewayError> {
        let url = self.endpoint(&[POSTS]);
        tracing::debug!("POST {url}");
        let request = Self::with_json_body(self.client.post(url), draft);
        let created: CreatedPost =
            Self::log_failure(self.send_json(Operation::CreatePost, request).await)?;

        Ok(Post::confirmed(created.id, draft.clone()))
    }

    async fn update_post(&self, id: u64, fields: &PostFields) -> Result<Post, GatewayError> {
        let url = self.post_endpoint(id);
        tracing::debug!("PUT {url}");
        let body = PostReplacement { id, fields };
        let request = Self::with_json_body(self.client.put(url), &body);
        // Any JSON reply confirms the update; the submitted fields stand
        let _echo: serde_json::Value =
            Self::log_failure(self.send_json(Operation::UpdatePost, request).await)?;

        Ok(Post::confirmed(id, fields.clone()))
    }

    async fn delete_post(&self, id: u64) -> Result<(), GatewayError> {
        let url = self.post_endpoint(id);
        tracing::debug!("DELETE {url}");
        Self::log_failure(
            self.send(Operation::DeletePost, self.client.delete(url))
                .await
                .map(drop),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_should_reject_invalid_base() {
        assert!(HttpGateway::new("not a url").is_err());
        assert!(HttpGateway::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn endpoint_should_append_segments_to_root() {
        let gateway = HttpGateway::new("https://jsonplaceholder.typicode.com").unwrap();

        assert_eq!(
            gateway.endpoint(&[USERS]).as_str(),
            "https://jsonplaceholder.typicode.com/users"
        );
        assert_eq!(
            gateway.post_endpoint(7).as_str(),
            "https://jsonplaceholder.typicode.com/posts/7"
        );
    }

    #[test]
    fn endpoint_should_keep_base_path_prefix() {
        let gateway = HttpGateway::new("http://localhost:3000/api/").unwrap();

        assert_eq!(
            gateway.endpoint(&[POSTS]).as_str(),
            "http://localhost:3000/api/posts"
        );
    }

    #[test]
    fn replacement_body_should_carry_id_and_fields() {
        let fields = PostFields::new("t", "b", 2);
        let body = PostReplacement { id: 5, fields: &fields };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"id": 5, "title": "t", "body": "b", "userId": 2})
        );
    }
}
