//! # Errors
//!
//! Failures are split in two layers. `GatewayError` describes what went wrong
//! on the wire and names the operation; `AppError` is what the user is told:
//! a load failed, the form is incomplete, or a mutation was rejected.

use crate::board::models::PostKey;
use std::fmt;
use thiserror::Error;

/// Gateway operations, used to name what failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListUsers,
    ListPosts,
    CreatePost,
    UpdatePost,
    DeletePost,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListUsers => "list users",
            Operation::ListPosts => "list posts",
            Operation::CreatePost => "create post",
            Operation::UpdatePost => "update post",
            Operation::DeletePost => "delete post",
        };
        f.write_str(name)
    }
}

/// A single-attempt gateway call that did not succeed
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{operation} failed: request could not be sent")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} failed: server answered with status {status}")]
    Status { operation: Operation, status: u16 },

    #[error("{operation} failed: response body could not be decoded")]
    Decode {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
}

impl GatewayError {
    /// The operation that failed
    pub fn operation(&self) -> Operation {
        match self {
            GatewayError::Transport { operation, .. }
            | GatewayError::Status { operation, .. }
            | GatewayError::Decode { operation, .. } => *operation,
        }
    }
}

/// Collections loaded at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    Posts,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Users => f.write_str("users"),
            Resource::Posts => f.write_str("posts"),
        }
    }
}

/// User-triggered changes to the post list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Edit,
    Delete,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Create => f.write_str("creating"),
            Mutation::Edit => f.write_str("editing"),
            Mutation::Delete => f.write_str("deleting"),
        }
    }
}

/// Form input that cannot be submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("User ID must be a number.")]
    InvalidUserId(String),

    #[error("Post {0} no longer exists.")]
    PostNotFound(PostKey),
}

/// Everything the user can be notified about
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error loading {resource}")]
    Load {
        resource: Resource,
        #[source]
        source: GatewayError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error {mutation} post")]
    Mutation {
        mutation: Mutation,
        #[source]
        source: GatewayError,
    },
}

impl AppError {
    pub fn load(resource: Resource, source: GatewayError) -> Self {
        AppError::Load { resource, source }
    }

    pub fn mutation(mutation: Mutation, source: GatewayError) -> Self {
        AppError::Mutation { mutation, source }
    }

    /// Message followed by every underlying cause, for logs
    pub fn detailed(&self) -> String {
        error_chain(self)
    }
}

/// Format an error and its full source chain
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(&format!("\n  Caused by: {inner}"));
        cause = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(operation: Operation) -> GatewayError {
        GatewayError::Status {
            operation,
            status: 500,
        }
    }

    #[test]
    fn load_errors_should_name_the_resource() {
        let err = AppError::load(Resource::Users, server_error(Operation::ListUsers));
        assert_eq!(err.to_string(), "Error loading users");

        let err = AppError::load(Resource::Posts, server_error(Operation::ListPosts));
        assert_eq!(err.to_string(), "Error loading posts");
    }

    #[test]
    fn mutation_errors_should_read_like_alerts() {
        let cases = [
            (Mutation::Create, "Error creating post"),
            (Mutation::Edit, "Error editing post"),
            (Mutation::Delete, "Error deleting post"),
        ];
        for (mutation, expected) in cases {
            let err = AppError::mutation(mutation, server_error(Operation::CreatePost));
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn validation_error_should_be_transparent() {
        let err = AppError::from(ValidationError::MissingFields);
        assert_eq!(err.to_string(), "Please fill in all fields.");
    }

    #[test]
    fn detailed_should_include_cause_chain() {
        let err = AppError::mutation(Mutation::Delete, server_error(Operation::DeletePost));
        let detailed = err.detailed();

        assert!(detailed.starts_with("Error deleting post"));
        assert!(detailed.contains("delete post failed: server answered with status 500"));
    }

    #[test]
    fn gateway_error_should_expose_operation() {
        assert_eq!(
            server_error(Operation::UpdatePost).operation(),
            Operation::UpdatePost
        );
    }
}
