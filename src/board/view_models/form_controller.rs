//! # Form/Modal Controller
//!
//! One reusable form shown in one modal. The modal is either Hidden or
//! Visible; a visible form is in Edit mode when its hidden post-id field is
//! filled and in Create mode otherwise.

use crate::board::errors::{AppError, Mutation, ValidationError};
use crate::board::models::{AppState, Post, PostFields, PostKey};
use crate::board::services::PostGateway;
use anyhow::Result;
use std::fmt;
use std::str::FromStr;

/// Modal visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Hidden,
    Visible,
}

/// What a submit will do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

/// User-editable form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
    UserId,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Title => f.write_str("title"),
            FormField::Body => f.write_str("body"),
            FormField::UserId => f.write_str("userId"),
        }
    }
}

impl FromStr for FormField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "title" => Ok(FormField::Title),
            "body" => Ok(FormField::Body),
            "userid" | "user" => Ok(FormField::UserId),
            _ => Err(anyhow::anyhow!(
                "Unknown field '{s}'. Use title, body or userId"
            )),
        }
    }
}

/// Raw form values, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Hidden field: key of the post being edited, empty when creating
    pub post_id: String,
    pub title: String,
    pub body: String,
    pub user_id: String,
}

/// A validated form, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(PostFields),
    Edit { key: PostKey, fields: PostFields },
}

/// The create/edit form and the modal around it
#[derive(Debug, Clone)]
pub struct FormController {
    fields: FormFields,
    modal: ModalState,
}

impl FormController {
    pub fn new() -> Self {
        Self {
            fields: FormFields::default(),
            modal: ModalState::Hidden,
        }
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn is_visible(&self) -> bool {
        self.modal == ModalState::Visible
    }

    pub fn mode(&self) -> FormMode {
        if self.fields.post_id.is_empty() {
            FormMode::Create
        } else {
            FormMode::Edit
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    /// Show an empty form for a new post
    pub fn open_for_create(&mut self) {
        self.fields = FormFields::default();
        self.modal = ModalState::Visible;
        tracing::debug!("Form opened for create");
    }

    /// Show the form filled with the current values of the post at `key`
    ///
    /// Returns false, leaving the form untouched, when no such post exists.
    pub fn open_for_edit(&mut self, state: &AppState, key: PostKey) -> bool {
        let Some(post) = state.find_post(key) else {
            tracing::warn!("Cannot edit post {key}: not in state");
            return false;
        };

        self.fields = FormFields {
            post_id: key.to_string(),
            title: post.title.clone(),
            body: post.body.clone(),
            user_id: post.user_id.to_string(),
        };
        self.modal = ModalState::Visible;
        tracing::debug!("Form opened for edit of post {key}");
        true
    }

    /// Hide the modal; field values stay until the next open
    pub fn close(&mut self) {
        self.modal = ModalState::Hidden;
        tracing::debug!("Form closed");
    }

    /// Replace the value of one input
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.fields.title = value,
            FormField::Body => self.fields.body = value,
            FormField::UserId => self.fields.user_id = value,
        }
    }

    /// Check the inputs and turn them into a submission
    pub fn validate(&self) -> Result<Submission, ValidationError> {
        let FormFields {
            post_id,
            title,
            body,
            user_id,
        } = &self.fields;

        if title.is_empty() || body.is_empty() || user_id.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let user_id = user_id
            .trim()
            .parse::<u64>()
            .map_err(|_| ValidationError::InvalidUserId(user_id.clone()))?;
        let fields = PostFields::new(title.as_str(), body.as_str(), user_id);

        if post_id.is_empty() {
            return Ok(Submission::Create(fields));
        }
        // The hidden field is only ever filled by open_for_edit
        let key = post_id
            .parse::<PostKey>()
            .map_err(|_| ValidationError::MissingFields)?;
        Ok(Submission::Edit { key, fields })
    }

    /// Validate and send the form, then mirror the confirmed result in state
    ///
    /// On success the modal is closed and the affected post is returned; the
    /// caller re-renders. On any error the modal stays open and `state` is
    /// untouched. A validation failure never reaches the gateway.
    pub async fn submit<G: PostGateway>(
        &mut self,
        gateway: &G,
        state: &mut AppState,
    ) -> Result<Post, AppError> {
        let post = match self.validate()? {
            Submission::Create(draft) => {
                let created = gateway
                    .create_post(&draft)
                    .await
                    .map_err(|e| AppError::mutation(Mutation::Create, e))?;
                tracing::info!("Post {:?} created", created.id);
                state.add_post(created.clone());
                created
            }
            Submission::Edit { key, fields } => {
                let existing = state
                    .find_post(key)
                    .ok_or(ValidationError::PostNotFound(key))?;

                // A post that never reached the server is only updated locally
                if let Some(id) = existing.id {
                    gateway
                        .update_post(id, &fields)
                        .await
                        .map_err(|e| AppError::mutation(Mutation::Edit, e))?;
                    tracing::info!("Post {id} updated");
                }

                state.merge_post(key, &fields);
                state
                    .find_post(key)
                    .cloned()
                    .ok_or(ValidationError::PostNotFound(key))?
            }
        };

        self.close();
        Ok(post)
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}
