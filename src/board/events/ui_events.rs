//! # UI Events
//!
//! Everything a user can do on the page, and the line-oriented command
//! syntax the terminal uses to express it.

use crate::board::models::PostKey;
use crate::board::view_models::FormField;
use anyhow::Result;
use std::str::FromStr;

/// Help text for the command syntax
pub const COMMAND_USAGE: &str = "\
Commands:
  create                      open the form for a new post
  edit <id>                   open the form for an existing post
  delete <id>                 delete a post (asks for confirmation)
  set <title|body|userId> <v> type into a form field
  submit                      submit the form
  close                       close the form
  refresh                     render the page again
  quit                        exit";

/// User interactions with the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "Create Post" button
    CreatePostClicked,
    /// Modal close control
    CloseClicked,
    /// Per-post "Edit" button
    EditClicked(PostKey),
    /// Per-post "Delete" button
    DeleteClicked(PostKey),
    /// Typing into a form input
    FieldChanged { field: FormField, value: String },
    /// Form submit
    FormSubmitted,
    /// Re-render without changing anything
    Refresh,
    Quit,
}

impl FromStr for UiEvent {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "create" | "new" => Ok(UiEvent::CreatePostClicked),
            "close" | "cancel" => Ok(UiEvent::CloseClicked),
            "edit" => Ok(UiEvent::EditClicked(parse_key(command, rest)?)),
            "delete" | "rm" => Ok(UiEvent::DeleteClicked(parse_key(command, rest)?)),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    anyhow::bail!("Usage: set <title|body|userId> <value>");
                }
                Ok(UiEvent::FieldChanged {
                    field: field.parse()?,
                    value: value.trim().to_string(),
                })
            }
            "submit" | "save" => Ok(UiEvent::FormSubmitted),
            "refresh" | "show" => Ok(UiEvent::Refresh),
            "quit" | "exit" | "q" => Ok(UiEvent::Quit),
            "" => Err(anyhow::anyhow!("Empty command")),
            other => Err(anyhow::anyhow!("Unknown command '{other}'")),
        }
    }
}

fn parse_key(command: &str, rest: &str) -> Result<PostKey> {
    if rest.is_empty() {
        anyhow::bail!("Usage: {command} <id>");
    }
    rest.parse()
}
