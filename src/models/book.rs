//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

pub const TITLE_REQUIRED: &str = "\"Title\" is required";
pub const AUTHOR_REQUIRED: &str = "\"Author\" is required";
pub const YEAR_NOT_A_NUMBER: &str = "\"Year\" must be a number";

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form submission for creating or updating a book.
///
/// Every value arrives as text. A key that was not sent is `None`; a key sent empty is
/// `Some("")`, which clears `genre` or `year` and fails validation for `title` or `author`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BookForm {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

/// Field values that passed validation and can be persisted
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct BookFields {
    #[validate(length(min = 1, message = "\"Title\" is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "\"Author\" is required"))]
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// Unsaved book built from submitted input, used to redisplay a form
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<String>,
}

/// One rejected field and the message shown next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Rejected create/update: the draft to redisplay plus one message per invalid field
#[derive(Debug, Clone, Error)]
#[error("book validation failed on {} field(s)", .errors.len())]
pub struct ValidationFailure {
    pub draft: BookDraft,
    pub errors: Vec<FieldError>,
}

impl ValidationFailure {
    /// Names of the rejected fields, in form order
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}

fn clean(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

fn clean_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl BookForm {
    /// Fill every key the submission left out from the stored book, so an update only
    /// touches the fields that were sent
    pub fn merged_over(&self, book: &Book) -> BookForm {
        BookForm {
            title: self.title.clone().or_else(|| Some(book.title.clone())),
            author: self.author.clone().or_else(|| Some(book.author.clone())),
            genre: self.genre.clone().or_else(|| book.genre.clone()),
            year: self
                .year
                .clone()
                .or_else(|| book.year.map(|y| y.to_string())),
        }
    }

    /// Build the draft shown back to the user for this submission
    pub fn to_draft(&self, id: Option<i32>) -> BookDraft {
        BookDraft {
            id,
            title: clean(&self.title),
            author: clean(&self.author),
            genre: clean_optional(&self.genre),
            year: clean_optional(&self.year),
        }
    }

    /// Normalize and validate the submission.
    ///
    /// `id` is carried into the draft on failure so an edit form keeps its target.
    pub fn validate_for(&self, id: Option<i32>) -> Result<BookFields, ValidationFailure> {
        let draft = self.to_draft(id);
        let mut errors = Vec::new();

        let year = match draft.year.as_deref().map(str::parse::<i32>) {
            None => None,
            Some(Ok(year)) => Some(year),
            Some(Err(_)) => {
                errors.push(FieldError {
                    field: "year".to_string(),
                    message: YEAR_NOT_A_NUMBER.to_string(),
                });
                None
            }
        };

        let fields = BookFields {
            title: draft.title.clone(),
            author: draft.author.clone(),
            genre: draft.genre.clone(),
            year,
        };

        if let Err(e) = fields.validate() {
            // Required fields come before the year message
            let mut required = collect_field_errors(&e);
            required.append(&mut errors);
            errors = required;
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(ValidationFailure { draft, errors })
        }
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    ["title", "author"]
        .into_iter()
        .filter_map(|field| {
            let first = by_field.get(field)?.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            Some(FieldError {
                field: field.to_string(),
                message,
            })
        })
        .collect()
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            id: Some(book.id),
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year.map(|y| y.to_string()),
        }
    }
}

impl Book {
    /// Literal, case-sensitive substring match over title, author, genre and year
    pub fn matches(&self, query: &str) -> bool {
        self.title.contains(query)
            || self.author.contains(query)
            || self.genre.as_deref().is_some_and(|g| g.contains(query))
            || self.year.is_some_and(|y| y.to_string().contains(query))
    }
}
