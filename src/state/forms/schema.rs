//! Validation schema for new transactions
//!
//! Turns a raw [`TransactionInput`] (four strings, exactly as typed) into a
//! typed [`TransactionDraft`]. Validation is all-or-nothing: either every
//! field passes and a draft is produced, or every failing field is reported.

use crate::state::{TransactionDraft, TransactionType};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fields of the new transaction form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransactionField {
    Description,
    Price,
    Category,
    Type,
}

impl TransactionField {
    pub const ALL: [TransactionField; 4] = [
        TransactionField::Description,
        TransactionField::Price,
        TransactionField::Category,
        TransactionField::Type,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TransactionField::Description => "description",
            TransactionField::Price => "price",
            TransactionField::Category => "category",
            TransactionField::Type => "type",
        }
    }
}

impl fmt::Display for TransactionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a single field was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    Required,
    NotANumber(String),
    InvalidType(String),
}

/// A rejected field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {kind}")]
pub struct ValidationError {
    pub field: TransactionField,
    pub kind: ValidationErrorKind,
}

impl ValidationErrorKind {
    /// Message shown under the field
    pub fn message(&self) -> String {
        match self {
            ValidationErrorKind::Required => "required".to_string(),
            ValidationErrorKind::NotANumber(raw) => format!("\"{raw}\" is not a number"),
            ValidationErrorKind::InvalidType(raw) if raw.is_empty() => {
                "choose income or outcome".to_string()
            }
            ValidationErrorKind::InvalidType(raw) => {
                format!("\"{raw}\" must be income or outcome")
            }
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl ValidationError {
    fn new(field: TransactionField, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Every field rejected by one validation pass (never empty)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transaction: {}", summarize(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    /// Error for one field, if that field was rejected
    pub fn for_field(&self, field: TransactionField) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = TransactionField> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Raw form values before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub description: String,
    pub price: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
}

fn required_text(field: TransactionField, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::new(field, ValidationErrorKind::Required))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Coerce the price text to a finite number
pub fn coerce_price(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            TransactionField::Price,
            ValidationErrorKind::Required,
        ));
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            ValidationError::new(
                TransactionField::Price,
                ValidationErrorKind::NotANumber(trimmed.to_string()),
            )
        })
}

fn parse_type(raw: &str) -> Result<TransactionType, ValidationError> {
    raw.parse::<TransactionType>().map_err(|err| {
        ValidationError::new(TransactionField::Type, ValidationErrorKind::InvalidType(err.0))
    })
}

/// Validate and coerce a raw input into a draft
pub fn validate(input: &TransactionInput) -> Result<TransactionDraft, ValidationErrors> {
    let description = required_text(TransactionField::Description, &input.description);
    let price = coerce_price(&input.price);
    let category = required_text(TransactionField::Category, &input.category);
    let kind = parse_type(&input.kind);

    match (description, price, category, kind) {
        (Ok(description), Ok(price), Ok(category), Ok(kind)) => Ok(TransactionDraft {
            description,
            price,
            category,
            kind,
        }),
        (description, price, category, kind) => {
            let errors = [
                description.err(),
                price.err(),
                category.err(),
                kind.err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            Err(ValidationErrors(errors))
        }
    }
}
