use crate::domain::FieldKind;

use super::sortable::ItemKey;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("no rendered field with id '{0}'")]
    UnknownField(String),

    #[error("field '{id}' is a {actual} field, not a {expected} field")]
    KindMismatch {
        id: String,
        expected: FieldKind,
        actual: FieldKind,
    },

    #[error("field '{id}' has no item {key}")]
    UnknownItem { id: String, key: ItemKey },

    #[error("field '{id}' has no option at index {index}")]
    UnknownOption { id: String, index: usize },

    #[error("form data must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
