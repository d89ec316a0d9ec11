use thiserror::Error;

use super::document::ElementId;

/// Failures the page controller signals instead of silently degrading.
///
/// Almost every missing element is a quiet no-op; only the two containers the
/// page cannot work without are reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("required element `{0}` is missing from the page")]
    MissingRequiredElement(&'static str),
    #[error("element #{0} does not exist in this document")]
    UnknownElement(ElementId),
}
