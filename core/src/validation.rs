//! Todo text validation.
//!
//! A todo text is accepted when it is non-empty, at most [`MAX_TODO_CHARS`]
//! Unicode scalar values long, and every scalar value is printable: a letter,
//! mark, number, punctuation or symbol, or the ASCII space. Nothing is
//! trimmed, normalised or escaped here; escaping is the renderer's job.

use crate::error::ValidationError;
use icu_properties::CodePointMapData;
use icu_properties::props::GeneralCategory;

/// Maximum todo length, counted in Unicode scalar values.
pub const MAX_TODO_CHARS: usize = 200;

/// Validates a candidate todo text.
///
/// # Errors
///
/// - [`ValidationError::Empty`] for the empty string
/// - [`ValidationError::TooLong`] above [`MAX_TODO_CHARS`] scalar values
/// - [`ValidationError::NonPrintable`] for the first non-printable scalar value
///
/// # Examples
///
/// ```
/// use todo_gen_core::{validate_todo_text, ValidationError};
///
/// assert!(validate_todo_text("Water the plants").is_ok());
/// assert_eq!(validate_todo_text(""), Err(ValidationError::Empty));
/// assert!(validate_todo_text("tab\there").is_err());
/// ```
pub fn validate_todo_text(text: &str) -> Result<(), ValidationError> {
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }

    let chars = text.chars().count();
    if chars > MAX_TODO_CHARS {
        return Err(ValidationError::TooLong { chars });
    }

    match text.chars().find(|&ch| !is_printable(ch)) {
        Some(ch) => Err(ValidationError::NonPrintable { ch }),
        None => Ok(()),
    }
}

/// Returns `true` for letters, marks, numbers, punctuation, symbols and the
/// ASCII space.
///
/// Other separators (including non-ASCII spaces), control, format, private-use
/// and unassigned code points are not printable.
#[must_use]
pub fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }

    matches!(
        CodePointMapData::<GeneralCategory>::new().get(ch),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::NonspacingMark
            | GeneralCategory::SpacingMark
            | GeneralCategory::EnclosingMark
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
            | GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
            | GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
    )
}
