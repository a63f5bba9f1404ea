//! Errors returned to callers of the notation engine.

use crate::dice::Error as DiceError;

/// Failure to turn a piece of notation into a roll
///
/// Both variants carry the notation exactly as the caller supplied it, before whitespace removal and lowercasing, so
/// the message can be shown straight back to whoever typed it.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotationError {
	/// The notation doesn't match the grammar at some position.
	///
	/// # Examples
	/// ```
	/// use dicebag::{parse::parse, NotationError};
	///
	/// let err = parse("2d6 x").unwrap_err();
	/// assert!(matches!(err, NotationError::Syntax { offset: 3, .. }));
	/// assert_eq!(err.to_string(), "invalid dice notation: 2d6 x");
	/// ```
	#[error("invalid dice notation: {input}")]
	Syntax {
		/// Notation as originally supplied
		input: String,

		/// Byte offset into the normalized notation where parsing failed
		offset: usize,

		/// Parser diagnostics describing what was expected
		details: String,
	},

	/// The notation is well-formed, but one of its groups exceeds a limit.
	#[error("{reason}: {input}")]
	Validation {
		/// Notation as originally supplied
		input: String,

		/// Limit that was exceeded
		#[source]
		reason: DiceError,
	},
}

impl NotationError {
	/// Gets the notation as originally supplied.
	#[must_use]
	pub fn input(&self) -> &str {
		match self {
			Self::Syntax { input, .. } | Self::Validation { input, .. } => input,
		}
	}
}
