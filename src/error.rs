// error.rs - Error type for pattern matching and substitution.
//
// Every failure the engine can raise is a distinct variant with a stable
// numeric code and a snake_case name. "No match" is never an error.

use std::fmt;

/// Error type for matching and substitution operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexError {
    /// Recursion budget of the matcher exhausted.
    PatternTooComplex,
    /// The pattern ends with a dangling `%`.
    PatternEndsWithPercent,
    /// A `[` set is never closed before the end of the pattern.
    PatternMissingClosingBracket,
    /// `%b` is not followed by its two operand units.
    BalancedNoArguments,
    /// `%f` is not followed by a `[` set.
    FrontierNoOpenBracket,
    /// More captures opened than the table can hold.
    CaptureTooMany,
    /// `)` without a matching open capture.
    CaptureInvalidPattern,
    /// Back-reference or template reference to a missing or unfinished capture.
    CaptureInvalidIndex,
    /// A match succeeded while a capture was still open.
    CaptureNotFinished,
    /// Requested capture index is beyond the result's capture count.
    CaptureOutOfRange,
    /// `%` in a replacement template not followed by `%` or a digit.
    PercentInvalidUseInReplacement,
}

const ALL: [LexError; 11] = [
    LexError::PatternTooComplex,
    LexError::PatternEndsWithPercent,
    LexError::PatternMissingClosingBracket,
    LexError::BalancedNoArguments,
    LexError::FrontierNoOpenBracket,
    LexError::CaptureTooMany,
    LexError::CaptureInvalidPattern,
    LexError::CaptureInvalidIndex,
    LexError::CaptureNotFinished,
    LexError::CaptureOutOfRange,
    LexError::PercentInvalidUseInReplacement,
];

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            LexError::PatternTooComplex => "pattern too complex",
            LexError::PatternEndsWithPercent => "malformed pattern (ends with '%')",
            LexError::PatternMissingClosingBracket => "malformed pattern (missing ']')",
            LexError::BalancedNoArguments => "malformed pattern (missing arguments to '%b')",
            LexError::FrontierNoOpenBracket => "missing '[' after '%f' in pattern",
            LexError::CaptureTooMany => "too many captures",
            LexError::CaptureInvalidPattern => "invalid pattern capture",
            LexError::CaptureInvalidIndex => "invalid capture index",
            LexError::CaptureNotFinished => "unfinished capture",
            LexError::CaptureOutOfRange => "capture index out of range",
            LexError::PercentInvalidUseInReplacement => {
                "invalid use of '%' in replacement string"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for LexError {}

impl LexError {
    /// Stable numeric code of the error kind.
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// The snake_case name of the error kind, e.g. `"pattern_too_complex"`.
    pub fn name(&self) -> &'static str {
        match self {
            LexError::PatternTooComplex => "pattern_too_complex",
            LexError::PatternEndsWithPercent => "pattern_ends_with_percent",
            LexError::PatternMissingClosingBracket => "pattern_missing_closing_bracket",
            LexError::BalancedNoArguments => "balanced_no_arguments",
            LexError::FrontierNoOpenBracket => "frontier_no_open_bracket",
            LexError::CaptureTooMany => "capture_too_many",
            LexError::CaptureInvalidPattern => "capture_invalid_pattern",
            LexError::CaptureInvalidIndex => "capture_invalid_index",
            LexError::CaptureNotFinished => "capture_not_finished",
            LexError::CaptureOutOfRange => "capture_out_of_range",
            LexError::PercentInvalidUseInReplacement => "percent_invalid_use_in_replacement",
        }
    }
}

impl TryFrom<i32> for LexError {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, i32> {
        usize::try_from(code)
            .ok()
            .and_then(|i| ALL.get(i).copied())
            .ok_or(code)
    }
}
