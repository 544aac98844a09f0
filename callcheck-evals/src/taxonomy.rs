//! Error taxonomy and per-record verdicts.
//!
//! The taxonomy is a closed set. A failing record carries exactly one tag:
//! the first check that failed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a prediction failed schema adherence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    /// The model output could not be decoded.
    InvalidJson,
    /// The decoded output is not a mapping.
    NotObject,
    /// `name` or `arguments` is missing (or, without a schema, a gold argument is).
    MissingKey,
    /// The call has keys besides `name` and `arguments`.
    ExtraKey,
    /// `arguments` is not a mapping (or, without a schema, an argument's type differs from gold).
    WrongType,
    /// The call names a different tool.
    WrongToolName,
    /// A required argument is absent.
    MissingRequiredArg,
    /// An argument is not declared by the schema.
    UnknownArgument,
    /// An argument's type violates its declared type.
    WrongArgType,
}

impl ErrorTag {
    /// Every tag, in check order.
    pub const ALL: [ErrorTag; 9] = [
        Self::InvalidJson,
        Self::NotObject,
        Self::MissingKey,
        Self::ExtraKey,
        Self::WrongType,
        Self::WrongToolName,
        Self::MissingRequiredArg,
        Self::UnknownArgument,
        Self::WrongArgType,
    ];

    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::NotObject => "not_object",
            Self::MissingKey => "missing_key",
            Self::ExtraKey => "extra_key",
            Self::WrongType => "wrong_type",
            Self::WrongToolName => "wrong_tool_name",
            Self::MissingRequiredArg => "missing_required_arg",
            Self::UnknownArgument => "unknown_argument",
            Self::WrongArgType => "wrong_arg_type",
        }
    }
}

impl fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown error tag '{}'", s))
    }
}

/// Tag reported for a passing record.
pub const OK_TAG: &str = "ok";

/// Pass/fail outcome of schema adherence for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Every check passed.
    Pass,
    /// The first failing check.
    Fail(ErrorTag),
}

impl Verdict {
    /// Check if passed.
    pub fn passed(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The failure tag, if failed.
    pub fn error(&self) -> Option<ErrorTag> {
        match self {
            Self::Pass => None,
            Self::Fail(tag) => Some(*tag),
        }
    }

    /// `"ok"` when passed, otherwise the failure tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pass => OK_TAG,
            Self::Fail(tag) => tag.as_str(),
        }
    }
}

impl From<Result<(), ErrorTag>> for Verdict {
    fn from(result: Result<(), ErrorTag>) -> Self {
        match result {
            Ok(()) => Self::Pass,
            Err(tag) => Self::Fail(tag),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "✅ PASS"),
            Self::Fail(tag) => write!(f, "❌ FAIL: {}", tag),
        }
    }
}
