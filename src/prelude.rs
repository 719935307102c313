// prelude.rs - Convenient re-exports for the idiomatic API.
//
//! # Prelude
//!
//! ```
//! use ferrolex::prelude::*;
//!
//! let m = Pattern::new("%d+").find(b"answer: 42").unwrap();
//! assert_eq!(m.as_str(), Some("42"));
//! ```

pub use crate::api::{CaptureValue, CapturesIter, GMatch, MatchResult, Pattern, PatternBuilder};
pub use crate::config::MatchConfig;
pub use crate::error::LexError;
pub use crate::gsub::{Replacer, Template};
pub use crate::unit::CodeUnit;
