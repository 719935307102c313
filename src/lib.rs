//! # Ferrolex
//!
//! Pure-Rust Lua-style pattern matching and substitution.
//!
//! The pattern language is the compact one known from Lua's string library:
//! character classes (`%a`, `%d`, `[a-z]`, ...), the quantifiers `*`, `+`,
//! `-` and `?`, the anchors `^` and `$`, balanced matches (`%b()`), frontier
//! matches (`%f[%w]`), captures (`(...)`, and `()` for positions) and
//! back-references (`%1`..`%9`). There is no alternation and no grouping
//! without capturing.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrolex::prelude::*;
//!
//! let m = Pattern::new("(%a+)=(%d+)").find(b"x: width=80").unwrap();
//! assert_eq!(m.position(), Some(3..11));
//! assert_eq!(m.get(0).unwrap().as_str(), Some("width"));
//! assert_eq!(m.get(1).unwrap().as_str(), Some("80"));
//!
//! let out = ferrolex::gsub("hello world", "o", "0", -1).unwrap();
//! assert_eq!(out, "hell0 w0rld");
//! ```
//!
//! ## Code units
//!
//! Subjects, patterns and templates are slices of any [`unit::CodeUnit`]:
//! `u8`, `u16`, `u32` or `char`. Units are compared by unsigned value and
//! character classes only know ASCII.
//!
//! ```rust
//! use ferrolex::prelude::*;
//!
//! let subject: Vec<u16> = "größe: 42".encode_utf16().collect();
//! let pattern: Vec<u16> = "%d+".encode_utf16().collect();
//! let m = Pattern::from_units(&pattern).find(&subject).unwrap();
//! assert_eq!(m.position(), Some(7..9));
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`api`] | `Pattern`, `MatchResult`, `GMatch`, `&str` helpers |
//! | [`gsub`] | Substitution engine and `Replacer` |
//! | [`matcher`] | Backtracking matcher and match driver |
//! | [`capture`] | Capture table and recursion budget |
//! | [`class`] | Pattern item scanner and single-unit matcher |
//! | [`ctype`] | Character classes |
//! | [`unit`] | Code unit abstraction |
//! | [`config`] | Limits |
//! | [`error`] | Error type |

pub mod api;
pub mod capture;
pub mod class;
pub mod config;
pub mod ctype;
pub mod error;
pub mod gsub;
pub mod matcher;
pub mod prelude;
pub mod unit;

pub use api::{find, gmatch, gsub, gsub_bytes};
