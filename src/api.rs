// api.rs - Idiomatic Rust API for ferrolex.
//
// Pattern, PatternBuilder, MatchResult, CaptureValue, CapturesIter, GMatch,
// plus `&str` convenience functions.

use std::fmt;
use std::iter::FusedIterator;
use std::ops::Range;

use crate::capture::{Capture, CaptureSlots, CaptureState, DepthBudget};
use crate::config::MatchConfig;
use crate::error::LexError;
use crate::gsub::Replacer;
use crate::matcher::{search, MatchState};
use crate::unit::CodeUnit;

/// A pattern over code units of type `P`.
///
/// Building a pattern never fails: a malformed item is reported by the
/// operation that reaches it while matching.
///
/// # Examples
///
/// ```
/// use ferrolex::api::Pattern;
///
/// let pat = Pattern::new("%a+");
/// let m = pat.find(b"hello world").unwrap();
/// assert_eq!(m.as_str(), Some("hello"));
/// assert_eq!(m.position(), Some(0..5));
/// ```
#[derive(Clone, Copy)]
pub struct Pattern<'p, P = u8> {
    body: &'p [P],
    anchored: bool,
    config: MatchConfig,
    first_literal: Option<u32>,
}

impl<'p> Pattern<'p, u8> {
    /// A byte pattern with the default limits.
    pub fn new(pattern: &'p str) -> Self {
        Self::from_units(pattern.as_bytes())
    }

    /// Create a [`PatternBuilder`] for custom limits.
    pub fn builder(pattern: &'p str) -> PatternBuilder<'p, u8> {
        PatternBuilder::from_units(pattern.as_bytes())
    }
}

impl<'p, P: CodeUnit> Pattern<'p, P> {
    /// A pattern over arbitrary code units with the default limits.
    pub fn from_units(units: &'p [P]) -> Self {
        Self::with_config(units, MatchConfig::default())
    }

    /// A pattern with explicit limits.
    pub fn with_config(units: &'p [P], config: MatchConfig) -> Self {
        let anchored = units.first().and_then(|u| u.as_ascii()) == Some(b'^');
        let body = if anchored { &units[1..] } else { units };
        Pattern {
            body,
            anchored,
            config,
            first_literal: literal_prefix(body),
        }
    }

    /// The pattern without its leading `^` anchor.
    pub fn body(&self) -> &'p [P] {
        self.body
    }

    /// True if the pattern started with `^`.
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    pub(crate) fn first_literal(&self) -> Option<u32> {
        self.first_literal
    }

    /// Return the first match in `subject`.
    ///
    /// No match is not an error: the result is then empty.
    pub fn find<'t, S: CodeUnit>(&self, subject: &'t [S]) -> Result<MatchResult<'t, S>, LexError> {
        search(self, subject, 0)
    }

    /// Return the first match that starts at or after `init`.
    ///
    /// An anchored pattern is only tried at `init`. The previous unit seen
    /// by a frontier item at `init` is still the real subject unit.
    pub fn find_at<'t, S: CodeUnit>(
        &self,
        subject: &'t [S],
        init: usize,
    ) -> Result<MatchResult<'t, S>, LexError> {
        search(self, subject, init)
    }

    /// Check whether the pattern matches anywhere in `subject`.
    pub fn is_match<S: CodeUnit>(&self, subject: &[S]) -> Result<bool, LexError> {
        Ok(search(self, subject, 0)?.is_match())
    }

    /// Iterate over successive non-overlapping matches in `subject`.
    pub fn gmatch<'t, S: CodeUnit>(&self, subject: &'t [S]) -> GMatch<'p, 't, P, S> {
        GMatch {
            pattern: *self,
            subject,
            pos: 0,
            last_match: None,
            done: false,
        }
    }

    /// Replace up to `count` matches in `subject`; a negative `count`
    /// replaces every match.
    pub fn gsub<S: CodeUnit, R: Replacer<S>>(
        &self,
        subject: &[S],
        repl: R,
        count: isize,
    ) -> Result<Vec<S>, LexError> {
        crate::gsub::gsub(self, subject, repl, count)
    }
}

impl<P: CodeUnit> fmt::Debug for Pattern<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("len", &self.body.len())
            .field("anchored", &self.anchored)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A plain leading literal lets the driver skip start positions that cannot
/// match. Items that may match empty or that are not literals disable it.
fn literal_prefix<P: CodeUnit>(body: &[P]) -> Option<u32> {
    let first = *body.first()?;
    match first.as_ascii() {
        Some(b'(' | b')' | b'%' | b'[' | b'.') => return None,
        Some(b'$') if body.len() == 1 => return None,
        _ => {}
    }
    match body.get(1).and_then(|u| u.as_ascii()) {
        Some(b'*' | b'?' | b'-') => None,
        _ => Some(first.to_u32()),
    }
}

// === PatternBuilder ===

/// Builder for a [`Pattern`] with custom limits.
///
/// # Examples
///
/// ```
/// use ferrolex::api::Pattern;
/// use ferrolex::error::LexError;
///
/// let pat = Pattern::builder("(a)(b)").max_captures(1).build();
/// assert_eq!(pat.find(b"ab").unwrap_err(), LexError::CaptureTooMany);
/// ```
#[derive(Debug, Clone)]
pub struct PatternBuilder<'p, P = u8> {
    units: &'p [P],
    config: MatchConfig,
}

impl<'p, P: CodeUnit> PatternBuilder<'p, P> {
    pub fn from_units(units: &'p [P]) -> Self {
        PatternBuilder {
            units,
            config: MatchConfig::default(),
        }
    }

    /// Set the recursion budget of one match attempt.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the capacity of the capture table.
    pub fn max_captures(mut self, captures: usize) -> Self {
        self.config.max_captures = captures;
        self
    }

    pub fn build(self) -> Pattern<'p, P> {
        Pattern::with_config(self.units, self.config)
    }
}

// === MatchResult ===

/// The first match of a pattern together with its captures.
///
/// An empty result (no captures, no position) means nothing matched. When the
/// pattern opened no capture, the whole match is reported as capture 0.
#[derive(Clone)]
pub struct MatchResult<'t, S> {
    subject: &'t [S],
    span: Option<(usize, usize)>,
    captures: CaptureSlots,
    explicit: usize,
}

impl<'t, S: CodeUnit> MatchResult<'t, S> {
    pub(crate) fn new(subject: &'t [S], start: usize, end: usize, mut captures: CaptureSlots) -> Self {
        let explicit = captures.len();
        if explicit == 0 {
            captures.push(Capture::span(start, end));
        }
        MatchResult {
            subject,
            span: Some((start, end)),
            captures,
            explicit,
        }
    }

    pub(crate) fn no_match(subject: &'t [S]) -> Self {
        MatchResult {
            subject,
            span: None,
            captures: CaptureSlots::new(),
            explicit: 0,
        }
    }

    /// Number of captures; zero when nothing matched.
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// True if the pattern matched.
    pub fn is_match(&self) -> bool {
        self.span.is_some()
    }

    /// Number of captures opened by the pattern itself.
    pub fn explicit_len(&self) -> usize {
        self.explicit
    }

    /// Half-open range of the match in the subject.
    pub fn position(&self) -> Option<Range<usize>> {
        self.span.map(|(start, end)| start..end)
    }

    pub fn start(&self) -> Option<usize> {
        self.span.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<usize> {
        self.span.map(|(_, end)| end)
    }

    /// Length of the match; zero when nothing matched.
    pub fn length(&self) -> usize {
        self.span.map_or(0, |(start, end)| end - start)
    }

    /// The subject this result points into.
    pub fn subject(&self) -> &'t [S] {
        self.subject
    }

    /// The matched units; empty when nothing matched.
    pub fn as_units(&self) -> &'t [S] {
        match self.span {
            Some((start, end)) => &self.subject[start..end],
            None => &[],
        }
    }

    /// Capture `i` (0-based).
    ///
    /// # Errors
    ///
    /// [`LexError::CaptureOutOfRange`] if `i >= self.len()`.
    pub fn get(&self, i: usize) -> Result<CaptureValue<'t, S>, LexError> {
        self.capture(i).ok_or(LexError::CaptureOutOfRange)
    }

    pub(crate) fn capture(&self, i: usize) -> Option<CaptureValue<'t, S>> {
        let cap = self.captures.get(i)?;
        let value = match cap.state {
            CaptureState::Position => CaptureValue::Position(cap.offset + 1),
            CaptureState::Finished(len) => {
                CaptureValue::Text(&self.subject[cap.offset..cap.offset + len])
            }
            // A result is only built once every capture is closed.
            CaptureState::Unfinished => CaptureValue::Text(&[]),
        };
        Some(value)
    }

    /// Iterate over all captures.
    pub fn iter(&self) -> CapturesIter<'_, 't, S> {
        CapturesIter {
            result: self,
            index: 0,
        }
    }
}

impl<'t> MatchResult<'t, u8> {
    /// The matched text, or `None` if nothing matched or the match is not
    /// valid UTF-8.
    pub fn as_str(&self) -> Option<&'t str> {
        self.span?;
        std::str::from_utf8(self.as_units()).ok()
    }
}

impl<S: CodeUnit> fmt::Debug for MatchResult<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("position", &self.position())
            .field("captures", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

impl<'c, 't, S: CodeUnit> IntoIterator for &'c MatchResult<'t, S> {
    type Item = CaptureValue<'t, S>;
    type IntoIter = CapturesIter<'c, 't, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// === CaptureValue ===

/// A resolved capture: text, or a 1-based position for `()` captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureValue<'t, S> {
    Text(&'t [S]),
    Position(usize),
}

impl<'t, S: CodeUnit> CaptureValue<'t, S> {
    /// The captured units; empty for a position capture.
    pub fn as_units(&self) -> &'t [S] {
        match *self {
            CaptureValue::Text(units) => units,
            CaptureValue::Position(_) => &[],
        }
    }

    /// The 1-based position of a `()` capture.
    pub fn position(&self) -> Option<usize> {
        match *self {
            CaptureValue::Position(pos) => Some(pos),
            CaptureValue::Text(_) => None,
        }
    }

    pub fn is_position(&self) -> bool {
        matches!(self, CaptureValue::Position(_))
    }
}

impl<'t> CaptureValue<'t, u8> {
    /// The captured text; `None` if it is not valid UTF-8.
    pub fn as_str(&self) -> Option<&'t str> {
        std::str::from_utf8(self.as_units()).ok()
    }
}

// === CapturesIter ===

/// Iterator over the captures of a [`MatchResult`].
pub struct CapturesIter<'c, 't, S> {
    result: &'c MatchResult<'t, S>,
    index: usize,
}

impl<'c, 't, S: CodeUnit> Iterator for CapturesIter<'c, 't, S> {
    type Item = CaptureValue<'t, S>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.result.capture(self.index)?;
        self.index += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.result.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<S: CodeUnit> ExactSizeIterator for CapturesIter<'_, '_, S> {}

// === GMatch ===

/// Iterator over successive non-overlapping matches.
///
/// A match ending where the previous one ended is skipped, so an empty match
/// never directly follows another match. The iterator stops after the first
/// error.
pub struct GMatch<'p, 't, P, S> {
    pattern: Pattern<'p, P>,
    subject: &'t [S],
    pos: usize,
    last_match: Option<usize>,
    done: bool,
}

impl<'p, 't, P: CodeUnit, S: CodeUnit> Iterator for GMatch<'p, 't, P, S> {
    type Item = Result<MatchResult<'t, S>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let config = self.pattern.config();
        let budget = DepthBudget::new(config.max_depth);
        let mut ms = MatchState::new(self.subject, self.pattern.body(), config.max_captures, &budget);
        let anchored = self.pattern.is_anchored();
        let literal = if anchored { None } else { self.pattern.first_literal() };

        while self.pos <= self.subject.len() {
            if anchored && self.pos > 0 {
                break;
            }
            if let Some(lit) = literal {
                match ms.next_candidate(self.pos, lit) {
                    Some(c) if c == self.pos => {}
                    Some(c) => {
                        self.pos = c;
                        self.last_match = None;
                    }
                    None => break,
                }
            }
            let e = match ms.try_at(self.pos) {
                Ok(e) => e,
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            match e {
                Some(e) if Some(e) != self.last_match => {
                    let start = self.pos;
                    self.pos = e;
                    self.last_match = Some(e);
                    let res = ms.finish(start, e);
                    if res.is_err() {
                        self.done = true;
                    }
                    return Some(res);
                }
                _ => {
                    self.pos += 1;
                    self.last_match = e;
                }
            }
            ms.reset();
        }
        self.done = true;
        None
    }
}

impl<P: CodeUnit, S: CodeUnit> FusedIterator for GMatch<'_, '_, P, S> {}

// === &str convenience ===

/// Find the first match of `pattern` in `subject`.
///
/// ```
/// let m = ferrolex::find("THE (quick) fox", "%((%w+)%)").unwrap();
/// assert_eq!(m.get(0).unwrap().as_str(), Some("quick"));
/// ```
pub fn find<'t>(subject: &'t str, pattern: &str) -> Result<MatchResult<'t, u8>, LexError> {
    Pattern::new(pattern).find(subject.as_bytes())
}

/// Iterate over all matches of `pattern` in `subject`.
pub fn gmatch<'p, 't>(subject: &'t str, pattern: &'p str) -> GMatch<'p, 't, u8, u8> {
    Pattern::new(pattern).gmatch(subject.as_bytes())
}

/// Replace up to `count` matches (all if negative) of `pattern` in `subject`.
///
/// Replacement works on bytes; if the output is not valid UTF-8 (a byte-wise
/// item split a multi-byte character) it is converted lossily. Use
/// [`gsub_bytes`] to get the raw bytes.
///
/// ```
/// let out = ferrolex::gsub("hello world", "(%w+)", "<%1>", -1).unwrap();
/// assert_eq!(out, "<hello> <world>");
/// ```
pub fn gsub<R: Replacer<u8>>(
    subject: &str,
    pattern: &str,
    repl: R,
    count: isize,
) -> Result<String, LexError> {
    let out = gsub_bytes(subject.as_bytes(), pattern.as_bytes(), repl, count)?;
    Ok(String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
}

/// Byte-level [`gsub`].
pub fn gsub_bytes<R: Replacer<u8>>(
    subject: &[u8],
    pattern: &[u8],
    repl: R,
    count: isize,
) -> Result<Vec<u8>, LexError> {
    Pattern::from_units(pattern).gsub(subject, repl, count)
}
