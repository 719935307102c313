// gsub.rs - Substitution engine.
//
// Walks the subject like `GMatch`, copies the text between matches verbatim
// and lets a `Replacer` append the replacement of every match.

use crate::api::{CaptureValue, MatchResult, Pattern};
use crate::capture::DepthBudget;
use crate::class::ESCAPE;
use crate::error::LexError;
use crate::matcher::MatchState;
use crate::unit::CodeUnit;

/// Produces the replacement text of one match.
///
/// Implemented for templates (`&str`, `&[S]`, [`Template`]) and for closures
/// `FnMut(&MatchResult<S>) -> T` whose return value is appended verbatim.
///
/// # Examples
///
/// ```
/// use ferrolex::api::MatchResult;
///
/// let out = ferrolex::gsub("a1b22", "%d+", |m: &MatchResult<'_, u8>| {
///     format!("[{}]", m.length())
/// }, -1).unwrap();
/// assert_eq!(out, "a[1]b[2]");
/// ```
pub trait Replacer<S: CodeUnit> {
    /// Append the replacement for `caps` to `dst`.
    fn replace_append(&mut self, caps: &MatchResult<'_, S>, dst: &mut Vec<S>) -> Result<(), LexError>;
}

/// A replacement template: `%0` is the whole match, `%1`..`%9` the
/// captures and `%%` a literal `%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template<'r, S>(pub &'r [S]);

impl<S: CodeUnit> Replacer<S> for Template<'_, S> {
    fn replace_append(&mut self, caps: &MatchResult<'_, S>, dst: &mut Vec<S>) -> Result<(), LexError> {
        expand_template(self.0, caps, dst)
    }
}

impl Replacer<u8> for &str {
    fn replace_append(&mut self, caps: &MatchResult<'_, u8>, dst: &mut Vec<u8>) -> Result<(), LexError> {
        expand_template(self.as_bytes(), caps, dst)
    }
}

impl Replacer<u8> for &String {
    fn replace_append(&mut self, caps: &MatchResult<'_, u8>, dst: &mut Vec<u8>) -> Result<(), LexError> {
        expand_template(self.as_bytes(), caps, dst)
    }
}

impl<S: CodeUnit> Replacer<S> for &[S] {
    fn replace_append(&mut self, caps: &MatchResult<'_, S>, dst: &mut Vec<S>) -> Result<(), LexError> {
        expand_template(self, caps, dst)
    }
}

impl<S, F, T> Replacer<S> for F
where
    S: CodeUnit,
    F: FnMut(&MatchResult<'_, S>) -> T,
    T: AsRef<[S]>,
{
    fn replace_append(&mut self, caps: &MatchResult<'_, S>, dst: &mut Vec<S>) -> Result<(), LexError> {
        dst.extend_from_slice((*self)(caps).as_ref());
        Ok(())
    }
}

/// Expand `template` for one match.
///
/// `%1`..`%9` only address captures opened by the pattern; a pattern without
/// captures has nothing for them to refer to.
pub fn expand_template<S: CodeUnit>(
    template: &[S],
    caps: &MatchResult<'_, S>,
    dst: &mut Vec<S>,
) -> Result<(), LexError> {
    let mut rest = template;
    while let Some(i) = S::find(rest, ESCAPE as u32) {
        dst.extend_from_slice(&rest[..i]);
        let next = rest
            .get(i + 1)
            .copied()
            .ok_or(LexError::PercentInvalidUseInReplacement)?;
        match next.as_ascii() {
            Some(ESCAPE) => dst.push(next),
            Some(b'0') => dst.extend_from_slice(caps.as_units()),
            Some(d @ b'1'..=b'9') => {
                let index = (d - b'1') as usize;
                if index >= caps.explicit_len() {
                    return Err(LexError::CaptureInvalidIndex);
                }
                match caps.capture(index) {
                    Some(CaptureValue::Text(units)) => dst.extend_from_slice(units),
                    Some(CaptureValue::Position(pos)) => push_decimal(dst, pos),
                    None => return Err(LexError::CaptureInvalidIndex),
                }
            }
            _ => return Err(LexError::PercentInvalidUseInReplacement),
        }
        rest = &rest[i + 2..];
    }
    dst.extend_from_slice(rest);
    Ok(())
}

fn push_decimal<S: CodeUnit>(dst: &mut Vec<S>, n: usize) {
    dst.extend(n.to_string().bytes().map(S::from_ascii));
}

pub(crate) fn gsub<S: CodeUnit, P: CodeUnit, R: Replacer<S>>(
    pattern: &Pattern<'_, P>,
    subject: &[S],
    mut repl: R,
    count: isize,
) -> Result<Vec<S>, LexError> {
    // None: unlimited.
    let mut remaining = usize::try_from(count).ok();
    let config = pattern.config();
    let budget = DepthBudget::new(config.max_depth);
    let mut ms = MatchState::new(subject, pattern.body(), config.max_captures, &budget);
    let anchored = pattern.is_anchored();
    let literal = if anchored { None } else { pattern.first_literal() };

    let mut out = Vec::with_capacity(subject.len());
    let mut last_match: Option<usize> = None;
    let mut replaced = 0usize;
    let mut s = 0;
    while s <= subject.len() && remaining != Some(0) {
        if let Some(lit) = literal {
            match ms.next_candidate(s, lit) {
                Some(c) => s = c,
                None => break,
            }
        }
        match ms.try_at(s)? {
            Some(e) if Some(e) != last_match => {
                remaining = remaining.map(|n| n - 1);
                replaced += 1;
                out.extend_from_slice(&subject[last_match.unwrap_or(0)..s]);
                let caps = ms.finish(s, e)?;
                repl.replace_append(&caps, &mut out)?;
                last_match = Some(e);
                s = e;
            }
            _ => s += 1,
        }
        ms.reset();
        if anchored {
            break;
        }
    }
    out.extend_from_slice(&subject[last_match.unwrap_or(0)..]);
    log::trace!("gsub replaced {} match(es)", replaced);
    Ok(out)
}
