// matcher.rs - Backtracking matcher and match driver.
//
// `MatchState::do_match` walks the pattern and the subject together. Plain
// advances (single items, balanced and frontier items, back-references) loop
// in place; the matcher only recurses where it may have to backtrack:
// capture boundaries and quantifier expansion. Every frame takes one unit of
// the recursion budget for as long as it is alive.

use crate::api::{MatchResult, Pattern};
use crate::capture::{CaptureState, CaptureTable, DepthBudget};
use crate::class::{class_end, match_bracket_class, single_match, ESCAPE};
use crate::error::LexError;
use crate::unit::CodeUnit;

/// Per-search state: subject, pattern body, capture table and budget.
///
/// `'t` is the lifetime of the subject, which the produced results borrow.
pub struct MatchState<'t, 'b, S, P> {
    src: &'t [S],
    pat: &'b [P],
    captures: CaptureTable,
    budget: &'b DepthBudget,
}

impl<'t, 'b, S: CodeUnit, P: CodeUnit> MatchState<'t, 'b, S, P> {
    /// `pat` is the pattern body, without a leading `^` anchor.
    pub fn new(src: &'t [S], pat: &'b [P], max_captures: usize, budget: &'b DepthBudget) -> Self {
        MatchState {
            src,
            pat,
            captures: CaptureTable::new(max_captures),
            budget,
        }
    }

    pub fn subject(&self) -> &'t [S] {
        self.src
    }

    pub fn captures(&self) -> &CaptureTable {
        &self.captures
    }

    /// Forget the captures of a failed attempt.
    pub fn reset(&mut self) {
        debug_assert!(self.budget.is_full());
        self.captures.clear();
    }

    /// Try to match the whole pattern starting exactly at `s`.
    ///
    /// Returns the end of the match.
    pub fn try_at(&mut self, s: usize) -> Result<Option<usize>, LexError> {
        self.do_match(s, 0)
    }

    /// Turn a successful attempt over `start..end` into a result.
    ///
    /// Leaves the capture table empty.
    pub fn finish(&mut self, start: usize, end: usize) -> Result<MatchResult<'t, S>, LexError> {
        self.captures.check_finished()?;
        Ok(MatchResult::new(self.src, start, end, self.captures.take_slots()))
    }

    /// First offset at or after `from` holding the unit `literal`.
    pub fn next_candidate(&self, from: usize, literal: u32) -> Option<usize> {
        let from = from.min(self.src.len());
        S::find(&self.src[from..], literal).map(|i| from + i)
    }

    #[inline]
    fn pat_ascii(&self, p: usize) -> Option<u8> {
        self.pat.get(p).and_then(|u| u.as_ascii())
    }

    fn do_match(&mut self, mut s: usize, mut p: usize) -> Result<Option<usize>, LexError> {
        let budget = self.budget;
        let _guard = budget.enter()?;
        loop {
            if p == self.pat.len() {
                return Ok(Some(s));
            }
            match self.pat_ascii(p) {
                Some(b'(') => return self.start_capture(s, p + 1),
                Some(b')') => return self.end_capture(s, p + 1),
                Some(b'$') if p + 1 == self.pat.len() => {
                    return Ok((s == self.src.len()).then_some(s));
                }
                Some(ESCAPE) => match self.pat_ascii(p + 1) {
                    Some(b'b') => match self.match_balance(s, p + 2)? {
                        Some(e) => {
                            s = e;
                            p += 4;
                            continue;
                        }
                        None => return Ok(None),
                    },
                    Some(b'f') => {
                        p += 2;
                        if self.pat_ascii(p) != Some(b'[') {
                            return Err(LexError::FrontierNoOpenBracket);
                        }
                        let ep = class_end(self.pat, p)?;
                        let prev = if s == 0 { 0 } else { self.src[s - 1].to_u32() };
                        let cur = self.src.get(s).map_or(0, |u| u.to_u32());
                        if !match_bracket_class(prev, self.pat, p, ep - 1)
                            && match_bracket_class(cur, self.pat, p, ep - 1)
                        {
                            p = ep;
                            continue;
                        }
                        return Ok(None);
                    }
                    Some(d) if d.is_ascii_digit() => match self.match_capture(s, d)? {
                        Some(e) => {
                            s = e;
                            p += 2;
                            continue;
                        }
                        None => return Ok(None),
                    },
                    _ => {}
                },
                _ => {}
            }

            // Single item with an optional quantifier suffix.
            let ep = class_end(self.pat, p)?;
            let suffix = self.pat_ascii(ep);
            if !single_match(self.src, s, self.pat, p, ep) {
                if matches!(suffix, Some(b'*' | b'?' | b'-')) {
                    p = ep + 1;
                    continue;
                }
                return Ok(None);
            }
            match suffix {
                Some(b'?') => {
                    if let Some(e) = self.do_match(s + 1, ep + 1)? {
                        return Ok(Some(e));
                    }
                    p = ep + 1;
                }
                Some(b'+') => return self.max_expand(s + 1, p, ep),
                Some(b'*') => return self.max_expand(s, p, ep),
                Some(b'-') => return self.min_expand(s, p, ep),
                _ => {
                    s += 1;
                    p = ep;
                }
            }
        }
    }

    /// Greedy: count the longest run of the item, then back off one unit at a
    /// time until the rest of the pattern matches.
    fn max_expand(&mut self, s: usize, p: usize, ep: usize) -> Result<Option<usize>, LexError> {
        let mut i = 0;
        while single_match(self.src, s + i, self.pat, p, ep) {
            i += 1;
        }
        loop {
            if let Some(e) = self.do_match(s + i, ep + 1)? {
                return Ok(Some(e));
            }
            if i == 0 {
                return Ok(None);
            }
            i -= 1;
        }
    }

    /// Lazy: try the rest of the pattern first, consuming one more unit of
    /// the item only when that fails.
    fn min_expand(&mut self, mut s: usize, p: usize, ep: usize) -> Result<Option<usize>, LexError> {
        loop {
            if let Some(e) = self.do_match(s, ep + 1)? {
                return Ok(Some(e));
            }
            if !single_match(self.src, s, self.pat, p, ep) {
                return Ok(None);
            }
            s += 1;
        }
    }

    fn start_capture(&mut self, s: usize, mut p: usize) -> Result<Option<usize>, LexError> {
        let position_only = self.pat_ascii(p) == Some(b')');
        if position_only {
            p += 1;
        }
        self.captures.open(s, position_only)?;
        let res = self.do_match(s, p)?;
        if res.is_none() {
            self.captures.undo_open();
        }
        Ok(res)
    }

    fn end_capture(&mut self, s: usize, p: usize) -> Result<Option<usize>, LexError> {
        let i = self.captures.close(s)?;
        let res = self.do_match(s, p)?;
        if res.is_none() {
            self.captures.reopen(i);
        }
        Ok(res)
    }

    /// `%bxy` with `p` at `x`.
    fn match_balance(&self, s: usize, p: usize) -> Result<Option<usize>, LexError> {
        if p + 1 >= self.pat.len() {
            return Err(LexError::BalancedNoArguments);
        }
        let open = self.pat[p].to_u32();
        let close = self.pat[p + 1].to_u32();
        match self.src.get(s) {
            Some(u) if u.to_u32() == open => {}
            _ => return Ok(None),
        }
        let mut depth = 1usize;
        for (i, u) in self.src.iter().enumerate().skip(s + 1) {
            let c = u.to_u32();
            if c == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some(i + 1));
                }
            } else if c == open {
                depth += 1;
            }
        }
        Ok(None)
    }

    /// Back-reference `%d`.
    fn match_capture(&self, s: usize, digit: u8) -> Result<Option<usize>, LexError> {
        let cap = (digit as usize)
            .checked_sub(b'1' as usize)
            .and_then(|i| self.captures.get(i))
            .filter(|cap| cap.state != CaptureState::Unfinished)
            .ok_or(LexError::CaptureInvalidIndex)?;
        // A position capture holds no text and never matches.
        let CaptureState::Finished(len) = cap.state else {
            return Ok(None);
        };
        if self.src.len() - s >= len && self.src[cap.offset..cap.offset + len] == self.src[s..s + len] {
            return Ok(Some(s + len));
        }
        Ok(None)
    }
}

/// Find the first match of `pattern` in `subject`, scanning from `init`.
///
/// Anchored patterns are only tried at `init`.
pub(crate) fn search<'t, S: CodeUnit, P: CodeUnit>(
    pattern: &Pattern<'_, P>,
    subject: &'t [S],
    init: usize,
) -> Result<MatchResult<'t, S>, LexError> {
    let config = pattern.config();
    let budget = DepthBudget::new(config.max_depth);
    let mut ms = MatchState::new(subject, pattern.body(), config.max_captures, &budget);
    let anchored = pattern.is_anchored();
    let literal = if anchored { None } else { pattern.first_literal() };

    let mut s = init.min(subject.len());
    loop {
        if let Some(lit) = literal {
            match ms.next_candidate(s, lit) {
                Some(c) => s = c,
                None => break,
            }
        }
        if let Some(e) = ms.try_at(s)? {
            log::trace!("pattern matched at {}..{}", s, e);
            return ms.finish(s, e);
        }
        if anchored || s >= subject.len() {
            break;
        }
        ms.reset();
        s += 1;
    }
    Ok(MatchResult::no_match(subject))
}
