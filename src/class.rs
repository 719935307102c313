// class.rs - Pattern scanner and single-item matcher.
//
// Pattern positions are indices into the pattern slice. An item runs from
// its first unit up to the index returned by `class_end`; a quantifier
// suffix, if any, sits at that index.

use crate::ctype::match_class;
use crate::error::LexError;
use crate::unit::CodeUnit;

pub(crate) const ESCAPE: u8 = b'%';

#[inline]
fn ascii_at<P: CodeUnit>(pat: &[P], i: usize) -> Option<u8> {
    pat.get(i).and_then(|u| u.as_ascii())
}

/// Returns the index just past the pattern item starting at `p`.
///
/// `p` must be inside the pattern.
///
/// # Errors
///
/// [`LexError::PatternEndsWithPercent`] for a `%` that is the last unit and
/// [`LexError::PatternMissingClosingBracket`] for a `[` set that runs off the
/// end of the pattern.
pub fn class_end<P: CodeUnit>(pat: &[P], p: usize) -> Result<usize, LexError> {
    let end = pat.len();
    let first = ascii_at(pat, p);
    let mut p = p + 1;
    match first {
        Some(ESCAPE) => {
            if p >= end {
                return Err(LexError::PatternEndsWithPercent);
            }
            Ok(p + 1)
        }
        Some(b'[') => {
            if ascii_at(pat, p) == Some(b'^') {
                p += 1;
            }
            // The first unit of the set is always taken literally, so "[]]"
            // is a set holding ']'.
            loop {
                if p >= end {
                    return Err(LexError::PatternMissingClosingBracket);
                }
                let c = ascii_at(pat, p);
                p += 1;
                if c == Some(ESCAPE) && p < end {
                    p += 1;
                }
                if ascii_at(pat, p) == Some(b']') {
                    return Ok(p + 1);
                }
            }
        }
        _ => Ok(p),
    }
}

/// Does code point `c` belong to the bracket set `pat[p..=ec]`?
///
/// `p` is the index of the opening `[` and `ec` the index of the closing `]`.
pub fn match_bracket_class<P: CodeUnit>(c: u32, pat: &[P], p: usize, ec: usize) -> bool {
    let mut p = p;
    let mut sig = true;
    if ascii_at(pat, p + 1) == Some(b'^') {
        sig = false;
        p += 1;
    }
    loop {
        p += 1;
        if p >= ec {
            break;
        }
        let unit = pat[p].to_u32();
        if unit == ESCAPE as u32 {
            p += 1;
            if let Some(cl) = pat.get(p) {
                if match_class(c, cl.to_u32()) {
                    return sig;
                }
            }
        } else if ascii_at(pat, p + 1) == Some(b'-') && p + 2 < ec {
            p += 2;
            let lo = unit;
            let hi = pat[p].to_u32();
            if lo <= c && c <= hi {
                return sig;
            }
        } else if unit == c {
            return sig;
        }
    }
    !sig
}

/// Does the subject unit at `s` match the pattern item `pat[p..ep]`?
///
/// Always false once the subject is exhausted.
pub fn single_match<S: CodeUnit, P: CodeUnit>(
    subject: &[S],
    s: usize,
    pat: &[P],
    p: usize,
    ep: usize,
) -> bool {
    let Some(unit) = subject.get(s) else {
        return false;
    };
    let c = unit.to_u32();
    match ascii_at(pat, p) {
        Some(b'.') => true,
        Some(ESCAPE) => pat.get(p + 1).is_some_and(|cl| match_class(c, cl.to_u32())),
        Some(b'[') => match_bracket_class(c, pat, p, ep - 1),
        _ => pat[p].to_u32() == c,
    }
}
