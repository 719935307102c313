// ctype.rs - Character classification for `%a`, `%d`, ... class items.
//
// Classification follows the C locale and only covers ASCII: every code unit
// >= 128 belongs to no class, whatever the unit width.

use bitflags::bitflags;

bitflags! {
    /// Character class membership of one ASCII code point.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CType: u8 {
        const ALPHA = 1 << 0;
        const DIGIT = 1 << 1;
        const LOWER = 1 << 2;
        const UPPER = 1 << 3;
        const PUNCT = 1 << 4;
        const CNTRL = 1 << 5;
        const SPACE = 1 << 6;
        const XDIGIT = 1 << 7;
        const ALNUM = Self::ALPHA.bits() | Self::DIGIT.bits();
    }
}

const fn classify(c: u8) -> u8 {
    let mut bits = 0;
    if c.is_ascii_lowercase() {
        bits |= CType::ALPHA.bits() | CType::LOWER.bits();
    }
    if c.is_ascii_uppercase() {
        bits |= CType::ALPHA.bits() | CType::UPPER.bits();
    }
    if c.is_ascii_digit() {
        bits |= CType::DIGIT.bits();
    }
    if c.is_ascii_hexdigit() {
        bits |= CType::XDIGIT.bits();
    }
    if c.is_ascii_punctuation() {
        bits |= CType::PUNCT.bits();
    }
    if c.is_ascii_control() {
        bits |= CType::CNTRL.bits();
    }
    // C isspace() also accepts '\v', which is_ascii_whitespace() does not.
    if c == b' ' || (c >= b'\t' && c <= b'\r') {
        bits |= CType::SPACE.bits();
    }
    bits
}

const fn build_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = classify(i as u8);
        i += 1;
    }
    table
}

static CTYPE_TABLE: [u8; 128] = build_table();

/// Class membership of a code point value.
#[inline]
pub fn ctype_of(c: u32) -> CType {
    match CTYPE_TABLE.get(c as usize) {
        Some(&bits) => CType::from_bits_retain(bits),
        None => CType::empty(),
    }
}

/// The class selected by a class letter (case-insensitive), if any.
pub fn class_for_letter(cl: u8) -> Option<CType> {
    let ctype = match cl.to_ascii_lowercase() {
        b'a' => CType::ALPHA,
        b'c' => CType::CNTRL,
        b'd' => CType::DIGIT,
        b'l' => CType::LOWER,
        b'p' => CType::PUNCT,
        b's' => CType::SPACE,
        b'u' => CType::UPPER,
        b'w' => CType::ALNUM,
        b'x' => CType::XDIGIT,
        _ => return None,
    };
    Some(ctype)
}

/// Does code point `c` satisfy the class item `%cl`?
///
/// An uppercase class letter selects the complement. A letter that names no
/// class (`%.`, `%%`, `%]`, ...) matches itself literally.
pub fn match_class(c: u32, cl: u32) -> bool {
    let class = u8::try_from(cl).ok().and_then(|b| class_for_letter(b).map(|k| (b, k)));
    match class {
        Some((letter, ctype)) => {
            let res = ctype_of(c).intersects(ctype);
            if letter.is_ascii_uppercase() {
                !res
            } else {
                res
            }
        }
        None => cl == c,
    }
}
