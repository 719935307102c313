// unit.rs - Code unit abstraction.
//
// The engine works on slices of code units and only ever looks at their
// unsigned numeric value, so bytes, UTF-16 units, UTF-32 units and `char`
// all run through the same matcher.

use std::fmt;

/// A single element of a subject, pattern or replacement string.
pub trait CodeUnit: Copy + Eq + fmt::Debug + 'static {
    /// Unsigned numeric value of the unit.
    fn to_u32(self) -> u32;

    /// Build a unit from an ASCII byte.
    fn from_ascii(b: u8) -> Self;

    /// The unit as an ASCII byte, or `None` for values >= 128.
    #[inline]
    fn as_ascii(self) -> Option<u8> {
        let c = self.to_u32();
        if c < 0x80 {
            Some(c as u8)
        } else {
            None
        }
    }

    /// Index of the first unit in `haystack` whose value is `needle`.
    #[inline]
    fn find(haystack: &[Self], needle: u32) -> Option<usize> {
        haystack.iter().position(|u| u.to_u32() == needle)
    }
}

impl CodeUnit for u8 {
    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b
    }

    #[inline]
    fn find(haystack: &[u8], needle: u32) -> Option<usize> {
        let needle = u8::try_from(needle).ok()?;
        memchr::memchr(needle, haystack)
    }
}

impl CodeUnit for u16 {
    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b as u16
    }
}

impl CodeUnit for u32 {
    #[inline]
    fn to_u32(self) -> u32 {
        self
    }

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b as u32
    }
}

impl CodeUnit for char {
    #[inline]
    fn to_u32(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_ascii(b: u8) -> Self {
        b as char
    }
}
