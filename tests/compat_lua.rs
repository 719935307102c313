// compat_lua.rs - Compatibility cases modelled on the Lua string library tests.
//
// Uses the same shape as a C-style test harness:
//   x2(pattern, string, from, to)        -> search, expect match at from..to
//   x3(pattern, string, mem, text)       -> search, expect capture mem to be text
//   n(pattern, string)                   -> search, expect no match
//   e(pattern, string, err)              -> search, expect err
//   g(string, pattern, repl, count, out) -> gsub, expect out
//
// Offsets are 0-based and half-open.

use ferrolex::api::{CaptureValue, MatchResult, Pattern};
use ferrolex::error::LexError;

fn show(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn search<'t>(pattern: &[u8], input: &'t [u8]) -> MatchResult<'t, u8> {
    Pattern::from_units(pattern)
        .find(input)
        .unwrap_or_else(|e| panic!("search failed for {:?}: {}", show(pattern), e))
}

fn x2(pattern: &[u8], input: &[u8], from: usize, to: usize) {
    let m = search(pattern, input);
    assert_eq!(
        m.position(),
        Some(from..to),
        "x2: {:?} against {:?}",
        show(pattern),
        show(input)
    );
}

fn x3(pattern: &[u8], input: &[u8], mem: usize, text: &[u8]) {
    let m = search(pattern, input);
    assert!(m.is_match(), "x3: expected match for {:?} against {:?}", show(pattern), show(input));
    let cap = m
        .get(mem)
        .unwrap_or_else(|e| panic!("x3: capture {} of {:?}: {}", mem, show(pattern), e));
    assert_eq!(
        cap.as_units(),
        text,
        "x3: capture {} of {:?} against {:?}",
        mem,
        show(pattern),
        show(input)
    );
}

fn n(pattern: &[u8], input: &[u8]) {
    let m = search(pattern, input);
    assert!(
        !m.is_match(),
        "n: expected no match for {:?} against {:?}, got {:?}",
        show(pattern),
        show(input),
        m.position()
    );
}

fn e(pattern: &[u8], input: &[u8], err: LexError) {
    assert_eq!(
        Pattern::from_units(pattern).find(input).unwrap_err(),
        err,
        "e: {:?} against {:?}",
        show(pattern),
        show(input)
    );
}

fn g(input: &[u8], pattern: &[u8], repl: &[u8], count: isize, out: &[u8]) {
    let res = ferrolex::gsub_bytes(input, pattern, repl, count)
        .unwrap_or_else(|e| panic!("gsub failed for {:?}: {}", show(pattern), e));
    assert_eq!(
        show(&res),
        show(out),
        "g: {:?} / {:?} / {:?}",
        show(input),
        show(pattern),
        show(repl)
    );
}

// === Plain search ===

#[test]
fn empty_pattern() {
    x2(b"", b"", 0, 0);
    x2(b"", b"alo", 0, 0);
}

#[test]
fn embedded_nul() {
    x2(b"a", b"a\0o a\0o a\0o", 0, 1);
    x2(b"b", b"a\0a\0a\0a\0\0ab", 10, 11);
}

#[test]
fn literal_search() {
    x2(b"12", b"alo123alo", 3, 5);
    n(b"^12", b"alo123alo");
}

// === Quantifiers ===

#[test]
fn star() {
    x2(b".*b", b"aaab", 0, 4);
    x2(b".*a", b"aaa", 0, 3);
    x2(b".*b", b"b", 0, 1);
    x2(b"a*", b"aaab", 0, 3);
    x2(b"^.*$", b"aaa", 0, 3);
    x2(b"b*", b"aaa", 0, 0);
    x2(b"ab*a", b"aaa", 0, 2);
    x2(b"ab*a", b"aba", 0, 3);
    x2(b"b*", b"", 0, 0);
    n(b"bb*", b"aaa");
}

#[test]
fn plus() {
    x2(b".+b", b"aaab", 0, 4);
    x2(b".+a", b"aaa", 0, 3);
    n(b".+b", b"b");
    x2(b"a+", b"aaab", 0, 3);
    x2(b"^.+$", b"aaa", 0, 3);
    n(b"b+", b"aaa");
    n(b"ab+a", b"aaa");
    x2(b"ab+a", b"aba", 0, 3);
}

#[test]
fn optional() {
    x2(b".?b", b"aaab", 2, 4);
    x2(b".?a", b"aaa", 0, 2);
    x2(b".?b", b"b", 0, 1);
    x2(b"a?", b"", 0, 0);
    x2(b"^aa?a?a", b"aa", 0, 2);
}

#[test]
fn optional_multibyte() {
    // 'á' is two bytes; the '?' binds to the last one.
    x2("á?".as_bytes(), "á".as_bytes(), 0, 2);
    x2("á?b?l?".as_bytes(), "ábl".as_bytes(), 0, 4);
    x2("á?b?l?".as_bytes(), "  ábl".as_bytes(), 0, 0);
}

#[test]
fn lazy() {
    x2(b"a-", b"aaab", 0, 0);
    x2(b"^.-$", b"aaa", 0, 3);
    x2(b"b.*b", b"aabaaabaaabaaaba", 2, 15);
    x2(b"b.-b", b"aabaaabaaabaaaba", 2, 7);
}

// === Classes ===

#[test]
fn class_escapes() {
    x2(b"%l*", b"aloALO", 0, 3);
    x2(b"%a*", b"aLo_ALO", 0, 3);
    x2(b"%x*", b"0alo alo", 0, 2);
    x2(b"%C+", b"alo alo", 0, 7);
    x2(b"%S%S*", b" \n isto e assim", 3, 7);
    x2(b"%S*$", b" \n isto e assim", 10, 15);
}

#[test]
fn bracket_sets() {
    x2(b"[a-z]*$", b" \n isto e assim", 10, 15);
    x2(b"[^%sa-z]", b"um caracter ? extra", 12, 13);
    x2(b"[^]]", b"]]]xb", 3, 4);
    x2(b"[]]", b"ab]", 2, 3);
    x2(b"[%]]+", b"x]]", 1, 3);
    x2(b"[a-]+", b"x-a-", 1, 4);
}

// === Anchors ===

#[test]
fn dollar() {
    x2(b".$", b"a$a", 2, 3);
    x2(b".%$", b"a$a", 0, 2);
    x2(b".$.", b"a$a", 0, 3);
    n(b"$$", b"a$a");
    n(b"a$", b"a$b");
    x2(b"$", b"a$a", 3, 3);
    x2(b".o$", b"alo xo", 4, 6);
}

#[test]
fn caret_is_literal_inside() {
    x2(b"a^", b"xa^", 1, 3);
}

// === Captures ===

#[test]
fn captures_before_literal() {
    x3(b"(%w+)K", b"alo xyzK", 0, b"xyz");
    x3(b"(%d*)K", b"254 K", 0, b"");
    x3(b"(%w*)$", b"alo ", 0, b"");
    n(b"(%w+)$", b"alo ");
}

#[test]
fn nested_captures() {
    let pat = b"^(((.).).* (%w*))$";
    x3(pat, b"clo alo", 0, b"clo alo");
    x3(pat, b"clo alo", 1, b"cl");
    x3(pat, b"clo alo", 2, b"c");
    x3(pat, b"clo alo", 3, b"alo");
}

#[test]
fn position_capture_after_empty() {
    let m = search(b"(.+(.?)())", b"0123456789");
    assert_eq!(m.get(0).unwrap().as_units(), b"0123456789");
    assert_eq!(m.get(1).unwrap().as_units(), b"");
    assert_eq!(m.get(2).unwrap(), CaptureValue::Position(11));
}

#[test]
fn many_single_captures() {
    let pat = b"(h)(e)(l)(l)(o)";
    for (i, c) in b"hello".iter().enumerate() {
        x3(pat, b"hello world", i, std::slice::from_ref(c));
    }
}

#[test]
fn back_references() {
    x2(b"(..*) %1", b"alo alx 123 b\0o b\0o", 12, 19);
    x2(b"(.+)=(.*)=%2 %1", b"axz123= 4= 4 34", 5, 14);
    x2(b"^(=*)=%1$", b"=======", 0, 7);
    n(b"^([=]*)=%1$", b"==========");
    x2(b"([\"'])(.-)%1", b"say 'hi' now", 4, 8);
}

// === Balanced and frontier ===

#[test]
fn balanced() {
    x2(b"%b()", b"f(a(b)c)", 1, 8);
    x2(b"%b{}", b"{{{}}}", 0, 6);
    x2(b"%b''", b"alo 'oi' alo", 4, 8);
    n(b"%b()", b"((");
}

#[test]
fn frontier() {
    x2(b"%f[a]", b"a", 0, 0);
    x2(b"%f[^%l]", b"a", 1, 1);
    x2(b"%f[%a]%a+", b"  hello", 2, 7);
    x2(b"%f[%w]%w+%f[%W]", b"1 THE (quick) fox", 0, 1);
    x2(b"%f[%a]%a+%f[%A]", b"1 THE (quick) fox", 2, 5);
}

// === Malformed patterns ===

#[test]
fn malformed() {
    e(b"(.", b"alo", LexError::CaptureNotFinished);
    e(b".)", b"alo", LexError::CaptureInvalidPattern);
    e(b"[a", b"alo", LexError::PatternMissingClosingBracket);
    e(b"[]", b"alo", LexError::PatternMissingClosingBracket);
    e(b"[^]", b"alo", LexError::PatternMissingClosingBracket);
    e(b"[a%]", b"alo", LexError::PatternMissingClosingBracket);
    e(b"[a%", b"alo", LexError::PatternMissingClosingBracket);
    e(b"%b", b"alo", LexError::BalancedNoArguments);
    e(b"%ba", b"alo", LexError::BalancedNoArguments);
    e(b"%", b"alo", LexError::PatternEndsWithPercent);
    e(b"%f", b"alo", LexError::FrontierNoOpenBracket);
    e(b"%0", b"alo", LexError::CaptureInvalidIndex);
}

// === gsub ===

#[test]
fn gsub_basic() {
    g(b"ulo ulo", b"u", b"x", -1, b"xlo xlo");
    g(b"alo ulo  ", b" +$", b"", -1, b"alo ulo");
    g(b"  alo alo  ", b"^%s*(.-)%s*$", b"%1", -1, b"alo alo");
    g(b"alo  alo  \n 123\n ", b"%s+", b" ", -1, b"alo alo 123 ");
    g(b"abc d", b"(.)", b"%1@", -1, b"a@b@c@ @d@");
    g(b"abcd", b"(.)", b"%1@", 2, b"a@b@cd");
}

#[test]
fn gsub_template_references() {
    g(b"hello world", b"(%w+)", b"%1 %1", -1, b"hello hello world world");
    g(b"hello world", b"%w+", b"%0 %0", 1, b"hello hello world");
    g(b"hello world from Lua", b"(%w+)%s*(%w+)", b"%2 %1", -1, b"world hello Lua from");
    g(b"abc=xyz", b"(%w*)(%p)(%w+)", b"%3%2%1-%0", -1, b"xyz=abc-abc=xyz");
    g(b"abc", b"%w", b"%%%0", -1, b"%a%b%c");
}

#[test]
fn gsub_empty_matches() {
    g(b"abc", b"", b"-", -1, b"-a-b-c-");
    g(b"", b"^", b"r", -1, b"r");
    g(b"", b"$", b"r", -1, b"r");
    g(b"a b cd", b" *", b"-", -1, b"-a-b-c-d-");
}

#[test]
fn gsub_anchored() {
    g(b"hello hello", b"^hello", b"x", -1, b"x hello");
    g(b"hello hello", b"^world", b"x", -1, b"hello hello");
}

#[test]
fn gsub_balanced() {
    g(b"alo 'oi' alo", b"%b''", b"\"", -1, b"alo \" alo");
}

#[test]
fn gsub_frontier() {
    g(b"aaa aa a aaa a", b"%f[%w]%a", b"x", -1, b"xaa xa x xaa x");
    g(b"[[]] [][] [[[[", b"%f[[].", b"x", -1, b"x[]] x]x] x[[[");
    g(b"01abc45de3", b"%f[%d]", b".", -1, b".01abc.45de.3");
    g(b"01abc45 de3x", b"%f[%D]%w", b".", -1, b"01.bc45 de3.");
    g(b"function", b"%f[\x01-\xff]%w", b".", -1, b".unction");
    g(b"function", b"%f[^\x01-\xff]", b".", -1, b"function.");
}

#[test]
fn gsub_callback_upper() {
    let out = ferrolex::gsub(
        "um (dois) tres (quatro)",
        "(%(%w+%))",
        |m: &MatchResult<'_, u8>| m.get(0).unwrap().as_str().unwrap().to_uppercase(),
        -1,
    )
    .unwrap();
    assert_eq!(out, "um (DOIS) tres (QUATRO)");
}

#[test]
fn gsub_errors() {
    assert_eq!(
        ferrolex::gsub("alo", "(%a)", "%2", -1).unwrap_err(),
        LexError::CaptureInvalidIndex
    );
    assert_eq!(
        ferrolex::gsub("alo", ".", "%x", -1).unwrap_err(),
        LexError::PercentInvalidUseInReplacement
    );
    assert_eq!(
        ferrolex::gsub("alo", "%", "x", -1).unwrap_err(),
        LexError::PatternEndsWithPercent
    );
}
