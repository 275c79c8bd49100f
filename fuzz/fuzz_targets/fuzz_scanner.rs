#![no_main]

use libfuzzer_sys::fuzz_target;

use solenoid_core::parser::scanner::{Scanner, TokenKind};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // The scanner must terminate and cover the whole input with
    // non-overlapping, ordered spans.
    let tokens = Scanner::tokenize_all(source);
    let last = tokens.last().expect("token stream ends with Eos");
    assert_eq!(last.kind, TokenKind::Eos);

    let mut previous_end = 0usize;
    for token in &tokens {
        assert!(token.span.start.offset >= previous_end, "overlapping spans");
        assert!(token.span.end.offset >= token.span.start.offset);
        assert!(token.span.end.offset <= source.len());
        previous_end = token.span.end.offset;
    }
});
