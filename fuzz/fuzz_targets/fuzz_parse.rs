#![no_main]

use libfuzzer_sys::fuzz_target;

use solenoid_core::diagnostics::ErrorReporter;
use solenoid_core::parser::scanner::Scanner;
use solenoid_core::parser::{Dialect, Parser};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    // Use the first byte to choose the dialect so both grammars are covered.
    let dialect = if data.first().is_some_and(|b| b & 1 == 0) {
        Dialect::typed()
    } else {
        Dialect::loose()
    };

    let mut scanner = Scanner::new(source);
    let mut reporter = ErrorReporter::new();
    let block = Parser::new(&mut scanner, &dialect, &mut reporter).parse(false);

    // A fatal parse must leave a diagnostic behind; a successful parse may
    // still carry recoverable ones.
    if block.is_none() {
        assert!(reporter.has_errors(), "fatal parse recorded no diagnostic");
    }
});
