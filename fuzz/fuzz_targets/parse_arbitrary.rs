// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for parser crash safety testing.
//!
//! This target feeds arbitrary byte sequences to the parser and asserts
//! that it never panics. Invalid input must surface as a `ParseError`, never
//! as a crash, and a successful parse must round-trip losslessly.
//!
//! Invalid UTF-8 bytes are converted via lossy conversion (U+FFFD
//! replacement) so the lexer still gets exercised with unusual character
//! sequences.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rgraft_core::Script;

fuzz_target!(|data: &[u8]| {
    // Convert to UTF-8 using lossy conversion so invalid bytes become U+FFFD
    // replacement characters rather than being skipped entirely.
    let source = String::from_utf8_lossy(data);

    // Success = no panic. Errors are fine; a parse that succeeds must be
    // lossless.
    if let Ok(script) = Script::parse(&source) {
        assert_eq!(script.text(), source);
    }
});
