//! Fuzz target: parsing `{id}` path segments.
//!
//! Lenient parsing never fails, and agrees with strict parsing whenever
//! strict parsing succeeds.

#![no_main]

use libfuzzer_sys::fuzz_target;
use userdir_core::{PathIdMode, UserId};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let lenient = UserId::parse_lenient(raw);
    if let Ok(strict) = PathIdMode::Strict.parse(raw) {
        assert_eq!(strict, lenient);
    }
});
