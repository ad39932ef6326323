//! Fuzz target for single-line VisDrone parsing.
//!
//! Exercises the row parser directly, bypassing the CSV reader, so that
//! arbitrary integer combinations reach the box arithmetic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voctile::io::io_visdrone::fuzz_parse_visdrone_line;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = fuzz_parse_visdrone_line(text);
    }
});
