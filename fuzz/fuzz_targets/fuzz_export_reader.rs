#![no_main]

use libfuzzer_sys::fuzz_target;
use rebecca::analysis::{analyze, AnalysisConfig};
use rebecca::reader::{from_reader, ReaderConfig};
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either parse or fail with an error, never panic
    for delimiter in [b'\t', b','] {
        if let Ok(table) = from_reader(Cursor::new(data), delimiter, &ReaderConfig::default()) {
            // Anything the reader accepts must be analyzable without panicking
            let _ = analyze(table, &AnalysisConfig::default());
        }
    }
});
