#![no_main]
use formatter::{format_source, Config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let config = Config::default();
        if let Ok(once) = format_source(s, &config) {
            let twice = format_source(&once, &config).expect("formatted output must reparse");
            assert_eq!(once, twice, "formatting must be a fixed point");
        }
    }
});
