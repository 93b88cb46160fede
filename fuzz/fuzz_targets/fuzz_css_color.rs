#![no_main]

use libfuzzer_sys::fuzz_target;
use stylecfg::config::parse_css_color;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(color) = parse_css_color(input) {
            // The normalized form must parse to the same color.
            let normalized = color.to_string();
            assert_eq!(parse_css_color(&normalized), Ok(color), "{input:?} -> {normalized}");
        }
    }
});
