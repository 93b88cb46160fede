#![no_main]

use libfuzzer_sys::fuzz_target;
use stylecfg::config::{ConfigFormat, ConfigLoader};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let loader = ConfigLoader::with_defaults();
    for format in [ConfigFormat::Yaml, ConfigFormat::Json] {
        // Only panics matter; anything that loads must also reload.
        if let Ok(result) = loader.load_from_str(text, format) {
            let yaml = result.config.to_yaml_string().expect("loaded config serializes");
            let reloaded = loader
                .load_from_str(&yaml, ConfigFormat::Yaml)
                .expect("serialized config reloads");
            // Opaque passthrough values may hold NaN, so compare typed sections only.
            assert_eq!(result.config.content, reloaded.config.content);
            assert_eq!(result.config.theme.extend.font_family, reloaded.config.theme.extend.font_family);
            assert_eq!(result.config.theme.extend.colors, reloaded.config.theme.extend.colors);
        }
    }
});
