#![no_main]

use libfuzzer_sys::fuzz_target;
use apiprobe::config::types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        let applied = apiprobe::fuzzing::apply_config_from_toml(input);
        if applied.is_ok() {
            if let Some(config) = parsed {
                if let Some(base_url) = config.base_url.as_deref() {
                    debug_assert!(apiprobe::fuzzing::parse_base_url_input(base_url).is_ok());
                }
                for value in [config.page, config.page_size, config.lookup_page_size]
                    .into_iter()
                    .flatten()
                {
                    debug_assert!(value >= 1);
                }
            }
        }
    }
});
