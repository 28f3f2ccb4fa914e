#![no_main]

use libfuzzer_sys::fuzz_target;

use linediff_types::ConfigFile;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    if let Ok(cfg) = toml::from_str::<ConfigFile>(&s) {
        let _ = ConfigFile::built_in().defaults.merged_with(cfg.defaults);
    }
});
