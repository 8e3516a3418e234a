#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetcade_spec::DetectionOptions;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(options) = serde_json::from_str::<DetectionOptions>(s) {
            let _ = options.validate();
            let _ = options.grid_hint();
        }
    }
});
