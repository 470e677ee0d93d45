#![no_main]

use libfuzzer_sys::fuzz_target;
use limbswitch_core::{RigSettings, Side};
use limbswitch_rig::memory::MemoryScene;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Settings documents either parse and validate or report an error.
    if let Ok(settings) = RigSettings::from_json(text) {
        let _ = settings.validate();
        let _ = settings.to_json_pretty();
    }

    // Scene documents round-trip through the serializer once parsed.
    if let Ok(scene) = MemoryScene::from_json(text) {
        if let Ok(json) = scene.to_json_pretty() {
            let _ = MemoryScene::from_json(&json);
        }
    }

    let _ = Side::parse(text);
});
