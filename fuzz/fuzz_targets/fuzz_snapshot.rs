#![no_main]

use libfuzzer_sys::fuzz_target;
use thermogo::Snapshot;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Anything that loads must also survive a save and reload
    if let Ok(snapshot) = Snapshot::from_json(text) {
        let json = snapshot.to_json().unwrap();
        let again = Snapshot::from_json(&json).unwrap();
        assert_eq!(again.session.units(), snapshot.session.units());
    }
});
