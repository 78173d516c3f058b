#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot parsing and the diff engine.
///
/// Any document that parses is diffed against itself and against an empty
/// snapshot, which exercises every change computer.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(snapshot) = snapdiff::Snapshot::from_json_str(s)
    {
        let engine = snapdiff::DiffEngine::new();
        let _ = engine.diff(&snapshot, &snapshot);
        let _ = engine.diff(&snapdiff::Snapshot::default(), &snapshot);
    }
});
