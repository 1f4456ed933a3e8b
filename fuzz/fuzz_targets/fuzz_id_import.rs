#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16384 { return; }
    if let Ok(ids) = bulkseed::import::read_ids(data, "invoice_id") {
        for id in &ids {
            assert!(!id.is_empty());
            assert_eq!(id.trim(), id);
        }
    }
});
