#![no_main]
use bulkseed::generators::invoice::InvoiceConfig;
use bulkseed::generators::payment::PaymentConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 16384 { return; }
    let Ok(s) = std::str::from_utf8(data) else { return };
    let _ = serde_json::from_str::<InvoiceConfig>(s);
    let _ = serde_json::from_str::<PaymentConfig>(s);
});
