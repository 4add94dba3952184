#![no_main]

use libfuzzer_sys::fuzz_target;
use streamwatch_core::event::{decode_bytes, validate};

fuzz_target!(|data: &[u8]| {
    let Ok(record) = decode_bytes(data) else {
        return;
    };
    let valid = validate(&record);
    match record.check() {
        Ok(event) => {
            assert!(valid, "check accepted a record that validate rejected");
            // 통과한 이벤트는 다시 인코딩해도 같은 이벤트로 디코딩되어야 함
            let payload = event.to_payload().expect("valid event encodes");
            let again = decode_bytes(&payload)
                .expect("re-encoded event decodes")
                .check()
                .expect("re-encoded event validates");
            assert_eq!(again, event);
        }
        Err(_) => assert!(!valid, "validate accepted a record that check rejected"),
    }
});
