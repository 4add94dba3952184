#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamwatch_processor::{ProcessorConfigBuilder, StreamProcessorBuilder};

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 1..=16 으로 보정
    window_size: u8,
    payloads: Vec<Vec<u8>>,
}

fuzz_target!(|input: FuzzInput| {
    let window_size = usize::from(input.window_size % 16) + 1;
    let Ok(config) = ProcessorConfigBuilder::new().window_size(window_size).build() else {
        return;
    };
    let Ok((mut processor, _alerts)) = StreamProcessorBuilder::new().config(config).build() else {
        return;
    };

    for (offset, payload) in input.payloads.iter().take(64).enumerate() {
        let before = processor.window().snapshot();
        let result = processor.process_payload(offset as i64, payload);
        let window = processor.window();

        assert!(window.len() <= window_size);
        if result.is_err() {
            assert_eq!(window.snapshot(), before, "rejected record changed the window");
        }
    }
});
