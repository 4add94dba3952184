#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use streamwatch_core::event::StatusEvent;
use streamwatch_processor::RuleEngine;
use streamwatch_processor::rule::{COMPLETION_RULE, FAILURE_RULE, URGENCY_RULE};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    message: String,
    author: String,
    status: String,
    timestamp: String,
}

fuzz_target!(|input: FuzzInput| {
    let event = StatusEvent {
        message: input.message,
        author: input.author,
        status: input.status,
        timestamp: input.timestamp,
    };

    let fired: Vec<String> = RuleEngine::with_default_rules()
        .evaluate(&event)
        .into_iter()
        .map(|alert| alert.rule_name)
        .collect();

    let status = event.status.to_lowercase();
    let message = event.message.to_lowercase();
    assert_eq!(
        fired.iter().any(|r| r == COMPLETION_RULE),
        status.contains("completed")
    );
    assert_eq!(
        fired.iter().any(|r| r == FAILURE_RULE),
        status.contains("failed")
    );
    assert_eq!(
        fired.iter().any(|r| r == URGENCY_RULE),
        message.contains("urgent")
    );
});
