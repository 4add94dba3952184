//! 상태 이벤트 생성기
//!
//! [`EventGenerator`]는 무한하고 지연 평가되는 [`Iterator`]입니다.
//! 작성자와 상태는 후보 목록에서 균등하게 고르고, 메시지 번호는 1부터 증가합니다.
//! 생성된 모든 이벤트는 구성상 필수 필드 검증을 통과합니다.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use streamwatch_core::event::{StatusEvent, format_timestamp};

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;

/// 상태 이벤트 생성기
pub struct EventGenerator<R = StdRng> {
    authors: Vec<String>,
    statuses: Vec<String>,
    next_id: u64,
    rng: R,
}

impl EventGenerator<StdRng> {
    /// OS 엔트로피로 시드한 생성기를 만듭니다.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// 고정 시드 생성기 (재현 가능한 순서)
    pub fn with_seed(config: &GeneratorConfig, seed: u64) -> Result<Self, GeneratorError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> EventGenerator<R> {
    /// 주어진 난수 생성기로 생성기를 만듭니다.
    pub fn with_rng(config: &GeneratorConfig, rng: R) -> Result<Self, GeneratorError> {
        config.validate()?;
        Ok(Self {
            authors: config.authors.clone(),
            statuses: config.statuses.clone(),
            next_id: 1,
            rng,
        })
    }

    /// 다음 이벤트에 붙을 메시지 번호
    pub fn next_id(&self) -> u64 {
        self.next_id
    }
}

impl<R: Rng> Iterator for EventGenerator<R> {
    type Item = StatusEvent;

    fn next(&mut self) -> Option<StatusEvent> {
        let author = self.authors.choose(&mut self.rng)?.clone();
        let status = self.statuses.choose(&mut self.rng)?.clone();
        let id = self.next_id;
        self.next_id += 1;

        let event = StatusEvent {
            message: format!("Message {id}: The process for {author} is currently {status}."),
            author,
            status,
            timestamp: format_timestamp(Utc::now()),
        };
        tracing::debug!(id, event = %event, "generated event");
        Some(event)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use streamwatch_core::event::{EventRecord, validate};

    fn generator(seed: u64) -> EventGenerator {
        EventGenerator::with_seed(&GeneratorConfig::default(), seed).unwrap()
    }

    #[test]
    fn counter_starts_at_one_and_increments() {
        let mut g = generator(1);
        assert_eq!(g.next_id(), 1);
        let first = g.next().unwrap();
        let second = g.next().unwrap();
        assert!(first.message.starts_with("Message 1: "));
        assert!(second.message.starts_with("Message 2: "));
        assert_eq!(g.next_id(), 3);
    }

    #[test]
    fn message_mentions_author_and_status() {
        let event = generator(2).next().unwrap();
        assert_eq!(
            event.message,
            format!(
                "Message 1: The process for {} is currently {}.",
                event.author, event.status
            )
        );
    }

    #[test]
    fn fields_come_from_candidate_sets() {
        let config = GeneratorConfig::default();
        for event in generator(3).take(100) {
            assert!(config.authors.contains(&event.author));
            assert!(config.statuses.contains(&event.status));
        }
    }

    #[test]
    fn every_candidate_is_eventually_chosen() {
        let events: Vec<_> = generator(4).take(400).collect();
        let authors: HashSet<_> = events.iter().map(|e| e.author.as_str()).collect();
        let statuses: HashSet<_> = events.iter().map(|e| e.status.as_str()).collect();
        assert_eq!(authors.len(), 4);
        assert_eq!(statuses.len(), 4);
    }

    #[test]
    fn timestamp_has_wire_format() {
        let event = generator(5).next().unwrap();
        assert_eq!(event.timestamp.len(), "2024-01-01T00:00:00Z".len());
        assert!(event.timestamp.ends_with('Z'));
        assert!(event.parsed_timestamp().is_some());
    }

    #[test]
    fn same_seed_same_choices() {
        let a: Vec<_> = generator(7).take(20).map(|e| (e.author, e.status)).collect();
        let b: Vec<_> = generator(7).take(20).map(|e| (e.author, e.status)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_config_rejected() {
        let config = GeneratorConfig {
            authors: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert!(EventGenerator::with_seed(&config, 0).is_err());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn generated_events_always_validate(seed in any::<u64>(), count in 1usize..50) {
                for event in generator(seed).take(count) {
                    prop_assert!(validate(&EventRecord::from(event)));
                }
            }

            #[test]
            fn custom_candidates_are_respected(
                authors in proptest::collection::vec("[A-Za-z]{1,8}", 1..5),
                statuses in proptest::collection::vec("[a-z]{1,8}", 1..5),
                seed in any::<u64>(),
            ) {
                let config = GeneratorConfig {
                    authors: authors.clone(),
                    statuses: statuses.clone(),
                    ..GeneratorConfig::default()
                };
                let mut g = EventGenerator::with_seed(&config, seed).unwrap();
                let event = g.next().unwrap();
                prop_assert!(authors.contains(&event.author));
                prop_assert!(statuses.contains(&event.status));
            }
        }
    }
}
