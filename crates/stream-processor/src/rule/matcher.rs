//! 조건 매칭 -- 이벤트 필드에 대한 대소문자 무시 부분 문자열 검사

use streamwatch_core::event::{FIELD_AUTHOR, FIELD_MESSAGE, FIELD_STATUS, StatusEvent};

/// 규칙이 검사하는 이벤트 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    /// `message`
    Message,
    /// `author`
    Author,
    /// `status`
    Status,
}

impl EventField {
    /// 와이어 필드명
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message => FIELD_MESSAGE,
            Self::Author => FIELD_AUTHOR,
            Self::Status => FIELD_STATUS,
        }
    }

    /// 이벤트에서 필드 값을 꺼냅니다.
    pub fn value<'a>(&self, event: &'a StatusEvent) -> &'a str {
        match self {
            Self::Message => &event.message,
            Self::Author => &event.author,
            Self::Status => &event.status,
        }
    }
}

/// `needle`은 이미 소문자라고 가정합니다.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    if haystack.is_ascii() {
        return haystack
            .as_bytes()
            .windows(needle.len())
            .any(|w| w.eq_ignore_ascii_case(needle.as_bytes()));
    }
    haystack.to_lowercase().contains(needle)
}
