//! 이벤트 스키마 -- 프로듀서와 컨슈머가 공유하는 와이어 레코드
//!
//! 토픽의 메시지 하나는 평탄한 JSON 객체 하나이며, 다음 네 필드를 가집니다.
//!
//! ```json
//! {"message": "...", "author": "Bri", "status": "active", "timestamp": "2024-01-01T00:00:00Z"}
//! ```
//!
//! - [`decode`]: 원시 바이트를 [`EventRecord`]로 디코딩 (필드 존재 여부는 검사하지 않음)
//! - [`validate`]: 네 필드가 모두 존재하고 비어 있지 않은지 확인
//! - [`EventRecord::check`]: 검증을 통과한 레코드를 [`StatusEvent`]로 변환
//!
//! 알 수 없는 추가 필드는 무시합니다 (전방 호환성).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DecodeError, ValidationError};

// --- 필드명 상수 ---

/// 메시지 본문 필드
pub const FIELD_MESSAGE: &str = "message";
/// 작성자 필드
pub const FIELD_AUTHOR: &str = "author";
/// 상태 필드
pub const FIELD_STATUS: &str = "status";
/// 타임스탬프 필드
pub const FIELD_TIMESTAMP: &str = "timestamp";

/// 검증 순서대로 나열한 필수 필드
pub const REQUIRED_FIELDS: [&str; 4] = [FIELD_MESSAGE, FIELD_AUTHOR, FIELD_STATUS, FIELD_TIMESTAMP];

/// 와이어 타임스탬프 형식 (ISO-8601 UTC, 초 단위)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// 디코딩된 레코드 -- 필드 존재 여부가 아직 검증되지 않은 상태
///
/// 문자열이 아닌 값(`null`, 숫자, 객체 등)은 디코딩 단계에서 `None`이 됩니다.
/// 타입 변환은 하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventRecord {
    pub message: Option<String>,
    pub author: Option<String>,
    pub status: Option<String>,
    pub timestamp: Option<String>,
}

impl EventRecord {
    /// 필드명으로 값을 조회합니다.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            FIELD_MESSAGE => self.message.as_deref(),
            FIELD_AUTHOR => self.author.as_deref(),
            FIELD_STATUS => self.status.as_deref(),
            FIELD_TIMESTAMP => self.timestamp.as_deref(),
            _ => None,
        }
    }

    /// 첫 번째로 누락된(또는 빈) 필수 필드명을 반환합니다.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        REQUIRED_FIELDS
            .into_iter()
            .find(|name| self.field(name).is_none_or(str::is_empty))
    }

    /// 필수 필드를 검증하고 [`StatusEvent`]로 변환합니다.
    pub fn check(self) -> Result<StatusEvent, ValidationError> {
        if let Some(field) = self.first_missing_field() {
            return Err(ValidationError::MissingField { field });
        }

        match (self.message, self.author, self.status, self.timestamp) {
            (Some(message), Some(author), Some(status), Some(timestamp)) => Ok(StatusEvent {
                message,
                author,
                status,
                timestamp,
            }),
            // first_missing_field가 None이면 네 필드 모두 Some
            _ => Err(ValidationError::MissingField {
                field: FIELD_MESSAGE,
            }),
        }
    }
}

/// 검증을 통과한 상태 업데이트 이벤트
///
/// 네 필드가 모두 비어 있지 않음이 보장됩니다.
/// 프로듀서는 이 타입을 직렬화하여 발행합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEvent {
    /// 메시지 본문
    pub message: String,
    /// 작성자
    pub author: String,
    /// 상태 레이블 (대소문자 무시, 보통 active/inactive/pending/completed/failed)
    pub status: String,
    /// ISO-8601 UTC 타임스탬프
    pub timestamp: String,
}

impl StatusEvent {
    /// 와이어 형식(JSON 바이트)으로 직렬화합니다.
    pub fn to_payload(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// 타임스탬프를 파싱합니다. 형식이 맞지 않으면 `None`.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl From<StatusEvent> for EventRecord {
    fn from(event: StatusEvent) -> Self {
        Self {
            message: Some(event.message),
            author: Some(event.author),
            status: Some(event.status),
            timestamp: Some(event.timestamp),
        }
    }
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.timestamp, self.author, self.status, self.message,
        )
    }
}

/// 시각을 와이어 타임스탬프 문자열로 포맷합니다.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// 원시 바이트를 UTF-8 텍스트로 변환합니다.
pub fn decode_utf8(raw: &[u8]) -> Result<&str, DecodeError> {
    std::str::from_utf8(raw).map_err(|e| DecodeError::Encoding {
        valid_up_to: e.valid_up_to(),
    })
}

/// 텍스트 페이로드를 [`EventRecord`]로 디코딩합니다.
///
/// JSON 파싱에 실패하거나 최상위 값이 객체가 아니면 [`DecodeError`]를 반환합니다.
/// 필드 누락은 여기서 검사하지 않습니다 ([`validate`] 참고).
pub fn decode(text: &str) -> Result<EventRecord, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(|e| DecodeError::Malformed {
        line: e.line(),
        column: e.column(),
        reason: e.to_string(),
    })?;

    let Value::Object(map) = value else {
        return Err(DecodeError::NotAnObject {
            found: json_type_name(&value),
        });
    };

    let take = |name: &str| map.get(name).and_then(Value::as_str).map(str::to_owned);

    Ok(EventRecord {
        message: take(FIELD_MESSAGE),
        author: take(FIELD_AUTHOR),
        status: take(FIELD_STATUS),
        timestamp: take(FIELD_TIMESTAMP),
    })
}

/// 원시 바이트를 UTF-8 변환 후 디코딩합니다.
pub fn decode_bytes(raw: &[u8]) -> Result<EventRecord, DecodeError> {
    decode(decode_utf8(raw)?)
}

/// 네 필수 필드가 모두 존재하고 비어 있지 않으면 `true`.
pub fn validate(record: &EventRecord) -> bool {
    record.first_missing_field().is_none()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
