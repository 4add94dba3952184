//! 수신 레코드와 발행 결과

use std::fmt;
use std::time::SystemTime;

use bytes::Bytes;

/// 구독에서 수신한 원시 레코드
///
/// 값은 디코딩되지 않은 바이트 그대로입니다.
#[derive(Debug, Clone)]
pub struct Record {
    /// 토픽명
    pub topic: String,
    /// 파티션 번호
    pub partition: i32,
    /// 파티션 내 오프셋
    pub offset: i64,
    /// 메시지 키 (있을 경우)
    pub key: Option<Bytes>,
    /// 페이로드
    pub value: Bytes,
    /// 수신 시각
    pub received_at: SystemTime,
}

impl Record {
    /// 로그 출력용으로 페이로드를 손실 허용 UTF-8 문자열로 변환합니다.
    pub fn value_lossy(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]@{} ({} bytes)",
            self.topic,
            self.partition,
            self.offset,
            self.value.len()
        )
    }
}

/// 발행 결과 -- 레코드가 기록된 위치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// 파티션 번호
    pub partition: i32,
    /// 오프셋
    pub offset: i64,
}
