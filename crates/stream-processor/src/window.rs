//! 롤링 윈도우 -- 최근 유효 이벤트 메시지의 고정 크기 FIFO
//!
//! [`RollingWindow`]는 최근 N개 유효 이벤트의 `message`만 보관합니다.
//! 용량이 가득 찬 상태에서 추가하면 가장 오래된 항목이 정확히 하나 제거됩니다.
//! 용량은 생성 시 고정되며 프로세스 수명 동안 변하지 않습니다.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// 고정 용량 FIFO 윈도우
#[derive(Debug, Clone)]
pub struct RollingWindow {
    /// 내부 저장소 (앞쪽이 가장 오래된 항목)
    entries: VecDeque<String>,
    /// 최대 용량
    capacity: NonZeroUsize,
    /// 제거된 항목 수 (통계용)
    evicted_count: u64,
    /// 총 추가 횟수
    total_appended: u64,
}

impl RollingWindow {
    /// 주어진 용량의 빈 윈도우를 생성합니다.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.get().min(10_000)),
            capacity,
            evicted_count: 0,
            total_appended: 0,
        }
    }

    /// 메시지를 뒤에 추가합니다.
    ///
    /// 윈도우가 가득 차 있었다면 제거된 가장 오래된 메시지를 반환합니다.
    pub fn push(&mut self, message: String) -> Option<String> {
        self.total_appended += 1;

        let evicted = if self.entries.len() >= self.capacity.get() {
            self.evicted_count += 1;
            self.entries.pop_front()
        } else {
            None
        };

        self.entries.push_back(message);
        evicted
    }

    /// 현재 항목 수
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 가득 찼는지 확인합니다.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity.get()
    }

    /// 최대 용량
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// 오래된 순서의 반복자
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }

    /// 오래된 순서로 복사한 스냅샷
    pub fn snapshot(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    /// 지금까지 제거된 항목 수
    pub fn evicted_count(&self) -> u64 {
        self.evicted_count
    }

    /// 지금까지 추가된 항목 수
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }
}
