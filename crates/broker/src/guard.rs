//! 구독 수명 관리
//!
//! [`SubscriptionGuard`]는 구독을 소유하고, 명시적 [`close`](SubscriptionGuard::close)
//! 또는 drop 중 먼저 일어나는 쪽에서 정확히 한 번 해제합니다.
//! 에러 경로를 포함한 모든 종료 경로에서 해제가 보장됩니다.

use std::ops::{Deref, DerefMut};

use crate::client::Subscription;
use crate::error::BrokerError;

/// 구독을 정확히 한 번 해제하는 스코프 가드
pub struct SubscriptionGuard<S: Subscription> {
    inner: S,
    released: bool,
}

impl<S: Subscription> SubscriptionGuard<S> {
    /// 구독을 감쌉니다.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            released: false,
        }
    }

    /// 이미 해제되었는지 여부
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// 구독을 해제합니다. 두 번째 호출부터는 아무 일도 하지 않습니다.
    pub fn close(&mut self) -> Result<(), BrokerError> {
        if self.released {
            return Ok(());
        }
        self.released = true;
        self.inner.close()
    }
}

impl<S: Subscription> Deref for SubscriptionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.inner
    }
}

impl<S: Subscription> DerefMut for SubscriptionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.inner
    }
}

impl<S: Subscription> Drop for SubscriptionGuard<S> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.close() {
                tracing::warn!(error = %e, "failed to release subscription on drop");
            }
        }
    }
}
