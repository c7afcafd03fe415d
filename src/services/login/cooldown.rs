//! # 재전송 쿨다운 저장소
//!
//! 같은 이메일로 자격 증명을 다시 보내기까지의 고정 대기 시간을 관리합니다.
//! 키는 소문자로 정규화한 이메일이며, 창(window)이 시작되면 끝날 때까지 연장되지 않습니다.
//!
//! | 구현 | 사용 조건 | 특징 |
//! |------|-----------|------|
//! | [`RedisCooldownStore`] | `REDIS_URL` 설정 시 | 인스턴스 간 공유, `SET NX EX` 로 원자적 |
//! | [`MemoryCooldownStore`] | 그 외 | 프로세스 로컬 |

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use async_trait::async_trait;
use crate::caching::redis::RedisClient;
use crate::errors::{AppError, AppResult};

/// 쿨다운 시작 시도 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// 새 창이 시작됨
    Started,
    /// 이미 진행 중, 남은 초
    Active { remaining: u64 },
}

#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// 진행 중인 창이 없으면 새로 시작합니다.
    async fn try_start(&self, email: &str, window: Duration) -> AppResult<CooldownStatus>;

    /// 진행 중인 창의 남은 초. 없으면 `None`.
    async fn remaining(&self, email: &str) -> AppResult<Option<u64>>;

    /// 진행 중인 창을 해제합니다 (발송 실패 시).
    async fn clear(&self, email: &str) -> AppResult<()>;

    /// 헬스체크에 표시할 백엔드 이름
    fn backend(&self) -> &'static str;

    async fn is_healthy(&self) -> bool {
        true
    }
}

/// 쿨다운 키 (`resend:cooldown:{email}`)
pub fn cooldown_key(email: &str) -> String {
    format!("resend:cooldown:{}", email.trim().to_lowercase())
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 { secs + 1 } else { secs }
}

/// 프로세스 메모리 쿨다운 저장소
#[derive(Default)]
pub struct MemoryCooldownStore {
    /// 키 → 창 종료 시각
    windows: Mutex<HashMap<String, Instant>>,
}

impl MemoryCooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, Instant>>> {
        self.windows
            .lock()
            .map_err(|_| AppError::InternalError("쿨다운 저장소 잠금 실패".to_string()))
    }
}

#[async_trait]
impl CooldownStore for MemoryCooldownStore {
    async fn try_start(&self, email: &str, window: Duration) -> AppResult<CooldownStatus> {
        let key = cooldown_key(email);
        let now = Instant::now();
        let mut windows = self.lock()?;

        if let Some(ends_at) = windows.get(&key) {
            if *ends_at > now {
                return Ok(CooldownStatus::Active {
                    remaining: ceil_secs(*ends_at - now),
                });
            }
        }

        windows.retain(|_, ends_at| *ends_at > now);
        windows.insert(key, now + window);
        Ok(CooldownStatus::Started)
    }

    async fn remaining(&self, email: &str) -> AppResult<Option<u64>> {
        let now = Instant::now();
        let windows = self.lock()?;

        Ok(windows
            .get(&cooldown_key(email))
            .filter(|ends_at| **ends_at > now)
            .map(|ends_at| ceil_secs(*ends_at - now)))
    }

    async fn clear(&self, email: &str) -> AppResult<()> {
        self.lock()?.remove(&cooldown_key(email));
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// Redis 쿨다운 저장소
pub struct RedisCooldownStore {
    redis: RedisClient,
}

impl RedisCooldownStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl CooldownStore for RedisCooldownStore {
    async fn try_start(&self, email: &str, window: Duration) -> AppResult<CooldownStatus> {
        let key = cooldown_key(email);
        let seconds = window.as_secs().max(1);

        if self.redis.set_nx_with_expiry(&key, "1", seconds).await? {
            return Ok(CooldownStatus::Started);
        }

        let remaining = self.redis.ttl(&key).await?.unwrap_or(seconds);
        Ok(CooldownStatus::Active { remaining })
    }

    async fn remaining(&self, email: &str) -> AppResult<Option<u64>> {
        Ok(self
            .redis
            .ttl(&cooldown_key(email))
            .await?
            .filter(|secs| *secs > 0))
    }

    async fn clear(&self, email: &str) -> AppResult<()> {
        Ok(self.redis.del(&cooldown_key(email)).await?)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn is_healthy(&self) -> bool {
        self.redis.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cooldown_key_is_normalized() {
        assert_eq!(cooldown_key(" User@Example.COM "), "resend:cooldown:user@example.com");
    }

    #[test]
    fn test_ceil_secs() {
        assert_eq!(ceil_secs(Duration::from_millis(59_001)), 60);
        assert_eq!(ceil_secs(Duration::from_secs(60)), 60);
    }

    #[actix_web::test]
    async fn test_memory_window_blocks_second_start() {
        let store = MemoryCooldownStore::new();
        let window = Duration::from_secs(60);

        assert_eq!(store.try_start("user@example.com", window).await.unwrap(), CooldownStatus::Started);

        match store.try_start("USER@example.com", window).await.unwrap() {
            CooldownStatus::Active { remaining } => assert!(remaining > 0 && remaining <= 60),
            other => panic!("expected active cooldown, got {:?}", other),
        }

        let remaining = store.remaining("user@example.com").await.unwrap();
        assert!(matches!(remaining, Some(secs) if secs <= 60));
    }

    #[actix_web::test]
    async fn test_memory_window_expires() {
        let store = MemoryCooldownStore::new();

        store.try_start("user@example.com", Duration::ZERO).await.unwrap();

        assert_eq!(store.remaining("user@example.com").await.unwrap(), None);
        assert_eq!(
            store.try_start("user@example.com", Duration::from_secs(30)).await.unwrap(),
            CooldownStatus::Started
        );
    }

    #[actix_web::test]
    async fn test_memory_windows_are_per_email() {
        let store = MemoryCooldownStore::new();
        let window = Duration::from_secs(60);

        store.try_start("a@example.com", window).await.unwrap();
        assert_eq!(store.try_start("b@example.com", window).await.unwrap(), CooldownStatus::Started);
        assert_eq!(store.remaining("c@example.com").await.unwrap(), None);
        assert_eq!(store.backend(), "memory");
    }

    #[actix_web::test]
    async fn test_memory_clear_releases_window() {
        let store = MemoryCooldownStore::new();
        let window = Duration::from_secs(60);

        store.try_start("user@example.com", window).await.unwrap();
        store.clear("User@Example.com").await.unwrap();

        assert_eq!(store.remaining("user@example.com").await.unwrap(), None);
        assert_eq!(store.try_start("user@example.com", window).await.unwrap(), CooldownStatus::Started);
    }
}
