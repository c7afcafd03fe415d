//! 캐싱 계층 모듈
//!
//! 여러 서버 인스턴스가 공유하는 짧은 수명의 상태(재전송 쿨다운)를
//! Redis 에 보관합니다. `REDIS_URL` 이 없으면 사용하지 않습니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379
//! ```

pub mod redis;
