//! 로그인 후 이동 경로 (`next`)

use std::fmt;

/// 로그인 완료 후 이동할 사이트 내부 경로
///
/// 같은 사이트의 절대 경로만 허용합니다. `//host`, `/\host`, 스킴이 포함된 값,
/// 제어 문자가 포함된 값은 모두 기본값 `/` 로 대체되어 오픈 리다이렉트를 막습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextTarget(String);

impl NextTarget {
    pub const HOME: &'static str = "/";

    pub fn home() -> Self {
        Self(Self::HOME.to_string())
    }

    /// 쿼리/폼에서 받은 값으로부터 이동 경로를 만듭니다.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if Self::is_safe(value) => Self(value.to_string()),
            Some(value) if !value.is_empty() => {
                log::debug!("허용되지 않는 next 값 무시: {}", value);
                Self::home()
            }
            _ => Self::home(),
        }
    }

    fn is_safe(value: &str) -> bool {
        value.starts_with('/')
            && !value.starts_with("//")
            && !value.starts_with("/\\")
            && !value.contains("://")
            && !value.chars().any(|c| c.is_control())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_home(&self) -> bool {
        self.0 == Self::HOME
    }
}

impl Default for NextTarget {
    fn default() -> Self {
        Self::home()
    }
}

impl fmt::Display for NextTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
