//! # 문자열 유틸리티
//!
//! 폼 입력 정리와 HTML 출력 이스케이프에 쓰이는 공통 함수들입니다.

use serde::Deserialize;
use crate::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
/// 에러 메시지는 화면에 그대로 표시됩니다.
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  user@example.com  ", "Email").unwrap(), "user@example.com");
/// assert!(validate_required_string("   ", "Email").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{} is required", field_name)));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 쿼리/폼 역직렬화 시 빈 문자열이나 공백만 있는 문자열을 `None` 으로 바꿉니다.
/// `?code=` 처럼 값이 비어 있는 파라미터를 없는 것으로 취급하기 위해 사용합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct CallbackQuery {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     code: Option<String>,
/// }
///
/// // ?code=abc   → Some("abc")
/// // ?code=      → None
/// // (없음)      → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// HTML 텍스트/속성 값으로 넣기 위한 이스케이프
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// 로그용 이메일 마스킹 (`us***@example.com`)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}
