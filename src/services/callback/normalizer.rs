//! # 리다이렉트 정규화
//!
//! 메일 클라이언트나 프로바이더 설정에 따라 인증 아티팩트가 콜백 경로가 아닌 곳,
//! 혹은 URL 프래그먼트(`#access_token=..`)에 실려 도착합니다.
//! 정규화는 이 아티팩트를 콜백 경로의 쿼리로 옮깁니다.
//!
//! ```text
//! /somepage#access_token=T1&refresh_token=T2
//!     └──► /auth/callback?access_token=T1&refresh_token=T2
//! /?code=abc123&next=/profile
//!     └──► /auth/callback?code=abc123&next=%2Fprofile
//! ```
//!
//! 규칙은 두 곳에서 동일하게 적용됩니다.
//!
//! - 서버: [`RedirectNormalizer::normalize`] (미들웨어, 쿼리만 보임)
//! - 브라우저: [`FRAGMENT_FORWARDER_JS`] (모든 페이지에 삽입, 프래그먼트 처리)
//!
//! ## 규칙
//!
//! 1. 경로가 이미 콜백 경로로 시작하면 아무것도 하지 않습니다.
//! 2. `code` 는 쿼리 값을 프래그먼트 값보다 우선합니다.
//! 3. 토큰 쌍은 완전한 쌍 단위로만 고릅니다. 쿼리 쌍이 프래그먼트 쌍보다 우선하며
//!    쿼리와 프래그먼트의 반쪽을 섞지 않습니다.
//! 4. 출력 파라미터 순서는 `code, access_token, refresh_token, next` 이고
//!    `next` 는 쿼리의 값만 전달합니다.

use url::form_urlencoded;
use crate::config::CALLBACK_PATH;
use crate::domain::models::location::{find_value, Location};

/// 모든 페이지의 `<head>` 에 들어가는 프래그먼트 전달 스크립트.
///
/// 서버는 프래그먼트를 볼 수 없으므로 브라우저가 같은 규칙으로
/// `location.replace` 를 수행합니다 (히스토리에 남지 않음).
pub const FRAGMENT_FORWARDER_JS: &str = concat!(
    "(function(){try{",
    "var cb=\"/auth/callback\";",
    "if(location.pathname.indexOf(cb)===0)return;",
    "if(!location.hash||location.hash.length<2)return;",
    "var q=new URLSearchParams(location.search),h=new URLSearchParams(location.hash.slice(1));",
    "function pair(p){var a=p.get(\"access_token\"),r=p.get(\"refresh_token\");return a&&r?[a,r]:null;}",
    "var t=pair(q)||pair(h),c=q.get(\"code\")||h.get(\"code\");",
    "if(!t&&!c)return;",
    "var o=new URLSearchParams();",
    "if(c)o.set(\"code\",c);",
    "if(t){o.set(\"access_token\",t[0]);o.set(\"refresh_token\",t[1]);}",
    "var n=q.get(\"next\");if(n)o.set(\"next\",n);",
    "location.replace(cb+\"?\"+o.toString());",
    "}catch(e){}})();"
);

pub struct RedirectNormalizer;

impl RedirectNormalizer {
    /// 콜백 경로로 옮겨야 하면 새 경로(`/auth/callback?..`)를, 아니면 `None` 을 반환합니다.
    pub fn normalize(location: &Location) -> Option<String> {
        if location.path.starts_with(CALLBACK_PATH) {
            return None;
        }

        let fragment = location.fragment_pairs();

        let code = location
            .query_value("code")
            .or_else(|| find_value(&fragment, "code"));
        let tokens = token_pair(&location.query).or_else(|| token_pair(&fragment));

        if code.is_none() && tokens.is_none() {
            return None;
        }

        let mut out = form_urlencoded::Serializer::new(String::new());
        if let Some(code) = code {
            out.append_pair("code", code);
        }
        if let Some((access_token, refresh_token)) = tokens {
            out.append_pair("access_token", access_token);
            out.append_pair("refresh_token", refresh_token);
        }
        if let Some(next) = location.query_value("next") {
            out.append_pair("next", next);
        }

        Some(format!("{}?{}", CALLBACK_PATH, out.finish()))
    }

    /// 문자열 URL 을 정규화합니다. 파싱 실패는 조용히 `None`.
    pub fn normalize_str(raw: &str) -> Option<String> {
        match Location::parse(raw) {
            Ok(location) => Self::normalize(&location),
            Err(e) => {
                log::debug!("정규화 대상 URL 파싱 실패, 무시: {}", e);
                None
            }
        }
    }
}

fn token_pair(pairs: &[(String, String)]) -> Option<(&str, &str)> {
    match (find_value(pairs, "access_token"), find_value(pairs, "refresh_token")) {
        (Some(access_token), Some(refresh_token)) => Some((access_token, refresh_token)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_token_pair_moves_to_query() {
        let target = RedirectNormalizer::normalize_str("/somepage#access_token=T1&refresh_token=T2").unwrap();

        assert_eq!(target, "/auth/callback?access_token=T1&refresh_token=T2");
        assert!(!target.contains('#'));
    }

    #[test]
    fn test_fragment_pair_survives_any_token_values() {
        for (access, refresh) in [("a.b.c", "r-1"), ("x y", "z&w"), ("äöü", "%41")] {
            let raw = format!(
                "https://melodya.app/feed#access_token={}&refresh_token={}",
                urlencoding::encode(access),
                urlencoding::encode(refresh)
            );
            let target = RedirectNormalizer::normalize_str(&raw).unwrap();
            let location = Location::parse(&target).unwrap();

            assert_eq!(location.path, CALLBACK_PATH);
            assert_eq!(location.query_value("access_token"), Some(access));
            assert_eq!(location.query_value("refresh_token"), Some(refresh));
            assert_eq!(location.fragment, None);
        }
    }

    #[test]
    fn test_normalizer_is_idempotent() {
        let inputs = [
            "/somepage#access_token=T1&refresh_token=T2",
            "/?code=abc123&next=/profile",
            "/feed?access_token=A&refresh_token=R#code=c",
        ];

        for raw in inputs {
            let target = RedirectNormalizer::normalize_str(raw).unwrap();
            assert_eq!(RedirectNormalizer::normalize_str(&target), None, "input: {}", raw);
        }
    }

    #[test]
    fn test_callback_path_is_untouched() {
        assert_eq!(
            RedirectNormalizer::normalize_str("/auth/callback#access_token=T1&refresh_token=T2"),
            None
        );
        assert_eq!(RedirectNormalizer::normalize_str("/auth/callback?code=abc"), None);
    }

    #[test]
    fn test_code_query_preferred_over_fragment() {
        let target = RedirectNormalizer::normalize_str("/?code=fromquery#code=fromfragment").unwrap();
        assert_eq!(target, "/auth/callback?code=fromquery");

        let target = RedirectNormalizer::normalize_str("/#code=fromfragment").unwrap();
        assert_eq!(target, "/auth/callback?code=fromfragment");
    }

    #[test]
    fn test_query_pair_preferred_over_fragment_pair() {
        let target =
            RedirectNormalizer::normalize_str("/x?access_token=QA&refresh_token=QR#access_token=FA&refresh_token=FR")
                .unwrap();
        assert_eq!(target, "/auth/callback?access_token=QA&refresh_token=QR");
    }

    #[test]
    fn test_half_pairs_are_never_mixed() {
        assert_eq!(
            RedirectNormalizer::normalize_str("/x?access_token=QA#refresh_token=FR"),
            None
        );

        let target =
            RedirectNormalizer::normalize_str("/x?access_token=QA#access_token=FA&refresh_token=FR").unwrap();
        assert_eq!(target, "/auth/callback?access_token=FA&refresh_token=FR");
    }

    #[test]
    fn test_next_passthrough() {
        let target = RedirectNormalizer::normalize_str("/?code=abc123&next=/profile").unwrap();
        let location = Location::parse(&target).unwrap();

        assert_eq!(location.query_value("code"), Some("abc123"));
        assert_eq!(location.query_value("next"), Some("/profile"));
    }

    #[test]
    fn test_parameter_order() {
        let target = RedirectNormalizer::normalize_str(
            "/?next=/me&refresh_token=R&code=C&access_token=A&utm_source=mail",
        )
        .unwrap();
        assert_eq!(target, "/auth/callback?code=C&access_token=A&refresh_token=R&next=%2Fme");
    }

    #[test]
    fn test_nothing_to_normalize() {
        assert_eq!(RedirectNormalizer::normalize_str("/"), None);
        assert_eq!(RedirectNormalizer::normalize_str("/feed?tab=following"), None);
        assert_eq!(RedirectNormalizer::normalize_str("/feed#section-2"), None);
        assert_eq!(RedirectNormalizer::normalize_str("/?code="), None);
    }

    #[test]
    fn test_parse_error_is_swallowed() {
        assert_eq!(RedirectNormalizer::normalize_str("http://[::1"), None);
    }

    #[test]
    fn test_forwarder_script_uses_callback_path() {
        assert!(FRAGMENT_FORWARDER_JS.contains(&format!("\"{}\"", CALLBACK_PATH)));
        assert!(FRAGMENT_FORWARDER_JS.contains("location.replace"));
    }
}
