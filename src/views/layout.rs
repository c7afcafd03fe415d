//! 공통 페이지 레이아웃
//!
//! 모든 페이지의 `<head>` 에는 프래그먼트 전달 스크립트가 들어갑니다.
//! 메일 클라이언트가 링크를 `/아무페이지#access_token=..` 로 바꿔도
//! 어느 페이지에서든 콜백 경로로 옮겨집니다.

use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use crate::services::callback::normalizer::FRAGMENT_FORWARDER_JS;
use crate::utils::string_utils::escape_html;

/// 재전송 버튼 카운트다운 스크립트.
///
/// `#resend-button[data-remaining]` 초 동안 버튼을 비활성화합니다.
pub const RESEND_COUNTDOWN_JS: &str = concat!(
    "(function(){",
    "var b=document.getElementById(\"resend-button\");if(!b)return;",
    "var n=parseInt(b.getAttribute(\"data-remaining\")||\"0\",10),",
    "l=document.getElementById(\"resend-countdown\");",
    "function tick(){",
    "if(n<=0){b.disabled=false;if(l)l.textContent=\"\";return;}",
    "b.disabled=true;if(l)l.textContent=\"You can request another email in \"+n+\"s.\";",
    "n--;setTimeout(tick,1000);}",
    "tick();})();"
);

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; background: #f6f5fb; margin: 0; }
    main { max-width: 420px; margin: 10vh auto; background: #fff; padding: 2rem; border-radius: 12px;
           box-shadow: 0 2px 12px rgba(0,0,0,0.08); }
    h1 { font-size: 1.4rem; margin-top: 0; }
    label { display: block; margin: 1rem 0 0.25rem; }
    input { width: 100%; padding: 0.6rem; box-sizing: border-box; font-size: 1rem; }
    button { margin-top: 1rem; padding: 0.6rem 1rem; font-size: 1rem; cursor: pointer; }
    button:disabled { cursor: not-allowed; opacity: 0.6; }
    .error { color: #b3261e; }
    .notice { color: #1d6b2f; }
    .muted { color: #666; font-size: 0.9rem; }
"#;

/// 제목과 본문으로 전체 HTML 문서를 만듭니다. `body` 는 이미 이스케이프된 HTML 이어야 합니다.
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="referrer" content="no-referrer">
<title>{title} · Melodya</title>
<script>{forwarder}</script>
<style>{style}</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape_html(title),
        forwarder = FRAGMENT_FORWARDER_JS,
        style = STYLE,
        body = body,
    )
}

/// 상태 코드와 함께 HTML 응답을 만듭니다. 인증 페이지는 캐시하지 않습니다.
pub fn html(status: StatusCode, document: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(document)
}

/// 이스케이프된 메시지 단락 (`class` 는 `error` 또는 `notice`)
pub fn message(class: &str, text: Option<&str>) -> String {
    match text {
        Some(text) => format!(r#"<p class="{}" role="status">{}</p>"#, class, escape_html(text)),
        None => String::new(),
    }
}
