//! 현재 페이지 위치 (경로, 쿼리, 프래그먼트)

use url::Url;
use url::form_urlencoded;

/// 상대 URL 을 해석하기 위한 임의의 기준 origin
const PARSE_BASE: &str = "http://localhost";

/// 리다이렉트 정규화에 필요한 현재 위치 정보
///
/// 서버는 프래그먼트를 볼 수 없으므로 미들웨어에서 만든 `Location` 은
/// 항상 `fragment == None` 입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Vec<(String, String)>,
    pub fragment: Option<String>,
}

impl Location {
    /// 절대 URL 또는 `/path?query#fragment` 형태의 문자열을 파싱합니다.
    pub fn parse(raw: &str) -> Result<Self, url::ParseError> {
        let base = Url::parse(PARSE_BASE)?;
        let url = base.join(raw)?;

        Ok(Self {
            path: url.path().to_string(),
            query: url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
            fragment: url.fragment().map(str::to_string),
        })
    }

    /// 경로와 원시 쿼리 문자열로부터 만듭니다 (서버 요청용).
    pub fn from_parts(path: &str, raw_query: &str) -> Self {
        Self {
            path: path.to_string(),
            query: parse_pairs(raw_query),
            fragment: None,
        }
    }

    /// 쿼리에서 비어있지 않은 첫 번째 값을 찾습니다.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        find_value(&self.query, key)
    }

    /// 프래그먼트를 `key=value&...` 로 해석한 쌍 목록 (앞의 `#` 은 제거)
    pub fn fragment_pairs(&self) -> Vec<(String, String)> {
        self.fragment
            .as_deref()
            .map(|f| parse_pairs(f.trim_start_matches('#')))
            .unwrap_or_default()
    }
}

pub(crate) fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.trim_start_matches('?').as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

pub(crate) fn find_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.as_str())
}
