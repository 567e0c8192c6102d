//! InvertirOnline HTTP 클라이언트.

use std::time::Duration;

use iol_core::{AppConfig, HttpConfig, MarketClock};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{DataError, Result};

/// InvertirOnline 공개 웹/API 클라이언트.
///
/// 연결 풀을 공유하므로 복제 비용이 작습니다. 날짜/시각 변환은
/// 생성 시 지정한 `MarketClock`을 따릅니다.
#[derive(Debug, Clone)]
pub struct IolClient {
    client: Client,
    base_url: String,
    timeout: Duration,
    clock: MarketClock,
}

/// 응답 본문과 상태 코드.
#[derive(Debug)]
pub(crate) struct Fetched {
    pub status: StatusCode,
    pub url: String,
    pub body: String,
}

impl Fetched {
    /// 정확히 200인 경우만 성공으로 봅니다.
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    pub fn ensure_ok(self) -> Result<Self> {
        if self.is_ok() {
            Ok(self)
        } else {
            Err(DataError::Upstream {
                status: self.status.as_u16(),
                url: self.url,
            })
        }
    }
}

impl IolClient {
    /// 기본 설정으로 클라이언트를 생성합니다.
    pub fn new() -> Result<Self> {
        Self::from_config(&AppConfig::default())
    }

    /// 애플리케이션 설정으로 클라이언트를 생성합니다.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::with_http(&config.http, config.market.clock()?)
    }

    /// HTTP 설정과 시계를 직접 지정하여 생성합니다.
    pub fn with_http(http: &HttpConfig, clock: MarketClock) -> Result<Self> {
        let client = Client::builder()
            .timeout(http.timeout())
            .user_agent(&http.user_agent)
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: http.base_url.trim_end_matches('/').to_string(),
            timeout: http.timeout(),
            clock,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn clock(&self) -> &MarketClock {
        &self.clock
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET 요청. 상태 코드 판단은 호출자에게 맡깁니다.
    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Fetched> {
        let url = self.url(path);
        debug!(url = %url, params = query.len(), "GET");

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "응답 수신");
        Ok(Fetched { status, url, body })
    }

    /// 폼 인코딩 POST 요청.
    pub(crate) async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Fetched> {
        let url = self.url(path);
        debug!(url = %url, "POST");

        let response = self.client.post(&url).form(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "응답 수신");
        Ok(Fetched { status, url, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_default_config() {
        let client = IolClient::new().unwrap();
        assert_eq!(client.base_url(), "https://iol.invertironline.com");
        assert_eq!(client.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let http = HttpConfig::with_base_url("http://127.0.0.1:1234/");
        let client = IolClient::with_http(&http, MarketClock::utc()).unwrap();
        assert_eq!(
            client.url("/api/cotizaciones/history"),
            "http://127.0.0.1:1234/api/cotizaciones/history"
        );
    }

    #[test]
    fn test_ensure_ok() {
        let ok = Fetched {
            status: StatusCode::OK,
            url: "u".to_string(),
            body: String::new(),
        };
        assert!(ok.ensure_ok().is_ok());

        let created = Fetched {
            status: StatusCode::CREATED,
            url: "u".to_string(),
            body: String::new(),
        };
        let err = created.ensure_ok().unwrap_err();
        assert_eq!(err.status(), Some(201));
    }
}
