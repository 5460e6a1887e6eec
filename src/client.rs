// src/client.rs

use crate::{config::AppConfig, constants, error::*};
use anyhow::Context;
use log::debug;
use reqwest::{
    Response, StatusCode,
    header::{COOKIE, HeaderMap, HeaderValue},
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::sync::Arc;
use url::Url;

/// 携带会话 Cookie 的 HTTP 客户端，索引页和每个资源的请求都经由它发出
#[derive(Clone)]
pub struct SessionClient {
    pub client: ClientWithMiddleware,
    config: Arc<AppConfig>,
}

impl SessionClient {
    pub fn new(config: Arc<AppConfig>, session_cookie: &str) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        let mut cookie = HeaderValue::from_str(&format!(
            "{}={}",
            constants::SESSION_COOKIE_NAME,
            session_cookie
        ))
        .context("会话 Cookie 含有无法放入请求头的字符")?;
        cookie.set_sensitive(true);
        headers.insert(COOKIE, cookie);

        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        let client = ClientBuilder::new(inner)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 发出 GET 请求；401/403 视为会话失效，其余错误状态码转换为错误
    pub async fn get(&self, url: &Url) -> AppResult<Response> {
        debug!("GET {}", url);
        let res = self.client.get(url.clone()).send().await?;
        if res.status() == StatusCode::UNAUTHORIZED || res.status() == StatusCode::FORBIDDEN {
            return Err(AppError::SessionRejected {
                url: url.to_string(),
            });
        }
        Ok(res.error_for_status()?)
    }

    pub async fn fetch_text(&self, url: &Url) -> AppResult<String> {
        Ok(self.get(url).await?.text().await?)
    }
}
