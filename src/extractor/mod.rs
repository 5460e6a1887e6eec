// src/extractor/mod.rs

pub mod index_page;
pub mod naming;

use crate::{client::SessionClient, error::*, models::Course, symbols};
use log::{error, info};
use std::sync::Arc;
use url::Url;

/// 抓取并解析课程的讲座索引页
pub struct CourseIndexExtractor {
    http_client: Arc<SessionClient>,
}

impl CourseIndexExtractor {
    pub fn new(http_client: Arc<SessionClient>) -> Self {
        Self { http_client }
    }

    pub async fn extract_course(&self, course_id: &str) -> AppResult<Course> {
        let url_str = self.http_client.config().index_url(course_id);
        info!("打开讲座索引页: {}", url_str);
        println!("{} 正在打开讲座索引页...", *symbols::INFO);

        let html = match self.fetch_index(&url_str).await {
            Ok(html) => html,
            Err(e @ AppError::SessionRejected { .. }) => return Err(e),
            Err(e) => {
                error!("讲座索引页 '{}' 请求失败: {}", url_str, e);
                return Err(AppError::IndexFetch {
                    url: url_str,
                    course_id: course_id.to_string(),
                    source: Box::new(e),
                });
            }
        };
        println!("{} 完成", *symbols::OK);

        let page_url = Url::parse(&url_str)?;
        index_page::parse_index_page(&html, course_id, &page_url)
    }

    async fn fetch_index(&self, url_str: &str) -> AppResult<String> {
        let url = Url::parse(url_str)?;
        self.http_client.fetch_text(&url).await
    }
}
