/// Gini API 客户端
///
/// 基于 reqwest 的 `ApiClient` 实现，不做任何自动重试
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, LOCATION};
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{AppError, AppResult, RemoteError, RemoteErrorKind};
use crate::models::{Document, Extraction, ExtractionMap, Layout, PreviewSize};

const GINI_JSON: &str = "application/vnd.gini.v1+json";
const GINI_INCUBATOR_JSON: &str = "application/vnd.gini.incubator+json";

/// Gini API 客户端
pub struct GiniApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GiniApiClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str, accept: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(ACCEPT, accept)
    }

    /// 发送请求，非 2xx 状态码转换为 `RemoteError`
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(AppError::Remote(RemoteError::new(
            RemoteErrorKind::from_status(status.as_u16()),
            endpoint,
            format!("HTTP {}: {}", status.as_u16(), message),
        )))
    }

    async fn get_extractions(&self, document_id: &str, accept: &str) -> AppResult<ExtractionMap> {
        let path = format!("/documents/{}/extractions", document_id);
        let request = self.request(Method::GET, &path, accept);
        let body: ExtractionsResponse = self.send(&path, request).await?.json().await?;
        Ok(body.into_map())
    }
}

#[async_trait]
impl ApiClient for GiniApiClient {
    async fn create_document(
        &self,
        filename: &str,
        content: Vec<u8>,
        doc_type: Option<&str>,
    ) -> AppResult<Document> {
        let path = "/documents";
        let mut query = vec![("filename", filename)];
        if let Some(doc_type) = doc_type {
            query.push(("doctype", doc_type));
        }

        let request = self
            .request(Method::POST, path, GINI_JSON)
            .query(&query)
            .header(CONTENT_TYPE, "image/jpeg")
            .body(content);
        let response = self.send(path, request).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        let document_id = document_id_from_location(path, location)?;

        self.fetch_document(&document_id).await
    }

    async fn fetch_document(&self, document_id: &str) -> AppResult<Document> {
        let path = format!("/documents/{}", document_id);
        let request = self.request(Method::GET, &path, GINI_JSON);
        Ok(self.send(&path, request).await?.json().await?)
    }

    async fn fetch_extractions(&self, document_id: &str) -> AppResult<ExtractionMap> {
        self.get_extractions(document_id, GINI_JSON).await
    }

    async fn fetch_incubator_extractions(&self, document_id: &str) -> AppResult<ExtractionMap> {
        self.get_extractions(document_id, GINI_INCUBATOR_JSON).await
    }

    async fn submit_feedback(&self, document_id: &str, extraction: &Extraction) -> AppResult<()> {
        let path = format!("/documents/{}/extractions/{}", document_id, extraction.name);
        let request = self
            .request(Method::PUT, &path, GINI_JSON)
            .header(CONTENT_TYPE, GINI_JSON)
            .json(&json!({ "value": extraction.value }));
        self.send(&path, request).await?;
        Ok(())
    }

    async fn delete_document(&self, document_id: &str) -> AppResult<()> {
        let path = format!("/documents/{}", document_id);
        let request = self.request(Method::DELETE, &path, GINI_JSON);
        self.send(&path, request).await?;
        Ok(())
    }

    async fn fetch_preview(
        &self,
        document_id: &str,
        page: u32,
        size: PreviewSize,
    ) -> AppResult<Vec<u8>> {
        let path = format!(
            "/documents/{}/pages/{}/{}",
            document_id,
            page,
            size.as_path_segment()
        );
        let request = self.request(Method::GET, &path, "image/jpeg");
        let bytes = self.send(&path, request).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn fetch_layout(&self, document_id: &str) -> AppResult<Layout> {
        let path = format!("/documents/{}/layout", document_id);
        let request = self.request(Method::GET, &path, GINI_JSON);
        Ok(self.send(&path, request).await?.json().await?)
    }

    async fn submit_error_report(
        &self,
        document_id: &str,
        summary: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<String> {
        let path = format!("/documents/{}/errorreport", document_id);
        let mut query = Vec::new();
        if let Some(summary) = summary {
            query.push(("summary", summary));
        }
        if let Some(description) = description {
            query.push(("description", description));
        }

        let request = self.request(Method::POST, &path, GINI_JSON).query(&query);
        let body: ErrorReportResponse = self.send(&path, request).await?.json().await?;
        Ok(body.error_id)
    }
}

#[derive(Debug, Deserialize)]
struct ExtractionsResponse {
    #[serde(default)]
    extractions: BTreeMap<String, Extraction>,
}

impl ExtractionsResponse {
    /// 接口里字段名是 map 的 key，这里回填到 `Extraction::name`
    fn into_map(self) -> ExtractionMap {
        self.extractions
            .into_iter()
            .map(|(name, mut extraction)| {
                extraction.name = name.clone();
                (name, extraction)
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorReportResponse {
    #[serde(rename = "errorId")]
    error_id: String,
}

/// 上传成功但 `Location` 里没有文档ID，属于响应格式错误
fn document_id_from_location(path: &str, location: &str) -> Result<String, RemoteError> {
    extract_document_id(location).ok_or_else(|| {
        RemoteError::new(
            RemoteErrorKind::MalformedResponse,
            path,
            format!("无法从 Location 解析文档ID: '{}'", location),
        )
    })
}

/// 从 `Location` 头中提取文档ID
fn extract_document_id(location: &str) -> Option<String> {
    // 模式是常量，编译失败时按"无法解析"处理
    static DOCUMENT_ID: OnceLock<Option<Regex>> = OnceLock::new();
    let re = DOCUMENT_ID
        .get_or_init(|| Regex::new(r"/documents/([^/?#]+)/?(?:[?#].*)?$").ok())
        .as_ref()?;
    re.captures(location)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_document_id() {
        assert_eq!(
            extract_document_id("https://api.gini.net/documents/626626a0-749f"),
            Some("626626a0-749f".to_string())
        );
        assert_eq!(
            extract_document_id("/documents/abc/?x=1"),
            Some("abc".to_string())
        );
        assert_eq!(extract_document_id(""), None);
        assert_eq!(extract_document_id("https://api.gini.net/documents"), None);
    }

    #[test]
    fn test_missing_location_is_malformed_response() {
        let err = document_id_from_location("/documents", "").unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::MalformedResponse);
        assert_eq!(err.endpoint, "/documents");

        let id = document_id_from_location("/documents", "/documents/abc").unwrap();
        assert_eq!(id, "abc");
    }

    #[test]
    fn test_extractions_response_fills_names() {
        let body: ExtractionsResponse = serde_json::from_str(
            r#"{"extractions":{"amountToPay":{"entity":"amount","value":"24.99:EUR","box":{}}},"candidates":{}}"#,
        )
        .unwrap();
        let map = body.into_map();
        assert_eq!(map["amountToPay"].name, "amountToPay");
        assert_eq!(map["amountToPay"].value, "24.99:EUR");
    }
}
