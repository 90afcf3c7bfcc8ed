use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::{NewsdeskError, Result};
use crate::config::ApiConfig;
use crate::domain::{
    Article, AuthResponse, ForgotPasswordPayload, LoginPayload, LoginResponse, RegisterPayload,
    ResetPasswordPayload, SupportRequest, Topic,
};
use crate::fetcher::{NewsSource, TopicSource};

#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    #[serde(default)]
    items: Vec<Article>,
}

#[derive(Debug, Deserialize)]
struct TopicsEnvelope {
    #[serde(default)]
    topics: Vec<Topic>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the news backend: article feeds, topics, auth and support.
pub struct HttpNewsClient {
    client: Client,
    base_url: Url,
}

impl HttpNewsClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .gzip(true)
            .brotli(true)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&config.base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn get_items(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Article>> {
        let request = self.client.get(self.endpoint(path)?).query(query);
        let envelope: ItemsEnvelope = send_json(request).await?;
        tracing::debug!("GET {} returned {} items", path, envelope.items.len());
        Ok(envelope.items)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.client.post(self.endpoint(path)?).json(body);
        send_json(request).await
    }

    pub async fn login(&self, payload: &LoginPayload) -> Result<LoginResponse> {
        self.post("auth/login", payload).await
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<LoginResponse> {
        self.post("auth/register", payload).await
    }

    pub async fn request_password_reset(
        &self,
        payload: &ForgotPasswordPayload,
    ) -> Result<AuthResponse> {
        self.post("auth/forgot-password", payload).await
    }

    pub async fn reset_password(&self, payload: &ResetPasswordPayload) -> Result<AuthResponse> {
        self.post("auth/reset-password", payload).await
    }

    pub async fn send_support_request(&self, request: &SupportRequest) -> Result<serde_json::Value> {
        self.post("support", request).await
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn page_query(page: u32, limit: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("limit", limit.to_string())]
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    tracing::error!("API error {} from {}: {}", status.as_u16(), url, message);
    Err(NewsdeskError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl NewsSource for HttpNewsClient {
    async fn hot(&self, page: u32, limit: u32) -> Result<Vec<Article>> {
        self.get_items("news/hot", &page_query(page, limit)).await
    }

    async fn trending(&self, page: u32, limit: u32) -> Result<Vec<Article>> {
        self.get_items("news/trending", &page_query(page, limit)).await
    }

    async fn by_topic(&self, topic_key: &str, page: u32, limit: u32) -> Result<Vec<Article>> {
        let mut query = vec![("topics", topic_key.to_string())];
        query.extend(page_query(page, limit));
        self.get_items("news/by-topics", &query).await
    }

    async fn by_location(
        &self,
        country: &str,
        region: &str,
        city: &str,
        page: u32,
        limit: u32,
    ) -> Result<Vec<Article>> {
        let mut query = vec![
            ("country", country.to_string()),
            ("region", region.to_string()),
            ("city", city.to_string()),
        ];
        query.extend(page_query(page, limit));
        self.get_items("news/by-location", &query).await
    }

    async fn search(&self, query: &str, page: u32, limit: u32) -> Result<Vec<Article>> {
        let mut params = vec![("query", query.to_string())];
        params.extend(page_query(page, limit));
        self.get_items("news/search", &params).await
    }
}

#[async_trait]
impl TopicSource for HttpNewsClient {
    async fn topics(&self) -> Result<Vec<Topic>> {
        let request = self.client.get(self.endpoint("topics")?);
        let envelope: TopicsEnvelope = send_json(request).await?;
        Ok(envelope.topics)
    }
}
