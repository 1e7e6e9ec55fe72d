//! HTTP client for the catalog API

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::{
    error::ErrorResponse,
    models::book::{Book, CreatedBook, MessageResponse, NewBook},
};

/// Default API location when `CATALOG_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Operations the catalog UI performs against the server
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_books(&self) -> ClientResult<Vec<Book>>;
    async fn create_book(&self, book: &NewBook) -> ClientResult<CreatedBook>;
    async fn update_book(&self, id: i64, book: &NewBook) -> ClientResult<MessageResponse>;
    async fn delete_book(&self, id: i64) -> ClientResult<MessageResponse>;
}

/// `CatalogApi` over HTTP/JSON
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from `CATALOG_API_URL`, falling back to the local server
    pub fn from_env() -> Self {
        let url = std::env::var("CATALOG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };
        Err(ClientError::Status { status, message })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_books(&self) -> ClientResult<Vec<Book>> {
        let response = self.http.get(self.url("/books")).send().await?;
        Self::decode(response).await
    }

    async fn create_book(&self, book: &NewBook) -> ClientResult<CreatedBook> {
        let response = self.http.post(self.url("/books")).json(book).send().await?;
        Self::decode(response).await
    }

    async fn update_book(&self, id: i64, book: &NewBook) -> ClientResult<MessageResponse> {
        let response = self
            .http
            .put(self.url(&format!("/books/{}", id)))
            .json(book)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_book(&self, id: i64) -> ClientResult<MessageResponse> {
        let response = self
            .http
            .delete(self.url(&format!("/books/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }
}
