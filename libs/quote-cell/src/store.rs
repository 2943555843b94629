use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use shared_database::rest::RestClient;

use crate::models::{NewQuote, QuoteError, QuoteRequest};

#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn insert(&self, new: &NewQuote) -> Result<QuoteRequest, QuoteError>;
    async fn fetch(&self, id: Uuid) -> Result<Option<QuoteRequest>, QuoteError>;
    async fn list(&self) -> Result<Vec<QuoteRequest>, QuoteError>;
    async fn set_final_price(&self, id: Uuid, price: f64) -> Result<QuoteRequest, QuoteError>;
    async fn delete(&self, id: Uuid) -> Result<(), QuoteError>;
}

pub struct RestQuoteStore {
    rest: RestClient,
}

impl RestQuoteStore {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }
}

#[async_trait]
impl QuoteStore for RestQuoteStore {
    async fn insert(&self, new: &NewQuote) -> Result<QuoteRequest, QuoteError> {
        let body =
            serde_json::to_value(new).map_err(|e| QuoteError::DatabaseError(e.to_string()))?;

        let rows: Vec<QuoteRequest> = self
            .rest
            .request(Method::POST, "/rest/v1/quotes", Some(body))
            .await
            .map_err(|e| QuoteError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| QuoteError::DatabaseError("insert returned no row".to_string()))
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<QuoteRequest>, QuoteError> {
        let path = format!("/rest/v1/quotes?id=eq.{}&limit=1", id);

        let rows: Vec<QuoteRequest> = self
            .rest
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| QuoteError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<QuoteRequest>, QuoteError> {
        let path = "/rest/v1/quotes?order=created_at.desc";

        self.rest
            .request(Method::GET, path, None)
            .await
            .map_err(|e| QuoteError::DatabaseError(e.to_string()))
    }

    async fn set_final_price(&self, id: Uuid, price: f64) -> Result<QuoteRequest, QuoteError> {
        let path = format!("/rest/v1/quotes?id=eq.{}", id);
        let body = json!({ "final_price": price });

        let rows: Vec<QuoteRequest> = self
            .rest
            .request(Method::PATCH, &path, Some(body))
            .await
            .map_err(|e| QuoteError::DatabaseError(e.to_string()))?;

        rows.into_iter().next().ok_or(QuoteError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), QuoteError> {
        let path = format!("/rest/v1/quotes?id=eq.{}", id);

        self.rest
            .execute(Method::DELETE, &path, None)
            .await
            .map_err(|e| QuoteError::DatabaseError(e.to_string()))
    }
}
