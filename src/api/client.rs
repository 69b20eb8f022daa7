//! HTTP client for the expense service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::ApiError;
use crate::config::Config;
use crate::models::ExpenseRecord;

/// Body of `POST /edit_cost`. `selected_data` is the pre-edit match key; the
/// service locates the record by those values, not by any id.
#[derive(Debug, Clone, Serialize)]
pub struct EditCostRequest {
    pub user_id: String,
    pub new_cost: String,
    pub selected_data: [String; 3],
}

/// Body of `POST /edit_date`.
#[derive(Debug, Clone, Serialize)]
pub struct EditDateRequest {
    pub user_id: String,
    pub new_date: String,
    pub selected_data: [String; 3],
}

/// Body of `POST /edit_category`.
#[derive(Debug, Clone, Serialize)]
pub struct EditCategoryRequest {
    pub user_id: String,
    pub new_category: String,
    pub selected_data: [String; 3],
}

/// Error payload the service returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ServiceErrorResponse {
    pub error: String,
}

/// The three-endpoint edit surface plus the display listing, as a trait so the
/// edit session can be driven by a fake in tests.
#[async_trait]
pub trait ExpenseApi {
    /// `GET /display/{user_id}`: the ordered expense list.
    async fn fetch_expenses(&self, user_id: &str) -> Result<Vec<ExpenseRecord>, ApiError>;

    /// `POST /edit_cost`
    async fn edit_cost(&self, request: &EditCostRequest) -> Result<(), ApiError>;

    /// `POST /edit_date`
    async fn edit_date(&self, request: &EditDateRequest) -> Result<(), ApiError>;

    /// `POST /edit_category`
    async fn edit_category(&self, request: &EditCategoryRequest) -> Result<(), ApiError>;
}

/// reqwest-backed client for a running expense service.
pub struct HttpExpenseClient {
    client: Client,
    base_url: String,
}

impl HttpExpenseClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_edit<B: Serialize + Sync>(&self, endpoint: &str, body: &B) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(decode_error(response).await);
        }

        Ok(())
    }
}

/// Turn a non-2xx response into an [`ApiError::Api`], preferring the
/// service's `{"error": ...}` payload over the raw body.
async fn decode_error(response: reqwest::Response) -> ApiError {
    let status_code = response.status().as_u16();
    match response.text().await {
        Ok(text) => {
            let message = serde_json::from_str::<ServiceErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            ApiError::Api {
                status_code,
                message,
            }
        }
        Err(e) => ApiError::Http(e),
    }
}

#[async_trait]
impl ExpenseApi for HttpExpenseClient {
    async fn fetch_expenses(&self, user_id: &str) -> Result<Vec<ExpenseRecord>, ApiError> {
        let url = format!("{}/display/{}", self.base_url, user_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(decode_error(response).await);
        }

        let body = response.text().await?;
        let records = serde_json::from_str::<Vec<ExpenseRecord>>(&body)?;
        Ok(records)
    }

    async fn edit_cost(&self, request: &EditCostRequest) -> Result<(), ApiError> {
        self.post_edit("edit_cost", request).await
    }

    async fn edit_date(&self, request: &EditDateRequest) -> Result<(), ApiError> {
        self.post_edit("edit_date", request).await
    }

    async fn edit_category(&self, request: &EditCategoryRequest) -> Result<(), ApiError> {
        self.post_edit("edit_category", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_cost_body_matches_service_contract() {
        let request = EditCostRequest {
            user_id: "864914213".to_string(),
            new_cost: "600".to_string(),
            selected_data: [
                "Date=2024-02-02".to_string(),
                "Category=Rent".to_string(),
                "Amount=500".to_string(),
            ],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "user_id": "864914213",
                "new_cost": "600",
                "selected_data": ["Date=2024-02-02", "Category=Rent", "Amount=500"],
            })
        );
    }

    #[test]
    fn edit_date_and_category_bodies_carry_the_same_match_key() {
        let selected_data = [
            "Date=2024-02-02".to_string(),
            "Category=Rent".to_string(),
            "Amount=500".to_string(),
        ];

        let date = EditDateRequest {
            user_id: "864914213".to_string(),
            new_date: "2024-03-03".to_string(),
            selected_data: selected_data.clone(),
        };
        let category = EditCategoryRequest {
            user_id: "864914213".to_string(),
            new_category: "Utilities".to_string(),
            selected_data,
        };

        let date_value = serde_json::to_value(&date).unwrap();
        let category_value = serde_json::to_value(&category).unwrap();
        assert_eq!(date_value["new_date"], "2024-03-03");
        assert_eq!(category_value["new_category"], "Utilities");
        assert_eq!(date_value["selected_data"], category_value["selected_data"]);
    }

    #[test]
    fn service_error_payload_decodes() {
        let response: ServiceErrorResponse =
            serde_json::from_str(r#"{"error": "user is missing or invalid"}"#).unwrap();
        assert_eq!(response.error, "user is missing or invalid");
    }
}
