//! REST client for the employee collection.
//!
//! The remote store exposes one collection resource:
//!
//! - `GET {base}` lists all employees
//! - `GET {base}/{id}` fetches one
//! - `POST {base}` creates (no id in the body)
//! - `PUT {base}/{id}` replaces the full field set
//! - `DELETE {base}/{id}` removes
//!
//! Every call is sent exactly once. There is no retry and no timeout.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::models::{Employee, EmployeeId};

use super::ApiError;

/// Operations the view needs from the remote store.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Employee>, ApiError>;

    async fn get_by_id(&self, id: &EmployeeId) -> Result<Employee, ApiError>;

    /// Create a record. Any id on `employee` is ignored; the store assigns one.
    async fn create(&self, employee: &Employee) -> Result<Employee, ApiError>;

    async fn update(&self, id: &EmployeeId, employee: &Employee) -> Result<Employee, ApiError>;

    async fn remove(&self, id: &EmployeeId) -> Result<(), ApiError>;
}

/// REST implementation of [`EmployeeStore`].
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the collection at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client that shares an existing connection pool.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &EmployeeId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        Self::decode(response, url).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .request(method, url)
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        let response = Self::check_response(response).await?;
        Self::decode(response, url).await
    }
}

#[async_trait]
impl EmployeeStore for ApiClient {
    async fn list_all(&self) -> Result<Vec<Employee>, ApiError> {
        debug!(url = %self.base_url, "Fetching employee list");
        let employees: Vec<Employee> = self.get(&self.base_url).await?;
        debug!(count = employees.len(), "Employee list received");
        Ok(employees)
    }

    async fn get_by_id(&self, id: &EmployeeId) -> Result<Employee, ApiError> {
        let url = self.item_url(id);
        debug!(%id, "Fetching employee");
        self.get(&url).await
    }

    async fn create(&self, employee: &Employee) -> Result<Employee, ApiError> {
        debug!(name = %employee.name, "Creating employee");
        let body = employee.without_id();
        self.send_json(reqwest::Method::POST, &self.base_url, &body).await
    }

    async fn update(&self, id: &EmployeeId, employee: &Employee) -> Result<Employee, ApiError> {
        let url = self.item_url(id);
        debug!(%id, "Updating employee");
        let body = employee.without_id();
        self.send_json(reqwest::Method::PUT, &url, &body).await
    }

    async fn remove(&self, id: &EmployeeId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!(%id, "Deleting employee");
        let response = self.client.delete(&url).send().await?;
        // Body is ignored on success
        Self::check_response(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = ApiClient::new("http://localhost:3000/api/employees/").expect("client");
        assert_eq!(api.base_url(), "http://localhost:3000/api/employees");
        assert_eq!(
            api.item_url(&EmployeeId::from("7")),
            "http://localhost:3000/api/employees/7"
        );
    }

    #[test]
    fn test_clone_shares_base_url() {
        let api = ApiClient::new("http://localhost/e").expect("client");
        let copy = api.clone();
        assert_eq!(copy.base_url(), api.base_url());
    }
}
