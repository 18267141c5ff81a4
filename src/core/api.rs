//! REST access to the `employees` resource.

use std::{future::Future, sync::Arc};

use reqwest::{Client, ClientBuilder, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::core::model::{Employee, EmployeeId, NewEmployee};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("{method} {url} returned an unexpected body: {source}")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The four operations the client performs against the backend.
///
/// Futures are `'static` so front ends can hand them to their executor
/// without borrowing the client.
pub trait EmployeeApi: Clone + Send + Sync + 'static {
    fn list(&self) -> impl Future<Output = Result<Vec<Employee>, ApiError>> + Send + 'static;
    fn create(
        &self,
        employee: NewEmployee,
    ) -> impl Future<Output = Result<Employee, ApiError>> + Send + 'static;
    fn update(
        &self,
        employee: Employee,
    ) -> impl Future<Output = Result<Employee, ApiError>> + Send + 'static;
    /// Returns the backend's confirmation text.
    fn delete(&self, id: EmployeeId)
    -> impl Future<Output = Result<String, ApiError>> + Send + 'static;
}

#[derive(Debug, Clone)]
pub struct HttpEmployeeApi {
    client: Client,
    collection_url: Arc<str>,
}

impl HttpEmployeeApi {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = ClientBuilder::new();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Client)?;
        let collection_url = format!("{}/employees", config.base_url.as_str().trim_end_matches('/'));
        Ok(Self {
            client,
            collection_url: collection_url.into(),
        })
    }

    pub fn collection_url(&self) -> &str {
        &self.collection_url
    }

    fn member_url(&self, id: EmployeeId) -> String {
        format!("{}/{}", self.collection_url, id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }
}

async fn send(request: RequestBuilder, method: Method, url: String) -> Result<String, ApiError> {
    debug!("{method} {url}");
    let response = request.send().await.map_err(|source| ApiError::Transport {
        method: method.clone(),
        url: url.clone(),
        source,
    })?;

    let status = response.status();
    let body = response.text().await.map_err(|source| ApiError::Transport {
        method: method.clone(),
        url: url.clone(),
        source,
    })?;

    if !status.is_success() {
        return Err(ApiError::Status {
            method,
            url,
            status,
            body,
        });
    }
    debug!("{method} {url} -> {status}");
    Ok(body)
}

async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    method: Method,
    url: String,
) -> Result<T, ApiError> {
    let body = send(request, method.clone(), url.clone()).await?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        method,
        url,
        source,
    })
}

impl EmployeeApi for HttpEmployeeApi {
    fn list(&self) -> impl Future<Output = Result<Vec<Employee>, ApiError>> + Send + 'static {
        let url = self.collection_url.to_string();
        let request = self.request(Method::GET, &url);
        send_json(request, Method::GET, url)
    }

    fn create(
        &self,
        employee: NewEmployee,
    ) -> impl Future<Output = Result<Employee, ApiError>> + Send + 'static {
        let url = self.collection_url.to_string();
        let request = self.request(Method::POST, &url).json(&employee);
        send_json(request, Method::POST, url)
    }

    fn update(
        &self,
        employee: Employee,
    ) -> impl Future<Output = Result<Employee, ApiError>> + Send + 'static {
        let url = self.member_url(employee.employee_id);
        let request = self.request(Method::PATCH, &url).json(&employee);
        send_json(request, Method::PATCH, url)
    }

    fn delete(
        &self,
        id: EmployeeId,
    ) -> impl Future<Output = Result<String, ApiError>> + Send + 'static {
        let url = self.member_url(id);
        let request = self.request(Method::DELETE, &url);
        send(request, Method::DELETE, url)
    }
}
