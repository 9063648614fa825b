use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use super::api::ApiClient;
use super::error::ClientError;
use crate::database::models::{Dataset, DatasetInput};

/// Logical data-access verbs for datasets.
///
/// `update` and `remove` address the record by its `_id`.
#[async_trait]
pub trait DatasetsService: Send + Sync {
    async fn query(&self) -> Result<Vec<Dataset>, ClientError>;
    async fn get(&self, id: &str) -> Result<Dataset, ClientError>;
    async fn save(&self, input: &DatasetInput) -> Result<Dataset, ClientError>;
    async fn update(&self, dataset: &Dataset) -> Result<Dataset, ClientError>;
    async fn remove(&self, dataset: &Dataset) -> Result<Dataset, ClientError>;
}

/// REST binding of `DatasetsService` onto `/datasets` and `/datasets/{id}`
#[derive(Clone, Debug)]
pub struct DatasetsResource {
    api: ApiClient,
}

/// PUT body. `size` is always sent so that clearing it in the view clears it on the server.
#[derive(Serialize)]
struct UpdateBody<'a> {
    name: &'a str,
    description: &'a str,
    size: Option<f64>,
}

impl DatasetsResource {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

#[async_trait]
impl DatasetsService for DatasetsResource {
    async fn query(&self) -> Result<Vec<Dataset>, ClientError> {
        self.api.send(self.api.request(Method::GET, "/datasets")).await
    }

    async fn get(&self, id: &str) -> Result<Dataset, ClientError> {
        let path = format!("/datasets/{}", id);
        self.api.send(self.api.request(Method::GET, &path)).await
    }

    async fn save(&self, input: &DatasetInput) -> Result<Dataset, ClientError> {
        let builder = self.api.request(Method::POST, "/datasets").json(input);
        self.api.send(builder).await
    }

    async fn update(&self, dataset: &Dataset) -> Result<Dataset, ClientError> {
        let path = format!("/datasets/{}", dataset.id);
        let body = UpdateBody {
            name: &dataset.name,
            description: &dataset.description,
            size: dataset.size,
        };
        self.api.send(self.api.request(Method::PUT, &path).json(&body)).await
    }

    async fn remove(&self, dataset: &Dataset) -> Result<Dataset, ClientError> {
        let path = format!("/datasets/{}", dataset.id);
        self.api.send(self.api.request(Method::DELETE, &path)).await
    }
}
