//! Dataset screen controller.
//!
//! Mirrors the actions a user can trigger on the dataset views. Every action
//! goes through a `DatasetsService` and records its outcome in `DatasetView`;
//! navigation is recorded in `Location`.

use super::error::ClientError;
use super::resource::DatasetsService;
use super::routes::ClientRoute;
use crate::database::models::{Dataset, DatasetInput};

/// Local view state: create form fields, loaded records and the last error
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetView {
    pub name: String,
    pub size: Option<f64>,
    pub description: String,
    pub datasets: Vec<Dataset>,
    pub dataset: Option<Dataset>,
    pub error: Option<String>,
}

impl DatasetView {
    fn clear_form(&mut self) {
        self.name.clear();
        self.size = None;
        self.description.clear();
    }
}

/// Current client path plus the paths visited before it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    history: Vec<String>,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            path: ClientRoute::List.path(),
            history: Vec::new(),
        }
    }
}

impl Location {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn route(&self) -> Option<ClientRoute> {
        ClientRoute::parse(&self.path)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn go(&mut self, route: ClientRoute) {
        let next = route.path();
        tracing::debug!("Navigating {} -> {}", self.path, next);
        let previous = std::mem::replace(&mut self.path, next);
        self.history.push(previous);
    }
}

pub struct DatasetsController<S> {
    service: S,
    pub view: DatasetView,
    pub location: Location,
}

impl<S: DatasetsService> DatasetsController<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            view: DatasetView::default(),
            location: Location::default(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Save a dataset built from the form fields, then show it.
    pub async fn create(&mut self) -> Result<Dataset, ClientError> {
        let input = DatasetInput {
            name: Some(self.view.name.clone()),
            description: Some(self.view.description.clone()),
            size: self.view.size,
        };

        let result = self.service.save(&input).await;
        match &result {
            Ok(dataset) => {
                self.location.go(ClientRoute::View(dataset.id.to_string()));
                self.view.clear_form();
                self.view.error = None;
            }
            Err(e) => self.view.error = Some(e.to_string()),
        }
        result
    }

    /// Delete `dataset` and drop it from the list, or delete the current
    /// dataset and return to the list when none is given.
    pub async fn remove(&mut self, dataset: Option<&Dataset>) -> Result<Dataset, ClientError> {
        let result = match dataset {
            Some(dataset) => {
                let result = self.service.remove(dataset).await;
                if result.is_ok() {
                    self.view.datasets.retain(|d| d.id != dataset.id);
                }
                result
            }
            None => {
                let current = self.view.dataset.clone().ok_or(ClientError::NoDataset)?;
                let result = self.service.remove(&current).await;
                if result.is_ok() {
                    self.view.dataset = None;
                    self.location.go(ClientRoute::List);
                }
                result
            }
        };

        if let Err(e) = &result {
            self.view.error = Some(e.to_string());
        }
        result
    }

    /// Persist the dataset held in view state.
    pub async fn update(&mut self) -> Result<Dataset, ClientError> {
        let current = self.view.dataset.as_ref().ok_or(ClientError::NoDataset)?;

        let result = self.service.update(current).await;
        match &result {
            Ok(updated) => {
                self.location.go(ClientRoute::View(updated.id.to_string()));
                self.view.dataset = Some(updated.clone());
                self.view.error = None;
            }
            Err(e) => self.view.error = Some(e.to_string()),
        }
        result
    }

    /// Load the full list.
    pub async fn find(&mut self) -> Result<(), ClientError> {
        match self.service.query().await {
            Ok(datasets) => {
                self.view.datasets = datasets;
                self.view.error = None;
                Ok(())
            }
            Err(e) => {
                self.view.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Load one dataset by the id taken from the current route.
    pub async fn find_one(&mut self, id: &str) -> Result<(), ClientError> {
        match self.service.get(id).await {
            Ok(dataset) => {
                self.view.dataset = Some(dataset);
                self.view.error = None;
                Ok(())
            }
            Err(e) => {
                self.view.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
