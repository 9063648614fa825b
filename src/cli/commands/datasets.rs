use crate::cli::utils::{output_dataset, output_datasets, output_success};
use crate::cli::{api_client, OutputFormat};
use crate::client::{DatasetsController, DatasetsResource};

fn controller(server: &str) -> anyhow::Result<DatasetsController<DatasetsResource>> {
    Ok(DatasetsController::new(DatasetsResource::new(api_client(server)?)))
}

pub async fn list(server: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut ctrl = controller(server)?;
    ctrl.find().await?;
    output_datasets(&output_format, &ctrl.view.datasets)
}

pub async fn show(server: &str, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut ctrl = controller(server)?;
    ctrl.find_one(id).await?;
    match &ctrl.view.dataset {
        Some(dataset) => output_dataset(&output_format, dataset),
        None => anyhow::bail!("Dataset {} not found", id),
    }
}

pub async fn create(
    server: &str,
    name: String,
    description: String,
    size: Option<f64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut ctrl = controller(server)?;
    ctrl.view.name = name;
    ctrl.view.description = description;
    ctrl.view.size = size;

    let dataset = ctrl.create().await?;
    tracing::debug!("Now at {}", ctrl.location.path());
    output_dataset(&output_format, &dataset)
}

/// `size` is `Some(None)` to clear, `Some(Some(v))` to set, `None` to keep.
pub async fn update(
    server: &str,
    id: &str,
    name: Option<String>,
    description: Option<String>,
    size: Option<Option<f64>>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut ctrl = controller(server)?;
    ctrl.find_one(id).await?;

    if let Some(dataset) = ctrl.view.dataset.as_mut() {
        if let Some(name) = name {
            dataset.name = name;
        }
        if let Some(description) = description {
            dataset.description = description;
        }
        if let Some(size) = size {
            dataset.size = size;
        }
    }

    let dataset = ctrl.update().await?;
    output_dataset(&output_format, &dataset)
}

pub async fn delete(server: &str, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut ctrl = controller(server)?;
    ctrl.find_one(id).await?;
    let removed = ctrl.remove(None).await?;

    output_success(
        &output_format,
        &format!("Deleted dataset {} ({})", removed.name, removed.id),
        Some(serde_json::json!({ "dataset": removed })),
    )
}
