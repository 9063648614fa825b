use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Dataset;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Some(target)) = (data, response.as_object_mut()) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    status: Option<u16>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(status) = status {
                response["status"] = json!(status);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}

pub fn output_dataset(output_format: &OutputFormat, dataset: &Dataset) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(dataset)?);
        }
        OutputFormat::Text => {
            for line in dataset_lines(dataset) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

pub fn output_datasets(output_format: &OutputFormat, datasets: &[Dataset]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(datasets)?);
        }
        OutputFormat::Text if datasets.is_empty() => {
            println!("No datasets yet");
        }
        OutputFormat::Text => {
            for dataset in datasets {
                println!("{}", dataset_row(dataset));
            }
        }
    }
    Ok(())
}

fn owner_name(dataset: &Dataset) -> String {
    dataset
        .owner
        .display_name
        .clone()
        .unwrap_or_else(|| dataset.owner.id.to_string())
}

/// One-line summary used by `list`
pub fn dataset_row(dataset: &Dataset) -> String {
    format!(
        "{}  {}  (by {}, {})",
        dataset.id,
        dataset.name,
        owner_name(dataset),
        dataset.created.format("%Y-%m-%d %H:%M")
    )
}

/// Detail block used by `show`, `create` and `update`
pub fn dataset_lines(dataset: &Dataset) -> Vec<String> {
    let mut lines = vec![
        format!("ID:          {}", dataset.id),
        format!("Name:        {}", dataset.name),
        format!("Description: {}", dataset.description),
    ];
    if let Some(size) = dataset.size {
        lines.push(format!("Size:        {}", size));
    }
    lines.push(format!("Created:     {}", dataset.created.to_rfc3339()));
    lines.push(format!("Owner:       {}", owner_name(dataset)));
    lines
}
