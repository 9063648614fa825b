use std::fmt;

/// Client-side navigation states for the dataset screens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRoute {
    List,
    Create,
    View(String),
    Edit(String),
}

impl ClientRoute {
    /// State name used by the navigation table
    pub fn state_name(&self) -> &'static str {
        match self {
            ClientRoute::List => "listDatasets",
            ClientRoute::Create => "createDataset",
            ClientRoute::View(_) => "viewDataset",
            ClientRoute::Edit(_) => "editDataset",
        }
    }

    pub fn path(&self) -> String {
        match self {
            ClientRoute::List => "/datasets".to_string(),
            ClientRoute::Create => "/datasets/create".to_string(),
            ClientRoute::View(id) => format!("/datasets/{}", id),
            ClientRoute::Edit(id) => format!("/datasets/{}/edit", id),
        }
    }

    /// Inverse of `path`. `create` is matched before the id form.
    pub fn parse(path: &str) -> Option<Self> {
        let rest = path.trim_end_matches('/').strip_prefix("/datasets")?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Some(ClientRoute::List),
            ["create"] => Some(ClientRoute::Create),
            [id] => Some(ClientRoute::View(id.to_string())),
            [id, "edit"] => Some(ClientRoute::Edit(id.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for ClientRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
