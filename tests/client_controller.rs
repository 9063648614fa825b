mod common;

use anyhow::Result;

use dataset_api::client::{ApiClient, ClientError, ClientRoute, DatasetsController, DatasetsResource};
use common::TestServer;

fn controller(server: &TestServer, token: Option<String>) -> Result<DatasetsController<DatasetsResource>> {
    let api = ApiClient::new(&server.base_url)?.with_token(token);
    Ok(DatasetsController::new(DatasetsResource::new(api)))
}

#[tokio::test]
async fn controller_drives_full_lifecycle() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.signup("alice", "Alice Doe").await?;
    let mut ctrl = controller(&server, Some(token))?;

    ctrl.view.name = "Dataset Name".to_string();
    ctrl.view.description = "Dataset Description".to_string();
    ctrl.view.size = Some(3.0);
    let created = ctrl.create().await?;
    assert_eq!(ctrl.location.route(), Some(ClientRoute::View(created.id.to_string())));
    assert!(ctrl.view.name.is_empty());
    assert_eq!(created.owner.display_name.as_deref(), Some("Alice Doe"));

    ctrl.find().await?;
    assert_eq!(ctrl.view.datasets.len(), 1);

    ctrl.find_one(&created.id.to_string()).await?;
    if let Some(dataset) = ctrl.view.dataset.as_mut() {
        dataset.name = "New Name".to_string();
        dataset.size = None;
    }
    let updated = ctrl.update().await?;
    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.size, None);

    ctrl.remove(None).await?;
    assert_eq!(ctrl.location.route(), Some(ClientRoute::List));

    ctrl.find().await?;
    assert!(ctrl.view.datasets.is_empty());

    Ok(())
}

#[tokio::test]
async fn controller_surfaces_server_messages() -> Result<()> {
    let server = TestServer::start().await?;
    let alice = server.signup("alice", "Alice Doe").await?;
    let bob = server.signup("bob", "Bob Doe").await?;

    let mut anonymous = controller(&server, None)?;
    anonymous.view.name = "n".to_string();
    anonymous.view.description = "d".to_string();
    let err = anonymous.create().await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(anonymous.view.error.as_deref(), Some("User is not logged in"));

    let mut owner = controller(&server, Some(alice))?;
    owner.view.name = "n".to_string();
    owner.view.description = "d".to_string();
    let created = owner.create().await?;

    let mut other = controller(&server, Some(bob))?;
    other.find().await?;
    let listed = other.view.datasets[0].clone();
    let err = other.remove(Some(&listed)).await.unwrap_err();
    assert!(matches!(err, ClientError::Api { status: 403, .. }));
    assert_eq!(other.view.error.as_deref(), Some("User is not authorized"));
    assert_eq!(other.view.datasets.len(), 1);

    owner.find().await?;
    owner.remove(Some(&created)).await?;
    assert!(owner.view.datasets.is_empty());

    let err = owner.find_one(&created.id.to_string()).await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    Ok(())
}
