mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::TestServer;

async fn create_dataset(server: &TestServer, token: &str, body: Value) -> Result<Value> {
    let res = server
        .client
        .post(server.url("/datasets"))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(res.json::<Value>().await?)
}

#[tokio::test]
async fn owner_lifecycle_scenario() -> Result<()> {
    let server = TestServer::start().await?;
    let alice = server.signup("alice", "Alice Doe").await?;
    let bob = server.signup("bob", "Bob Doe").await?;

    let created = create_dataset(
        &server,
        &alice,
        json!({"name": "Dataset Name", "description": "Dataset Description", "size": 10}),
    )
    .await?;
    assert_eq!(created["user"]["displayName"], "Alice Doe");
    let uri = server.url(&format!("/datasets/{}", created["_id"].as_str().unwrap_or_default()));

    // Someone else may not touch it
    let res = server
        .client
        .put(&uri)
        .bearer_auth(&bob)
        .json(&json!({"name": "Hijacked"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(res.json::<Value>().await?["message"], "User is not authorized");

    // Owner update keeps fields not mentioned
    let res = server
        .client
        .put(&uri)
        .bearer_auth(&alice)
        .json(&json!({"name": "New Name", "user": {"_id": "00000000-0000-0000-0000-000000000000"}}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<Value>().await?;
    assert_eq!(updated["name"], "New Name");
    assert_eq!(updated["description"], "Dataset Description");
    assert_eq!(updated["size"], 10.0);
    assert_eq!(updated["created"], created["created"]);
    assert_eq!(updated["user"]["_id"], created["user"]["_id"]);

    let res = server.client.delete(&uri).bearer_auth(&alice).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["name"], "New Name");

    let res = server.client.get(&uri).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server.client.delete(&uri).bearer_auth(&alice).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn list_is_newest_first() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.signup("alice", "Alice Doe").await?;

    for name in ["first", "second", "third"] {
        create_dataset(&server, &token, json!({"name": name, "description": "d"})).await?;
    }

    let res = server.client.get(server.url("/datasets")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let names: Vec<String> = res
        .json::<Vec<Value>>()
        .await?
        .iter()
        .filter_map(|d| d["name"].as_str().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["third", "second", "first"]);

    Ok(())
}

#[tokio::test]
async fn unauthenticated_mutations_are_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.signup("alice", "Alice Doe").await?;
    let created = create_dataset(&server, &token, json!({"name": "n", "description": "d"})).await?;
    let uri = server.url(&format!("/datasets/{}", created["_id"].as_str().unwrap_or_default()));

    let res = server
        .client
        .post(server.url("/datasets"))
        .json(&json!({"name": "n", "description": "d"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.client.put(&uri).json(&json!({"name": "x"})).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = server.client.delete(&uri).bearer_auth("not-a-token").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["message"], "User is not logged in");

    let res = server.client.get(&uri).send().await?;
    assert_eq!(res.json::<Value>().await?["name"], "n");

    Ok(())
}

#[tokio::test]
async fn validation_messages() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.signup("alice", "Alice Doe").await?;

    let res = server
        .client
        .post(server.url("/datasets"))
        .bearer_auth(&token)
        .json(&json!({"name": "   ", "description": "d"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Please fill Dataset name");

    let res = server
        .client
        .post(server.url("/datasets"))
        .bearer_auth(&token)
        .json(&json!({"name": "n", "description": "d", "size": 1000001}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>().await?["message"],
        "The value of `size` (1000001) exceeds the limit (1000000)."
    );

    let created = create_dataset(&server, &token, json!({"name": "n", "description": "d", "size": 5})).await?;
    let uri = server.url(&format!("/datasets/{}", created["_id"].as_str().unwrap_or_default()));

    let res = server
        .client
        .put(&uri)
        .bearer_auth(&token)
        .json(&json!({"name": ""}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Please fill Dataset name");

    // null clears the size
    let res = server
        .client
        .put(&uri)
        .bearer_auth(&token)
        .json(&json!({"size": null}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?.get("size").is_none());

    Ok(())
}

#[tokio::test]
async fn auth_endpoints() -> Result<()> {
    let server = TestServer::start().await?;
    server.signup("alice", "Alice Doe").await?;

    let res = server
        .client
        .post(server.url("/auth/signup"))
        .json(&json!({"username": "alice", "password": "password", "displayName": "Again"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let res = server
        .client
        .post(server.url("/auth/signin"))
        .json(&json!({"username": "alice", "password": "wrong-password"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(res.json::<Value>().await?["message"], "Unknown user or invalid password");

    let res = server
        .client
        .post(server.url("/auth/signin"))
        .json(&json!({"username": "alice", "password": "password"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let token = res.json::<Value>().await?["token"].as_str().unwrap_or_default().to_string();

    let res = server.client.get(server.url("/users/me")).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let me = res.json::<Value>().await?;
    assert_eq!(me["username"], "alice");
    assert_eq!(me["displayName"], "Alice Doe");

    let res = server
        .client
        .post(server.url("/auth/signup"))
        .json(&json!({"username": "bo", "password": "password", "displayName": "Bo"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
