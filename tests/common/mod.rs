//! Common test utilities shared across integration tests
//!
//! A mockito server stands in for the GraphQL endpoint; each operation is
//! matched on its `operationName` (and, for catalogs, the `type` variable).

use mockito::{Matcher, Mock, ServerGuard};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Stored preferences: completion set, chat on the system default.
pub const PREFS_BODY: &str = r#"{"data":{"userModelPreferences":{"completionModel":"fast-1","chatModel":null,"updatedAt":"2024-05-01T12:00:00Z"}}}"#;

/// An unfinished mock for one named operation; call `.create()` on it.
pub fn mock_operation(server: &mut ServerGuard, operation: &str, status: usize, body: &str) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "operationName": operation })))
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
}

/// A created catalog mock for `category` ("COMPLETION" or "CHAT").
pub fn mock_catalog(server: &mut ServerGuard, category: &str, names: &[&str]) -> Mock {
    let models: Vec<_> = names
        .iter()
        .map(|name| json!({ "modelName": name, "description": null, "performanceTier": "fast" }))
        .collect();
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({
            "operationName": "GetAvailableModels",
            "variables": { "type": category }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": { "availableModels": models } }).to_string())
        .create()
}

/// Write a config pointing at `server` into a fresh temp directory.
///
/// Keep the returned `TempDir` alive for as long as the path is used.
pub fn isolated_config(server: &ServerGuard) -> Result<(TempDir, PathBuf), std::io::Error> {
    let dir = TempDir::new()?;
    let path = dir.path().join("config.json");
    let contents = json!({
        "endpoint": format!("{}/graphql", server.url()),
        "request_timeout_secs": 5,
    });
    fs::write(&path, contents.to_string())?;
    Ok((dir, path))
}
