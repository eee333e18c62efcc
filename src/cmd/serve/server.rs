// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::signal;

use crate::bank::load_bank_lenient;
use crate::cmd::serve::files::FileLoader;
use crate::cmd::serve::template::status_page;
use crate::error::Fallible;
use crate::error::fail;

pub struct ServeConfig {
    pub directory: Option<String>,
    pub host: String,
    pub port: u16,
}

#[derive(Clone)]
struct ServerState {
    /// Absolute path to the served root directory.
    root: PathBuf,
}

/// Serve a directory over HTTP so the quiz UI can fetch the question bank
/// from a static path.
pub async fn start_server(config: ServeConfig) -> Fallible<()> {
    let directory = config.directory.unwrap_or_else(|| ".".to_string());
    let root = PathBuf::from(&directory);
    if !root.exists() {
        return fail("directory does not exist.");
    }
    if !root.is_dir() {
        return fail("path is not a directory.");
    }
    let root = root.canonicalize()?;

    let state = ServerState { root };
    let app = Router::new();
    let app = app.route("/", get(index_handler));
    let app = app.route("/{*path}", get(file_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Serve the directory's own index.html when present, otherwise a generated
/// status page summarizing the bank.
async fn index_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let index = state.root.join("index.html");
    if index.is_file() {
        return match tokio::fs::read_to_string(index).await {
            Ok(html) => (StatusCode::OK, Html(html)),
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Internal Server Error".to_string()),
            ),
        };
    }
    let count = load_bank_lenient(&state.root.join("questions.json")).len();
    (StatusCode::OK, Html(status_page(count).into_string()))
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn file_handler(
    State(state): State<ServerState>,
    Path(path): Path<String>,
) -> (StatusCode, [(HeaderName, &'static str); 1], Vec<u8>) {
    let loader = FileLoader::new(state.root.clone());
    let validated_path: PathBuf = match loader.validate(&path) {
        Ok(p) => p,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                [(CONTENT_TYPE, "text/plain")],
                b"Not Found".to_vec(),
            );
        }
    };
    let extension = validated_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();
    let content_type: &str = match extension.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "text/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "txt" => "text/plain",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    };
    let content = tokio::fs::read(validated_path).await;
    match content {
        Ok(bytes) => (StatusCode::OK, [(CONTENT_TYPE, content_type)], bytes),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain")],
            b"Internal Server Error".to_vec(),
        ),
    }
}

async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    log::debug!("Received Ctrl+C, shutting down gracefully");
}
