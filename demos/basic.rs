//! Minimal reply example: a hyper server whose handlers return values.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/users/42
//!   curl -i http://localhost:3000/report.csv
//!   curl -i http://localhost:3000/broken     # → 500, logged
//!   curl -i http://localhost:3000/nope       # → 404

use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use reply::transport::{HttpResponse, to_http};
use reply::{ContentType, IntoResponse, Response, Status};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let addr: SocketAddr = std::env::var("REPLY_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_owned())
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "reply demo listening");

    loop {
        let (stream, peer) = listener.accept().await?;
        tokio::spawn(async move {
            let svc = service_fn(|req: hyper::Request<hyper::body::Incoming>| async move {
                Ok::<_, Infallible>(respond(handle(req.uri().path())))
            });
            if let Err(e) = http1::Builder::new().serve_connection(TokioIo::new(stream), svc).await {
                error!(%peer, "connection error: {e}");
            }
        });
    }
}

// Handlers: pure functions from request data to a response value.
fn handle(path: &str) -> Response {
    match path.strip_prefix("/users/") {
        Some(id) => get_user(id),
        None => match path {
            "/report.csv" => report(),
            "/broken" => broken(),
            _ => Status::NotFound.into_response(),
        },
    }
}

fn get_user(id: &str) -> Response {
    Response::json(serde_json::json!({ "id": id, "name": "alice" }))
        .with_header("Cache-Control", "no-store")
}

fn report() -> Response {
    Response::text("id,name\n42,alice\n")
        .with_content_type(ContentType::Csv)
        .with_headers("Vary", ["Accept", "Accept-Encoding"])
}

// Tuple keys cannot be JSON object keys: rendering this fails.
fn broken() -> Response {
    let mut body = HashMap::new();
    body.insert((1, 2), "pair");
    Response::json(body)
}

// Top-level error layer: any render failure becomes a plain 500.
fn respond(response: Response) -> HttpResponse {
    to_http(response).unwrap_or_else(|e| {
        error!("render failed: {e}");
        let fallback = Response::text("Internal Server Error")
            .with_status(Status::InternalServerError.code());
        to_http(fallback).unwrap_or_else(|_| HttpResponse::new(Full::new(Bytes::new())))
    })
}
