// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Plain HTTP endpoint serving `/metrics` and `/livez`

use crate::error::Result;
use crate::metrics::SltMetrics;
use bytes::Bytes;
use http::{header, Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

pub async fn serve(addr: SocketAddr, metrics: SltMetrics) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Serving /metrics and /livez on {}", listener.local_addr()?);
    serve_listener(listener, metrics).await
}

/// Accept connections on an already bound listener until an accept error occurs
pub async fn serve_listener(listener: TcpListener, metrics: SltMetrics) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        let metrics = metrics.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: Request<hyper::body::Incoming>| {
                let response = route(req.method(), req.uri().path(), &metrics);
                async move { Ok::<_, Infallible>(response) }
            });

            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                debug!("Connection from {} closed with error: {}", peer, e);
            }
        });
    }
}

fn route(method: &Method, path: &str, metrics: &SltMetrics) -> Response<Full<Bytes>> {
    let path = normalize_path(path);
    match (method, path) {
        (&Method::GET, "/metrics") => match metrics.encode_text() {
            Ok(body) => respond(StatusCode::OK, metrics.content_type(), body),
            Err(e) => {
                error!("Failed to encode metrics: {}", e);
                respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "text/plain",
                    format!("Failed to encode metrics: {}", e),
                )
            }
        },
        (&Method::GET, "/livez") => respond(StatusCode::OK, "text/plain", "OK".to_string()),
        (_, "/metrics" | "/livez") => respond(
            StatusCode::METHOD_NOT_ALLOWED,
            "text/plain",
            "Method Not Allowed".to_string(),
        ),
        _ => respond(StatusCode::NOT_FOUND, "text/plain", "Not Found".to_string()),
    }
}

/// Strip trailing slashes, keeping the root path intact
fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn respond(status: StatusCode, content_type: &str, body: String) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::from(body)));
    *response.status_mut() = status;
    if let Ok(value) = header::HeaderValue::from_str(content_type) {
        response.headers_mut().insert(header::CONTENT_TYPE, value);
    }
    response
}
