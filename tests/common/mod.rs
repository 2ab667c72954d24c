//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use session_probe::config::ProbeConfig;
use session_probe::http::HttpServer;

/// Start a probe server on an ephemeral port and return its address.
pub async fn spawn_probe() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(ProbeConfig::default());

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// Extract the `name=value` part of the session cookie, if one was set.
#[allow(dead_code)]
pub fn session_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}
