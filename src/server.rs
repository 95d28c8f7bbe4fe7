//! HTTP server - enhancement API and embedded Web UI

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::contract::{EnhanceRequest, ErrorEnvelope, HealthResponse};
use crate::enhancer::{EnhancementEngine, WEB_UI_HTML};

/// Prompt Enhancer HTTP server
///
/// Routes:
/// - `GET /` serves the embedded single-page UI
/// - `POST /api/enhance` runs the enhancement engine
/// - `GET /api/health` liveness probe
pub struct AppServer {
    config: Arc<Config>,
    engine: Arc<EnhancementEngine>,
    listen_addr: SocketAddr,
    local_addr: Arc<RwLock<Option<SocketAddr>>>,
    running: Arc<RwLock<bool>>,
}

impl AppServer {
    pub fn new(config: Arc<Config>, listen_addr: SocketAddr) -> Self {
        let engine = Arc::new(EnhancementEngine::new(config.cost_per_1k_tokens_usd));
        Self {
            config,
            engine,
            listen_addr,
            local_addr: Arc::new(RwLock::new(None)),
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Start the HTTP server and return the address it actually bound.
    ///
    /// If the requested port is taken, the next ports are tried in order;
    /// port 0 asks the OS for a free one. Calling `start` again while the
    /// server runs just returns the bound address.
    pub async fn start(&self) -> Result<SocketAddr> {
        {
            let mut running = self.running.write().await;
            if *running {
                if let Some(addr) = *self.local_addr.read().await {
                    return Ok(addr);
                }
                return Err(anyhow!("Server is already starting"));
            }
            *running = true;
        }

        let mut addr = self.listen_addr;
        let mut listener: Option<TcpListener> = None;

        // Try to bind, incrementing the port if it is in use
        for _ in 0..100 {
            match TcpListener::bind(addr).await {
                Ok(l) => {
                    listener = Some(l);
                    break;
                }
                Err(e) => {
                    let next_port = addr.port().checked_add(1);
                    if e.kind() == std::io::ErrorKind::AddrInUse && addr.port() != 0 {
                        match next_port {
                            Some(port) => {
                                warn!("Port {} is in use, trying {}", addr.port(), port);
                                addr.set_port(port);
                            }
                            None => {
                                let mut running = self.running.write().await;
                                *running = false;
                                return Err(anyhow!("Could not find available port"));
                            }
                        }
                    } else {
                        let mut running = self.running.write().await;
                        *running = false;
                        return Err(anyhow!("Failed to bind to {}: {}", addr, e));
                    }
                }
            }
        }

        let listener = match listener {
            Some(l) => l,
            None => {
                let mut running = self.running.write().await;
                *running = false;
                return Err(anyhow!("Could not find available port"));
            }
        };

        let local_addr = listener.local_addr()?;
        {
            let mut stored = self.local_addr.write().await;
            *stored = Some(local_addr);
        }

        info!("Prompt Enhancer server started: http://{}", local_addr);

        // Clone references for the server task
        let engine = self.engine.clone();
        let config = self.config.clone();

        // Spawn server task
        tokio::spawn(async move {
            loop {
                let (stream, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        error!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let io = TokioIo::new(stream);
                let engine = engine.clone();
                let config = config.clone();

                tokio::spawn(async move {
                    let service = service_fn(|req| {
                        let engine = engine.clone();
                        let config = config.clone();
                        async move { handle_request(req, engine, config).await }
                    });

                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        if !e.to_string().contains("connection closed") {
                            error!("Error serving connection: {}", e);
                        }
                    }
                });
            }
        });

        Ok(local_addr)
    }

    /// Address the server bound, once started
    pub async fn local_addr(&self) -> Option<SocketAddr> {
        *self.local_addr.read().await
    }
}

/// Handle HTTP request
async fn handle_request(
    req: Request<Incoming>,
    engine: Arc<EnhancementEngine>,
    config: Arc<Config>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    // Handle CORS preflight
    if method == Method::OPTIONS {
        return Ok(cors_response(
            Response::builder()
                .status(StatusCode::OK)
                .body(Full::new(Bytes::new()))
                .unwrap(),
        ));
    }

    let response = match (method, path.as_str()) {
        (Method::GET, "/") => serve_ui(),
        (Method::GET, "/api/health") => handle_health(&config),
        (Method::POST, "/api/enhance") => handle_enhance(req, engine, &config).await,
        _ => json_error_response(StatusCode::NOT_FOUND, "Not Found"),
    };

    Ok(cors_response(response))
}

/// Add CORS headers (restricted to localhost only)
fn cors_response(mut response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    headers.insert(
        "Access-Control-Allow-Origin",
        "http://localhost".parse().unwrap(),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        "GET, POST, OPTIONS".parse().unwrap(),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        "Content-Type, x-request-id".parse().unwrap(),
    );
    response
}

/// Serve Web UI HTML
fn serve_ui() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Full::new(Bytes::from(WEB_UI_HTML)))
        .unwrap()
}

/// Liveness probe
fn handle_health(config: &Config) -> Response<Full<Bytes>> {
    let health = HealthResponse::ok(config.service_name.clone());
    json_response(StatusCode::OK, &serde_json::to_string(&health).unwrap())
}

/// Run the enhancement engine over a posted request
async fn handle_enhance(
    req: Request<Incoming>,
    engine: Arc<EnhancementEngine>,
    config: &Config,
) -> Response<Full<Bytes>> {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    let started = Instant::now();

    let body = match read_body_with_limit(req, config.max_body_bytes).await {
        Ok(b) => b,
        Err(e) => {
            return json_error_response(StatusCode::BAD_REQUEST, &e);
        }
    };

    let request: EnhanceRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!("Rejected enhance request body: {}", e);
            return json_error_response(StatusCode::BAD_REQUEST, "Invalid request body");
        }
    };

    match engine.enhance(&request) {
        Ok(response) => {
            info!(
                "Enhanced prompt in {}ms: role={}, level={}, tokens {} -> {}{}",
                started.elapsed().as_millis(),
                request.user_role,
                request.optimization_level,
                response.original_tokens,
                response.enhanced_tokens,
                request_id
                    .map(|id| format!(" (request {})", id))
                    .unwrap_or_default(),
            );
            json_response(StatusCode::OK, &serde_json::to_string(&response).unwrap())
        }
        Err(e) if e.is_validation() => {
            json_error_response(StatusCode::BAD_REQUEST, &e.user_message())
        }
        Err(e) => {
            // Detail stays in the log; the wire gets a generic message
            error!("Enhancement failed: {}", e);
            json_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// Read request body with size limit (streaming enforcement to prevent memory exhaustion)
async fn read_body_with_limit(req: Request<Incoming>, max_size: usize) -> Result<Bytes, String> {
    let limited = Limited::new(req.into_body(), max_size);
    match limited.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            let err_str = e.to_string();
            if err_str.contains("length limit exceeded") {
                Err(format!("Request body too large (max {} bytes)", max_size))
            } else {
                Err("Failed to read body".to_string())
            }
        }
    }
}

/// Create JSON error response in the `{"success": false, "error": ...}` envelope
fn json_error_response(status: StatusCode, error: &str) -> Response<Full<Bytes>> {
    let body = serde_json::to_string(&ErrorEnvelope::new(error)).unwrap();
    json_response(status, &body)
}

/// Create JSON response
fn json_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap()
}
