use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{debug, info};

/// Logs method, URI and resulting status of every request.
pub async fn request_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    debug!(%method, %uri, "Received request.");

    let response = next.run(req).await;

    info!(%method, %uri, status = response.status().as_u16(), "Request handled.");
    response
}
