use axum::{extract::Request, middleware::Next, response::Response};

/// Middlware to trace incoming and outgoing headers.
pub async fn trace_headers(req: Request, next: Next) -> Response {
    let incoming_headers = req.headers();
    tracing::trace!(?incoming_headers, "Headers");

    let response = next.run(req).await;

    let outgoing_headers = response.headers();
    tracing::trace!(?outgoing_headers, "Headers");

    response
}
