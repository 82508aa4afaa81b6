use axum::{
    extract::{
        rejection::PathRejection,
        Path,
        State,
    },
    http::{
        header,
        StatusCode,
    },
    response::{
        IntoResponse,
        Response,
    },
    routing,
    Router,
};
use starlookup_protocol::{
    model::star::StarId,
    ServicesList,
};

use crate::{
    context::Context,
    error::{
        Error,
        LookupError,
    },
};

pub fn router() -> Router<Context> {
    Router::new()
        .route("/", routing::any(get_services))
        .route("/star/:id", routing::any(get_star))
        .fallback(get_services)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "Internal server error");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
        };
        (status, self.to_string()).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Internal(#[from] Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Lookup(error) => error.into_response(),
            Self::Internal(error) => error.into_response(),
        }
    }
}

fn json_response(body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string()),
            (header::CONTENT_LENGTH, body.len().to_string()),
        ],
        body,
    )
        .into_response()
}

async fn get_services() -> Result<Response, Error> {
    let body = ServicesList::default().to_json()?;
    Ok(json_response(body))
}

async fn get_star(
    State(context): State<Context>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Response, ApiError> {
    // anything that isn't a star id gets the services list
    let Some(id) = id.ok().and_then(|Path(id)| id.parse::<StarId>().ok())
    else {
        return Ok(get_services().await?);
    };

    let star = context.gateway.lookup(id).await?.into_star();
    let body = star.to_json().map_err(Error::from)?;

    Ok(json_response(body))
}
