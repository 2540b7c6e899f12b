use actix_web::dev::ServiceResponse;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::{HttpResponse, ResponseError};
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unable to read config file {path}: {source}")]
  ConfigRead {
    path: String,
    #[source]
    source: io::Error,
  },

  #[error("unable to parse config file {path}: {source}")]
  ConfigParse {
    path: String,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("unknown track piece {0}")]
  UnknownPiece(String),

  #[error(transparent)]
  Json(#[from] serde_json::Error),

  #[error("server error: {0}")]
  Io(#[from] io::Error),
}

/// Errors returned by the grid update endpoint, rendered as plain text.
#[derive(Debug, Error)]
pub enum GridError {
  #[error("Invalid request method")]
  MethodNotAllowed,

  #[error("Invalid request body")]
  InvalidBody,

  #[error("Internal server error")]
  Internal,
}

impl ResponseError for GridError {
  fn status_code(&self) -> StatusCode {
    match self {
      GridError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
      GridError::InvalidBody => StatusCode::BAD_REQUEST,
      GridError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    plain_text(self.status_code(), &self.to_string())
  }
}

pub fn plain_text(status: StatusCode, message: &str) -> HttpResponse {
  HttpResponse::build(status)
    .content_type(ContentType(mime::TEXT_PLAIN_UTF_8))
    .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
    .body(format!("{}\n", message))
}

/// Renders every 4xx/5xx response as plain text, including the ones actix
/// and actix-files produce on their own (payload limit, bad path segments,
/// unsupported methods on static files).
pub fn plain_text_errors<B: 'static>() -> ErrorHandlers<B> {
  ErrorHandlers::new().default_handler(render_plain_text)
}

fn render_plain_text<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
  // already rendered by plain_text
  if res.headers().contains_key(header::X_CONTENT_TYPE_OPTIONS) {
    return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
  }
  let status = res.status();
  let (req, _) = res.into_parts();
  let res = plain_text(status, status.canonical_reason().unwrap_or("Error"));
  Ok(ErrorHandlerResponse::Response(ServiceResponse::new(req, res).map_into_right_body()))
}
