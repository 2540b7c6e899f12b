use actix_files::Files;
use actix_web::dev::{fn_service, ServiceRequest, ServiceResponse};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use clap::Parser;
use log::{info, warn};
use std::path::Path;
use tokio::runtime::Runtime;

use crate::config::ServerConfig;
use crate::error::{plain_text, plain_text_errors, Error, GridError};
use crate::models::{decode_grid_update, GridUpdateResponse};

pub const GRID_UPDATE_PATH: &str = "/api/grid/update";

#[derive(Parser)]
pub struct ServeCommand {
  // Port to listen on
  #[clap(long)]
  port: Option<u16>,

  // Host to listen on
  #[clap(long)]
  host: Option<String>,

  // Directory to serve static files from
  #[clap(long)]
  static_dir: Option<String>,

  // YAML config file, flags take precedence
  #[clap(long)]
  config: Option<String>,
}

impl ServeCommand {
  pub fn execute(&self) -> Result<(), Error> {
    let config = self.resolve_config()?;
    if !static_dir_exists(&config) {
      warn!("static directory {} does not exist, only the API will be served", config.static_dir);
    }

    let rt = Runtime::new()?;
    rt.block_on(server(config))?;
    Ok(())
  }

  fn resolve_config(&self) -> Result<ServerConfig, Error> {
    let mut config = match &self.config {
      Some(path) => ServerConfig::load(path)?,
      None => ServerConfig::default(),
    };
    if let Some(port) = self.port {
      config.port = port;
    }
    if let Some(host) = &self.host {
      config.host = host.clone();
    }
    if let Some(static_dir) = &self.static_dir {
      config.static_dir = static_dir.clone();
    }
    Ok(config)
  }
}

async fn grid_update(body: web::Bytes) -> Result<HttpResponse, GridError> {
  let states = decode_grid_update(&body).map_err(|err| {
    info!("rejecting grid update: {}", err);
    GridError::InvalidBody
  })?;

  info!("Received grid update:");
  for state in states.iter().flatten() {
    info!("{}", state);
  }

  let mut payload = serde_json::to_vec(&GridUpdateResponse::new(states)).map_err(|err| {
    warn!("unable to encode grid update response: {}", err);
    GridError::Internal
  })?;
  payload.push(b'\n');
  Ok(HttpResponse::Ok()
    .content_type(ContentType(mime::APPLICATION_JSON))
    .body(payload))
}

async fn method_not_allowed() -> Result<HttpResponse, GridError> {
  Err(GridError::MethodNotAllowed)
}

async fn not_found(req: ServiceRequest) -> Result<ServiceResponse, actix_web::Error> {
  let (req, _) = req.into_parts();
  let res = plain_text(StatusCode::NOT_FOUND, "404 page not found");
  Ok(ServiceResponse::new(req, res))
}

fn static_dir_exists(config: &ServerConfig) -> bool {
  Path::new(&config.static_dir).is_dir()
}

fn static_files(config: &ServerConfig) -> Files {
  let files = Files::new("/", &config.static_dir)
    .index_file(config.index_file.clone())
    .redirect_to_slash_directory()
    .default_handler(fn_service(not_found));
  if config.show_listing {
    files.show_files_listing()
  } else {
    files
  }
}

/// Registers the grid endpoint and the static file fallback. The static
/// service is mounted at the root, so it has to come last.
pub fn routes(cfg: &mut web::ServiceConfig, config: &ServerConfig) {
  cfg.service(
    web::resource(GRID_UPDATE_PATH)
      .app_data(web::PayloadConfig::new(config.payload_limit))
      .route(web::post().to(grid_update))
      .default_service(web::to(method_not_allowed)),
  );
  // actix-files falls back to the working directory when its root does not
  // exist, so it is only mounted on a real directory
  if static_dir_exists(config) {
    cfg.service(static_files(config));
  } else {
    cfg.default_service(fn_service(not_found));
  }
}

async fn server(config: ServerConfig) -> std::io::Result<()> {
  info!("Listening on {}:{}...", config.host, config.port);
  let bind = (config.host.clone(), config.port);
  HttpServer::new(move || {
      App::new()
        .wrap(plain_text_errors())
        .wrap(middleware::Logger::default())
        .configure(|cfg| routes(cfg, &config))
  })
  .bind(bind)?
  .run()
  .await
}
