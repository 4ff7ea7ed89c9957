//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{MembersSettings, ServerConfig};

use state_builders::build_http_state;

use actix_web::body::MessageBody;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use members_api::Trace;
#[cfg(debug_assertions)]
use members_api::doc::ApiDoc;
use members_api::inbound::http::configure;
use members_api::inbound::http::health::HealthState;
use members_api::inbound::http::state::HttpState;
use members_api::middleware::AuthGate;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    auth: AuthGate,
}

#[cfg(debug_assertions)]
fn configure_docs(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
}

#[cfg(not(debug_assertions))]
const fn configure_docs(_cfg: &mut web::ServiceConfig) {}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        auth,
    } = deps;

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(auth)
        .wrap(Trace)
        .configure(configure)
        .configure(configure_docs)
}

/// Construct an Actix HTTP server from `config`.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        host,
        port,
        api_key,
        ..
    } = config;
    let auth = AuthGate::new(api_key);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            auth: auth.clone(),
        })
    })
    .bind((host.as_str(), port))?
    .run();

    health_state.mark_ready();
    Ok(server)
}
