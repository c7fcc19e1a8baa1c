//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, Storage};

pub use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::time::Duration;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::json_config;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::session_config::SessionSettings;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{auth, rentals};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Everything one worker's [`App`] needs.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags.
    pub health_state: web::Data<HealthState>,
    /// Driving ports consumed by the handlers.
    pub http_state: web::Data<HttpState>,
    /// Session cookie settings.
    pub session: SessionSettings,
}

fn session_middleware(settings: SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    let SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl_secs,
    } = settings;
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(Duration::seconds(ttl_secs)))
        .build()
}

/// Build the application: account and rental scopes, health probes, and
/// Swagger UI in debug builds, all behind the session and trace middleware.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(session_middleware(session))
        .wrap(Trace)
        .service(web::scope("/auth").configure(auth::configure))
        .service(web::scope("/rentals").configure(rentals::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        session,
        bind_addr,
        storage,
        ..
    } = config;
    let backend = match storage {
        Storage::Postgres(_) => "postgres",
        Storage::Memory(_) => "memory",
    };

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, storage = backend, "server listening");
    health_state.mark_ready();
    Ok(server)
}
