//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};

use workout_log::Trace;
use workout_log::domain::WorkoutLogService;
use workout_log::inbound::http::error::route_not_found;
use workout_log::inbound::http::health::{HealthState, live, ready};
use workout_log::inbound::http::state::HttpState;
use workout_log::inbound::http::workouts::{add_workout, home, list_workouts};
use workout_log::outbound::memory::InMemoryWorkoutRepository;

/// Name of the cookie carrying the session, and with it any flash messages.
const SESSION_COOKIE: &str = "session";

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
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
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session)
        .wrap(Trace)
        .service(home)
        .service(add_workout)
        .service(list_workouts)
        .service(ready)
        .service(live)
        .default_service(web::to(route_not_found))
}

/// Workout service backed by a fresh in-memory store for this process.
fn build_http_state() -> web::Data<HttpState> {
    let service = WorkoutLogService::new(
        Arc::new(InMemoryWorkoutRepository::new()),
        Arc::new(DefaultClock),
    );
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Every worker shares one store, so records added through any worker are
/// visible to all. The health state is marked ready once the socket is bound.
/// Actix's own signal handling is disabled; pair the server with
/// [`drain_on_shutdown`] so liveness fails before the listener closes.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state();
    let bind_addr = config.bind_addr();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    info!(%bind_addr, "workout log listening");
    Ok(server)
}

/// Fail liveness, then stop the server once in-flight requests finish.
pub async fn drain(health_state: web::Data<HealthState>, handle: ServerHandle) {
    health_state.mark_unhealthy();
    info!("draining workout log");
    handle.stop(true).await;
}

async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Wait for Ctrl-C or `SIGTERM`, then [`drain`] the server.
pub async fn drain_on_shutdown(health_state: web::Data<HealthState>, handle: ServerHandle) {
    if let Err(err) = shutdown_signal().await {
        warn!(error = %err, "shutdown signal unavailable; stopping now");
    }
    drain(health_state, handle).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use workout_log::inbound::http::session_config::SessionSettings;

    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn routes_are_wired_with_trace_and_session() {
        let app = actix_test::init_service(build_app(deps())).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/add")
                .set_form([("workout", "Run"), ("duration", "30")])
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert!(res.headers().contains_key("trace-id"));
        let cookie = res
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .map(|c| c.into_owned())
            .expect("session cookie");
        assert!(cookie.http_only().unwrap_or(false));

        let rendered = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        let body = actix_test::read_body(rendered).await;
        assert!(String::from_utf8_lossy(&body).contains("&#39;Run&#39; added successfully!"));

        let listing =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/workouts").to_request()).await;
        let body = actix_test::read_body(listing).await;
        assert!(String::from_utf8_lossy(&body).contains("<td>Run</td>"));
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_paths_are_not_found() {
        let app = actix_test::init_service(build_app(deps())).await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/missing").to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_is_reported_before_binding() {
        let app = actix_test::init_service(build_app(deps())).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[rstest]
    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new());
        let session = SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        };
        let bind_addr = "127.0.0.1:0".parse().expect("valid socket address");
        let server = create_server(health_state.clone(), ServerConfig::new(session, bind_addr))
            .expect("server binds");
        assert!(health_state.is_ready());
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain(health_state.clone(), handle).await;

        assert!(!health_state.is_alive());
        let stopped = tokio::time::timeout(std::time::Duration::from_secs(5), running)
            .await
            .expect("server stops after draining")
            .expect("server task joins");
        assert!(stopped.is_ok());
    }
}
