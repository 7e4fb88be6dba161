use axum::{
    Router,
    routing::{delete, get, post},
};
use axum_extra::headers::{Error as AxumError, Header};

use std::sync::Arc;

use crate::{members, plannings, profiles, services};
use engine::Engine;

static ADMIN_HEADER: axum::http::HeaderName = axum::http::HeaderName::from_static("x-admin-id");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// `TypedHeader` for the acting administrator.
///
/// Authentication happens upstream; the header only carries the identity
/// recorded as `created_by` / `added_by`.
#[derive(Debug)]
pub(crate) struct AdminHeader(pub String);

impl Header for AdminHeader {
    fn name() -> &'static axum::http::HeaderName {
        &ADMIN_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(AxumError::invalid());
        }

        Ok(AdminHeader(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-admin-id header"),
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/health", get(health))
        .route(
            "/services",
            get(services::list).post(services::create),
        )
        .route("/services/{id}", axum::routing::patch(services::update))
        .route("/services/{id}/active", post(services::set_active))
        .route("/profiles", get(profiles::search).post(profiles::create))
        .route(
            "/services/{id}/members",
            get(members::list).post(members::add),
        )
        .route("/services/{id}/members/available", get(members::available))
        .route("/members/{id}", delete(members::remove))
        .route("/services/{id}/board", get(plannings::board))
        .route("/services/{id}/plannings", get(plannings::by_date))
        .route(
            "/services/{id}/plannings/quick-edit",
            post(plannings::quick_edit),
        )
        .route("/services/{id}/plannings/export", get(plannings::export))
        .route("/plannings/{id}", delete(plannings::remove))
        .with_state(state)
}

pub async fn run(engine: Engine, bind: &str, port: u16) {
    let listener = match tokio::net::TcpListener::bind((bind, port)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
