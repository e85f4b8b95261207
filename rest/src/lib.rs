use std::sync::Arc;

mod auth;
mod availability;
mod shift;
mod swap;

pub use auth::Context;

use axum::{body::Body, middleware, response::Response, Router};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    #[error("Service error")]
    ServiceError(#[from] service::ServiceError),
}

fn error_handler(result: Result<Response, RestError>) -> Response {
    match result {
        Ok(response) => response,
        Err(RestError::ServiceError(err @ service::ServiceError::ValidationError(_))) => {
            Response::builder()
                .status(400)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::TimeOrderWrong(_, _))) => {
            Response::builder()
                .status(400)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(service::ServiceError::Forbidden)) => {
            Response::builder().status(403).body(Body::empty()).unwrap()
        }
        Err(RestError::ServiceError(service::ServiceError::EntityNotFound(id))) => {
            Response::builder()
                .status(404)
                .body(Body::new(id.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::ShiftConflict { .. })) => {
            Response::builder()
                .status(409)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::EmployeeOnLeave { .. })) => {
            Response::builder()
                .status(409)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::SwapAlreadyResolved(_))) => {
            Response::builder()
                .status(409)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(service::ServiceError::DatabaseQueryError(err))) => {
            tracing::error!("Database error: {}", err);
            Response::builder()
                .status(500)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
        Err(RestError::ServiceError(err @ service::ServiceError::InternalError)) => {
            tracing::error!("Internal error");
            Response::builder()
                .status(500)
                .body(Body::new(err.to_string()))
                .unwrap()
        }
    }
}

pub trait RestStateDef: Clone + Send + Sync + 'static {
    type Transaction: dao::Transaction;
    type ShiftService: service::shift::ShiftService<Context = Context, Transaction = Self::Transaction>
        + Send
        + Sync
        + 'static;
    type AvailabilityService: service::availability::AvailabilityService<
            Context = Context,
            Transaction = Self::Transaction,
        > + Send
        + Sync
        + 'static;
    type SwapService: service::swap::SwapService<Context = Context, Transaction = Self::Transaction>
        + Send
        + Sync
        + 'static;

    fn shift_service(&self) -> Arc<Self::ShiftService>;
    fn availability_service(&self) -> Arc<Self::AvailabilityService>;
    fn swap_service(&self) -> Arc<Self::SwapService>;
}

pub async fn start_server<RestState: RestStateDef>(rest_state: RestState) {
    let app = Router::new()
        .nest("/shift", shift::generate_route())
        .nest("/availability", availability::generate_route())
        .nest("/swap", swap::generate_route())
        .layer(middleware::from_fn(auth::context_extractor))
        .with_state(rest_state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("Could not bind server");
    tracing::info!("Listening on 127.0.0.1:3000");
    axum::serve(listener, app)
        .await
        .expect("Could not start server");
}
