use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post, put};
use axum::{Extension, Json, Router};
use rest_types::{BulkCreateRequestTO, BulkResultTO, ShiftCandidateTO, ShiftPatchTO, ShiftTO};
use serde::Deserialize;
use service::shift::ShiftService;
use uuid::Uuid;

use crate::{error_handler, Context, RestStateDef};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShiftQueryTO {
    #[serde(default)]
    pub from: Option<time::Date>,
    #[serde(default)]
    pub to: Option<time::Date>,
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    #[serde(default)]
    pub department: Option<Arc<str>>,
}
impl From<&ShiftQueryTO> for service::shift::ShiftQuery {
    fn from(query: &ShiftQueryTO) -> Self {
        Self {
            from: query.from,
            to: query.to,
            employee_id: query.employee_id,
            department: query.department.clone(),
        }
    }
}

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/", get(get_shifts::<RestState>))
        .route("/{id}", get(get_shift::<RestState>))
        .route("/", post(create_shift::<RestState>))
        .route("/bulk", post(create_bulk::<RestState>))
        .route("/{id}", put(update_shift::<RestState>))
        .route("/{id}", delete(delete_shift::<RestState>))
}

pub async fn get_shifts<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(query): Query<ShiftQueryTO>,
) -> axum::response::Response {
    error_handler(
        (async {
            let shifts: Arc<[ShiftTO]> = rest_state
                .shift_service()
                .get_shifts(&(&query).into(), context.into(), None)
                .await?
                .iter()
                .map(ShiftTO::from)
                .collect();
            Ok(axum::response::Response::builder()
                .status(200)
                .body(Body::new(serde_json::to_string(&shifts).unwrap()))
                .unwrap())
        })
        .await,
    )
}

pub async fn get_shift<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    error_handler(
        (async {
            let shift = rest_state
                .shift_service()
                .get_shift(id, context.into(), None)
                .await?;
            Ok(axum::response::Response::builder()
                .status(200)
                .body(Body::new(
                    serde_json::to_string(&ShiftTO::from(&shift)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn create_shift<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Json(candidate): Json<ShiftCandidateTO>,
) -> axum::response::Response {
    error_handler(
        (async {
            let shift = rest_state
                .shift_service()
                .create_shift(&(&candidate).into(), context.into(), None)
                .await?;
            Ok(axum::response::Response::builder()
                .status(201)
                .body(Body::new(
                    serde_json::to_string(&ShiftTO::from(&shift)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn create_bulk<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Json(request): Json<BulkCreateRequestTO>,
) -> axum::response::Response {
    error_handler(
        (async {
            let candidates: Vec<service::shift::ShiftCandidate> = request
                .shifts
                .iter()
                .map(service::shift::ShiftCandidate::from)
                .collect();
            let result = rest_state
                .shift_service()
                .create_bulk(&candidates, context.into(), None)
                .await?;
            Ok(axum::response::Response::builder()
                .status(200)
                .body(Body::new(
                    serde_json::to_string(&BulkResultTO::from(&result)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn update_shift<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ShiftPatchTO>,
) -> axum::response::Response {
    error_handler(
        (async {
            let shift = rest_state
                .shift_service()
                .update_shift(id, &(&patch).into(), context.into(), None)
                .await?;
            Ok(axum::response::Response::builder()
                .status(200)
                .body(Body::new(
                    serde_json::to_string(&ShiftTO::from(&shift)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn delete_shift<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(id): Path<Uuid>,
) -> axum::response::Response {
    error_handler(
        (async {
            rest_state
                .shift_service()
                .delete_shift(id, context.into(), None)
                .await?;
            Ok(axum::response::Response::builder()
                .status(204)
                .body(Body::empty())
                .unwrap())
        })
        .await,
    )
}
