use axum::body::Body;
use axum::extract::{Path, State};
use axum::routing::{post, put};
use axum::{Extension, Json, Router};
use rest_types::{SwapCandidateTO, SwapRequestTO, SwapStatusUpdateTO};
use service::swap::SwapService;
use uuid::Uuid;

use crate::{error_handler, Context, RestStateDef};

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new()
        .route("/", post(request_swap::<RestState>))
        .route("/{id}/status", put(update_swap_status::<RestState>))
}

pub async fn request_swap<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Json(candidate): Json<SwapCandidateTO>,
) -> axum::response::Response {
    error_handler(
        (async {
            let swap = rest_state
                .swap_service()
                .request_swap(&(&candidate).into(), context.into(), None)
                .await?;
            Ok(axum::response::Response::builder()
                .status(201)
                .body(Body::new(
                    serde_json::to_string(&SwapRequestTO::from(&swap)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}

pub async fn update_swap_status<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Path(id): Path<Uuid>,
    Json(update): Json<SwapStatusUpdateTO>,
) -> axum::response::Response {
    error_handler(
        (async {
            let swap = rest_state
                .swap_service()
                .update_swap_status(id, update.status.into(), context.into(), None)
                .await?;
            Ok(axum::response::Response::builder()
                .status(200)
                .body(Body::new(
                    serde_json::to_string(&SwapRequestTO::from(&swap)).unwrap(),
                ))
                .unwrap())
        })
        .await,
    )
}
