use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Extension, Router};
use rest_types::StaffAvailabilityTO;
use serde::Deserialize;
use service::availability::AvailabilityService;

use crate::{error_handler, Context, RestStateDef};

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQueryTO {
    pub date: time::Date,
    #[serde(default)]
    pub department: Option<Arc<str>>,
}

pub fn generate_route<RestState: RestStateDef>() -> Router<RestState> {
    Router::new().route("/", get(get_availability::<RestState>))
}

pub async fn get_availability<RestState: RestStateDef>(
    rest_state: State<RestState>,
    Extension(context): Extension<Context>,
    Query(query): Query<AvailabilityQueryTO>,
) -> axum::response::Response {
    error_handler(
        (async {
            let report: Arc<[StaffAvailabilityTO]> = rest_state
                .availability_service()
                .get_availability(query.date, query.department.clone(), context.into(), None)
                .await?
                .iter()
                .map(StaffAvailabilityTO::from)
                .collect();
            Ok(axum::response::Response::builder()
                .status(200)
                .body(Body::new(serde_json::to_string(&report).unwrap()))
                .unwrap())
        })
        .await,
    )
}
