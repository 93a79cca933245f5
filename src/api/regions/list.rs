use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::regions;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegionsResponse {
    pub regions: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/regions",
    tag = "regions",
    responses(
        (status = 200, description = "All region names", body = RegionsResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_regions(State(pool): State<Arc<DbPool>>) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let names: Vec<String> = match regions::table
        .order(regions::id.asc())
        .select(regions::name)
        .load(&mut conn)
    {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("Failed to fetch regions: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch regions".to_string(),
                }),
            )
                .into_response();
        }
    };

    (StatusCode::OK, Json(RegionsResponse { regions: names })).into_response()
}
