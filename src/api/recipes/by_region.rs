use crate::api::recipes::{attach_ingredients, RecipeResponse};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Recipe, Region};
use crate::schema::{recipes, regions};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegionRecipesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/recipes/region/{region}",
    tag = "recipes",
    params(
        ("region" = String, Path, description = "Region name, matched exactly")
    ),
    responses(
        (status = 200, description = "Recipes belonging to the region", body = RegionRecipesResponse),
        (status = 404, description = "Region not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn recipes_by_region(
    State(pool): State<Arc<DbPool>>,
    Path(region_name): Path<String>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let region: Region = match regions::table
        .filter(regions::name.eq(&region_name))
        .select(Region::as_select())
        .first(&mut conn)
    {
        Ok(region) => region,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Region not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(region = %region_name, "Failed to resolve region: {}", e);
            return fetch_failed();
        }
    };

    let rows: Vec<Recipe> = match recipes::table
        .filter(recipes::region_id.eq(region.id))
        .order(recipes::id.asc())
        .select(Recipe::as_select())
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(region = %region_name, "Failed to fetch region recipes: {}", e);
            return fetch_failed();
        }
    };

    let rows = rows
        .into_iter()
        .map(|recipe| (recipe, Some(region.name.clone())))
        .collect();

    let found = match attach_ingredients(&mut conn, rows) {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(region = %region_name, "Failed to fetch recipe ingredients: {}", e);
            return fetch_failed();
        }
    };

    (
        StatusCode::OK,
        Json(RegionRecipesResponse { recipes: found }),
    )
        .into_response()
}

fn fetch_failed() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "Failed to fetch recipes.".to_string(),
        }),
    )
        .into_response()
}
