use crate::api::recipes::{attach_ingredients, RecipeResponse};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::{recipes, regions};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::prelude::*;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = i32, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe with its ingredients", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let row: (Recipe, Option<String>) = match recipes::table
        .left_join(regions::table)
        .filter(recipes::id.eq(id))
        .select((Recipe::as_select(), regions::name.nullable()))
        .first(&mut conn)
    {
        Ok(row) => row,
        Err(diesel::NotFound) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "Recipe not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(recipe_id = id, "Failed to fetch recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes.".to_string(),
                }),
            )
                .into_response();
        }
    };

    let mut found = match attach_ingredients(&mut conn, vec![row]) {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(recipe_id = id, "Failed to fetch recipe ingredients: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes.".to_string(),
                }),
            )
                .into_response();
        }
    };

    // attach_ingredients preserves its single input row
    let recipe = found.remove(0);

    (StatusCode::OK, Json(recipe)).into_response()
}
