use crate::api::recipes::{attach_ingredients, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::{recipes, regions, users_recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FavoritesResponse {
    pub recipes: Vec<RecipeResponse>,
}

#[utoipa::path(
    get,
    path = "/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "The user's favorited recipes with ingredients", body = FavoritesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_favorites(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<(Recipe, Option<String>)> = match users_recipes::table
        .inner_join(recipes::table.left_join(regions::table))
        .filter(users_recipes::user_id.eq(user.id))
        .order(recipes::id.asc())
        .select((Recipe::as_select(), regions::name.nullable()))
        .load(&mut conn)
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(user_id = user.id, "Failed to fetch favorites: {}", e);
            return fetch_failed();
        }
    };

    let found = match attach_ingredients(&mut conn, rows) {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(user_id = user.id, "Failed to fetch recipe ingredients: {}", e);
            return fetch_failed();
        }
    };

    (StatusCode::OK, Json(FavoritesResponse { recipes: found })).into_response()
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
