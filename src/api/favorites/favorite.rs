use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewUserRecipe;
use crate::schema::{recipes, users_recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub recipe_id: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub recipe_id: i32,
}

#[utoipa::path(
    put,
    path = "/favorite",
    tag = "favorites",
    request_body(content = FavoriteRequest, example = json!({"recipeId": 1})),
    responses(
        (status = 200, description = "Recipe favorited (idempotent)", body = FavoriteResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn favorite_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(req): Json<FavoriteRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let recipe_exists: bool = match diesel::select(diesel::dsl::exists(
        recipes::table.filter(recipes::id.eq(req.recipe_id)),
    ))
    .get_result(&mut conn)
    {
        Ok(exists) => exists,
        Err(e) => {
            tracing::error!(recipe_id = req.recipe_id, "Failed to check recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to favorite recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    if !recipe_exists {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    // Re-favoriting is a no-op thanks to the unique (user_id, recipe_id) pair
    let link = NewUserRecipe {
        user_id: user.id,
        recipe_id: req.recipe_id,
    };

    if let Err(e) = diesel::insert_into(users_recipes::table)
        .values(&link)
        .on_conflict((users_recipes::user_id, users_recipes::recipe_id))
        .do_nothing()
        .execute(&mut conn)
    {
        tracing::error!(
            user_id = user.id,
            recipe_id = req.recipe_id,
            "Failed to favorite recipe: {}",
            e
        );
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Failed to favorite recipe".to_string(),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(FavoriteResponse {
            recipe_id: req.recipe_id,
        }),
    )
        .into_response()
}
