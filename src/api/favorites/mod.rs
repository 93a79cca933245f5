pub mod favorite;
pub mod list;

use crate::AppState;
use axum::routing::{get, put};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for favorites endpoints (bearer auth required)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/favorite", put(favorite::favorite_recipe))
        .route("/favorites", get(list::list_favorites))
}

#[derive(OpenApi)]
#[openapi(
    paths(favorite::favorite_recipe, list::list_favorites),
    components(schemas(
        favorite::FavoriteRequest,
        favorite::FavoriteResponse,
        list::FavoritesResponse,
    ))
)]
pub struct ApiDoc;
