pub mod list;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

pub fn router() -> Router<AppState> {
    Router::new().route("/regions", get(list::list_regions))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_regions),
    components(schemas(list::RegionsResponse))
)]
pub struct ApiDoc;
