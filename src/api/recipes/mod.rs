pub mod by_region;
pub mod get;
pub mod search;

use crate::models::Recipe;
use crate::schema::{ingredients, recipes_ingredients};
use crate::AppState;
use axum::routing::get;
use axum::Router;
use diesel::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for recipe endpoints (mounted at /recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search_recipes))
        .route("/region/{region}", get(by_region::recipes_by_region))
        .route("/{id}", get(get::get_recipe))
}

/// A recipe with its region name and full ingredient list, as returned by
/// search, point lookups, and the favorites list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub name: String,
    pub directions: String,
    pub region: Option<String>,
    pub ingredients: Vec<String>,
}

/// Attaches each recipe's ingredient names, preserving the input order.
/// One grouped query for the whole batch rather than a query per recipe.
pub fn attach_ingredients(
    conn: &mut PgConnection,
    rows: Vec<(Recipe, Option<String>)>,
) -> Result<Vec<RecipeResponse>, diesel::result::Error> {
    let ids: Vec<i32> = rows.iter().map(|(recipe, _)| recipe.id).collect();

    let name_rows: Vec<(i32, String)> = recipes_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipes_ingredients::recipe_id.eq_any(&ids))
        .order((
            recipes_ingredients::recipe_id.asc(),
            ingredients::name.asc(),
        ))
        .select((recipes_ingredients::recipe_id, ingredients::name))
        .load(conn)?;

    let mut by_recipe: HashMap<i32, Vec<String>> = HashMap::new();
    for (recipe_id, name) in name_rows {
        by_recipe.entry(recipe_id).or_default().push(name);
    }

    Ok(rows
        .into_iter()
        .map(|(recipe, region)| RecipeResponse {
            id: recipe.id,
            name: recipe.name,
            directions: recipe.directions,
            region,
            ingredients: by_recipe.remove(&recipe.id).unwrap_or_default(),
        })
        .collect())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        search::search_recipes,
        get::get_recipe,
        by_region::recipes_by_region,
    ),
    components(schemas(
        RecipeResponse,
        search::SearchResponse,
        by_region::RegionRecipesResponse,
    ))
)]
pub struct ApiDoc;
