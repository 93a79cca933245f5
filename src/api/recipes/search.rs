use crate::api::recipes::{attach_ingredients, RecipeResponse};
use crate::api::ErrorResponse;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::{Recipe, Region};
use crate::schema::{ingredients, recipes, recipes_ingredients, regions};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::dsl::exists;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Comma-separated ingredient names (required). Elements are trimmed;
    /// empty elements are ignored.
    pub ingredients: Option<String>,
    /// Exact region name to scope the search to. An unknown region yields
    /// an empty result, not an error.
    pub region: Option<String>,
    /// When true, only keep recipes whose entire ingredient set is contained
    /// in the requested list.
    pub exclusive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub recipes: Vec<RecipeResponse>,
}

/// How a `region` parameter scopes the candidate set.
#[derive(Debug, PartialEq)]
enum RegionScope {
    /// No region parameter: all recipes are candidates.
    Unscoped,
    /// Region resolved: only its recipes are candidates.
    Scoped(i32),
    /// Region name matched nothing: the result is deterministically empty,
    /// not an error.
    NoSuchRegion,
}

fn resolve_region_scope(
    lookup: Option<Result<Region, diesel::result::Error>>,
) -> Result<RegionScope, diesel::result::Error> {
    match lookup {
        None => Ok(RegionScope::Unscoped),
        Some(Ok(region)) => Ok(RegionScope::Scoped(region.id)),
        Some(Err(diesel::NotFound)) => Ok(RegionScope::NoSuchRegion),
        Some(Err(e)) => Err(e),
    }
}

fn parse_ingredient_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Phase one: recipes (optionally scoped to a region) with at least one
/// ingredient whose name is in the requested list. A correlated EXISTS
/// semi-join, so a recipe matching several requested ingredients still
/// appears once. Ordered by id for a stable response.
fn fetch_candidates(
    conn: &mut PgConnection,
    names: &[String],
    region_id: Option<i32>,
) -> Result<Vec<(Recipe, Option<String>)>, diesel::result::Error> {
    let mut query = recipes::table.left_join(regions::table).into_boxed();

    if let Some(region_id) = region_id {
        query = query.filter(recipes::region_id.eq(region_id));
    }

    query
        .filter(exists(
            recipes_ingredients::table
                .inner_join(ingredients::table)
                .filter(recipes_ingredients::recipe_id.eq(recipes::id))
                .filter(ingredients::name.eq_any(names)),
        ))
        .order(recipes::id.asc())
        .select((Recipe::as_select(), regions::name.nullable()))
        .load(conn)
}

/// Phase two (exclusive mode): keep only recipes whose full ingredient set
/// is a subset of the requested list. A recipe that needs even one
/// ingredient outside the list is dropped, no matter how many it shares.
/// This is deliberately in-memory: a subset condition over a many-to-many
/// join is not a simple existence predicate.
fn retain_exclusive(found: Vec<RecipeResponse>, requested: &[String]) -> Vec<RecipeResponse> {
    let requested: HashSet<&str> = requested.iter().map(String::as_str).collect();
    found
        .into_iter()
        .filter(|recipe| {
            recipe
                .ingredients
                .iter()
                .all(|name| requested.contains(name.as_str()))
        })
        .collect()
}

#[utoipa::path(
    get,
    path = "/recipes/search",
    tag = "recipes",
    params(SearchParams),
    responses(
        (status = 200, description = "Recipes matching the ingredient list", body = SearchResponse),
        (status = 400, description = "Missing ingredients parameter", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let requested = params
        .ingredients
        .as_deref()
        .map(parse_ingredient_list)
        .unwrap_or_default();

    if requested.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing required parameter: ingredients".to_string(),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let lookup = params.region.as_ref().map(|region_name| {
        regions::table
            .filter(regions::name.eq(region_name))
            .select(Region::as_select())
            .first(&mut conn)
    });

    let region_id = match resolve_region_scope(lookup) {
        Ok(RegionScope::Unscoped) => None,
        Ok(RegionScope::Scoped(id)) => Some(id),
        Ok(RegionScope::NoSuchRegion) => {
            return (
                StatusCode::OK,
                Json(SearchResponse {
                    recipes: Vec::new(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(region = ?params.region, "Failed to resolve region: {}", e);
            return fetch_failed();
        }
    };

    let candidates = match fetch_candidates(&mut conn, &requested, region_id) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(ingredients = ?requested, "Failed to fetch candidate recipes: {}", e);
            return fetch_failed();
        }
    };

    let mut found = match attach_ingredients(&mut conn, candidates) {
        Ok(found) => found,
        Err(e) => {
            tracing::error!(ingredients = ?requested, "Failed to fetch recipe ingredients: {}", e);
            return fetch_failed();
        }
    };

    let exclusive = params.exclusive.unwrap_or(false);
    if exclusive {
        found = retain_exclusive(found, &requested);
    }

    tracing::debug!(
        ingredients = ?requested,
        region = ?params.region,
        exclusive,
        matched = found.len(),
        "recipe search completed"
    );

    (StatusCode::OK, Json(SearchResponse { recipes: found })).into_response()
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

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i32, name: &str, ingredients: &[&str]) -> RecipeResponse {
        RecipeResponse {
            id,
            name: name.to_string(),
            directions: String::new(),
            region: None,
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_splits_and_trims() {
        assert_eq!(
            parse_ingredient_list("tomato, basil ,garlic,oil"),
            names(&["tomato", "basil", "garlic", "oil"])
        );
    }

    #[test]
    fn parse_drops_empty_elements() {
        assert_eq!(parse_ingredient_list("tomato,,  ,basil"), names(&["tomato", "basil"]));
        assert!(parse_ingredient_list("").is_empty());
        assert!(parse_ingredient_list(" , ,").is_empty());
    }

    #[test]
    fn exclusive_keeps_exact_match() {
        let marinara = recipe(1, "Marinara", &["tomato", "basil", "garlic", "oil"]);
        let requested = names(&["tomato", "basil", "garlic", "oil"]);
        let kept = retain_exclusive(vec![marinara], &requested);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "Marinara");
    }

    #[test]
    fn exclusive_drops_recipes_needing_unlisted_ingredients() {
        // Marinara matches "tomato" inclusively but needs three more
        // ingredients, so it is not a subset of the requested list.
        let marinara = recipe(1, "Marinara", &["tomato", "basil", "garlic", "oil"]);
        let kept = retain_exclusive(vec![marinara], &names(&["tomato"]));
        assert!(kept.is_empty());
    }

    #[test]
    fn exclusive_allows_unused_requested_ingredients() {
        // The requested list may be a strict superset of a recipe's
        // ingredients; the subset test only runs one way.
        let toast = recipe(2, "Garlic Toast", &["garlic", "oil"]);
        let kept = retain_exclusive(
            vec![toast],
            &names(&["tomato", "basil", "garlic", "oil"]),
        );
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn exclusive_result_is_subset_of_inclusive() {
        let inclusive = vec![
            recipe(1, "Marinara", &["tomato", "basil", "garlic", "oil"]),
            recipe(2, "Salsa Roja", &["tomato", "garlic", "oil", "chile", "onion", "lime"]),
            recipe(3, "Garlic Toast", &["garlic", "oil"]),
        ];
        let requested = names(&["tomato", "basil", "garlic", "oil"]);
        let exclusive = retain_exclusive(inclusive.clone(), &requested);

        let inclusive_ids: HashSet<i32> = inclusive.iter().map(|r| r.id).collect();
        for kept in &exclusive {
            assert!(inclusive_ids.contains(&kept.id));
            for name in &kept.ingredients {
                assert!(requested.contains(name));
            }
        }
        assert_eq!(
            exclusive.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let marinara = recipe(1, "Marinara", &["Tomato"]);
        let kept = retain_exclusive(vec![marinara], &names(&["tomato"]));
        assert!(kept.is_empty());
    }

    #[test]
    fn no_region_parameter_leaves_search_unscoped() {
        assert_eq!(resolve_region_scope(None), Ok(RegionScope::Unscoped));
    }

    #[test]
    fn resolved_region_scopes_candidates() {
        let italy = Region {
            id: 7,
            name: "Italy".to_string(),
        };
        assert_eq!(
            resolve_region_scope(Some(Ok(italy))),
            Ok(RegionScope::Scoped(7))
        );
    }

    #[test]
    fn unknown_region_is_empty_result_not_error() {
        assert_eq!(
            resolve_region_scope(Some(Err(diesel::NotFound))),
            Ok(RegionScope::NoSuchRegion)
        );
    }

    #[test]
    fn region_lookup_failure_propagates() {
        let result = resolve_region_scope(Some(Err(diesel::result::Error::BrokenTransactionManager)));
        assert!(result.is_err());
    }
}

/// End-to-end query tests against a live database. Run with a seeded
/// PostgreSQL instance: `DATABASE_URL=... cargo test -- --ignored`.
#[cfg(test)]
mod db_tests {
    use super::*;
    use crate::db;
    use crate::seed;

    fn seeded_pool() -> db::DbPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = db::create_pool(&url);
        seed::run(&pool).expect("Failed to seed sample data");
        pool
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    #[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
    fn region_scoping_narrows_results() {
        let pool = seeded_pool();
        let mut conn = pool.get().unwrap();
        let requested = names(&["tomato"]);

        let italy: Region = regions::table
            .filter(regions::name.eq("Italy"))
            .select(Region::as_select())
            .first(&mut conn)
            .unwrap();

        let all = fetch_candidates(&mut conn, &requested, None).unwrap();
        let scoped = fetch_candidates(&mut conn, &requested, Some(italy.id)).unwrap();

        let all_ids: Vec<i32> = all.iter().map(|(recipe, _)| recipe.id).collect();
        for (recipe, region) in &scoped {
            assert!(all_ids.contains(&recipe.id));
            assert_eq!(region.as_deref(), Some("Italy"));
        }

        let scoped_names: Vec<&str> = scoped.iter().map(|(r, _)| r.name.as_str()).collect();
        assert_eq!(scoped_names, vec!["Marinara", "Bolognese"]);
        assert!(all.iter().any(|(r, _)| r.name == "Salsa Roja"));
    }

    #[test]
    #[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
    fn unknown_region_yields_empty_result() {
        let pool = seeded_pool();
        let mut conn = pool.get().unwrap();

        let lookup = regions::table
            .filter(regions::name.eq("Atlantis"))
            .select(Region::as_select())
            .first(&mut conn);

        assert_eq!(
            resolve_region_scope(Some(lookup)),
            Ok(RegionScope::NoSuchRegion)
        );
    }

    #[test]
    #[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
    fn fetched_recipe_round_trips_its_ingredient_set() {
        let pool = seeded_pool();
        let mut conn = pool.get().unwrap();

        let row: (Recipe, Option<String>) = recipes::table
            .left_join(regions::table)
            .filter(recipes::name.eq("Marinara"))
            .select((Recipe::as_select(), regions::name.nullable()))
            .first(&mut conn)
            .unwrap();

        let found = attach_ingredients(&mut conn, vec![row]).unwrap();
        assert_eq!(found.len(), 1);
        // Alphabetical, the order attach_ingredients returns
        assert_eq!(found[0].ingredients, names(&["basil", "garlic", "oil", "tomato"]));
    }

    #[test]
    #[ignore = "requires a PostgreSQL instance via DATABASE_URL"]
    fn exclusive_search_drops_partial_matches() {
        let pool = seeded_pool();
        let mut conn = pool.get().unwrap();
        let requested = names(&["tomato", "basil", "garlic", "oil"]);

        let candidates = fetch_candidates(&mut conn, &requested, None).unwrap();
        let inclusive = attach_ingredients(&mut conn, candidates).unwrap();
        assert!(inclusive.iter().any(|r| r.name == "Salsa Roja"));

        let exclusive = retain_exclusive(inclusive, &requested);
        let kept: Vec<&str> = exclusive.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(kept, vec!["Marinara"]);
    }
}
