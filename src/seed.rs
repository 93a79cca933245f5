use crate::db::DbPool;
use crate::models::{NewIngredient, NewRecipe, NewRecipeIngredient, NewRegion};
use crate::schema::{ingredients, recipes, recipes_ingredients, regions, users_recipes};
use diesel::prelude::*;
use std::collections::HashMap;

const INGREDIENT_NAMES: &[&str] = &[
    "tomato", "basil", "garlic", "oil", "potato", "cheese", "chile", "cabbage", "meat", "onion",
    "lime", "stock", "milk", "flour", "salt", "sugar", "celery", "carrot",
];

const REGION_NAMES: &[&str] = &["Italy", "Korea", "Mexico", "Canada", "France"];

/// (name, directions, region, ingredients)
const RECIPES: &[(&str, &str, &str, &[&str])] = &[
    (
        "Marinara",
        "Make some sauce",
        "Italy",
        &["tomato", "basil", "garlic", "oil"],
    ),
    (
        "Salsa Roja",
        "Deseed and toast smoked chile, char other vegetables, blend chiles and vegetables \
         with oil and lime juice, add salt",
        "Mexico",
        &["tomato", "garlic", "oil", "chile", "onion", "lime"],
    ),
    (
        "Bolognese",
        "Sweat onion, celery and carrot, brown the meat, simmer everything in tomato",
        "Italy",
        &["tomato", "meat", "onion", "celery", "carrot", "oil"],
    ),
    (
        "Bechamel",
        "Cook flour in fat, whisk in warm milk, season with salt",
        "France",
        &["milk", "flour", "salt"],
    ),
];

/// Replaces the catalog tables with the sample data set. Users and sessions
/// are left alone; favorites are cleared because the recipes they point at
/// are replaced.
pub fn run(pool: &DbPool) -> Result<(), diesel::result::Error> {
    let mut conn = pool
        .get()
        .expect("Failed to get DB connection for seeding");

    conn.transaction(|conn| {
        diesel::delete(users_recipes::table).execute(conn)?;
        diesel::delete(recipes_ingredients::table).execute(conn)?;
        diesel::delete(recipes::table).execute(conn)?;
        diesel::delete(regions::table).execute(conn)?;
        diesel::delete(ingredients::table).execute(conn)?;

        let mut ingredient_ids: HashMap<&str, i32> = HashMap::new();
        for &name in INGREDIENT_NAMES {
            let id: i32 = diesel::insert_into(ingredients::table)
                .values(NewIngredient { name })
                .returning(ingredients::id)
                .get_result(conn)?;
            ingredient_ids.insert(name, id);
        }

        let mut region_ids: HashMap<&str, i32> = HashMap::new();
        for &name in REGION_NAMES {
            let id: i32 = diesel::insert_into(regions::table)
                .values(NewRegion { name })
                .returning(regions::id)
                .get_result(conn)?;
            region_ids.insert(name, id);
        }

        for &(name, directions, region, recipe_ingredients) in RECIPES {
            let recipe_id: i32 = diesel::insert_into(recipes::table)
                .values(NewRecipe {
                    region_id: Some(region_ids[region]),
                    name,
                    directions,
                })
                .returning(recipes::id)
                .get_result(conn)?;

            let pairs: Vec<NewRecipeIngredient> = recipe_ingredients
                .iter()
                .map(|ingredient| NewRecipeIngredient {
                    recipe_id,
                    ingredient_id: ingredient_ids[ingredient],
                })
                .collect();

            diesel::insert_into(recipes_ingredients::table)
                .values(&pairs)
                .execute(conn)?;
        }

        Ok(())
    })
}
