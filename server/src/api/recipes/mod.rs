pub mod create;
pub mod delete;
pub mod get;
pub mod ingredients;
pub mod list;
pub mod search;
pub mod update;

use crate::format::{RecipeSummary, RecipeSummaryRow};
use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

pub const RECIPES_PER_PAGE: i64 = 10;

/// Returns the router for recipes and recipe search
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipe",
            post(create::create_recipe)
                .get(get::get_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/v2/recipe", get(get::get_recipe_v2))
        .route("/recipe/update", post(update::update_recipe))
        .route(
            "/recipe/ingredients",
            post(ingredients::upsert_ingredients).delete(ingredients::remove_ingredients),
        )
        .route("/recipe/all", get(list::list_recipes))
        .route("/recipe/owner", get(list::list_owner_recipes))
        .route("/search/recipe", post(search::search_recipes))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipesResponse {
    pub data: Vec<RecipeSummary>,
}

/// `(recipe_id, recipe_name, username, recipe_img)` as selected by the summary queries
pub(crate) type SummaryTuple = (i32, String, String, Option<Vec<u8>>);

pub(crate) fn summary_rows(rows: Vec<SummaryTuple>) -> Vec<RecipeSummaryRow> {
    rows.into_iter()
        .map(|(recipe_id, recipe_name, username, recipe_img)| RecipeSummaryRow {
            recipe_id,
            recipe_name,
            username,
            recipe_img,
            matched_ingredients: None,
        })
        .collect()
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        update::update_recipe,
        ingredients::upsert_ingredients,
        ingredients::remove_ingredients,
        list::list_recipes,
        get::get_recipe,
        get::get_recipe_v2,
        delete::delete_recipe,
        list::list_owner_recipes,
        search::search_recipes,
    ),
    components(schemas(
        RecipesResponse,
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        update::UpdateRecipeRequest,
        ingredients::UpsertIngredientsRequest,
        ingredients::RemoveIngredientsRequest,
        get::RecipeResponse,
        search::SearchRecipesRequest,
        crate::format::RecipeSummary,
        crate::format::RecipeDetail,
        crate::format::IngredientView,
    ))
)]
pub struct ApiDoc;
