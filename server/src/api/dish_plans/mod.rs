pub mod create;
pub mod delete;
pub mod list;

use crate::AppState;
use axum::routing::{delete, get};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for meal planning by date
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/dish-plan",
            get(list::list_plan_dates)
                .post(create::create_dish_plan)
                .delete(delete::delete_day),
        )
        .route("/dish-plan/date", get(list::list_day_recipes))
        .route("/dish-plan/recipe", delete(delete::delete_recipes_from_day))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_plan_dates,
        list::list_day_recipes,
        create::create_dish_plan,
        delete::delete_day,
        delete::delete_recipes_from_day,
    ),
    components(schemas(
        list::PlanDate,
        list::PlanDatesResponse,
        list::PlannedRecipe,
        list::PlannedRecipesResponse,
        create::CreateDishPlanRequest,
        create::CreateDishPlanResponse,
        delete::DeleteDayRequest,
        delete::DeleteRecipesRequest,
        crate::api::params::OneOrMany,
    ))
)]
pub struct ApiDoc;
