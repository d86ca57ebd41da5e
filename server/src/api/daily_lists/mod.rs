pub mod create;
pub mod get;
pub mod month;
pub mod statistic;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for shopping plans (daily lists)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily-list/month", get(month::list_month_plans))
        .route(
            "/daily-list",
            get(get::get_daily_list)
                .post(create::create_daily_list)
                .put(update::update_item_amount),
        )
        .route("/statistic", get(statistic::get_statistic))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        month::list_month_plans,
        create::create_daily_list,
        get::get_daily_list,
        update::update_item_amount,
        statistic::get_statistic,
    ),
    components(schemas(
        month::MonthPlansResponse,
        create::ListItemInput,
        create::CreateDailyListRequest,
        create::CreateDailyListResponse,
        get::DailyListResponse,
        update::UpdateItemAmountRequest,
        statistic::StatisticRow,
        statistic::StatisticResponse,
        crate::format::MonthPlan,
        crate::format::PlanItem,
        crate::format::DailyListView,
        crate::format::ListItemView,
    ))
)]
pub struct ApiDoc;
