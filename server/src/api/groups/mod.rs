pub mod avatar;
pub mod create;
pub mod details;
pub mod list;
pub mod members;
pub mod plans;

use crate::AppState;
use axum::routing::{delete, get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for shopping groups and their membership
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/group/create", post(create::create_group))
        .route("/group/user", get(list::list_user_groups))
        .route("/group/avatar", post(avatar::upload_group_avatar))
        .route("/group/details", get(details::get_group_details))
        .route("/group/plans", get(plans::list_group_plans))
        .route(
            "/group/members",
            get(members::list_members).post(members::add_members),
        )
        .route("/group/member", delete(members::remove_member))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_group,
        list::list_user_groups,
        avatar::upload_group_avatar,
        details::get_group_details,
        plans::list_group_plans,
        members::list_members,
        members::add_members,
        members::remove_member,
    ),
    components(schemas(
        create::CreateGroupRequest,
        create::CreateGroupResponse,
        list::GroupsResponse,
        avatar::UploadGroupAvatarRequest,
        details::GroupDetailsResponse,
        plans::GroupPlansResponse,
        members::MembersResponse,
        members::AddMembersRequest,
        members::RemoveMemberRequest,
        crate::format::GroupSummary,
        crate::format::GroupDetails,
        crate::format::MemberView,
        crate::format::GroupPlan,
        crate::format::BuyerView,
    ))
)]
pub struct ApiDoc;
