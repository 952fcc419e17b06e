use axum::{
    Form, Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    error::{AppResult, UserAskError},
    extract::Path,
    middleware::OptionalAuthUser,
    models::{
        AjaxResponse, ListOrgsQuery, ListTeachersQuery, OrgListResponse, OrgPageResponse, TeacherDetailResponse,
        TeacherListResponse, UserAskForm,
    },
};

pub async fn list_orgs(
    State(state): State<AppState>,
    Query(query): Query<ListOrgsQuery>,
) -> AppResult<Json<OrgListResponse>> {
    let response = state.organization_service.list(query).await?;

    Ok(Json(response))
}

/// `POST /org/add_ask/`: consultation form on the organization pages.
pub async fn add_ask(
    State(state): State<AppState>,
    Form(form): Form<UserAskForm>,
) -> Result<Json<AjaxResponse>, UserAskError> {
    state.organization_service.add_ask(&form).await?;

    Ok(Json(AjaxResponse::ok()))
}

pub async fn org_home(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(org_id): Path<i32>,
) -> AppResult<Json<OrgPageResponse>> {
    let response = state.organization_service.home(org_id, user_id).await?;

    Ok(Json(response))
}

pub async fn org_courses(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(org_id): Path<i32>,
) -> AppResult<Json<OrgPageResponse>> {
    let response = state.organization_service.courses(org_id, user_id).await?;

    Ok(Json(response))
}

pub async fn org_desc(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(org_id): Path<i32>,
) -> AppResult<Json<OrgPageResponse>> {
    let response = state.organization_service.desc(org_id, user_id).await?;

    Ok(Json(response))
}

pub async fn org_teachers(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(org_id): Path<i32>,
) -> AppResult<Json<OrgPageResponse>> {
    let response = state.organization_service.teachers(org_id, user_id).await?;

    Ok(Json(response))
}

pub async fn list_teachers(
    State(state): State<AppState>,
    Query(query): Query<ListTeachersQuery>,
) -> AppResult<Json<TeacherListResponse>> {
    let response = state.teacher_service.list(query).await?;

    Ok(Json(response))
}

pub async fn teacher_detail(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(teacher_id): Path<i32>,
) -> AppResult<Json<TeacherDetailResponse>> {
    let response = state.teacher_service.detail(teacher_id, user_id).await?;

    Ok(Json(response))
}
