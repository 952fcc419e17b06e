use axum::{
    Form, Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    error::{AppResult, CommentError},
    extract::Path,
    middleware::{AuthUser, OptionalAuthUser},
    models::{
        AjaxResponse, CommentForm, CourseCommentsResponse, CourseDetailResponse,
        CourseInfoResponse, CourseListResponse, ListCoursesQuery, MSG_COMMENT_ADDED,
        VideoPlayResponse,
    },
};

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<ListCoursesQuery>,
) -> AppResult<Json<CourseListResponse>> {
    let response = state.course_service.list(query).await?;

    Ok(Json(response))
}

pub async fn course_detail(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Path(course_id): Path<i32>,
) -> AppResult<Json<CourseDetailResponse>> {
    let response = state.course_service.detail(course_id, user_id).await?;

    Ok(Json(response))
}

pub async fn course_info(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(course_id): Path<i32>,
) -> AppResult<Json<CourseInfoResponse>> {
    let response = state.course_service.info(course_id, user_id).await?;

    Ok(Json(response))
}

pub async fn course_comments(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(course_id): Path<i32>,
) -> AppResult<Json<CourseCommentsResponse>> {
    let response = state.course_service.comments(course_id).await?;

    Ok(Json(response))
}

pub async fn play_video(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(video_id): Path<i32>,
) -> AppResult<Json<VideoPlayResponse>> {
    let response = state.course_service.play_video(video_id, user_id).await?;

    Ok(Json(response))
}

pub async fn add_comment(
    State(state): State<AppState>,
    OptionalAuthUser(user_id): OptionalAuthUser,
    Form(form): Form<CommentForm>,
) -> Result<Json<AjaxResponse>, CommentError> {
    state.course_service.add_comment(user_id, &form).await?;

    Ok(Json(AjaxResponse::success(MSG_COMMENT_ADDED)))
}
