use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use crate::{
    AppState, handlers,
    telemetry::{REQUEST_ID_HEADER, http_trace_layer},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The routes wrapped in the serving stack: request ids, tracing, a 30 s
/// timeout and permissive CORS.
pub fn create_app(state: AppState) -> Router {
    create_router(state)
        .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER))
        .layer(http_trace_layer())
        .layer(SetRequestIdLayer::new(REQUEST_ID_HEADER, MakeRequestUuid))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/user", get(handlers::current_user))
        .merge(org_routes())
        .merge(course_routes())
        .with_state(state)
}

fn org_routes() -> Router<AppState> {
    Router::new()
        .route("/org/list/", get(handlers::list_orgs))
        .route("/org/add_fav/", post(handlers::add_fav))
        .route("/org/add_ask/", post(handlers::add_ask))
        .route("/org/home/{org_id}/", get(handlers::org_home))
        .route("/org/course/{org_id}/", get(handlers::org_courses))
        .route("/org/desc/{org_id}/", get(handlers::org_desc))
        .route("/org/org_teacher/{org_id}/", get(handlers::org_teachers))
        .route("/org/teacher/list/", get(handlers::list_teachers))
        .route("/org/teacher/detail/{teacher_id}/", get(handlers::teacher_detail))
}

fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/course/list/", get(handlers::list_courses))
        .route("/course/detail/{course_id}/", get(handlers::course_detail))
        .route("/course/info/{course_id}/", get(handlers::course_info))
        .route("/course/comment/{course_id}/", get(handlers::course_comments))
        .route("/course/video/{video_id}/", get(handlers::play_video))
        .route("/course/add_comment/", post(handlers::add_comment))
}
