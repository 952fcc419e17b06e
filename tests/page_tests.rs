//! Organization, teacher and course pages against a real Postgres, driven
//! through the router. Run with `DATABASE_URL=postgres://... cargo test -- --ignored`.

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use course_marketplace::{AppState, Config, routes::create_router, services::TokenIssuer};
use serde_json::Value;
use sqlx::PgPool;
use tower::util::ServiceExt;

const JWT_SECRET: &str = "page-tests-secret";

fn app(pool: &PgPool) -> axum::Router {
    let config = Config {
        port: 0,
        environment: "test".to_string(),
        database_url: String::new(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expires_in_hours: 1,
        otel_service_name: "course-marketplace-test".to_string(),
        otel_exporter_endpoint: "http://localhost:4317".to_string(),
    };
    create_router(AppState::new(pool.clone(), &config))
}

fn bearer(user_id: i32) -> String {
    let token = TokenIssuer::new(JWT_SECRET, 1)
        .issue(user_id)
        .expect("token should issue");
    format!("Bearer {}", token)
}

async fn get_json(pool: &PgPool, uri: &str, user_id: Option<i32>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(uid) = user_id {
        builder = builder.header(header::AUTHORIZATION, bearer(uid));
    }
    send(pool, builder.body(Body::empty()).unwrap()).await
}

async fn post_form(pool: &PgPool, uri: &str, body: &str, user_id: Option<i32>) -> Value {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(uid) = user_id {
        builder = builder.header(header::AUTHORIZATION, bearer(uid));
    }
    let (status, json) = send(pool, builder.body(Body::from(body.to_string())).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    json
}

async fn send(pool: &PgPool, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(pool).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    (status, serde_json::from_slice(&bytes).expect("Should parse JSON"))
}

fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id should be a number"))
        .collect()
}

async fn seed_user(pool: &PgPool, email: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, name) VALUES ($1, 'x', 'tester') RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .expect("user insert")
}

async fn seed_org(pool: &PgPool, id: i32) {
    let city_id: i32 = sqlx::query_scalar("INSERT INTO cities (name) VALUES ('上海') RETURNING id")
        .fetch_one(pool)
        .await
        .expect("city insert");

    sqlx::query("INSERT INTO course_orgs (id, name, city_id) VALUES ($1, 'org', $2)")
        .bind(id)
        .bind(city_id)
        .execute(pool)
        .await
        .expect("org insert");
}

async fn seed_course(pool: &PgPool, id: i32, tag: &str, click_nums: i32) {
    sqlx::query("INSERT INTO courses (id, name, tag, click_nums) VALUES ($1, 'course', $2, $3)")
        .bind(id)
        .bind(tag)
        .bind(click_nums)
        .execute(pool)
        .await
        .expect("course insert");
}

async fn enroll(pool: &PgPool, user_id: i32, course_id: i32) {
    sqlx::query("INSERT INTO user_courses (user_id, course_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(course_id)
        .execute(pool)
        .await
        .expect("enrollment insert");
}

async fn count(pool: &PgPool, sql: &str) -> i64 {
    sqlx::query_scalar(sql).fetch_one(pool).await.expect("count")
}

// =============================================================================
// Organizations and teachers
// =============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_org_home_has_fav_follows_the_caller(pool: PgPool) {
    let alice = seed_user(&pool, "alice@example.com").await;
    let bob = seed_user(&pool, "bob@example.com").await;
    seed_org(&pool, 1).await;
    seed_course(&pool, 2, "", 0).await;

    let fav = post_form(&pool, "/org/add_fav/", "fav_id=1&fav_type=2", Some(alice)).await;
    assert_eq!(fav["msg"], "已收藏");

    // Bob's mark is (kind 1, id 2): the pair a swapped lookup for org 1 would hit.
    let fav = post_form(&pool, "/org/add_fav/", "fav_id=2&fav_type=1", Some(bob)).await;
    assert_eq!(fav["msg"], "已收藏");

    let (status, page) = get_json(&pool, "/org/home/1/", Some(alice)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["has_fav"], true);
    assert_eq!(page["current_page"], "home");

    let (_, page) = get_json(&pool, "/org/desc/1/", Some(bob)).await;
    assert_eq!(page["has_fav"], false);

    let (_, page) = get_json(&pool, "/org/course/1/", None).await;
    assert_eq!(page["has_fav"], false);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_org_home_counts_every_visit(pool: PgPool) {
    seed_org(&pool, 3).await;

    let (_, first) = get_json(&pool, "/org/home/3/", None).await;
    let (_, second) = get_json(&pool, "/org/home/3/", None).await;
    assert_eq!(first["course_org"]["click_nums"], 1);
    assert_eq!(second["course_org"]["click_nums"], 2);

    // Other tabs are not visits.
    get_json(&pool, "/org/desc/3/", None).await;
    assert_eq!(
        count(&pool, "SELECT click_nums::BIGINT FROM course_orgs WHERE id = 3").await,
        2
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_teacher_detail_flags_and_clicks(pool: PgPool) {
    let user = seed_user(&pool, "fan@example.com").await;
    seed_org(&pool, 4).await;
    let teacher_id: i32 =
        sqlx::query_scalar("INSERT INTO teachers (org_id, name) VALUES (4, 'Ms. Li') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    post_form(
        &pool,
        "/org/add_fav/",
        &format!("fav_id={}&fav_type=3", teacher_id),
        Some(user),
    )
    .await;

    let uri = format!("/org/teacher/detail/{}/", teacher_id);
    let (status, page) = get_json(&pool, &uri, Some(user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["has_teacher_faved"], true);
    assert_eq!(page["has_org_faved"], false);
    assert_eq!(page["teacher"]["click_nums"], 1);
    assert_eq!(page["teacher"]["fav_nums"], 1);

    let (_, page) = get_json(&pool, &uri, None).await;
    assert_eq!(page["has_teacher_faved"], false);
    assert_eq!(page["teacher"]["click_nums"], 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_ask_saves_the_request(pool: PgPool) {
    let reply = post_form(
        &pool,
        "/org/add_ask/",
        "name=%E5%B0%8F%E6%98%8E&mobile=13812345678&course_name=Rust",
        None,
    )
    .await;

    assert_eq!(reply, serde_json::json!({"status": "success"}));
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM user_asks WHERE mobile = '13812345678'").await,
        1
    );
}

// =============================================================================
// Courses
// =============================================================================

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_course_detail_relates_by_tag_and_counts_clicks(pool: PgPool) {
    seed_course(&pool, 42, "rust", 0).await;
    seed_course(&pool, 43, "rust", 0).await;
    seed_course(&pool, 44, "go", 0).await;
    seed_course(&pool, 45, "", 0).await;

    let (status, page) = get_json(&pool, "/course/detail/42/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page["relate_course"]), vec![43]);
    assert_eq!(page["course"]["click_nums"], 1);
    assert_eq!(page["has_fav_course"], false);

    let (_, page) = get_json(&pool, "/course/detail/42/", None).await;
    assert_eq!(page["course"]["click_nums"], 2);

    // An empty tag relates to nothing, not to every other untagged course.
    let (_, page) = get_json(&pool, "/course/detail/45/", None).await;
    assert!(ids(&page["relate_course"]).is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_course_pages_enroll_once(pool: PgPool) {
    let user = seed_user(&pool, "learner@example.com").await;
    seed_course(&pool, 42, "", 0).await;
    let lesson_id: i32 =
        sqlx::query_scalar("INSERT INTO lessons (course_id, name) VALUES (42, 'ch1') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();
    let video_id: i32 =
        sqlx::query_scalar("INSERT INTO videos (lesson_id, name) VALUES ($1, 'v1') RETURNING id")
            .bind(lesson_id)
            .fetch_one(&pool)
            .await
            .unwrap();

    let (status, page) = get_json(&pool, "/course/info/42/", Some(user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&page["lessons"][0]["videos"]), vec![video_id as i64]);

    get_json(&pool, "/course/info/42/", Some(user)).await;
    let (status, page) = get_json(&pool, &format!("/course/video/{}/", video_id), Some(user)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["course"]["id"], 42);

    assert_eq!(
        count(
            &pool,
            &format!("SELECT COUNT(*) FROM user_courses WHERE user_id = {user} AND course_id = 42"),
        )
        .await,
        1
    );
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_course_info_relates_by_shared_students(pool: PgPool) {
    let newcomer = seed_user(&pool, "new@example.com").await;
    let veteran = seed_user(&pool, "old@example.com").await;
    seed_course(&pool, 42, "", 0).await;
    seed_course(&pool, 43, "", 5).await;
    seed_course(&pool, 44, "", 9).await;
    seed_course(&pool, 45, "", 100).await;
    for course_id in [42, 43, 44] {
        enroll(&pool, veteran, course_id).await;
    }

    let (status, page) = get_json(&pool, "/course/info/42/", Some(newcomer)).await;
    assert_eq!(status, StatusCode::OK);
    // Hottest first; 45 is popular but nobody from course 42 took it.
    assert_eq!(ids(&page["relate_courses"]), vec![44, 43]);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_posted_comment_is_listed(pool: PgPool) {
    let user = seed_user(&pool, "critic@example.com").await;
    seed_course(&pool, 42, "", 0).await;

    let reply = post_form(
        &pool,
        "/course/add_comment/",
        "course_id=42&comments=%E5%A5%BD%E8%AF%BE",
        Some(user),
    )
    .await;
    assert_eq!(reply["status"], "success");
    assert_eq!(reply["msg"], "添加成功");

    let (status, page) = get_json(&pool, "/course/comment/42/", Some(user)).await;
    assert_eq!(status, StatusCode::OK);
    let comments = page["all_comments"].as_array().expect("comment list");
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["comments"], "好课");
    assert_eq!(comments[0]["user_name"], "tester");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_comment_on_unknown_course_fails(pool: PgPool) {
    let user = seed_user(&pool, "lost@example.com").await;

    let reply = post_form(&pool, "/course/add_comment/", "course_id=999&comments=hi", Some(user)).await;

    assert_eq!(reply["status"], "fail");
    assert_eq!(reply["msg"], "添加失败");
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM course_comments").await, 0);
}
