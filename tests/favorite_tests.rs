//! Favorite toggle against a real Postgres. Run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.

use course_marketplace::{
    error::FavoriteError,
    models::{FavoriteForm, FavoriteKind},
    repository::FavoriteRepository,
    services::FavoriteService,
};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO users (email, password_hash, name) VALUES ($1, 'x', 'tester') RETURNING id",
    )
    .bind(email)
    .fetch_one(pool)
    .await
    .expect("user insert")
}

async fn seed_org(pool: &PgPool, fav_nums: i32) -> i32 {
    let city_id: i32 = sqlx::query_scalar("INSERT INTO cities (name) VALUES ('北京') RETURNING id")
        .fetch_one(pool)
        .await
        .expect("city insert");

    sqlx::query_scalar(
        "INSERT INTO course_orgs (name, city_id, fav_nums) VALUES ('org', $1, $2) RETURNING id",
    )
    .bind(city_id)
    .bind(fav_nums)
    .fetch_one(pool)
    .await
    .expect("org insert")
}

async fn seed_course(pool: &PgPool, id: i32, fav_nums: i32) {
    sqlx::query("INSERT INTO courses (id, name, fav_nums) VALUES ($1, 'course', $2)")
        .bind(id)
        .bind(fav_nums)
        .execute(pool)
        .await
        .expect("course insert");
}

async fn fav_nums(pool: &PgPool, table: &str, id: i32) -> i32 {
    sqlx::query_scalar(&format!("SELECT fav_nums FROM {table} WHERE id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("fav_nums lookup")
}

async fn mark_count(pool: &PgPool, user_id: i32) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_favorites WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("mark count")
}

fn form(fav_id: &str, fav_type: &str) -> FavoriteForm {
    FavoriteForm {
        fav_id: Some(fav_id.to_string()),
        fav_type: Some(fav_type.to_string()),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_course_toggle_round_trip(pool: PgPool) {
    let user_id = seed_user(&pool, "fav@example.com").await;
    seed_course(&pool, 42, 3).await;
    let service = FavoriteService::new(FavoriteRepository::new(pool.clone()));

    let first = service.toggle(Some(user_id), &form("42", "1")).await.unwrap();
    assert!(first.favorited);
    assert_eq!(first.fav_nums, 4);
    assert_eq!(fav_nums(&pool, "courses", 42).await, 4);
    assert!(service
        .is_favorited(Some(user_id), FavoriteKind::Course, 42)
        .await
        .unwrap());

    let second = service.toggle(Some(user_id), &form("42", "1")).await.unwrap();
    assert!(!second.favorited);
    assert_eq!(second.fav_nums, 3);
    assert_eq!(fav_nums(&pool, "courses", 42).await, 3);
    assert_eq!(mark_count(&pool, user_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_unfavorite_never_drops_counter_below_zero(pool: PgPool) {
    let user_id = seed_user(&pool, "floor@example.com").await;
    let org_id = seed_org(&pool, 0).await;

    // A mark that predates the counter, so removing it would go negative.
    sqlx::query("INSERT INTO user_favorites (user_id, fav_type, fav_id) VALUES ($1, 2, $2)")
        .bind(user_id)
        .bind(org_id)
        .execute(&pool)
        .await
        .unwrap();

    let service = FavoriteService::new(FavoriteRepository::new(pool.clone()));
    let toggle = service
        .toggle(Some(user_id), &form(&org_id.to_string(), "2"))
        .await
        .unwrap();

    assert!(!toggle.favorited);
    assert_eq!(toggle.fav_nums, 0);
    assert_eq!(fav_nums(&pool, "course_orgs", org_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_missing_target_changes_nothing(pool: PgPool) {
    let user_id = seed_user(&pool, "missing@example.com").await;
    let service = FavoriteService::new(FavoriteRepository::new(pool.clone()));

    let result = service.toggle(Some(user_id), &form("999", "3")).await;

    assert!(matches!(
        result,
        Err(FavoriteError::TargetNotFound {
            kind: FavoriteKind::Teacher,
            id: 999
        })
    ));
    assert_eq!(mark_count(&pool, user_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_invalid_input_changes_nothing(pool: PgPool) {
    let user_id = seed_user(&pool, "invalid@example.com").await;
    seed_course(&pool, 5, 2).await;
    let service = FavoriteService::new(FavoriteRepository::new(pool.clone()));

    for (fav_id, fav_type) in [("0", "1"), ("5", "0"), ("5", "7")] {
        let result = service.toggle(Some(user_id), &form(fav_id, fav_type)).await;
        assert!(matches!(result, Err(FavoriteError::InvalidArgument(_))));
    }

    let anonymous = service.toggle(None, &form("5", "1")).await;
    assert!(matches!(anonymous, Err(FavoriteError::Unauthenticated)));

    assert_eq!(fav_nums(&pool, "courses", 5).await, 2);
    assert_eq!(mark_count(&pool, user_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_users_toggle_independently(pool: PgPool) {
    let alice = seed_user(&pool, "alice@example.com").await;
    let bob = seed_user(&pool, "bob@example.com").await;
    seed_course(&pool, 8, 0).await;
    let service = FavoriteService::new(FavoriteRepository::new(pool.clone()));

    service.toggle(Some(alice), &form("8", "1")).await.unwrap();
    let bob_fav = service.toggle(Some(bob), &form("8", "1")).await.unwrap();
    assert_eq!(bob_fav.fav_nums, 2);

    let alice_unfav = service.toggle(Some(alice), &form("8", "1")).await.unwrap();
    assert!(!alice_unfav.favorited);
    assert_eq!(alice_unfav.fav_nums, 1);
    assert!(service
        .is_favorited(Some(bob), FavoriteKind::Course, 8)
        .await
        .unwrap());
    assert!(!service
        .is_favorited(Some(alice), FavoriteKind::Course, 8)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_toggles_stay_consistent(pool: PgPool) {
    let user_id = seed_user(&pool, "race@example.com").await;
    seed_course(&pool, 11, 0).await;
    let service = FavoriteService::new(FavoriteRepository::new(pool.clone()));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service.toggle(Some(user_id), &form("11", "1")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // An even number of toggles leaves the user unmarked and the count intact.
    assert_eq!(mark_count(&pool, user_id).await, 0);
    assert_eq!(fav_nums(&pool, "courses", 11).await, 0);
}
