pub mod config;
pub mod database;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;

pub use config::Config;

use repository::{
    CommentRepository, CourseRepository, EnrollmentRepository, FavoriteRepository,
    OrganizationRepository, TeacherRepository, UserAskRepository, UserRepository,
};
use services::{AuthService, CourseService, FavoriteService, OrganizationService, TeacherService};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub favorite_service: FavoriteService,
    pub organization_service: OrganizationService,
    pub teacher_service: TeacherService,
    pub course_service: CourseService,
}

impl AppState {
    /// Wires repositories and services over one connection pool.
    pub fn new(pool: PgPool, config: &Config) -> Self {
        let course_repo = CourseRepository::new(pool.clone());
        let teacher_repo = TeacherRepository::new(pool.clone());

        let favorite_service = FavoriteService::new(FavoriteRepository::new(pool.clone()));
        let auth_service = AuthService::new(UserRepository::new(pool.clone()), config);
        let organization_service = OrganizationService::new(
            OrganizationRepository::new(pool.clone()),
            course_repo.clone(),
            teacher_repo.clone(),
            UserAskRepository::new(pool.clone()),
            favorite_service.clone(),
        );
        let teacher_service =
            TeacherService::new(teacher_repo, course_repo.clone(), favorite_service.clone());
        let course_service = CourseService::new(
            course_repo,
            CommentRepository::new(pool.clone()),
            EnrollmentRepository::new(pool.clone()),
            favorite_service.clone(),
        );

        Self {
            pool,
            auth_service,
            favorite_service,
            organization_service,
            teacher_service,
            course_service,
        }
    }
}
