use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{
        FavoriteKind, ListTeachersQuery, TeacherDetailResponse, TeacherListResponse, TeacherSort,
    },
    pagination::{Page, PageRequest},
    repository::{CourseRepository, TeacherRepository},
    services::FavoriteService,
};

pub const TEACHERS_PER_PAGE: i64 = 5;
const HOT_TEACHERS: i64 = 3;

#[derive(Clone)]
pub struct TeacherService {
    teacher_repo: TeacherRepository,
    course_repo: CourseRepository,
    favorites: FavoriteService,
}

impl TeacherService {
    pub fn new(
        teacher_repo: TeacherRepository,
        course_repo: CourseRepository,
        favorites: FavoriteService,
    ) -> Self {
        Self {
            teacher_repo,
            course_repo,
            favorites,
        }
    }

    #[instrument(name = "teacher.list", skip(self))]
    pub async fn list(&self, query: ListTeachersQuery) -> AppResult<TeacherListResponse> {
        let sort = TeacherSort::parse(query.sort.as_deref());
        let hot_teachers = self.teacher_repo.hottest(HOT_TEACHERS).await?;

        let teacher_nums = self.teacher_repo.count().await?;
        let request =
            PageRequest::parse(query.page.as_deref(), TEACHERS_PER_PAGE).clamp(teacher_nums);
        let teachers = self
            .teacher_repo
            .list(sort, request.limit(), request.offset())
            .await?;

        Ok(TeacherListResponse {
            all_teachers: Page::new(teachers, request, teacher_nums),
            teacher_nums,
            hot_teachers,
            sort: sort.key(),
        })
    }

    #[instrument(name = "teacher.detail", skip(self))]
    pub async fn detail(
        &self,
        teacher_id: i32,
        user_id: Option<i32>,
    ) -> AppResult<TeacherDetailResponse> {
        let teacher = self
            .teacher_repo
            .record_click(teacher_id)
            .await?
            .ok_or(AppError::NotFound("Teacher not found".to_string()))?;

        let has_teacher_faved = self
            .favorites
            .is_favorited(user_id, FavoriteKind::Teacher, teacher.id)
            .await?;
        let has_org_faved = self
            .favorites
            .is_favorited(user_id, FavoriteKind::Organization, teacher.org_id)
            .await?;

        let hot_teachers = self.teacher_repo.hottest(HOT_TEACHERS).await?;
        let all_courses = self.course_repo.list_by_teacher(teacher.id).await?;

        Ok(TeacherDetailResponse {
            teacher,
            has_teacher_faved,
            has_org_faved,
            hot_teachers,
            all_courses,
        })
    }
}
