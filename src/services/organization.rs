use tracing::instrument;

use crate::{
    error::{AppError, AppResult, UserAskError},
    models::{
        Course, FavoriteKind, ListOrgsQuery, OrgFilter, OrgListResponse, OrgPageResponse, OrgSort,
        OrgTab, Organization, Teacher, UserAsk, UserAskForm,
    },
    pagination::{Page, PageRequest},
    repository::{CourseRepository, OrganizationRepository, TeacherRepository, UserAskRepository},
    services::FavoriteService,
    telemetry::USER_ASKS_ADDED,
};

pub const ORGS_PER_PAGE: i64 = 5;
const HOT_ORGS: i64 = 3;
const HOME_COURSES: i64 = 4;
const HOME_TEACHERS: i64 = 3;

#[derive(Clone)]
pub struct OrganizationService {
    org_repo: OrganizationRepository,
    course_repo: CourseRepository,
    teacher_repo: TeacherRepository,
    ask_repo: UserAskRepository,
    favorites: FavoriteService,
}

impl OrganizationService {
    pub fn new(
        org_repo: OrganizationRepository,
        course_repo: CourseRepository,
        teacher_repo: TeacherRepository,
        ask_repo: UserAskRepository,
        favorites: FavoriteService,
    ) -> Self {
        Self {
            org_repo,
            course_repo,
            teacher_repo,
            ask_repo,
            favorites,
        }
    }

    #[instrument(name = "organization.list", skip(self))]
    pub async fn list(&self, query: ListOrgsQuery) -> AppResult<OrgListResponse> {
        let filter = OrgFilter::from_query(&query);
        let sort = OrgSort::parse(query.sort.as_deref());

        let hot_orgs = self.org_repo.hottest(HOT_ORGS).await?;
        let all_citys = self.org_repo.cities().await?;

        let org_nums = self.org_repo.count(&filter).await?;
        let request = PageRequest::parse(query.page.as_deref(), ORGS_PER_PAGE).clamp(org_nums);
        let orgs = self
            .org_repo
            .list(&filter, sort, request.limit(), request.offset())
            .await?;

        Ok(OrgListResponse {
            all_orgs: Page::new(orgs, request, org_nums),
            all_citys,
            org_nums,
            city_id: filter.city_id,
            category: filter.category,
            hot_orgs,
            sort: sort.key(),
        })
    }

    /// Landing tab of an organization; counts as a visit.
    #[instrument(name = "organization.home", skip(self))]
    pub async fn home(&self, org_id: i32, user_id: Option<i32>) -> AppResult<OrgPageResponse> {
        let course_org = self
            .org_repo
            .record_click(org_id)
            .await?
            .ok_or_else(org_not_found)?;

        let all_courses = self
            .course_repo
            .list_by_org(org_id, Some(HOME_COURSES))
            .await?;
        let all_teachers = self
            .teacher_repo
            .list_by_org(org_id, Some(HOME_TEACHERS))
            .await?;

        self.page(course_org, OrgTab::Home, user_id, Some(all_courses), Some(all_teachers))
            .await
    }

    #[instrument(name = "organization.courses", skip(self))]
    pub async fn courses(&self, org_id: i32, user_id: Option<i32>) -> AppResult<OrgPageResponse> {
        let course_org = self.find(org_id).await?;
        let all_courses = self.course_repo.list_by_org(org_id, None).await?;

        self.page(course_org, OrgTab::Course, user_id, Some(all_courses), None)
            .await
    }

    #[instrument(name = "organization.desc", skip(self))]
    pub async fn desc(&self, org_id: i32, user_id: Option<i32>) -> AppResult<OrgPageResponse> {
        let course_org = self.find(org_id).await?;

        self.page(course_org, OrgTab::Desc, user_id, None, None).await
    }

    #[instrument(name = "organization.teachers", skip(self))]
    pub async fn teachers(&self, org_id: i32, user_id: Option<i32>) -> AppResult<OrgPageResponse> {
        let course_org = self.find(org_id).await?;
        let all_teachers = self.teacher_repo.list_by_org(org_id, None).await?;

        self.page(course_org, OrgTab::Teacher, user_id, None, Some(all_teachers))
            .await
    }

    /// Stores a "我要学习" consultation request. No login needed.
    #[instrument(name = "organization.add_ask", skip(self, form))]
    pub async fn add_ask(&self, form: &UserAskForm) -> Result<UserAsk, UserAskError> {
        let new_ask = form.validate().ok_or(UserAskError::InvalidArgument)?;
        let ask = self.ask_repo.create(&new_ask).await?;

        USER_ASKS_ADDED.add(1, &[]);
        tracing::info!(ask_id = ask.id, course_name = %ask.course_name, "Consultation request saved");

        Ok(ask)
    }

    async fn find(&self, org_id: i32) -> AppResult<Organization> {
        self.org_repo
            .find_by_id(org_id)
            .await?
            .ok_or_else(org_not_found)
    }

    async fn page(
        &self,
        course_org: Organization,
        current_page: OrgTab,
        user_id: Option<i32>,
        all_courses: Option<Vec<Course>>,
        all_teachers: Option<Vec<Teacher>>,
    ) -> AppResult<OrgPageResponse> {
        let has_fav = self
            .favorites
            .is_favorited(user_id, FavoriteKind::Organization, course_org.id)
            .await?;

        Ok(OrgPageResponse {
            course_org,
            current_page,
            has_fav,
            all_courses,
            all_teachers,
        })
    }
}

fn org_not_found() -> AppError {
    AppError::NotFound("Organization not found".to_string())
}
