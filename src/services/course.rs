use tracing::instrument;

use crate::{
    error::{AppError, AppResult, CommentError},
    models::{
        Comment, CommentForm, Course, CourseCommentsResponse, CourseDetailResponse,
        CourseInfoResponse, CourseListResponse, CourseSort, FavoriteKind, LessonWithVideos,
        ListCoursesQuery, VideoPlayResponse,
    },
    pagination::{Page, PageRequest},
    repository::{CommentRepository, CourseRepository, EnrollmentRepository},
    services::FavoriteService,
    telemetry::{COMMENTS_ADDED, ENROLLMENTS_CREATED},
};

pub const COURSES_PER_PAGE: i64 = 6;
const HOT_COURSES: i64 = 3;
const RELATED_COURSES: i64 = 5;

#[derive(Clone)]
pub struct CourseService {
    course_repo: CourseRepository,
    comment_repo: CommentRepository,
    enrollment_repo: EnrollmentRepository,
    favorites: FavoriteService,
}

impl CourseService {
    pub fn new(
        course_repo: CourseRepository,
        comment_repo: CommentRepository,
        enrollment_repo: EnrollmentRepository,
        favorites: FavoriteService,
    ) -> Self {
        Self {
            course_repo,
            comment_repo,
            enrollment_repo,
            favorites,
        }
    }

    #[instrument(name = "course.list", skip(self))]
    pub async fn list(&self, query: ListCoursesQuery) -> AppResult<CourseListResponse> {
        let sort = CourseSort::parse(query.sort.as_deref());
        let hot_courses = self.course_repo.hottest(HOT_COURSES).await?;

        let total = self.course_repo.count().await?;
        let request = PageRequest::parse(query.page.as_deref(), COURSES_PER_PAGE).clamp(total);
        let courses = self
            .course_repo
            .list(sort, request.limit(), request.offset())
            .await?;

        Ok(CourseListResponse {
            all_courses: Page::new(courses, request, total),
            sort: sort.key(),
            hot_courses,
        })
    }

    #[instrument(name = "course.detail", skip(self))]
    pub async fn detail(
        &self,
        course_id: i32,
        user_id: Option<i32>,
    ) -> AppResult<CourseDetailResponse> {
        let course = self
            .course_repo
            .record_click(course_id)
            .await?
            .ok_or_else(course_not_found)?;

        let has_fav_course = self
            .favorites
            .is_favorited(user_id, FavoriteKind::Course, course.id)
            .await?;
        let has_fav_org = match course.org_id {
            Some(org_id) => {
                self.favorites
                    .is_favorited(user_id, FavoriteKind::Organization, org_id)
                    .await?
            }
            None => false,
        };

        let relate_course = if course.tag.is_empty() {
            Vec::new()
        } else {
            self.course_repo
                .related_by_tag(course.id, &course.tag, RELATED_COURSES)
                .await?
        };

        Ok(CourseDetailResponse {
            course,
            relate_course,
            has_fav_course,
            has_fav_org,
        })
    }

    /// Chapter list of a course. Opening it enrolls the caller.
    #[instrument(name = "course.info", skip(self))]
    pub async fn info(&self, course_id: i32, user_id: i32) -> AppResult<CourseInfoResponse> {
        let course = self.find(course_id).await?;
        self.enroll(user_id, course.id).await?;

        let lessons = self.course_repo.lessons(course.id).await?;
        let videos = self.course_repo.videos(course.id).await?;
        let relate_courses = self
            .course_repo
            .related_by_students(course.id, RELATED_COURSES)
            .await?;
        let course_resources = self.course_repo.resources(course.id).await?;

        Ok(CourseInfoResponse {
            course,
            lessons: LessonWithVideos::group(lessons, videos),
            relate_courses,
            course_resources,
        })
    }

    #[instrument(name = "course.comments", skip(self))]
    pub async fn comments(&self, course_id: i32) -> AppResult<CourseCommentsResponse> {
        let course = self.find(course_id).await?;

        let relate_courses = self
            .course_repo
            .related_by_students(course.id, RELATED_COURSES)
            .await?;
        let course_resources = self.course_repo.resources(course.id).await?;
        let all_comments = self.comment_repo.list_for_course(course.id).await?;

        Ok(CourseCommentsResponse {
            course,
            relate_courses,
            course_resources,
            all_comments,
        })
    }

    /// Video player page. Watching a video enrolls the caller in its course.
    #[instrument(name = "course.play_video", skip(self))]
    pub async fn play_video(&self, video_id: i32, user_id: i32) -> AppResult<VideoPlayResponse> {
        let found = self
            .course_repo
            .find_video(video_id)
            .await?
            .ok_or(AppError::NotFound("Video not found".to_string()))?;

        let course = self
            .course_repo
            .find_by_id(found.course_id)
            .await?
            .ok_or(AppError::Internal(
                "Video belongs to a missing course".to_string(),
            ))?;
        self.enroll(user_id, course.id).await?;

        let relate_courses = self
            .course_repo
            .related_by_students(course.id, RELATED_COURSES)
            .await?;
        let course_resources = self.course_repo.resources(course.id).await?;

        Ok(VideoPlayResponse {
            course,
            video: found.video,
            relate_courses,
            course_resources,
        })
    }

    #[instrument(name = "course.add_comment", skip(self, form))]
    pub async fn add_comment(
        &self,
        user_id: Option<i32>,
        form: &CommentForm,
    ) -> Result<Comment, CommentError> {
        let user_id = user_id.ok_or(CommentError::Unauthenticated)?;
        let new_comment = form.validate().ok_or(CommentError::InvalidArgument)?;

        if !self.course_repo.exists(new_comment.course_id).await? {
            return Err(CommentError::CourseNotFound(new_comment.course_id));
        }

        let comment = self
            .comment_repo
            .create(user_id, new_comment.course_id, &new_comment.comments)
            .await?;

        COMMENTS_ADDED.add(1, &[]);

        tracing::info!(
            comment_id = comment.id,
            course_id = comment.course_id,
            user_id,
            "Comment added"
        );

        Ok(comment)
    }

    async fn find(&self, course_id: i32) -> AppResult<Course> {
        self.course_repo
            .find_by_id(course_id)
            .await?
            .ok_or_else(course_not_found)
    }

    async fn enroll(&self, user_id: i32, course_id: i32) -> AppResult<()> {
        if self.enrollment_repo.enroll(user_id, course_id).await? {
            ENROLLMENTS_CREATED.add(1, &[]);
            tracing::info!(user_id, course_id, "User enrolled in course");
        }
        Ok(())
    }
}

fn course_not_found() -> AppError {
    AppError::NotFound("Course not found".to_string())
}
