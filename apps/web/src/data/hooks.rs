use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::resource::{Resource, Snapshot};
use crate::models::course::{Course, CourseWithModules, QuizWithQuestions};
use crate::models::learner::{Enrollment, Profile, Progress};
use crate::store::{RemoteStore, SelectQuery, StoreError, Table};

/// Key used by hooks that take no input.
pub const NO_KEY: &str = "*";

type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send>>;
type Fetcher<T> = fn(Arc<dyn RemoteStore>, String) -> FetchFuture<T>;

/// One remote read bound to one key. Reads on first use and whenever the key
/// changes; `refresh` re-reads the current key.
pub struct Hook<T> {
    name: &'static str,
    store: Arc<dyn RemoteStore>,
    resource: Resource<T>,
    fetch: Fetcher<T>,
}

impl<T: Clone + Default> Hook<T> {
    fn new(name: &'static str, store: Arc<dyn RemoteStore>, fetch: Fetcher<T>) -> Self {
        Self {
            name,
            store,
            resource: Resource::new(),
            fetch,
        }
    }

    pub async fn set_key(&self, key: &str) -> Snapshot<T> {
        self.load(key, false).await
    }

    /// Re-reads whatever key is bound. HTTP callers name their key on every
    /// request and go through `read` instead.
    #[allow(dead_code)]
    pub async fn refresh(&self) -> Snapshot<T> {
        match self.resource.key() {
            Some(key) => self.load(&key, true).await,
            None => self.resource.snapshot(),
        }
    }

    /// `set_key` that also re-reads an unchanged key when `force` is set.
    /// The snapshot returned always describes `key`.
    pub async fn read(&self, key: &str, force: bool) -> Snapshot<T> {
        if force {
            self.load(key, true).await
        } else {
            self.set_key(key).await
        }
    }

    /// Shared state as last applied, whichever key it belongs to.
    #[allow(dead_code)]
    pub fn snapshot(&self) -> Snapshot<T> {
        self.resource.snapshot()
    }

    async fn load(&self, key: &str, force: bool) -> Snapshot<T> {
        let store = Arc::clone(&self.store);
        let fetch = self.fetch;
        let name = self.name;
        self.resource
            .load(key, force, move |key| {
                debug!("{name}: reading key '{key}'");
                fetch(store, key)
            })
            .await
    }
}

pub type CoursesHook = Hook<Vec<Course>>;
pub type CourseDetailsHook = Hook<Option<CourseWithModules>>;
pub type ProgressHook = Hook<Vec<Progress>>;
pub type EnrollmentsHook = Hook<Vec<Enrollment>>;
pub type ProfileHook = Hook<Option<Profile>>;
pub type QuizHook = Hook<Option<QuizWithQuestions>>;

pub fn courses_hook(store: Arc<dyn RemoteStore>) -> CoursesHook {
    Hook::new("courses", store, |store, _| Box::pin(fetch_courses(store)))
}

pub fn course_details_hook(store: Arc<dyn RemoteStore>) -> CourseDetailsHook {
    Hook::new("course_details", store, |store, slug| {
        Box::pin(fetch_course_details(store, slug))
    })
}

pub fn progress_hook(store: Arc<dyn RemoteStore>) -> ProgressHook {
    Hook::new("progress", store, |store, user_id| {
        Box::pin(fetch_progress(store, user_id))
    })
}

pub fn enrollments_hook(store: Arc<dyn RemoteStore>) -> EnrollmentsHook {
    Hook::new("enrollments", store, |store, user_id| {
        Box::pin(fetch_enrollments(store, user_id))
    })
}

pub fn profile_hook(store: Arc<dyn RemoteStore>) -> ProfileHook {
    Hook::new("profile", store, |store, user_id| {
        Box::pin(fetch_profile(store, user_id))
    })
}

pub fn quiz_hook(store: Arc<dyn RemoteStore>) -> QuizHook {
    Hook::new("quiz", store, |store, lesson_id| {
        Box::pin(fetch_quiz(store, lesson_id))
    })
}

/// One instance of every read hook. Instances do not coordinate with each other.
pub struct DataHooks {
    pub courses: CoursesHook,
    pub course_details: CourseDetailsHook,
    pub progress: ProgressHook,
    pub enrollments: EnrollmentsHook,
    pub profile: ProfileHook,
    pub quiz: QuizHook,
}

impl DataHooks {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            courses: courses_hook(Arc::clone(&store)),
            course_details: course_details_hook(Arc::clone(&store)),
            progress: progress_hook(Arc::clone(&store)),
            enrollments: enrollments_hook(Arc::clone(&store)),
            profile: profile_hook(Arc::clone(&store)),
            quiz: quiz_hook(store),
        }
    }
}

pub(crate) fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(StoreError::from))
        .collect()
}

fn decode_first<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Option<T>, StoreError> {
    Ok(decode_rows(rows)?.into_iter().next())
}

pub async fn fetch_courses(store: Arc<dyn RemoteStore>) -> Result<Vec<Course>, StoreError> {
    let rows = store
        .select(Table::Courses, &SelectQuery::new().order("id", true))
        .await?;
    decode_rows(rows)
}

pub async fn fetch_course_details(
    store: Arc<dyn RemoteStore>,
    slug: String,
) -> Result<Option<CourseWithModules>, StoreError> {
    let embed = format!(
        "*,{}(*,{}(*))",
        Table::Modules.as_str(),
        Table::Lessons.as_str()
    );
    let query = SelectQuery::new()
        .columns(&embed)
        .eq("slug", &slug)
        .limit(1);
    let rows = store.select(Table::Courses, &query).await?;
    Ok(decode_first::<CourseWithModules>(rows)?.map(CourseWithModules::sorted))
}

pub async fn fetch_progress(
    store: Arc<dyn RemoteStore>,
    user_id: String,
) -> Result<Vec<Progress>, StoreError> {
    let rows = store
        .select(Table::Progress, &SelectQuery::new().eq("user_id", &user_id))
        .await?;
    decode_rows(rows)
}

pub async fn fetch_enrollments(
    store: Arc<dyn RemoteStore>,
    user_id: String,
) -> Result<Vec<Enrollment>, StoreError> {
    let rows = store
        .select(Table::Enrollments, &SelectQuery::new().eq("user_id", &user_id))
        .await?;
    decode_rows(rows)
}

pub async fn fetch_profile(
    store: Arc<dyn RemoteStore>,
    user_id: String,
) -> Result<Option<Profile>, StoreError> {
    let rows = store
        .select(Table::Profiles, &SelectQuery::new().eq("id", &user_id).limit(1))
        .await?;
    decode_first(rows)
}

pub async fn fetch_quiz(
    store: Arc<dyn RemoteStore>,
    lesson_id: String,
) -> Result<Option<QuizWithQuestions>, StoreError> {
    let query = SelectQuery::new()
        .columns(&format!("*,{}(*)", Table::QuizQuestions.as_str()))
        .eq("lesson_id", &lesson_id)
        .limit(1);
    let rows = store.select(Table::Quizzes, &query).await?;
    Ok(decode_first::<QuizWithQuestions>(rows)?.map(QuizWithQuestions::sorted))
}
