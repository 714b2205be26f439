#![allow(dead_code)]

//! In-memory repositories and router wiring shared by the integration tests.

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use bson::oid::ObjectId;
use bson::Document;
use preservation_windows_backend::config::{AppConfig, JwtConfig};
use preservation_windows_backend::middlewares::auth_middleware::AuthState;
use preservation_windows_backend::model::job::Job;
use preservation_windows_backend::model::temp_image::TempImage;
use preservation_windows_backend::model::user::User;
use preservation_windows_backend::repository::counter_repo::CounterRepository;
use preservation_windows_backend::repository::job_repo::JobRepository;
use preservation_windows_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use preservation_windows_backend::repository::temp_image_repo::TempImageRepository;
use preservation_windows_backend::repository::user_repo::UserRepository;
use preservation_windows_backend::router::{app_router, ApiServices};
use preservation_windows_backend::service::drawing_service::DrawingServiceImpl;
use preservation_windows_backend::service::job_service::JobServiceImpl;
use preservation_windows_backend::service::temp_image_service::TempImageServiceImpl;
use preservation_windows_backend::service::user_service::UserServiceImpl;
use preservation_windows_backend::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct InMemoryUserRepository {
    pub users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, mut user: User) -> RepositoryResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::already_exists("duplicate email"));
        }
        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

/// Job or drawing collection kept as ordered documents.
pub struct InMemoryJobRepository {
    pub label: &'static str,
    pub docs: Mutex<Vec<Job>>,
}

impl InMemoryJobRepository {
    pub fn new(label: &'static str) -> Self {
        InMemoryJobRepository {
            label,
            docs: Mutex::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    fn not_found(&self) -> RepositoryError {
        RepositoryError::not_found(format!("{} not found", self.label))
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn list(&self) -> RepositoryResult<Vec<Job>> {
        Ok(self.docs.lock().unwrap().clone())
    }

    async fn get_by_id(&self, id: ObjectId) -> RepositoryResult<Job> {
        let docs = self.docs.lock().unwrap();
        docs.iter()
            .find(|j| j.id == Some(id))
            .cloned()
            .ok_or_else(|| self.not_found())
    }

    async fn insert(&self, mut job: Job) -> RepositoryResult<Job> {
        job.id = Some(ObjectId::new());
        self.docs.lock().unwrap().push(job.clone());
        Ok(job)
    }

    async fn set_fields(&self, id: ObjectId, changes: Document) -> RepositoryResult<()> {
        let mut docs = self.docs.lock().unwrap();
        let job = docs
            .iter_mut()
            .find(|j| j.id == Some(id))
            .ok_or_else(|| self.not_found())?;

        // same merge the store performs for $set on top-level fields
        let mut current = bson::to_document(&*job)?;
        for (key, value) in changes {
            current.insert(key, value);
        }
        *job = bson::from_document(current)?;
        Ok(())
    }

    async fn delete(&self, id: ObjectId) -> RepositoryResult<()> {
        let mut docs = self.docs.lock().unwrap();
        let before = docs.len();
        docs.retain(|j| j.id != Some(id));
        if docs.len() == before {
            return Err(self.not_found());
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCounterRepository {
    pub counters: Mutex<HashMap<String, i64>>,
}

#[async_trait]
impl CounterRepository for InMemoryCounterRepository {
    async fn next_value(&self, name: &str) -> RepositoryResult<i64> {
        let mut counters = self.counters.lock().unwrap();
        let seq = counters.entry(name.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

/// Counter whose store is always unreachable.
pub struct FailingCounterRepository;

#[async_trait]
impl CounterRepository for FailingCounterRepository {
    async fn next_value(&self, _name: &str) -> RepositoryResult<i64> {
        Err(RepositoryError::ConnectionError("server selection timeout".to_string()))
    }
}

#[derive(Default)]
pub struct InMemoryTempImageRepository {
    pub images: Mutex<Vec<TempImage>>,
}

#[async_trait]
impl TempImageRepository for InMemoryTempImageRepository {
    async fn insert(&self, mut image: TempImage) -> RepositoryResult<TempImage> {
        image.id = Some(ObjectId::new());
        self.images.lock().unwrap().push(image.clone());
        Ok(image)
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<TempImage>> {
        let images = self.images.lock().unwrap();
        Ok(images.iter().find(|i| i.name == name).cloned())
    }
}

/// A router over in-memory stores, with handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub jobs: Arc<InMemoryJobRepository>,
    pub drawings: Arc<InMemoryJobRepository>,
    pub temps: Arc<InMemoryTempImageRepository>,
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(Arc::new(InMemoryCounterRepository::default()), AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::build(Arc::new(InMemoryCounterRepository::default()), config)
    }

    pub fn with_counter(counter_repo: Arc<dyn CounterRepository>) -> Self {
        Self::build(counter_repo, AppConfig::default())
    }

    fn build(counter_repo: Arc<dyn CounterRepository>, config: AppConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let jobs = Arc::new(InMemoryJobRepository::new("Job"));
        let drawings = Arc::new(InMemoryJobRepository::new("Drawing"));
        let temps = Arc::new(InMemoryTempImageRepository::default());
        let jwt_utils = Arc::new(JwtTokenUtilsImpl::new(JwtConfig::default()));

        let services = ApiServices {
            user_service: Arc::new(UserServiceImpl::new(users.clone(), jwt_utils.clone())),
            job_service: Arc::new(JobServiceImpl::new(jobs.clone(), counter_repo)),
            drawing_service: Arc::new(DrawingServiceImpl::new(drawings.clone(), jobs.clone())),
            temp_service: Arc::new(TempImageServiceImpl::new(temps.clone())),
            auth_state: Arc::new(AuthState {
                jwt_utils: jwt_utils.clone(),
            }),
        };

        TestApp {
            router: app_router(&services, &config),
            users,
            jobs,
            drawings,
            temps,
            jwt_utils,
        }
    }

    pub fn token(&self) -> String {
        self.jwt_utils
            .generate_token(&ObjectId::new().to_hex(), "tester@example.com")
            .unwrap()
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
