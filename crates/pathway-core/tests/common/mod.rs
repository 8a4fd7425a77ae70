#![allow(dead_code)]

use std::{
    collections::HashMap,
    io::Read,
    sync::{Arc, Mutex, PoisonError},
    thread,
};

use async_trait::async_trait;
use pathway_core::{
    api::{Credentials, NewPlan, PlanQuery, Registration},
    CareerPlan, Pathway, PathwayBuilder, PathwayError, PlanId, PlanService, PlanStatus, Profile,
    Result, TrackerConfig,
};
use serde_json::json;
use tempfile::TempDir;

pub const EMAIL: &str = "ana@example.com";
pub const PASSWORD: &str = "correct horse";

/// What happens to a plan created through [`FakePlanService`] while it is
/// polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Ready once fetched this many times
    CompleteAfter(usize),
    /// Reports an error once fetched this many times
    FailAfter(usize),
    /// Stays pending forever
    Never,
}

/// Scripted state of the fake service.
#[derive(Debug)]
pub struct FakeState {
    pub plans: Vec<CareerPlan>,
    pub accounts: HashMap<String, String>,
    pub profile: Profile,
    pub bearer: Option<String>,
    pub generation: Generation,
    /// Listings that still hide the created plan
    pub hidden_listings: usize,
    pub fail_listing: bool,
    pub fail_create: bool,
    pub fail_get: bool,
    pub created: Option<PlanId>,
    pub submitted: Vec<NewPlan>,
    pub fetches: usize,
    pub calls: Vec<String>,
    pub bearer_seen: Vec<Option<String>>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            plans: Vec::new(),
            accounts: HashMap::from([(EMAIL.to_string(), PASSWORD.to_string())]),
            profile: Profile::default(),
            bearer: None,
            generation: Generation::CompleteAfter(1),
            hidden_listings: 0,
            fail_listing: false,
            fail_create: false,
            fail_get: false,
            created: None,
            submitted: Vec::new(),
            fetches: 0,
            calls: Vec::new(),
            bearer_seen: Vec::new(),
        }
    }
}

/// In-memory plan service.
#[derive(Debug, Default)]
pub struct FakePlanService {
    state: Mutex<FakeState>,
}

pub fn plan(id: u64, target_role: &str, status: PlanStatus) -> CareerPlan {
    CareerPlan {
        id: PlanId::new(id),
        target_role: target_role.to_string(),
        current_role: "Analyst".to_string(),
        status,
        generated_content: (status == PlanStatus::Complete).then(generated_steps),
    }
}

pub fn generated_steps() -> serde_json::Value {
    json!({
        "steps": [
            { "title": "SQL fundamentals", "description": "Joins and window functions", "type": "course" },
            { "title": "Data modeling", "description": "Star schemas", "type": "reading" },
            { "title": "Pipeline project", "description": "Batch ETL end to end", "type": "project" }
        ]
    })
}

impl FakePlanService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_plans(plans: Vec<CareerPlan>) -> Arc<Self> {
        let service = Self::default();
        service.state().plans = plans;
        Arc::new(service)
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: impl Into<String>) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state();
        state.calls.push(call.into());
        let bearer = state.bearer.clone();
        state.bearer_seen.push(bearer);
        state
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn offline() -> PathwayError {
        PathwayError::connectivity("connection refused")
    }
}

#[async_trait]
impl PlanService for FakePlanService {
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let state = self.record(format!("login {}", credentials.email));
        match state.accounts.get(&credentials.email) {
            Some(password) if *password == credentials.password => {
                Ok(format!("token-{}", credentials.email))
            }
            _ => Err(PathwayError::Authentication {
                message: "Invalid email or password".to_string(),
            }),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        let mut state = self.record(format!("register {}", registration.email));
        if registration.password.len() < 8 {
            return Err(PathwayError::Registration {
                message: "Password must have at least 8 characters".to_string(),
                field: Some("password".to_string()),
            });
        }
        if state.accounts.contains_key(&registration.email) {
            return Err(PathwayError::Registration {
                message: "Email already registered".to_string(),
                field: Some("email".to_string()),
            });
        }
        state
            .accounts
            .insert(registration.email.clone(), registration.password.clone());
        Ok(())
    }

    async fn create_plan(&self, new_plan: &NewPlan) -> Result<()> {
        let mut state = self.record(format!("create {}", new_plan.target_role));
        if state.fail_create {
            return Err(Self::offline());
        }

        let id = state
            .plans
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(PlanId::UNASSIGNED)
            .next();
        state.plans.push(CareerPlan {
            id,
            target_role: new_plan.target_role.clone(),
            current_role: new_plan.current_role.clone(),
            status: PlanStatus::Pending,
            generated_content: None,
        });
        state.created = Some(id);
        state.submitted.push(new_plan.clone());
        Ok(())
    }

    async fn list_plans(&self, query: &PlanQuery) -> Result<Vec<CareerPlan>> {
        let mut state = self.record(format!("list {}", query.to_query_string()));
        if state.fail_listing {
            return Err(Self::offline());
        }

        let hidden = if state.hidden_listings > 0 {
            state.hidden_listings -= 1;
            state.created
        } else {
            None
        };

        let mut plans: Vec<CareerPlan> = state
            .plans
            .iter()
            .filter(|p| Some(p.id) != hidden)
            .cloned()
            .collect();
        if query.newest_first {
            plans.sort_by(|a, b| b.id.cmp(&a.id));
        }
        if let Some(size) = query.size {
            plans.truncate(size as usize);
        }
        Ok(plans)
    }

    async fn get_plan(&self, id: PlanId) -> Result<Option<CareerPlan>> {
        let mut state = self.record(format!("get {id}"));
        if state.fail_get {
            return Err(Self::offline());
        }

        if state.created == Some(id) {
            state.fetches += 1;
            let fetches = state.fetches;
            let generation = state.generation;
            if let Some(plan) = state.plans.iter_mut().find(|p| p.id == id) {
                match generation {
                    Generation::CompleteAfter(n) if fetches >= n => {
                        plan.status = PlanStatus::Complete;
                        plan.generated_content = Some(generated_steps());
                    }
                    Generation::FailAfter(n) if fetches >= n => plan.status = PlanStatus::Error,
                    _ => plan.status = PlanStatus::Processing,
                }
            }
        }

        Ok(state.plans.iter().find(|p| p.id == id).cloned())
    }

    async fn get_profile(&self) -> Result<Profile> {
        let state = self.record("get profile");
        Ok(state.profile.clone())
    }

    async fn update_profile(&self, profile: &Profile) -> Result<Profile> {
        let mut state = self.record("update profile");
        state.profile = profile.clone();
        Ok(profile.clone())
    }

    fn set_bearer_token(&self, token: Option<String>) {
        self.state().bearer = token;
    }
}

/// Creates a pathway backed by `service` with a fresh database.
pub async fn create_test_pathway(service: Arc<FakePlanService>) -> (TempDir, Pathway) {
    create_test_pathway_with(service, TrackerConfig::default()).await
}

pub async fn create_test_pathway_with(
    service: Arc<FakePlanService>,
    config: TrackerConfig,
) -> (TempDir, Pathway) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pathway = PathwayBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_service(service)
        .with_tracker_config(config)
        .build()
        .await
        .expect("Failed to create pathway");
    (temp_dir, pathway)
}

/// Same as [`create_test_pathway`], already signed in as [`EMAIL`].
pub async fn signed_in_pathway(service: Arc<FakePlanService>) -> (TempDir, Pathway) {
    let (temp_dir, pathway) = create_test_pathway(service).await;
    pathway
        .session()
        .sign_in(EMAIL, PASSWORD)
        .await
        .expect("Failed to sign in");
    (temp_dir, pathway)
}

/// A request received by [`FakeHttpServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// Canned response for one method and path.
#[derive(Debug, Clone)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn new(method: &'static str, path: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            method,
            path,
            status,
            body: body.into(),
        }
    }
}

/// Local HTTP server answering with canned responses.
pub struct FakeHttpServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeHttpServer {
    pub fn start(routes: Vec<Route>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").expect("Failed to bind test server");
        let port = server
            .server_addr()
            .to_ip()
            .expect("Test server has no IP address")
            .port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let url = request.url().to_string();
                let method = request.method().as_str().to_string();
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());

                let path = url.split('?').next().unwrap_or_default().to_string();
                let route = routes
                    .iter()
                    .find(|r| r.method == method && r.path == path)
                    .cloned()
                    .unwrap_or_else(|| Route::new("", "", 404, ""));

                recorded
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(RecordedRequest {
                        method,
                        url,
                        authorization,
                        body,
                    });

                let header = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                    .expect("valid header");
                let response = tiny_http::Response::from_string(route.body)
                    .with_status_code(route.status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
