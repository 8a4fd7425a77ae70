//! HTTP implementation of the plan service.

use std::{
    sync::{PoisonError, RwLock},
    time::Duration,
};

use async_trait::async_trait;
use log::debug;
use reqwest::{RequestBuilder, Response, StatusCode};

use super::{
    errors::extract_detail,
    requests::{Credentials, NewPlan, PlanQuery, Registration, TokenResponse},
    PlanService,
};
use crate::{
    error::{PathwayError, Result},
    models::{CareerPlan, PlanId, PlanListing, Profile},
};

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const PLANS_PATH: &str = "/api/v1/learning-paths";
const PROFILE_PATH: &str = "/api/v1/profile";

/// Plan service reached over HTTP.
pub struct HttpPlanService {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl HttpPlanService {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `PathwayError::Configuration` if the base URL is empty or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(PathwayError::Configuration {
                message: "Service base URL must not be empty".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("pathway/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| PathwayError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            bearer: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.bearer.read().unwrap_or_else(PoisonError::into_inner);
        match bearer.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        debug!("{} {}", response.status(), response.url());
        Ok(response)
    }
}

/// Turns a non-success response into an `Api` error, keeping any message the
/// service supplied.
async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_detail(&body)
        .map(|detail| detail.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unexpected response")
                .to_string()
        });

    Err(PathwayError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl PlanService for HttpPlanService {
    async fn login(&self, credentials: &Credentials) -> Result<String> {
        let response = self
            .send(self.http.post(self.url(LOGIN_PATH)).json(credentials))
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_detail(&body)
                .map(|detail| detail.message)
                .unwrap_or_else(|| "Invalid email or password".to_string());
            return Err(PathwayError::Authentication { message });
        }

        let token: TokenResponse = check_response(response).await?.json().await?;
        Ok(token.token)
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        let response = self
            .send(self.http.post(self.url(REGISTER_PATH)).json(registration))
            .await?;

        if response.status().is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(match extract_detail(&body) {
                Some(detail) => PathwayError::Registration {
                    message: detail.message,
                    field: detail.field,
                },
                None => PathwayError::Registration {
                    message: "Registration failed. Check your details and try again.".to_string(),
                    field: None,
                },
            });
        }

        check_response(response).await?;
        Ok(())
    }

    async fn create_plan(&self, plan: &NewPlan) -> Result<()> {
        let response = self
            .send(self.http.post(self.url(PLANS_PATH)).json(plan))
            .await?;
        check_response(response).await?;
        Ok(())
    }

    async fn list_plans(&self, query: &PlanQuery) -> Result<Vec<CareerPlan>> {
        let url = format!("{}{}", self.url(PLANS_PATH), query.to_query_string());
        let response = self.send(self.http.get(url)).await?;
        let listing: PlanListing = check_response(response).await?.json().await?;
        Ok(listing.into_plans())
    }

    async fn get_plan(&self, id: PlanId) -> Result<Option<CareerPlan>> {
        let url = format!("{}/{id}", self.url(PLANS_PATH));
        let response = self.send(self.http.get(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let plan = check_response(response).await?.json().await?;
        Ok(Some(plan))
    }

    async fn get_profile(&self) -> Result<Profile> {
        let response = self.send(self.http.get(self.url(PROFILE_PATH))).await?;
        Ok(check_response(response).await?.json().await?)
    }

    async fn update_profile(&self, profile: &Profile) -> Result<Profile> {
        let response = self
            .send(self.http.put(self.url(PROFILE_PATH)).json(profile))
            .await?;
        Ok(check_response(response).await?.json().await?)
    }

    fn set_bearer_token(&self, token: Option<String>) {
        let mut bearer = self.bearer.write().unwrap_or_else(PoisonError::into_inner);
        *bearer = token;
    }
}
