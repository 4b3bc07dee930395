use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use ohs_audit_core::AppResult;
use ohs_audit_domain::{
    Audit, FieldInput, NewClient, NewConsultingFirm, NewPrincipalContractor, NewProject, Project,
};
use ohs_audit_infrastructure::{Argon2PasswordHasher, InMemoryEmailOutbox, InMemoryStore};
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use crate::api_router::build_router;
use crate::api_services::{RepositorySet, build_app_state, build_session_layer};
use crate::state::AppState;

pub const PUBLIC_BASE_URL: &str = "http://localhost:8000";
pub const PASSWORD: &str = "Correct horse 9";

pub struct TestContext {
    pub state: AppState,
    pub outbox: Arc<InMemoryEmailOutbox>,
    pub router: Router,
}

pub fn test_context() -> TestContext {
    let store = Arc::new(InMemoryStore::new());
    let outbox = Arc::new(InMemoryEmailOutbox::new());
    let Ok(hasher) = Argon2PasswordHasher::with_cost(1024, 1, 1) else {
        unreachable!("test argon2 parameters are valid");
    };
    let Ok(state) = build_app_state(
        RepositorySet::in_memory(store),
        Arc::new(hasher),
        outbox.clone(),
        PUBLIC_BASE_URL,
        Duration::from_secs(5),
    ) else {
        unreachable!("test public base url is valid");
    };
    let router = build_router(
        state.clone(),
        build_session_layer(MemoryStore::default(), false, 30),
    );

    TestContext {
        state,
        outbox,
        router,
    }
}

impl TestContext {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        }
    }

    /// Creates an account and returns the cookie of a signed-in session.
    pub async fn sign_in(&self, username: &str) -> AppResult<String> {
        self.state.auth_service.create_user(username, PASSWORD).await?;
        let response = self
            .send(json_post(
                "/login/",
                None,
                &format!(r#"{{"username":"{username}","password":"{PASSWORD}"}}"#),
            ))
            .await;

        Ok(session_cookie(&response).unwrap_or_default())
    }

    pub async fn seed_project(&self) -> AppResult<Project> {
        let organizations = &self.state.organization_service;
        let client = organizations
            .ensure_client(NewClient::named("MBOMBELA MUNICIPALITY"))
            .await?;
        let firm = organizations
            .ensure_consulting_firm(NewConsultingFirm {
                name: "MK DUBE CONSULTING".to_owned(),
            })
            .await?;
        let contractor = organizations
            .ensure_principal_contractor(NewPrincipalContractor {
                name: "GABBY CONSTRUCTION".to_owned(),
                registration_number: None,
            })
            .await?;

        organizations
            .ensure_project(NewProject {
                title: "Road paving".to_owned(),
                permit_number: "MP-CWP/328/09/2024".to_owned(),
                location: "Shabalala Ward 1".to_owned(),
                client_id: client.id,
                consulting_engineer_id: firm.id,
                principal_contractor_id: contractor.id,
            })
            .await
    }

    pub async fn seed_audit(
        &self,
        project: &Project,
        day: u32,
        report_number: &str,
    ) -> AppResult<Audit> {
        let input = FieldInput::new()
            .with("project", project.id.to_string())
            .with("audit_date", format!("2025-07-{day:02}"))
            .with("audit_number", format!("{day:03}"))
            .with("performed_by", "LETHU SAFETY CONSULTANTS (PTY) LTD")
            .with("report_number", report_number)
            .with("overall_score_percentage", "84.00");

        self.state.audit_service.create_audit(&input).await
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri).header(header::ACCEPT, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap_or_default()
}

pub fn json_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri)
        .header(header::ORIGIN, PUBLIC_BASE_URL)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).unwrap_or_default()
}

pub fn form_post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::post(uri)
        .header(header::ORIGIN, PUBLIC_BASE_URL)
        .header(header::ACCEPT, "text/html")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).unwrap_or_default()
}

/// `name=value` pair of the session cookie set by a response.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(ToOwned::to_owned)
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    serde_json::from_slice(&bytes).unwrap_or_default()
}
