use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use tasklane_application::{Clock, SearchIndex, TokenService, UserRecord};
use tasklane_domain::{MEMBER_ROLE_ID, RoleId, UserId};
use tasklane_infrastructure::{InMemorySearchIndex, JwtTokenCodec, SolrSearchIndex, SystemClock};

use super::build_router;
use crate::api_services::{StorePorts, build_app_state};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const SECRET: &[u8] = b"router-tests-secret-with-enough-bytes";

struct Harness {
    router: Router,
    ports: StorePorts,
    tokens: TokenService,
}

impl Harness {
    fn new(search_index: Arc<dyn SearchIndex>) -> Result<Self, Box<dyn std::error::Error>> {
        let ports = StorePorts::in_memory()?;
        let state = build_app_state(ports.clone(), search_index, SECRET)?;
        let router = build_router(state, "http://localhost:5173")?;
        let codec = JwtTokenCodec::new(SECRET)?;
        let tokens = TokenService::new(Arc::new(codec), Arc::new(SystemClock));

        Ok(Self {
            router,
            ports,
            tokens,
        })
    }

    fn with_memory_index() -> Result<Self, Box<dyn std::error::Error>> {
        Self::new(Arc::new(InMemorySearchIndex::new()))
    }

    async fn seed_user(
        &self,
        id: &str,
        role_id: RoleId,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let now = Utc::now();
        self.ports
            .user_repository
            .create(UserRecord {
                id: UserId::parse(id)?,
                name: id.to_owned(),
                email: format!("{id}@example.com"),
                password_hash: "unused".to_owned(),
                role_id,
                timezone: "UTC".to_owned(),
                language: "en".to_owned(),
                created_at: now,
                updated_at: now,
            })
            .await?;

        Ok(self.tokens.issue(id)?)
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value), Box<dyn std::error::Error>> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = response.into_body().collect().await?.to_bytes();
        let payload = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        Ok((status, payload))
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

struct PastClock;

impl Clock for PastClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now() - chrono::Duration::hours(48)
    }
}

#[tokio::test]
async fn protected_routes_reject_missing_or_malformed_credentials() -> TestResult {
    let harness = Harness::with_memory_index()?;

    for authorization in [None, Some("Token abc"), Some("Bearer"), Some("Bearer not-a-jwt")] {
        let (status, body) = harness
            .send("GET", "/projects", authorization, None)
            .await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["message"].is_string());
    }

    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> TestResult {
    let harness = Harness::with_memory_index()?;
    harness.seed_user("mia", MEMBER_ROLE_ID).await?;
    let stale = TokenService::new(Arc::new(JwtTokenCodec::new(SECRET)?), Arc::new(PastClock))
        .issue("mia")?;

    let (status, _) = harness
        .send("GET", "/users/me", Some(&bearer(&stale)), None)
        .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn health_is_outside_the_gate() -> TestResult {
    let harness = Harness::with_memory_index()?;

    let (status, body) = harness.send("GET", "/health", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn register_and_login_are_public_and_yield_a_working_token() -> TestResult {
    let harness = Harness::with_memory_index()?;

    let (status, created) = harness
        .send(
            "POST",
            "/users/register",
            Some("Bearer garbage"),
            Some(json!({
                "name": "Ada",
                "email": "Ada@Example.com",
                "password": "correct horse"
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created["id"].is_string());

    let (status, _) = harness
        .send(
            "POST",
            "/users/login",
            None,
            Some(json!({
                "email": "ada@example.com",
                "password": "wrong password"
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, login) = harness
        .send(
            "POST",
            "/users/login",
            None,
            Some(json!({
                "email": "ada@example.com",
                "password": "correct horse"
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().unwrap_or_default().to_owned();

    let (status, me) = harness
        .send("GET", "/users/me", Some(&bearer(&token)), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], created["id"]);
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["role_name"], "member");
    assert!(me.get("password_hash").is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let payload = json!({"name": "Ada", "email": "ada@example.com", "password": "correct horse"});

    let (first, _) = harness
        .send("POST", "/users/register", None, Some(payload.clone()))
        .await?;
    let (second, _) = harness
        .send("POST", "/users/register", None, Some(payload))
        .await?;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
    Ok(())
}

#[tokio::test]
async fn member_cannot_delete_users_and_store_is_unchanged() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let admin = harness.seed_user("root", RoleId::new(1)).await?;
    let member = harness.seed_user("mia", MEMBER_ROLE_ID).await?;
    harness.seed_user("vic", MEMBER_ROLE_ID).await?;
    let victim = UserId::parse("vic")?;

    let (status, _) = harness
        .send("DELETE", "/users/vic", Some(&bearer(&member)), None)
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let kept = harness.ports.user_repository.find_by_id(&victim).await?;
    assert!(kept.is_some());

    let (status, _) = harness
        .send("GET", "/users", Some(&bearer(&member)), None)
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = harness
        .send("DELETE", "/users/vic", Some(&bearer(&admin)), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    let removed = harness.ports.user_repository.find_by_id(&victim).await?;
    assert!(removed.is_none());
    Ok(())
}

#[tokio::test]
async fn admin_lists_users_and_roles() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let admin = harness.seed_user("root", RoleId::new(1)).await?;
    harness.seed_user("mia", MEMBER_ROLE_ID).await?;

    let (status, users) = harness
        .send("GET", "/users", Some(&bearer(&admin)), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().map(Vec::len), Some(2));

    let (status, roles) = harness
        .send("GET", "/users/roles", Some(&bearer(&admin)), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roles[0]["name"], "admin");
    Ok(())
}

#[tokio::test]
async fn project_creation_succeeds_when_index_is_unreachable() -> TestResult {
    let unreachable = SolrSearchIndex::new(
        "http://127.0.0.1:1/solr",
        "todoapp",
        Duration::from_millis(200),
    )?;
    let harness = Harness::new(Arc::new(unreachable))?;
    let token = harness.seed_user("mia", MEMBER_ROLE_ID).await?;

    let (status, created) = harness
        .send(
            "POST",
            "/projects",
            Some(&bearer(&token)),
            Some(json!({"name": "Roadmap", "start_date": "2025-01-01"})),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let project_id = created["id"].as_str().unwrap_or_default().to_owned();

    let (status, project) = harness
        .send(
            "GET",
            &format!("/projects/{project_id}"),
            Some(&bearer(&token)),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["name"], "Roadmap");
    assert_eq!(project["created_by"], "mia");
    Ok(())
}

#[tokio::test]
async fn search_requires_a_keyword_and_finds_created_entities() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let token = harness.seed_user("mia", MEMBER_ROLE_ID).await?;

    let (status, _) = harness
        .send("GET", "/search", Some(&bearer(&token)), None)
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    harness
        .send(
            "POST",
            "/tasks",
            Some(&bearer(&token)),
            Some(json!({"title": "Draft roadmap", "priority": "high"})),
        )
        .await?;

    let (status, hits) = harness
        .send("GET", "/search?query=roadmap", Some(&bearer(&token)), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits[0]["type"], "task");
    assert_eq!(hits[0]["title"], "Draft roadmap");
    Ok(())
}

#[tokio::test]
async fn task_routes_validate_references() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let token = harness.seed_user("mia", MEMBER_ROLE_ID).await?;

    let (status, _) = harness
        .send(
            "POST",
            "/tasks",
            Some(&bearer(&token)),
            Some(json!({"title": "Orphan", "project_id": "missing"})),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = harness
        .send(
            "GET",
            "/projects/missing/tasks",
            Some(&bearer(&token)),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = harness
        .send(
            "POST",
            "/tasks",
            Some(&bearer(&token)),
            Some(json!({"title": "Bad priority", "priority": "urgent"})),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn project_tasks_and_deletes_round_through_the_api() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let token = harness.seed_user("mia", MEMBER_ROLE_ID).await?;
    let auth = bearer(&token);

    let (_, project) = harness
        .send(
            "POST",
            "/projects",
            Some(&auth),
            Some(json!({"id": "p1", "name": "Launch"})),
        )
        .await?;
    assert_eq!(project["id"], "p1");

    let (status, task) = harness
        .send(
            "POST",
            "/tasks",
            Some(&auth),
            Some(json!({
                "title": "Book venue",
                "project_id": "p1",
                "assignee_id": "mia"
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = task["id"].as_str().unwrap_or_default().to_owned();

    let (status, tasks) = harness
        .send("GET", "/projects/p1/tasks", Some(&auth), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks[0]["status"], "todo");
    assert_eq!(tasks[0]["priority"], "medium");

    let (status, _) = harness
        .send("DELETE", &format!("/tasks/{task_id}"), Some(&auth), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = harness
        .send("GET", &format!("/tasks/{task_id}"), Some(&auth), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = harness
        .send("DELETE", "/projects/p1", Some(&auth), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn collaboration_routes_require_a_token() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let routes = [
        ("GET", "/projects/p1/members"),
        ("POST", "/projects/p1/members/mia"),
        ("GET", "/tasks/t1/subtasks"),
        ("POST", "/tasks/t1/subtasks"),
        ("GET", "/tasks/t1/comments"),
        ("POST", "/comments"),
        ("GET", "/notifications"),
        ("POST", "/notifications"),
    ];

    for (method, uri) in routes {
        let (status, _) = harness.send(method, uri, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }

    Ok(())
}

#[tokio::test]
async fn members_subtasks_comments_and_notifications_round_through_the_api() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let mia = bearer(&harness.seed_user("mia", MEMBER_ROLE_ID).await?);
    let bob = bearer(&harness.seed_user("bob", MEMBER_ROLE_ID).await?);
    harness
        .send(
            "POST",
            "/projects",
            Some(&mia),
            Some(json!({"id": "p1", "name": "Launch"})),
        )
        .await?;
    harness
        .send(
            "POST",
            "/tasks",
            Some(&mia),
            Some(json!({
                "id": "t1",
                "title": "Book venue",
                "project_id": "p1"
            })),
        )
        .await?;

    for _ in 0..2 {
        let (status, body) = harness
            .send("POST", "/projects/p1/members/bob", Some(&mia), None)
            .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "member added");
    }
    let (status, _) = harness
        .send("POST", "/projects/p1/members/ghost", Some(&mia), None)
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, members) = harness
        .send("GET", "/projects/p1/members", Some(&mia), None)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        members,
        json!([{"id": "bob", "name": "bob", "email": "bob@example.com"}])
    );

    let (status, created) = harness
        .send(
            "POST",
            "/tasks/t1/subtasks",
            Some(&mia),
            Some(json!({"title": "Sign contract"})),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (_, subtasks) = harness
        .send("GET", "/tasks/t1/subtasks", Some(&mia), None)
        .await?;
    assert_eq!(subtasks[0]["id"], created["id"]);
    assert_eq!(subtasks[0]["is_complete"], false);

    let (status, _) = harness
        .send(
            "POST",
            "/comments",
            Some(&bob),
            Some(json!({"task_id": "t1", "content": "Venue confirmed"})),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = harness
        .send(
            "POST",
            "/comments",
            Some(&bob),
            Some(json!({"task_id": "ghost", "content": "Hello"})),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, comments) = harness
        .send("GET", "/tasks/t1/comments", Some(&mia), None)
        .await?;
    assert_eq!(comments[0]["author_id"], "bob");
    assert_eq!(comments[0]["content"], "Venue confirmed");

    let (status, _) = harness
        .send(
            "POST",
            "/notifications",
            Some(&mia),
            Some(json!({
                "type": "task_assigned",
                "message": "You were added to Launch",
                "user_id": "bob"
            })),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (_, for_bob) = harness
        .send("GET", "/notifications", Some(&bob), None)
        .await?;
    let (_, for_mia) = harness
        .send("GET", "/notifications", Some(&mia), None)
        .await?;
    assert_eq!(for_bob[0]["type"], "task_assigned");
    assert_eq!(for_bob[0]["is_read"], false);
    assert_eq!(for_mia, json!([]));
    Ok(())
}

#[tokio::test]
async fn deleting_a_project_removes_its_tasks_from_listings() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let auth = bearer(&harness.seed_user("mia", MEMBER_ROLE_ID).await?);
    harness
        .send(
            "POST",
            "/projects",
            Some(&auth),
            Some(json!({"id": "p1", "name": "Launch"})),
        )
        .await?;
    harness
        .send(
            "POST",
            "/tasks",
            Some(&auth),
            Some(json!({
                "id": "t1",
                "title": "Book venue",
                "project_id": "p1"
            })),
        )
        .await?;

    let (status, _) = harness
        .send("DELETE", "/projects/p1", Some(&auth), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, tasks) = harness.send("GET", "/tasks", Some(&auth), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks, json!([]));
    let (status, _) = harness.send("GET", "/tasks/t1", Some(&auth), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_a_user_clears_their_task_assignments() -> TestResult {
    let harness = Harness::with_memory_index()?;
    let admin = bearer(&harness.seed_user("root", RoleId::new(1)).await?);
    harness.seed_user("mia", MEMBER_ROLE_ID).await?;
    harness
        .send(
            "POST",
            "/tasks",
            Some(&admin),
            Some(json!({
                "id": "t1",
                "title": "Book venue",
                "assignee_id": "mia"
            })),
        )
        .await?;

    let (status, _) = harness
        .send("DELETE", "/users/mia", Some(&admin), None)
        .await?;
    assert_eq!(status, StatusCode::OK);

    let (status, task) = harness.send("GET", "/tasks/t1", Some(&admin), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(task["assignee_id"].is_null());
    Ok(())
}
