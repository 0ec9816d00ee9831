use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use sea_orm::EntityTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, auth::ServerState};
use service::auth::service::AuthConfig;
use service::auth::CurrentUser;
use tower_http::cors::CorsLayer;

struct TestApp {
    app: Router,
    state: ServerState,
}

impl TestApp {
    async fn new() -> anyhow::Result<Self> {
        let db = models::db::connect_in_memory().await?;
        let state = ServerState::new(db, AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 });
        let app = routes::build_router(state.clone(), CorsLayer::very_permissive());
        Ok(Self { app, state })
    }

    async fn user(&self, email: &str) -> anyhow::Result<(i32, String)> {
        let u = models::user::create(&self.state.db, email, "Tester").await?;
        let token = self.state.auth.issue_token(&CurrentUser::from(u.clone()))?;
        Ok((u.id, token))
    }

    async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&v)?)
            }
            None => Body::empty(),
        };
        let res = self.app.clone().oneshot(builder.body(body)?).await?;
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::GET, uri, token, None).await
    }

    async fn post(&self, uri: &str, token: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }
}

struct Seeded {
    home_id: i32,
    beauty_id: i32,
    plumbing_id: i32,
    haircut_id: i32,
    town_id: i32,
}

async fn seed_catalog(app: &TestApp) -> anyhow::Result<Seeded> {
    let db = &app.state.db;
    let home = models::product_category::create(db, "Home Repairs").await?;
    let beauty = models::product_category::create(db, "Beauty").await?;
    let plumbing = models::product::create(db, home.id, "Plumbing").await?;
    models::product::create(db, home.id, "foo fighters cleanup").await?;
    models::product::create(db, beauty.id, "Foo styling").await?;
    let haircut = models::product::create(db, beauty.id, "Haircut").await?;
    let town = models::town::create(db, "Eldoret").await?;
    Ok(Seeded { home_id: home.id, beauty_id: beauty.id, plumbing_id: plumbing.id, haircut_id: haircut.id, town_id: town.id })
}

/// Provider profile for a fresh user; returns (token, ProviderServiceID).
async fn provider(app: &TestApp, email: &str, product_id: i32) -> anyhow::Result<(String, i64)> {
    let (_, token) = app.user(email).await?;
    let (status, body) = app.post("/services/providers", &token, json!({"ProductID": product_id})).await?;
    assert_eq!(status, StatusCode::CREATED);
    let ps = body["Services"][0]["ProviderServiceID"].as_i64().unwrap_or_default();
    Ok((token, ps))
}

fn request_body(ps: i64, text: &str) -> Value {
    json!({"ProviderServiceID": ps, "Latitude": -0.52, "Longitude": 35.27, "RequestText": text})
}

fn ids(v: &Value) -> Vec<i64> {
    v.as_array().map(|a| a.iter().filter_map(|x| x["id"].as_i64()).collect()).unwrap_or_default()
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, body) = app.get("/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn catalog_filters() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let s = seed_catalog(&app).await?;

    let (status, body) = app.get(&format!("/services?CategoryID={}", s.home_id), None).await?;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().cloned().unwrap_or_default();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|p| p["CategoryID"] == json!(s.home_id)));

    let (_, body) = app.get("/services?Name=foo", None).await?;
    let names: Vec<&str> = body.as_array().map(|a| a.iter().filter_map(|p| p["Name"].as_str()).collect()).unwrap_or_default();
    assert_eq!(names, vec!["foo fighters cleanup"]);

    let (_, body) = app.get(&format!("/services?CategoryID={}&Name=Hair", s.beauty_id), None).await?;
    assert_eq!(ids(&body), vec![s.haircut_id as i64]);

    let (status, body) = app.get("/services?CategoryID=abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["CategoryID"][0], "A valid integer is required.");

    let (_, body) = app.get("/services/all", None).await?;
    assert_eq!(body[0]["services"].as_array().map(Vec::len), Some(2));
    let (_, body) = app.get("/services/categories", None).await?;
    assert_eq!(body[1]["Name"], "Beauty");
    let (status, body) = app.get("/services/advertisements", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (status, _) = app.get("/services/requests", None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.get("/services/requests", Some("not-a-jwt")).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (id, token) = app.user("gone@x.io").await?;
    models::user::Entity::delete_by_id(id).exec(&app.state.db).await?;
    let (status, _) = app.get("/services/requests", Some(&token)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn create_request_is_owned_by_caller() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let s = seed_catalog(&app).await?;
    let (_, ps) = provider(&app, "pro@x.io", s.plumbing_id).await?;
    let (client_id, client) = app.user("client@x.io").await?;

    let mut body = request_body(ps, "Kitchen tap drips");
    body["LocationID"] = json!(s.town_id);
    let (status, created) = app.post("/services/requests", &client, body).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["UserID"], json!(client_id));
    assert_eq!(created["Service"]["Name"], "Plumbing");
    assert_eq!(created["Location"]["Name"], "Eldoret");

    let (status, errs) = app
        .post("/services/requests", &client, json!({"ProviderServiceID": ps, "Latitude": 1.0, "Longitude": 2.0}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errs["RequestText"][0], "This field is required.");

    let (status, errs) = app.post("/services/requests", &client, request_body(4040, "x")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errs["ProviderServiceID"][0], "Invalid pk \"4040\" - object does not exist.");
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_field_error() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, token) = app.user("c@x.io").await?;
    let req = Request::builder()
        .method(Method::POST)
        .uri("/services/requests")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let res = app.app.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn responses_and_unanswered_views() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let s = seed_catalog(&app).await?;
    let (pro, ps) = provider(&app, "pro@x.io", s.plumbing_id).await?;
    let (_, alice) = app.user("alice@x.io").await?;
    let (_, bob) = app.user("bob@x.io").await?;

    let (_, r1) = app.post("/services/requests", &alice, request_body(ps, "first")).await?;
    let (_, r2) = app.post("/services/requests", &alice, request_body(ps, "second")).await?;
    let (_, r3) = app.post("/services/requests", &bob, request_body(ps, "bob's")).await?;
    let r1_id = r1["id"].as_i64().unwrap_or_default();

    let (status, resp) = app
        .post("/services/responses", &pro, json!({"ServiceRequestID": r1_id, "ResponseText": "Coming at 10"}))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["ServiceRequestID"], json!(r1_id));

    let (status, errs) = app
        .post("/services/responses", &pro, json!({"ServiceRequestID": 9999, "ResponseText": "?"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(errs.get("ServiceRequestID").is_some());

    let (_, mine) = app.get("/services/requests/client", Some(&alice)).await?;
    assert_eq!(ids(&mine), vec![r1_id, r2["id"].as_i64().unwrap_or_default()]);
    let (_, mine) = app.get("/services/requests", Some(&bob)).await?;
    assert_eq!(ids(&mine), vec![r3["id"].as_i64().unwrap_or_default()]);

    let (_, open) = app.get("/services/requests/unanswered/provider", Some(&pro)).await?;
    assert!(!ids(&open).contains(&r1_id));
    assert_eq!(ids(&open).len(), 2);
    let (_, open) = app.get("/services/requests/unanswered/client", Some(&alice)).await?;
    assert_eq!(ids(&open), vec![r2["id"].as_i64().unwrap_or_default()]);
    let (_, all) = app.get("/services/requests/provider", Some(&pro)).await?;
    assert_eq!(ids(&all).len(), 3);

    let (_, to_alice) = app.get("/services/responses/client", Some(&alice)).await?;
    assert_eq!(to_alice.as_array().map(Vec::len), Some(1));
    let (_, to_bob) = app.get("/services/responses/client", Some(&bob)).await?;
    assert_eq!(to_bob, json!([]));
    let (_, from_pro) = app.get("/services/responses/provider", Some(&pro)).await?;
    assert_eq!(from_pro.as_array().map(Vec::len), Some(1));
    let (_, own) = app.get("/services/responses", Some(&pro)).await?;
    assert_eq!(own, from_pro);

    let (status, _) = app.get("/services/responses/provider", Some(&alice)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = app.get("/services/responses", Some(&alice)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn provider_profile_lifecycle() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let s = seed_catalog(&app).await?;
    let (uid, token) = app.user("pro@x.io").await?;

    let (status, _) = app.get("/services/providers/me", Some(&token)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let body = json!({
        "ProductID": s.plumbing_id,
        "LocationID": s.town_id,
        "AgeBracket": "All",
        "WorkingDays": ["Tuesday", "Monday"],
        "ServiceIDs": [s.haircut_id]
    });
    let (status, created) = app.post("/services/providers", &token, body.clone()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["UserID"], json!(uid));
    assert_eq!(created["WorkingDays"], json!(["Monday", "Tuesday"]));
    assert_eq!(created["Services"].as_array().map(Vec::len), Some(2));

    let (status, me) = app.get("/services/providers/me", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], created["id"]);

    let (status, _) = app.post("/services/providers", &token, body).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, other) = app.user("other@x.io").await?;
    let (status, errs) = app
        .post("/services/providers", &other, json!({"ProductID": s.plumbing_id, "AgeBracket": "65+", "WorkingDays": "Monday"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(errs["AgeBracket"][0], "\"65+\" is not a valid choice.");
    assert_eq!(errs["WorkingDays"][0], "Expected a list of items but got type \"str\".");
    Ok(())
}
