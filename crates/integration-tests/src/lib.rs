//! Integration tests for the Periodica storefront client.
//!
//! Tests drive a real [`periodica_storefront::Storefront`] against
//! [`FakeBackend`], an in-process axum server on an ephemeral port that
//! speaks the subscription backend's REST API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p periodica-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::body::{Body, to_bytes};
use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the fake backend stamps expiry on the tokens it issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenExpiry {
    /// Omit the `exp` claim.
    Missing,
    /// Expire this many seconds after issue. May be negative.
    In(i64),
}

/// A request as the fake backend received it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// JSON body, `None` when empty or not JSON.
    pub body: Option<Value>,
}

/// One registered account.
#[derive(Debug, Clone)]
struct Account {
    password: String,
    role: String,
}

struct BackendState {
    accounts: Mutex<HashMap<String, Account>>,
    /// Tokens currently honored, mapped to their subject.
    issued: Mutex<HashMap<String, String>>,
    login_expiry: Mutex<TokenExpiry>,
    refresh_expiry: Mutex<TokenExpiry>,
    /// Authorization header of every request to a protected endpoint.
    seen_authorization: Mutex<Vec<Option<String>>>,
    /// Subscription lines created per subject.
    subscriptions: Mutex<HashMap<String, Vec<Value>>>,
    /// Profile fields saved per subject.
    profiles: Mutex<HashMap<String, Value>>,
    /// Server-side cart items per subject.
    carts: Mutex<HashMap<String, Vec<Value>>>,
    /// Every request received, oldest first.
    requests: Mutex<Vec<RecordedRequest>>,
    publications: Vec<Value>,
    fail_checkout: AtomicBool,
    refresh_calls: AtomicUsize,
    serial: AtomicUsize,
}

/// REST backend stand-in bound to `127.0.0.1` on an ephemeral port.
///
/// Aborts the server when dropped.
pub struct FakeBackend {
    addr: SocketAddr,
    state: Arc<BackendState>,
    server: JoinHandle<()>,
}

impl FakeBackend {
    /// Start the server with a small publication catalog and no accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(BackendState {
            accounts: Mutex::new(HashMap::new()),
            issued: Mutex::new(HashMap::new()),
            login_expiry: Mutex::new(TokenExpiry::In(3600)),
            refresh_expiry: Mutex::new(TokenExpiry::In(3600)),
            seen_authorization: Mutex::new(Vec::new()),
            subscriptions: Mutex::new(HashMap::new()),
            profiles: Mutex::new(HashMap::new()),
            carts: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            publications: sample_publications(),
            fail_checkout: AtomicBool::new(false),
            refresh_calls: AtomicUsize::new(0),
            serial: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/auth/authenticate", post(authenticate))
            .route("/api/auth/signup", post(signup))
            .route("/api/auth/refresh", post(refresh))
            .route("/api/publications", get(list_publications))
            .route("/api/publications/{id}", get(get_publication))
            .route("/api/subscriptions/my", get(list_subscriptions))
            .route(
                "/api/subscriptions/create-from-cart",
                post(create_from_cart),
            )
            .route("/api/subscriptions/active", get(list_active_subscriptions))
            .route("/api/subscriptions/inactive", get(list_inactive_subscriptions))
            .route("/api/subscriptions/check/{publication_id}", get(check_subscription))
            .route("/api/subscriptions/{id}", delete(cancel_subscription))
            .route("/api/subscriptions/{id}/extend", post(extend_subscription))
            .route("/api/subscriptions/{id}/period", put(update_subscription_period))
            .route("/api/users/profile", get(get_profile).put(update_profile))
            .route("/api/users/change-password", put(change_password))
            .route("/api/cart", get(get_cart))
            .route("/api/cart/add", post(add_to_cart))
            .route("/api/cart/items/{id}", delete(remove_from_cart))
            .route("/api/cart/clear", post(clear_cart))
            .layer(middleware::from_fn_with_state(
                Arc::clone(&state),
                record_request,
            ))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// Base URL to configure the client with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Register an account the login endpoint will accept.
    pub fn add_account(&self, email: &str, password: &str, role: &str) {
        lock(&self.state.accounts).insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                role: role.to_string(),
            },
        );
    }

    /// Expiry stamped on tokens from the login endpoint.
    pub fn set_login_expiry(&self, expiry: TokenExpiry) {
        *lock(&self.state.login_expiry) = expiry;
    }

    /// Expiry stamped on tokens from the refresh endpoint.
    pub fn set_refresh_expiry(&self, expiry: TokenExpiry) {
        *lock(&self.state.refresh_expiry) = expiry;
    }

    /// Stop honoring every token issued so far.
    pub fn revoke_all_tokens(&self) {
        lock(&self.state.issued).clear();
    }

    /// Make `create-from-cart` answer 500.
    pub fn fail_checkout(&self, fail: bool) {
        self.state.fail_checkout.store(fail, Ordering::SeqCst);
    }

    /// Authorization headers seen on protected endpoints, oldest first.
    #[must_use]
    pub fn seen_authorization(&self) -> Vec<Option<String>> {
        lock(&self.state.seen_authorization).clone()
    }

    /// Subscription lines created for `email`.
    #[must_use]
    pub fn subscriptions_of(&self, email: &str) -> Vec<Value> {
        lock(&self.state.subscriptions)
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Every request received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.state.requests).clone()
    }

    /// Server-side cart items of `email`.
    #[must_use]
    pub fn cart_of(&self, email: &str) -> Vec<Value> {
        lock(&self.state.carts)
            .get(email)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of refresh requests received.
    #[must_use]
    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Build an unsigned token with the given claims.
#[must_use]
pub fn make_token(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupBody {
    email: String,
    password: String,
    username: String,
}

async fn authenticate(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<Credentials>,
) -> Response {
    let account = lock(&state.accounts).get(&body.email).cloned();
    match account {
        Some(account) if account.password == body.password => {
            let expiry = *lock(&state.login_expiry);
            let token = state.issue(&body.email, &account.role, expiry);
            Json(json!({ "token": token, "role": account.role })).into_response()
        }
        _ => error(StatusCode::UNAUTHORIZED, "Bad credentials"),
    }
}

async fn signup(State(state): State<Arc<BackendState>>, Json(body): Json<SignupBody>) -> Response {
    let mut accounts = lock(&state.accounts);
    if accounts.contains_key(&body.email) {
        return error(StatusCode::CONFLICT, "Email already registered");
    }
    if body.username.is_empty() {
        return error(StatusCode::BAD_REQUEST, "Username required");
    }
    accounts.insert(
        body.email,
        Account {
            password: body.password,
            role: "USER".to_string(),
        },
    );
    drop(accounts);
    (StatusCode::CREATED, Json(json!({ "message": "created" }))).into_response()
}

async fn refresh(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    let Some(subject) = state.subject_of(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Invalid token");
    };
    let role = lock(&state.accounts)
        .get(&subject)
        .map_or_else(|| "USER".to_string(), |a| a.role.clone());
    let expiry = *lock(&state.refresh_expiry);
    let token = state.issue(&subject, &role, expiry);
    Json(json!({ "accessToken": token })).into_response()
}

async fn list_publications(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    if state.authorize(&headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(Value::Array(state.publications.clone())).into_response()
}

async fn get_publication(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    if state.authorize(&headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    state
        .publications
        .iter()
        .find(|p| p["id"].as_i64() == Some(id))
        .map_or_else(
            || error(StatusCode::NOT_FOUND, "Publication not found"),
            |p| Json(p.clone()).into_response(),
        )
}

async fn list_subscriptions(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let lines = lock(&state.subscriptions)
        .get(&subject)
        .cloned()
        .unwrap_or_default();
    Json(Value::Array(lines)).into_response()
}

async fn create_from_cart(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    if state.fail_checkout.load(Ordering::SeqCst) {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Checkout unavailable");
    }

    let requested = body["subscriptions"].as_array().cloned().unwrap_or_default();
    let created: Vec<Value> = requested
        .iter()
        .map(|line| state.subscription_from(line))
        .collect();
    lock(&state.subscriptions)
        .entry(subject)
        .or_default()
        .extend(created);
    StatusCode::CREATED.into_response()
}

async fn cancel_subscription(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let mut subscriptions = lock(&state.subscriptions);
    let Some(lines) = subscriptions.get_mut(&subject) else {
        return error(StatusCode::NOT_FOUND, "Subscription not found");
    };
    let Some(line) = lines.iter_mut().find(|s| s["id"].as_i64() == Some(id)) else {
        return error(StatusCode::NOT_FOUND, "Subscription not found");
    };
    line["active"] = json!(false);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_active_subscriptions(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> Response {
    subscriptions_where(&state, &headers, true)
}

async fn list_inactive_subscriptions(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> Response {
    subscriptions_where(&state, &headers, false)
}

fn subscriptions_where(state: &BackendState, headers: &HeaderMap, active: bool) -> Response {
    let Some(subject) = state.authorize(headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let lines: Vec<Value> = lock(&state.subscriptions)
        .get(&subject)
        .map(|lines| {
            lines
                .iter()
                .filter(|s| s["active"].as_bool() == Some(active))
                .cloned()
                .collect()
        })
        .unwrap_or_default();
    Json(Value::Array(lines)).into_response()
}

async fn extend_subscription(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let mut subscriptions = lock(&state.subscriptions);
    let Some(line) = subscriptions
        .get_mut(&subject)
        .and_then(|lines| lines.iter_mut().find(|s| s["id"].as_i64() == Some(id)))
    else {
        return error(StatusCode::NOT_FOUND, "Subscription not found");
    };
    let months = line["subscriptionPeriod"].as_i64().unwrap_or(1);
    let end = line["endDate"]
        .as_str()
        .and_then(|raw| chrono::NaiveDateTime::parse_from_str(raw, DATE_FORMAT).ok())
        .unwrap_or_else(|| chrono::Utc::now().naive_utc());
    line["endDate"] = json!(months_after(end, months));
    line["active"] = json!(true);
    StatusCode::OK.into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodBody {
    subscription_period: i64,
}

async fn update_subscription_period(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<PeriodBody>,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    if ![1, 3, 6, 12].contains(&body.subscription_period) {
        return error(StatusCode::BAD_REQUEST, "Unsupported subscription period");
    }
    let mut subscriptions = lock(&state.subscriptions);
    let Some(line) = subscriptions
        .get_mut(&subject)
        .and_then(|lines| lines.iter_mut().find(|s| s["id"].as_i64() == Some(id)))
    else {
        return error(StatusCode::NOT_FOUND, "Subscription not found");
    };
    line["subscriptionPeriod"] = json!(body.subscription_period);
    StatusCode::OK.into_response()
}

async fn check_subscription(
    State(state): State<Arc<BackendState>>,
    Path(publication_id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let subscriptions = lock(&state.subscriptions);
    let active = subscriptions.get(&subject).and_then(|lines| {
        lines.iter().find(|s| {
            s["active"].as_bool() == Some(true)
                && s["publication"]["id"].as_i64() == Some(publication_id)
        })
    });
    match active {
        Some(line) => Json(json!({
            "hasActiveSubscription": true,
            "endDate": line["endDate"],
        }))
        .into_response(),
        None => Json(json!({ "hasActiveSubscription": false })).into_response(),
    }
}

async fn get_profile(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    Json(state.profile_of(&subject)).into_response()
}

async fn update_profile(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let mut profile = state.profile_of(&subject);
    for field in ["name", "address", "city", "postalCode", "phoneNumber"] {
        profile[field] = body[field].clone();
    }
    lock(&state.profiles).insert(subject, profile.clone());
    Json(profile).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordBody {
    current_password: String,
    new_password: String,
}

async fn change_password(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<PasswordBody>,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let mut accounts = lock(&state.accounts);
    let Some(account) = accounts.get_mut(&subject) else {
        return error(StatusCode::NOT_FOUND, "User not found");
    };
    if account.password != body.current_password {
        return error(StatusCode::BAD_REQUEST, "Current password is incorrect");
    }
    account.password = body.new_password;
    StatusCode::OK.into_response()
}

async fn get_cart(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let items = lock(&state.carts)
        .get(&subject)
        .cloned()
        .unwrap_or_default();
    Json(json!({ "id": 1, "items": items })).into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddToCartBody {
    publication_id: i64,
    subscription_period: i64,
}

async fn add_to_cart(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<AddToCartBody>,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let Some(publication) = state
        .publications
        .iter()
        .find(|p| p["id"].as_i64() == Some(body.publication_id))
        .cloned()
    else {
        return error(StatusCode::NOT_FOUND, "Publication not found");
    };
    let id = state.serial.fetch_add(1, Ordering::SeqCst);
    lock(&state.carts).entry(subject).or_default().push(json!({
        "id": id,
        "publication": publication,
        "subscriptionPeriod": body.subscription_period,
    }));
    StatusCode::OK.into_response()
}

async fn remove_from_cart(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    let mut carts = lock(&state.carts);
    let items = carts.entry(subject).or_default();
    let before = items.len();
    items.retain(|item| item["id"].as_i64() != Some(id));
    if items.len() == before {
        return error(StatusCode::NOT_FOUND, "Cart item not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn clear_cart(State(state): State<Arc<BackendState>>, headers: HeaderMap) -> Response {
    let Some(subject) = state.authorize(&headers) else {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    };
    lock(&state.carts).remove(&subject);
    StatusCode::OK.into_response()
}

/// Log the request, then hand it on with its body intact.
async fn record_request(
    State(state): State<Arc<BackendState>>,
    request: Request,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let Ok(bytes) = to_bytes(body, usize::MAX).await else {
        return error(StatusCode::BAD_REQUEST, "Unreadable body");
    };
    lock(&state.requests).push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        body: serde_json::from_slice(&bytes).ok(),
    });
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

// =============================================================================
// Helpers
// =============================================================================

impl BackendState {
    fn issue(&self, subject: &str, role: &str, expiry: TokenExpiry) -> String {
        let now = chrono::Utc::now().timestamp();
        let serial = self.serial.fetch_add(1, Ordering::SeqCst);
        let mut claims = json!({
            "sub": subject,
            "iat": now,
            "jti": serial,
            "authorities": [{ "authority": role }],
        });
        if let TokenExpiry::In(secs) = expiry {
            claims["exp"] = json!(now + secs);
        }

        let token = make_token(&claims);
        lock(&self.issued).insert(token.clone(), subject.to_string());
        token
    }

    fn subject_of(&self, headers: &HeaderMap) -> Option<String> {
        let token = bearer(headers)?;
        lock(&self.issued).get(token).cloned()
    }

    /// Record the request's authorization and return its subject if honored.
    fn authorize(&self, headers: &HeaderMap) -> Option<String> {
        let raw = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        lock(&self.seen_authorization).push(raw);
        self.subject_of(headers)
    }

    fn profile_of(&self, subject: &str) -> Value {
        if let Some(profile) = lock(&self.profiles).get(subject) {
            return profile.clone();
        }
        let role = lock(&self.accounts)
            .get(subject)
            .map_or_else(|| "USER".to_string(), |a| a.role.clone());
        json!({ "id": 1, "email": subject, "role": role })
    }

    fn subscription_from(&self, line: &Value) -> Value {
        let id = self.serial.fetch_add(1, Ordering::SeqCst);
        let start = chrono::Utc::now().naive_utc();
        let months = line["subscriptionPeriod"].as_i64().unwrap_or(1);
        let publication = self
            .publications
            .iter()
            .find(|p| p["id"] == line["publicationId"])
            .cloned()
            .unwrap_or(Value::Null);
        json!({
            "id": id,
            "publication": publication,
            "startDate": start.format(DATE_FORMAT).to_string(),
            "endDate": months_after(start, months),
            "subscriptionPeriod": line["subscriptionPeriod"],
            "totalPrice": line["totalPrice"],
            "active": true,
        })
    }
}

/// Zone-less timestamps, as the backend writes them.
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn months_after(start: chrono::NaiveDateTime, months: i64) -> String {
    let end = u32::try_from(months)
        .ok()
        .and_then(|m| start.checked_add_months(chrono::Months::new(m)))
        .unwrap_or(start);
    end.format(DATE_FORMAT).to_string()
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn sample_publications() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "title": "Nature Weekly",
            "description": "Field reports and photography",
            "publisher": "Greenleaf",
            "type": "MAGAZINE",
            "pricePerMonth": 9.99,
            "tags": ["science", "nature"]
        }),
        json!({
            "id": 2,
            "title": "Morning Ledger",
            "description": "Daily business news",
            "publisher": "Ledger Media",
            "type": "NEWSPAPER",
            "pricePerMonth": 15.5,
            "tags": ["business"]
        }),
        json!({
            "id": 3,
            "title": "Circuit Journal",
            "description": "Electronics research",
            "publisher": "Volt Press",
            "type": "JOURNAL",
            "pricePerMonth": 30,
            "tags": ["science", "engineering"]
        }),
    ]
}
