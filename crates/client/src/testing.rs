//! In-memory stand-in for the identity API, plus a recording navigator.
//!
//! Exposed to dependent crates for their tests and for offline demos.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Url;
use serde_json::{Value, json};

use qwenht_auth::TokenClaims;
use qwenht_auth::claims::RoleClaim;
use qwenht_core::{NavigationItem, PaginatedResponse, SortDirection, User, UserId};

use crate::interceptor::Navigator;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::{ChangePasswordRequest, ClientError, RegisterRequest};

/// Navigator that just remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visited().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(path.to_string());
    }
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    email: String,
    roles: Vec<String>,
}

#[derive(Debug, Clone)]
struct FailureRule {
    path_fragment: String,
    /// `None` simulates a dropped connection.
    status: Option<u16>,
}

#[derive(Debug, Default)]
struct BackendState {
    accounts: HashMap<String, Account>,
    users: Vec<User>,
    passwords: HashMap<UserId, String>,
    navigation: Vec<NavigationItem>,
    issued_tokens: Vec<String>,
    failures: Vec<FailureRule>,
    requests: Vec<HttpRequest>,
    next_user_id: u64,
    token_ttl_secs: i64,
    no_content_writes: bool,
}

/// Emulates the remote API behind the [`Transport`] seam.
///
/// Users, navigation and account endpoints behave like the real service:
/// protected routes require a bearer token this backend issued, paging is
/// 1-based, sorting accepts `email`, `firstName`, `lastName`, `isActive`, and
/// search matches email and names case-insensitively.
#[derive(Debug)]
pub struct InMemoryBackend {
    state: Mutex<BackendState>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BackendState {
                token_ttl_secs: 3600,
                next_user_id: 1,
                ..BackendState::default()
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn with_account(self, username: &str, password: &str, roles: &[&str]) -> Self {
        self.state().accounts.insert(
            username.to_string(),
            Account {
                password: password.to_string(),
                email: format!("{username}@example.com"),
                roles: roles.iter().map(|r| r.to_string()).collect(),
            },
        );
        self
    }

    pub fn with_navigation(self, items: Vec<NavigationItem>) -> Self {
        self.state().navigation = items;
        self
    }

    /// Answer successful POST and PUT writes with an empty `204 No Content`.
    /// Login and registration keep their bodies.
    pub fn with_no_content_writes(self) -> Self {
        self.state().no_content_writes = true;
        self
    }

    /// Seed `count` users named `User 01`..; emails `user01@example.com`...
    pub fn with_users(self, count: usize) -> Self {
        for n in 1..=count {
            self.insert_user(User {
                id: None,
                email: format!("user{n:02}@example.com"),
                first_name: "User".to_string(),
                last_name: format!("{n:02}"),
                roles: vec!["User".to_string()],
                is_active: true,
            });
        }
        self
    }

    pub fn insert_user(&self, mut user: User) -> User {
        let mut state = self.state();
        let id = UserId::new(format!("u-{:03}", state.next_user_id));
        state.next_user_id += 1;
        user.id = Some(id);
        state.users.push(user.clone());
        user
    }

    pub fn users(&self) -> Vec<User> {
        self.state().users.clone()
    }

    pub fn password_of(&self, id: &UserId) -> Option<String> {
        self.state().passwords.get(id).cloned()
    }

    /// Mint a token accepted by this backend without going through login.
    pub fn issue_token(&self, username: &str, roles: &[&str]) -> String {
        let mut state = self.state();
        let claims = TokenClaims {
            exp: Some((Utc::now() + Duration::seconds(state.token_ttl_secs)).timestamp()),
            name: Some(username.to_string()),
            email: Some(format!("{username}@example.com")),
            roles: RoleClaim::Many(roles.iter().map(|r| r.to_string()).collect()),
            ..TokenClaims::default()
        };
        let token = claims.to_unsigned_token();
        state.issued_tokens.push(token.clone());
        token
    }

    /// Forget every issued token; subsequent protected calls answer 401.
    pub fn revoke_all_tokens(&self) {
        self.state().issued_tokens.clear();
    }

    /// Answer `status` to every request whose URL contains `path_fragment`.
    pub fn fail_requests_to(&self, path_fragment: &str, status: u16) {
        self.state().failures.push(FailureRule {
            path_fragment: path_fragment.to_string(),
            status: Some(status),
        });
    }

    /// Drop the connection for every request whose URL contains `path_fragment`.
    pub fn disconnect_requests_to(&self, path_fragment: &str) {
        self.state().failures.push(FailureRule {
            path_fragment: path_fragment.to_string(),
            status: None,
        });
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state().requests.clone()
    }

    pub fn count_requests(&self, method: Method, path_fragment: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.method == method && r.url.contains(path_fragment))
            .count()
    }

    fn handle(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let url = Url::parse(&request.url)
            .map_err(|e| ClientError::Transport(format!("bad url {}: {e}", request.url)))?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();
        let segments: &[&str] = match segments.split_first() {
            Some((&"api", rest)) => rest,
            _ => &segments,
        };
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

        match (request.method, segments) {
            (Method::Post, ["account", "login"]) => Ok(self.login(request)),
            (Method::Post, ["account", "register"]) => Ok(self.register(request)),
            _ => {
                if !self.is_authorized(request) {
                    return Ok(HttpResponse::json_body(401, &json!({ "message": "Unauthorized" })));
                }
                Ok(self.protected(request, segments, &query))
            }
        }
    }

    fn is_authorized(&self, request: &HttpRequest) -> bool {
        let Some(token) = request.bearer_token() else {
            return false;
        };
        let state = self.state();
        state.issued_tokens.iter().any(|t| t == token)
            && TokenClaims::decode(token).is_ok_and(|c| !c.is_expired_at(Utc::now()))
    }

    fn login(&self, request: &HttpRequest) -> HttpResponse {
        let body = request.body.clone().unwrap_or(Value::Null);
        let username = body["username"].as_str().unwrap_or_default().to_string();
        let password = body["password"].as_str().unwrap_or_default();

        let account = self.state().accounts.get(&username).cloned();
        match account {
            Some(account) if account.password == password => {
                let roles: Vec<&str> = account.roles.iter().map(String::as_str).collect();
                let token = self.issue_token(&username, &roles);
                HttpResponse::json_body(200, &json!({ "token": token, "email": account.email }))
            }
            _ => HttpResponse::json_body(401, &json!({ "message": "Invalid username or password" })),
        }
    }

    fn register(&self, request: &HttpRequest) -> HttpResponse {
        let Some(req) = request
            .body
            .clone()
            .and_then(|b| serde_json::from_value::<RegisterRequest>(b).ok())
        else {
            return HttpResponse::json_body(400, &json!({ "message": "Invalid registration" }));
        };
        if self.state().users.iter().any(|u| u.email == req.email) {
            return HttpResponse::json_body(409, &json!({ "message": "Email already registered" }));
        }
        let user = self.insert_user(User {
            id: None,
            email: req.email.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            roles: vec![req.role.clone().unwrap_or_else(|| "User".to_string())],
            is_active: true,
        });
        self.state().accounts.insert(
            req.email.clone(),
            Account {
                password: req.password.clone(),
                email: req.email,
                roles: user.roles.clone(),
            },
        );
        HttpResponse::json_body(200, &json!({ "id": user.id }))
    }

    fn protected(
        &self,
        request: &HttpRequest,
        segments: &[&str],
        query: &HashMap<String, String>,
    ) -> HttpResponse {
        match (request.method, segments) {
            (Method::Get, ["navigation", "user"]) => {
                let items = NavigationItem::visible_sorted(&self.state().navigation);
                HttpResponse::json_body(200, &json!(items))
            }
            (Method::Get, ["navigation"]) => {
                HttpResponse::json_body(200, &json!(self.state().navigation))
            }
            (Method::Post, ["navigation"]) => self.create_navigation(request),
            (Method::Get, ["navigation", id]) => match self.find_navigation(id) {
                Some(item) => HttpResponse::json_body(200, &json!(item)),
                None => not_found(),
            },
            (Method::Put, ["navigation", id]) => self.update_navigation(id, request),
            (Method::Delete, ["navigation", id]) => {
                let Ok(id) = id.parse::<i64>() else {
                    return not_found();
                };
                let mut state = self.state();
                let before = state.navigation.len();
                state.navigation.retain(|item| item.id != id);
                if state.navigation.len() == before {
                    not_found()
                } else {
                    HttpResponse::new(204, "")
                }
            }
            (Method::Get, ["users"]) => HttpResponse::json_body(200, &json!(self.state().users)),
            (Method::Get, ["users", "paginated"]) => self.paginated(query),
            (Method::Post, ["users"]) => self.create_user(request),
            (Method::Post, ["users", id, "change-password"]) => {
                self.change_password(&UserId::new(*id), request)
            }
            (Method::Get, ["users", id]) => match self.find_user(&UserId::new(*id)) {
                Some(user) => HttpResponse::json_body(200, &json!(user)),
                None => not_found(),
            },
            (Method::Put, ["users", id]) => self.update_user(&UserId::new(*id), request),
            (Method::Delete, ["users", id]) => {
                let id = UserId::new(*id);
                let mut state = self.state();
                let before = state.users.len();
                state.users.retain(|u| u.id.as_ref() != Some(&id));
                if state.users.len() == before {
                    not_found()
                } else {
                    HttpResponse::new(204, "")
                }
            }
            _ => not_found(),
        }
    }

    // Navigation writes only touch top-level entries.
    fn find_navigation(&self, id: &str) -> Option<NavigationItem> {
        let id = id.parse::<i64>().ok()?;
        self.state().navigation.iter().find(|item| item.id == id).cloned()
    }

    fn create_navigation(&self, request: &HttpRequest) -> HttpResponse {
        let Some(item) = request
            .body
            .clone()
            .and_then(|b| serde_json::from_value::<NavigationItem>(b).ok())
        else {
            return HttpResponse::json_body(400, &json!({ "message": "Invalid navigation item" }));
        };
        let mut state = self.state();
        let id = state.navigation.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        let created = NavigationItem { id, ..item };
        state.navigation.push(created.clone());
        HttpResponse::json_body(201, &json!(created))
    }

    fn update_navigation(&self, id: &str, request: &HttpRequest) -> HttpResponse {
        let (Ok(id), Some(update)) = (
            id.parse::<i64>(),
            request
                .body
                .clone()
                .and_then(|b| serde_json::from_value::<NavigationItem>(b).ok()),
        ) else {
            return HttpResponse::json_body(400, &json!({ "message": "Invalid navigation item" }));
        };
        let mut state = self.state();
        match state.navigation.iter_mut().find(|item| item.id == id) {
            Some(existing) => {
                *existing = NavigationItem { id, ..update };
                HttpResponse::json_body(200, &json!(existing))
            }
            None => not_found(),
        }
    }

    fn find_user(&self, id: &UserId) -> Option<User> {
        self.state()
            .users
            .iter()
            .find(|u| u.id.as_ref() == Some(id))
            .cloned()
    }

    fn paginated(&self, query: &HashMap<String, String>) -> HttpResponse {
        let page = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let page_size = query.get("pageSize").and_then(|p| p.parse().ok()).unwrap_or(10);

        let mut users = self.state().users.clone();

        if let Some(term) = query.get("searchTerm").map(|t| t.to_lowercase()) {
            users.retain(|u| {
                u.email.to_lowercase().contains(&term)
                    || u.first_name.to_lowercase().contains(&term)
                    || u.last_name.to_lowercase().contains(&term)
            });
        }

        let direction = query
            .get("sortDirection")
            .and_then(|d| SortDirection::parse(d))
            .unwrap_or(SortDirection::Asc);
        if let Some(field) = query.get("sortField").map(|f| f.to_lowercase()) {
            users.sort_by(|a, b| {
                let ordering = match field.as_str() {
                    "email" => a.email.cmp(&b.email),
                    "firstname" => a.first_name.cmp(&b.first_name),
                    "lastname" => a.last_name.cmp(&b.last_name),
                    "isactive" => a.is_active.cmp(&b.is_active),
                    _ => std::cmp::Ordering::Equal,
                };
                match direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let page = PaginatedResponse::from_slice(&users, page, page_size);
        HttpResponse::json_body(200, &json!(page))
    }

    fn create_user(&self, request: &HttpRequest) -> HttpResponse {
        let Some(user) = request
            .body
            .clone()
            .and_then(|b| serde_json::from_value::<User>(b).ok())
        else {
            return HttpResponse::json_body(400, &json!({ "message": "Invalid user" }));
        };
        if self.state().users.iter().any(|u| u.email == user.email) {
            return HttpResponse::json_body(409, &json!({ "message": "Email already exists" }));
        }
        let created = self.insert_user(User { id: None, ..user });
        HttpResponse::json_body(201, &json!(created))
    }

    fn update_user(&self, id: &UserId, request: &HttpRequest) -> HttpResponse {
        let Some(update) = request
            .body
            .clone()
            .and_then(|b| serde_json::from_value::<User>(b).ok())
        else {
            return HttpResponse::json_body(400, &json!({ "message": "Invalid user" }));
        };
        let mut state = self.state();
        match state.users.iter_mut().find(|u| u.id.as_ref() == Some(id)) {
            Some(existing) => {
                *existing = User {
                    id: Some(id.clone()),
                    ..update
                };
                HttpResponse::json_body(200, &json!(existing))
            }
            None => not_found(),
        }
    }

    fn change_password(&self, id: &UserId, request: &HttpRequest) -> HttpResponse {
        let Some(req) = request
            .body
            .clone()
            .and_then(|b| serde_json::from_value::<ChangePasswordRequest>(b).ok())
        else {
            return HttpResponse::json_body(400, &json!({ "Error": "Invalid request" }));
        };
        if self.find_user(id).is_none() {
            return not_found();
        }
        if req.new_password != req.confirm_new_password {
            return HttpResponse::json_body(400, &json!({ "Error": "Passwords do not match" }));
        }
        if req.new_password.len() < 6 {
            return HttpResponse::json_body(
                400,
                &json!({ "Error": "Password must be at least 6 characters long" }),
            );
        }
        self.state().passwords.insert(id.clone(), req.new_password);
        HttpResponse::json_body(200, &json!({ "message": "Password changed" }))
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::json_body(404, &json!({ "message": "Not found" }))
}

#[async_trait(?Send)]
impl Transport for InMemoryBackend {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let failure = {
            let mut state = self.state();
            state.requests.push(request.clone());
            state
                .failures
                .iter()
                .find(|rule| request.url.contains(&rule.path_fragment))
                .cloned()
        };

        match failure {
            Some(FailureRule { status: Some(status), .. }) => Ok(HttpResponse::json_body(
                status,
                &json!({ "message": format!("injected failure ({status})") }),
            )),
            Some(FailureRule { status: None, .. }) => {
                Err(ClientError::Transport("connection refused".to_string()))
            }
            None => {
                let response = self.handle(&request)?;
                let strip = self.state().no_content_writes
                    && matches!(request.method, Method::Post | Method::Put)
                    && response.is_success()
                    && !request.url.contains("/account/");
                Ok(if strip { HttpResponse::new(204, "") } else { response })
            }
        }
    }
}
