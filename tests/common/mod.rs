//! In-process fake of the rental REST API for integration tests.
#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{header::COOKIE, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use motorbike_admin::{resolve, ApiClient, FullConfig, ResourceScreen};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

pub const SESSION_COOKIE: &str = "SESSION=valid";
pub const ANONYMOUS_COOKIE: &str = "SESSION=anonymous";

type HandlerError = (StatusCode, String);

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    collections: HashMap<String, Vec<Value>>,
    next_numeric_id: i64,
    fail_lists: bool,
    stall_lists: bool,
    write_error: Option<HandlerError>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, segment: &str, rows: Vec<Value>) {
        let mut inner = self.inner.lock().unwrap();
        inner.collections.insert(segment.to_string(), rows);
    }

    pub fn rows(&self, segment: &str) -> Vec<Value> {
        let inner = self.inner.lock().unwrap();
        inner.collections.get(segment).cloned().unwrap_or_default()
    }

    /// Make every collection GET answer 500.
    pub fn fail_lists(&self, fail: bool) {
        self.inner.lock().unwrap().fail_lists = fail;
    }

    /// Make every collection GET hang instead of answering.
    pub fn stall_lists(&self, stall: bool) {
        self.inner.lock().unwrap().stall_lists = stall;
    }

    /// Make every POST/PUT/DELETE answer `status` with `body`.
    pub fn reject_writes(&self, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.inner.lock().unwrap().write_error = Some((status, body.to_string()));
    }

    /// Start serving on an ephemeral port; returns the base URL.
    pub async fn serve(&self) -> String {
        let app = Router::new()
            .route("/user", get(user))
            .route("/:segment", get(list).post(create))
            .route("/:segment/:id", get(read).put(update).delete(remove))
            .route("/:segment/:id/details", get(details))
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn check_write(&self) -> Result<(), HandlerError> {
        match &self.inner.lock().unwrap().write_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

fn id_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn find(rows: &[Value], id: &str) -> Option<Value> {
    rows.iter().find(|r| id_text(&r["id"]) == id).cloned()
}

async fn user(headers: HeaderMap) -> Result<Json<Value>, HandlerError> {
    let cookies = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if cookies.contains(SESSION_COOKIE) {
        Ok(Json(json!({ "name": "Ana Admin" })))
    } else if cookies.contains(ANONYMOUS_COOKIE) {
        Ok(Json(json!({ "name": null })))
    } else {
        Err((StatusCode::UNAUTHORIZED, String::new()))
    }
}

async fn list(
    State(api): State<FakeApi>,
    Path(segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, HandlerError> {
    let stall = api.inner.lock().unwrap().stall_lists;
    if stall {
        tokio::time::sleep(Duration::from_secs(60)).await;
    }
    let inner = api.inner.lock().unwrap();
    if inner.fail_lists {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "boom".into()));
    }
    let rows: Vec<Value> = inner
        .collections
        .get(&segment)
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .filter(|row| params.iter().all(|(k, v)| id_text(&row[k.as_str()]) == *v))
        .collect();
    Ok(Json(Value::Array(rows)))
}

async fn create(
    State(api): State<FakeApi>,
    Path(segment): Path<String>,
    Json(mut body): Json<Map<String, Value>>,
) -> Result<Json<Value>, HandlerError> {
    api.check_write()?;
    let mut inner = api.inner.lock().unwrap();
    if segment == "reservations" {
        let client_id = id_text(body.get("clientId").unwrap_or(&Value::Null));
        let clients = inner.collections.get("clients").cloned().unwrap_or_default();
        if find(&clients, &client_id).is_none() {
            return Err((StatusCode::BAD_REQUEST, "Client does not exist".into()));
        }
    }
    let id = if segment == "motorbikes" {
        inner.next_numeric_id += 1;
        json!(inner.next_numeric_id)
    } else {
        json!(uuid::Uuid::new_v4().to_string())
    };
    body.insert("id".into(), id);
    let row = Value::Object(body);
    inner.collections.entry(segment).or_default().push(row.clone());
    Ok(Json(row))
}

async fn read(
    State(api): State<FakeApi>,
    Path((segment, id)): Path<(String, String)>,
) -> Result<Json<Value>, HandlerError> {
    find(&api.rows(&segment), &id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, String::new()))
}

async fn update(
    State(api): State<FakeApi>,
    Path((segment, id)): Path<(String, String)>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<Value>, HandlerError> {
    api.check_write()?;
    let mut inner = api.inner.lock().unwrap();
    let rows = inner.collections.entry(segment.clone()).or_default();
    let row = rows
        .iter_mut()
        .find(|r| id_text(&r["id"]) == id)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("{} not found with id: {}", segment, id)))?;
    if let Some(existing) = row.as_object_mut() {
        for (k, v) in body {
            if k != "id" {
                existing.insert(k, v);
            }
        }
    }
    Ok(Json(row.clone()))
}

async fn remove(
    State(api): State<FakeApi>,
    Path((segment, id)): Path<(String, String)>,
) -> Result<StatusCode, HandlerError> {
    api.check_write()?;
    let mut inner = api.inner.lock().unwrap();
    if let Some(rows) = inner.collections.get_mut(&segment) {
        rows.retain(|r| id_text(&r["id"]) != id);
    }
    Ok(StatusCode::OK)
}

fn reservation_details(inner: &Inner, id: &str) -> Option<Value> {
    let get = |segment: &str| inner.collections.get(segment).cloned().unwrap_or_default();
    let reservation = find(&get("reservations"), id)?;
    let client = find(&get("clients"), &id_text(&reservation["clientId"]));
    let motorbike = find(&get("motorbikes"), &id_text(&reservation["motorbikeId"]));
    Some(json!({
        "id": reservation["id"],
        "client": client,
        "motorbike": motorbike,
        "reservationDate": reservation["reservationDate"],
        "startDate": reservation["startDate"],
        "endDate": reservation["endDate"],
    }))
}

async fn details(
    State(api): State<FakeApi>,
    Path((segment, id)): Path<(String, String)>,
) -> Result<Json<Value>, HandlerError> {
    let inner = api.inner.lock().unwrap();
    let not_found = (StatusCode::NOT_FOUND, String::new());
    let aggregate = match segment.as_str() {
        "reservations" => reservation_details(&inner, &id),
        "payments" => {
            let payments = inner.collections.get("payments").cloned().unwrap_or_default();
            find(&payments, &id).map(|p| {
                json!({
                    "id": p["id"],
                    "reservationId": p["reservationId"],
                    "amount": p["amount"],
                    "paymentDate": p["paymentDate"],
                    "status": p["status"],
                    "reservationDetails": reservation_details(&inner, &id_text(&p["reservationId"])),
                })
            })
        }
        _ => None,
    };
    aggregate.map(Json).ok_or(not_found)
}

/// Screen for `segment` over the built-in config, talking to `base_url`.
pub fn screen(base_url: &str, segment: &str) -> ResourceScreen {
    screen_with(&FullConfig::builtin(), base_url, segment)
}

pub fn screen_with(config: &FullConfig, base_url: &str, segment: &str) -> ResourceScreen {
    let model = resolve(config).unwrap();
    let api = ApiClient::new(base_url).unwrap();
    ResourceScreen::new(model.resource_by_path(segment).unwrap().clone(), api)
}

pub fn seed_rental(api: &FakeApi) {
    api.seed(
        "clients",
        vec![
            json!({"id": "c1", "name": "Ana", "email": "a@x.com", "phone": "111", "address": "St1"}),
            json!({"id": "c2", "name": "Bram", "email": "bram@rides.be", "phone": "222", "address": "Kerkstraat 4"}),
        ],
    );
    api.seed(
        "motorbikes",
        vec![json!({"id": 1, "make": "Honda", "model": "CB500", "year": "2023", "price": 5000.0})],
    );
    api.seed(
        "reservations",
        vec![
            json!({"id": "r1", "clientId": "c1", "motorbikeId": 1, "reservationDate": "2024-05-01", "startDate": "2024-06-01", "endDate": "2024-06-03"}),
            json!({"id": "r2", "clientId": "c-deleted", "motorbikeId": 42, "reservationDate": "2024-05-09", "startDate": "2024-07-01", "endDate": "2024-07-02"}),
        ],
    );
    api.seed(
        "payments",
        vec![json!({"id": "p1", "reservationId": "r1", "amount": 150.0, "paymentDate": "2024-05-02", "status": "Paid"})],
    );
}
