use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const RESOURCE_KEY: &str = "widgets";
pub const MODEL_NAME: &str = "widget";
pub const DEFAULT_PER_PAGE: u64 = 20;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Widget {
    pub id: String,
    pub name: String,
}

/// Collection parameters understood by `GET /widgets`. `name` is a filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub order: Option<String>,
    pub search: Option<String>,
    pub only: Option<String>,
    pub name: Option<String>,
}

pub type Db = Arc<RwLock<Vec<Widget>>>;

type Failure = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::default();
    Router::new()
        .route("/widgets", get(list_widgets).post(create_widget))
        .route(
            "/widgets/{id}",
            get(get_widget).patch(update_widget).delete(delete_widget),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Filter, order and paginate `widgets`. Returns the page and the total
/// number of matches before pagination.
pub fn select(widgets: &[Widget], query: &ListQuery) -> (Vec<Widget>, u64) {
    let only: Option<Vec<&str>> = query.only.as_deref().map(|ids| ids.split(',').collect());
    let mut matches: Vec<Widget> = widgets
        .iter()
        .filter(|w| only.as_ref().is_none_or(|ids| ids.contains(&w.id.as_str())))
        .filter(|w| query.name.as_ref().is_none_or(|name| &w.name == name))
        .filter(|w| query.search.as_ref().is_none_or(|s| w.name.contains(s.as_str())))
        .cloned()
        .collect();

    match query.order.as_deref() {
        Some("name:asc") | Some("name") => matches.sort_by(|a, b| a.name.cmp(&b.name)),
        Some("name:desc") => matches.sort_by(|a, b| b.name.cmp(&a.name)),
        _ => {}
    }

    let count = matches.len() as u64;
    let (page, per_page) = page_window(query);
    let offset = (page - 1).saturating_mul(per_page);
    let page_items = matches
        .into_iter()
        .skip(usize::try_from(offset).unwrap_or(usize::MAX))
        .take(usize::try_from(per_page).unwrap_or(usize::MAX))
        .collect();
    (page_items, count)
}

fn page_window(query: &ListQuery) -> (u64, u64) {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
    (page, per_page)
}

/// Brainstem collection payload: `count`, `meta`, `results` and the
/// `widgets` side-load map.
pub fn payload(widgets: &[Widget], count: u64, page: u64, per_page: u64) -> Value {
    let results: Vec<Value> = widgets
        .iter()
        .map(|w| json!({"key": RESOURCE_KEY, "id": w.id}))
        .collect();
    let mut records = Map::new();
    for widget in widgets {
        records.insert(widget.id.clone(), json!(widget));
    }
    json!({
        "count": count,
        "meta": {
            "count": count,
            "page_count": count.div_ceil(per_page),
            "page_number": page,
            "page_size": per_page,
        },
        "results": results,
        RESOURCE_KEY: records,
    })
}

fn single(widget: &Widget) -> Value {
    payload(std::slice::from_ref(widget), 1, 1, 1)
}

fn failure(status: StatusCode, kind: &str, message: &str) -> Failure {
    (
        status,
        Json(json!({"errors": [{"type": kind, "message": message}]})),
    )
}

fn not_found() -> Failure {
    failure(StatusCode::NOT_FOUND, "system", "widget not found")
}

fn authorize(headers: &HeaderMap) -> Result<(), Failure> {
    let token = headers
        .get("x-csrf-token")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if token.is_empty() {
        return Err(failure(StatusCode::UNAUTHORIZED, "auth", "missing CSRF token"));
    }
    Ok(())
}

/// `body.widget.name`, if present and a non-empty string.
fn widget_name(body: &Value) -> Option<&str> {
    body.get(MODEL_NAME)?
        .get("name")?
        .as_str()
        .filter(|name| !name.is_empty())
}

async fn list_widgets(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    let widgets = db.read().await;
    let (page_items, count) = select(&widgets, &query);
    let (page, per_page) = page_window(&query);
    Ok(Json(payload(&page_items, count, page, per_page)))
}

async fn get_widget(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    let widgets = db.read().await;
    let widget = widgets.iter().find(|w| w.id == id).ok_or_else(not_found)?;
    Ok(Json(single(widget)))
}

async fn create_widget(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), Failure> {
    authorize(&headers)?;
    let name = widget_name(&body)
        .ok_or_else(|| failure(StatusCode::UNPROCESSABLE_ENTITY, "validation", "name is required"))?;
    let widget = Widget {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
    };
    debug!(id = %widget.id, "created widget");
    db.write().await.push(widget.clone());
    Ok((StatusCode::CREATED, Json(single(&widget))))
}

async fn update_widget(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, Failure> {
    authorize(&headers)?;
    let mut widgets = db.write().await;
    let widget = widgets.iter_mut().find(|w| w.id == id).ok_or_else(not_found)?;
    if let Some(name) = widget_name(&body) {
        widget.name = name.to_string();
    }
    Ok(Json(single(widget)))
}

async fn delete_widget(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, Failure> {
    authorize(&headers)?;
    let mut widgets = db.write().await;
    let index = widgets.iter().position(|w| w.id == id).ok_or_else(not_found)?;
    widgets.remove(index);
    debug!(%id, "deleted widget");
    Ok(StatusCode::NO_CONTENT)
}
