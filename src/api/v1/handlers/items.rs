/*
 * Responsibility
 * - CommonQueryParams を共有する一覧
 * - 固定マップの lookup (無ければ 404)
 * - 独自エラー (418) の例
 * - q が無ければ cookie にフォールバックする sub-dependency の例
 */
use axum::{
    Json,
    extract::{Path, rejection::PathRejection},
};
use serde_json::{Value, json};

use crate::{
    api::v1::{
        dto::items::{ItemResponse, ItemSummary, ItemsPage},
        extractors::{CommonQueryParams, QueryOrCookie},
    },
    error::AppError,
};

const FAKE_ITEMS: [ItemSummary; 3] = [
    ItemSummary { item_name: "Foo" },
    ItemSummary { item_name: "Bar" },
    ItemSummary { item_name: "Baz" },
];

fn item_title(item_id: &str) -> Option<&'static str> {
    match item_id {
        "foo" => Some("The Foo Wrestlers"),
        _ => None,
    }
}

pub async fn list_items(commons: CommonQueryParams) -> Json<ItemsPage> {
    let items = commons.page(&FAKE_ITEMS).to_vec();

    Json(ItemsPage {
        q: commons.q,
        items,
    })
}

pub async fn get_item(Path(item_id): Path<String>) -> Result<Json<ItemResponse>, AppError> {
    let item = item_title(&item_id).ok_or_else(|| AppError::not_found("Item not found"))?;
    Ok(Json(ItemResponse { item }))
}

pub async fn read_unicorn(Path(name): Path<String>) -> Result<Json<Value>, AppError> {
    if name == "yolo" {
        return Err(AppError::teapot(format!(
            "Oops! {name} did something. There goes a rainbow..."
        )));
    }
    Ok(Json(json!({ "unicorn_name": name })))
}

pub async fn get_item_custom_error(
    item_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let Path(item_id) = item_id.map_err(|e| AppError::bad_request("INVALID_PATH", e.body_text()))?;

    if item_id == 3 {
        return Err(AppError::teapot("Nope! I don't like 3."));
    }
    Ok(Json(json!({ "item_id": item_id })))
}

pub async fn read_query_or_cookie(QueryOrCookie(q): QueryOrCookie) -> Json<Value> {
    Json(json!({ "q_or_cookie": q }))
}
