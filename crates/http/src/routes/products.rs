//! `/products` handlers

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use modelize_orm::Record;
use serde_json::{json, Value};

use crate::error::{HttpError, HttpResult};
use crate::state::AppState;

/// `GET /products`: exact-match scan built from the query string
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> HttpResult<Json<Vec<Record>>> {
    let filter = query_filter(params);
    let products = state
        .products
        .find_all(if filter.is_empty() { None } else { Some(&filter) })
        .await?;
    Ok(Json(products))
}

/// `GET /products/:id`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Record>> {
    Ok(Json(state.products.find_by_id(&id).await?))
}

/// `POST /products`
pub async fn store(
    State(state): State<AppState>,
    body: Result<Json<Record>, JsonRejection>,
) -> HttpResult<impl IntoResponse> {
    let Json(attributes) = body?;
    let product = state.products.create(attributes).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /products/:id`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Record>, JsonRejection>,
) -> HttpResult<Json<Record>> {
    let Json(attributes) = body?;
    Ok(Json(state.products.update(&id, attributes).await?))
}

/// `DELETE /products/:id`
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<Value>> {
    let deleted = state.products.destroy(&id).await?;
    if !deleted {
        return Err(HttpError::internal(format!("Failed to delete product {}", id)));
    }
    Ok(Json(json!({ "success": true })))
}

/// Query parameters as an exact-match filter.
///
/// Values that parse as JSON numbers or booleans are compared as such, so
/// `?stock=0` matches a stored `0`; everything else is compared as a string.
pub fn query_filter(params: HashMap<String, String>) -> Record {
    params
        .into_iter()
        .map(|(key, raw)| {
            let value = match serde_json::from_str::<Value>(&raw) {
                Ok(parsed @ (Value::Number(_) | Value::Bool(_))) => parsed,
                _ => Value::String(raw),
            };
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_filter_types() {
        let params = HashMap::from([
            ("category".to_string(), "tools".to_string()),
            ("stock".to_string(), "0".to_string()),
            ("featured".to_string(), "true".to_string()),
            ("name".to_string(), "\"quoted\"".to_string()),
        ]);

        let filter = query_filter(params);

        assert_eq!(filter["category"], json!("tools"));
        assert_eq!(filter["stock"], json!(0));
        assert_eq!(filter["featured"], json!(true));
        assert_eq!(filter["name"], json!("\"quoted\""));
    }
}
