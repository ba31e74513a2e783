//! The `products` model

use std::sync::Arc;

use modelize_orm::model::lifecycle::timestamp;
use modelize_orm::{
    Adapter, CallbackOutcome, EventError, FieldType, LifecycleEvent, Model, ModelBuilder,
    ModelResult, Record,
};
use modelize_validation::{max_length, min_length, required, CustomValidator};
use serde_json::Value;

pub const TABLE_NAME: &str = "products";

/// Define the product model over `adapter`
pub fn product_model<A>(adapter: Arc<A>) -> ModelResult<Model<A>>
where
    A: Adapter + ?Sized,
{
    ModelBuilder::new()
        .table_name(TABLE_NAME)
        .field("id", FieldType::String)
        .field("name", FieldType::String)
        .field("description", FieldType::String)
        .field("price", FieldType::Number)
        .field("category", FieldType::String)
        .field("stock", FieldType::Number)
        .field("created_at", FieldType::String)
        .field("updated_at", FieldType::String)
        .global_secondary_index("CategoryIndex", "category", Some("name"))
        .validates("name", required())
        .validates("name", min_length(3))
        .validates("name", max_length(100))
        .validates("description", max_length(1000))
        .validates("price", required())
        .validates("price", non_negative_price())
        .validates("category", required())
        .validates("stock", non_negative_stock())
        .on(LifecycleEvent::BeforeCreate, stamp_created)
        .on(LifecycleEvent::BeforeUpdate, stamp_updated)
        .seal(adapter)
}

fn non_negative_price() -> CustomValidator {
    CustomValidator::new("non_negative_price", |value| match value {
        Some(Value::Number(price)) if price.as_f64().map_or(false, |p| p >= 0.0) => Ok(()),
        _ => Err("Price must be non-negative".to_string()),
    })
}

fn non_negative_stock() -> CustomValidator {
    CustomValidator::new("non_negative_stock", |value| match value {
        Some(Value::Number(stock)) if stock.as_u64().is_some() => Ok(()),
        Some(Value::Number(stock))
            if stock.as_f64().map_or(false, |s| s >= 0.0 && s.fract() == 0.0) =>
        {
            Ok(())
        }
        _ => Err("Stock must be a non-negative integer".to_string()),
    })
}

fn stamp_created(record: &mut Record) -> Result<CallbackOutcome, EventError> {
    let now = timestamp();
    record.insert("created_at".to_string(), Value::String(now.clone()));
    record.insert("updated_at".to_string(), Value::String(now));
    Ok(CallbackOutcome::Continue)
}

fn stamp_updated(record: &mut Record) -> Result<CallbackOutcome, EventError> {
    record.insert("updated_at".to_string(), Value::String(timestamp()));
    Ok(CallbackOutcome::Continue)
}
