//! Association resolution
//!
//! Associations are resolved by secondary adapter queries, one association at
//! a time, and written into the record under the association's name. They are
//! never persisted back.

use serde_json::Value;

use crate::backends::Adapter;
use crate::error::ModelResult;
use crate::model::{Record, Schema};

use super::types::{Association, AssociationKind};

/// Resolve every declared association of `schema` into `record`
pub async fn load_associations<A>(
    schema: &Schema,
    adapter: &A,
    record: &mut Record,
) -> ModelResult<()>
where
    A: Adapter + ?Sized,
{
    for (name, association) in schema.associations.iter() {
        let foreign_key = schema.foreign_key(name, association);
        let value = resolve(adapter, record, association, &foreign_key).await?;
        tracing::trace!(
            table = %schema.table_name(),
            association = name,
            kind = %association.kind,
            %foreign_key,
            "resolved association"
        );
        record.insert(name.to_string(), value);
    }
    Ok(())
}

async fn resolve<A>(
    adapter: &A,
    record: &Record,
    association: &Association,
    foreign_key: &str,
) -> ModelResult<Value>
where
    A: Adapter + ?Sized,
{
    let target = association.target_collection.as_str();

    match association.kind {
        AssociationKind::HasMany => {
            let filter = owner_filter(record, foreign_key);
            let related = adapter.find_all(target, Some(&filter)).await?;
            Ok(Value::Array(related.into_iter().map(Value::Object).collect()))
        }
        AssociationKind::HasOne => {
            let filter = owner_filter(record, foreign_key);
            let related = adapter.find_all(target, Some(&filter)).await?;
            Ok(related
                .into_iter()
                .next()
                .map(Value::Object)
                .unwrap_or(Value::Null))
        }
        AssociationKind::BelongsTo => match key_value(record.get(foreign_key)) {
            Some(id) => Ok(adapter
                .find_by_id(target, &id)
                .await?
                .map(Value::Object)
                .unwrap_or(Value::Null)),
            None => Ok(Value::Null),
        },
    }
}

/// `{foreign_key: record.id}`
fn owner_filter(record: &Record, foreign_key: &str) -> Record {
    let mut filter = Record::new();
    filter.insert(
        foreign_key.to_string(),
        record.get("id").cloned().unwrap_or(Value::Null),
    );
    filter
}

/// A foreign key value usable as an id; numbers are stringified
fn key_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_value() {
        assert_eq!(key_value(Some(&json!("7"))), Some("7".to_string()));
        assert_eq!(key_value(Some(&json!(7))), Some("7".to_string()));
        assert_eq!(key_value(Some(&json!(null))), None);
        assert_eq!(key_value(None), None);
        assert_eq!(key_value(Some(&json!({"id": 7}))), None);
    }

    #[test]
    fn test_owner_filter_uses_record_id() {
        let record = json!({"id": "1", "name": "Ann"}).as_object().cloned().unwrap();
        let filter = owner_filter(&record, "user_id");
        assert_eq!(Value::Object(filter), json!({"user_id": "1"}));

        let filter = owner_filter(&Record::new(), "user_id");
        assert_eq!(Value::Object(filter), json!({"user_id": null}));
    }
}
