use modelize_orm::{
    mock::{AdapterCall, MockAdapter},
    Association, MemoryAdapter, Model, ModelBuilder, Record,
};
use serde_json::{json, Value};
use std::sync::Arc;

fn record(value: Value) -> Record {
    value.as_object().cloned().expect("record literal must be an object")
}

fn users(adapter: Arc<MockAdapter>) -> Model<MockAdapter> {
    ModelBuilder::new()
        .table_name("users")
        .has_many("posts", "posts")
        .belongs_to("company", "companies")
        .has_one("profile", "profiles")
        .seal(adapter)
        .unwrap()
}

#[tokio::test]
async fn test_has_many_queries_by_singular_owner_key() {
    let adapter = Arc::new(MockAdapter::new());
    adapter.seed("posts", json!({"id": "p1", "user_id": "1", "title": "Hello"}));
    adapter.seed("posts", json!({"id": "p2", "user_id": "2", "title": "Other"}));
    let model = ModelBuilder::new()
        .table_name("users")
        .has_many("posts", "posts")
        .seal(adapter.clone())
        .unwrap();

    let mut user = record(json!({"id": "1"}));
    model.load_associations(&mut user).await.unwrap();

    assert_eq!(
        adapter.calls(),
        vec![AdapterCall::find_all("posts", Some(json!({"user_id": "1"})))]
    );
    assert_eq!(
        user["posts"],
        json!([{"id": "p1", "user_id": "1", "title": "Hello"}])
    );
}

#[tokio::test]
async fn test_belongs_to_fetches_parent_by_foreign_key() {
    let adapter = Arc::new(MockAdapter::new());
    adapter.seed("companies", json!({"id": "7", "name": "Acme"}));
    let model = ModelBuilder::new()
        .table_name("users")
        .belongs_to("company", "companies")
        .seal(adapter.clone())
        .unwrap();

    let mut user = record(json!({"id": "1", "company_id": "7"}));
    model.load_associations(&mut user).await.unwrap();

    assert_eq!(adapter.calls(), vec![AdapterCall::find_by_id("companies", "7")]);
    assert_eq!(user["company"], json!({"id": "7", "name": "Acme"}));
}

#[tokio::test]
async fn test_unresolved_associations_become_null() {
    let adapter = Arc::new(MockAdapter::new());
    let model = users(adapter.clone());

    let mut user = record(json!({"id": "1"}));
    model.load_associations(&mut user).await.unwrap();

    assert_eq!(user["posts"], json!([]));
    assert_eq!(user["company"], Value::Null);
    assert_eq!(user["profile"], Value::Null);
    // no company_id on the record, so no lookup for it
    assert_eq!(adapter.operations(), vec!["find_all", "find_all"]);
}

#[tokio::test]
async fn test_has_one_takes_first_match() {
    let adapter = Arc::new(MockAdapter::new());
    adapter.seed("profiles", json!({"id": "a", "user_id": "1", "bio": "first"}));
    adapter.seed("profiles", json!({"id": "b", "user_id": "1", "bio": "second"}));
    let model = ModelBuilder::new()
        .table_name("users")
        .has_one("profile", "profiles")
        .seal(adapter)
        .unwrap();

    let mut user = record(json!({"id": "1"}));
    model.load_associations(&mut user).await.unwrap();

    assert_eq!(user["profile"]["bio"], json!("first"));
}

#[tokio::test]
async fn test_explicit_keys_and_singular_override() {
    let adapter = Arc::new(MockAdapter::new());
    let model = ModelBuilder::new()
        .table_name("people")
        .singular_name("person")
        .has_many("addresses", "addresses")
        .associate(
            "articles",
            Association::has_many("articles").foreign_key("author_id"),
        )
        .associate(
            "employer",
            Association::belongs_to("companies").foreign_key("employer_ref"),
        )
        .seal(adapter.clone())
        .unwrap();

    let mut person = record(json!({"id": "9", "employer_ref": 12}));
    model.load_associations(&mut person).await.unwrap();

    assert_eq!(
        adapter.calls(),
        vec![
            AdapterCall::find_all("addresses", Some(json!({"person_id": "9"}))),
            AdapterCall::find_all("articles", Some(json!({"author_id": "9"}))),
            AdapterCall::find_by_id("companies", "12"),
        ]
    );
}

#[tokio::test]
async fn test_find_by_id_resolves_but_find_all_does_not() {
    let adapter = Arc::new(MockAdapter::new());
    adapter.seed("users", json!({"id": "1", "name": "Ann"}));
    adapter.seed("posts", json!({"id": "p1", "user_id": "1"}));
    let model = ModelBuilder::new()
        .table_name("users")
        .has_many("posts", "posts")
        .seal(adapter)
        .unwrap();

    let found = model.find_by_id("1").await.unwrap();
    assert_eq!(found["posts"].as_array().map(Vec::len), Some(1));

    let all = model.find_all(None).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].contains_key("posts"));
}

#[tokio::test]
async fn test_find_where_resolves_every_record_in_order() {
    let adapter = Arc::new(MemoryAdapter::new());
    let posts = ModelBuilder::new()
        .table_name("posts")
        .seal(adapter.clone())
        .unwrap();
    let users = ModelBuilder::new()
        .table_name("users")
        .has_many("posts", "posts")
        .seal(adapter.clone())
        .unwrap();

    let mut ids = Vec::new();
    for name in ["Ann", "Bob", "Cid"] {
        let user = users
            .create(record(json!({"name": name, "team": "core"})))
            .await
            .unwrap();
        ids.push(user["id"].as_str().unwrap().to_string());
    }
    users
        .create(record(json!({"name": "Dee", "team": "ops"})))
        .await
        .unwrap();
    for (position, id) in ids.iter().enumerate() {
        for _ in 0..=position {
            posts
                .create(record(json!({"user_id": id})))
                .await
                .unwrap();
        }
    }

    let core = users
        .find_where(&record(json!({"team": "core"})))
        .await
        .unwrap();

    let names: Vec<_> = core.iter().map(|user| user["name"].clone()).collect();
    assert_eq!(names, vec![json!("Ann"), json!("Bob"), json!("Cid")]);
    let post_counts: Vec<_> = core
        .iter()
        .map(|user| user["posts"].as_array().map(Vec::len).unwrap_or_default())
        .collect();
    assert_eq!(post_counts, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_associations_are_not_persisted() {
    let adapter = Arc::new(MockAdapter::new());
    adapter.seed("users", json!({"id": "1", "name": "Ann"}));
    let model = users(adapter.clone());

    model.find_by_id("1").await.unwrap();

    assert_eq!(
        Value::Object(adapter.records("users")[0].clone()),
        json!({"id": "1", "name": "Ann"})
    );
}
