//! Fluent model definition

use std::collections::HashMap;
use std::sync::Arc;

use modelize_validation::{FieldRules, SharedRule, ValidationRule};

use crate::backends::Adapter;
use crate::error::{ModelError, ModelResult};
use crate::event_error::EventError;
use crate::events::{CallbackOutcome, FnCallback, LifecycleEvent, ModelCallback};
use crate::observers::CallbackRegistry;
use crate::relationships::{inference, Association, AssociationKind, Associations};

use super::schema::{FieldType, IndexDescriptor, Record, Schema};
use super::Model;

/// Accumulates a schema, then seals it into a [`Model`].
///
/// ```ignore
/// let users = ModelBuilder::new()
///     .table_name("users")
///     .field("name", FieldType::String)
///     .validates("name", required())
///     .has_many("posts", "posts")
///     .seal(adapter)?;
/// ```
///
/// Nothing is checked until [`ModelBuilder::seal`], and the only check there
/// is that a table name was given.
#[derive(Debug, Default)]
pub struct ModelBuilder {
    table_name: Option<String>,
    singular_name: Option<String>,
    fields: HashMap<String, FieldType>,
    indexes: Vec<IndexDescriptor>,
    validations: FieldRules,
    callbacks: CallbackRegistry,
    associations: Associations,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing table; the last call wins
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Override the singular owner name used for `has_many`/`has_one` keys.
    ///
    /// Defaults to the table name minus its last character.
    pub fn singular_name(mut self, name: impl Into<String>) -> Self {
        self.singular_name = Some(name.into());
        self
    }

    /// Declare a field, replacing any earlier type for the same name
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }

    /// Append a secondary index; duplicates are kept
    pub fn index(mut self, index: IndexDescriptor) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn global_secondary_index(
        self,
        name: impl Into<String>,
        hash_key: impl Into<String>,
        range_key: Option<&str>,
    ) -> Self {
        let mut index = IndexDescriptor::new(name, hash_key);
        if let Some(range_key) = range_key {
            index = index.range_key(range_key);
        }
        self.index(index)
    }

    /// Append one rule to `field`
    pub fn validates<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        self.validations.add(field, rule);
        self
    }

    /// Append several rules to `field`, keeping their order
    pub fn validates_all<I>(mut self, field: impl Into<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = SharedRule>,
    {
        self.validations.extend(field, rules);
        self
    }

    /// Register a callback for `event`
    pub fn add_callback<C>(mut self, event: LifecycleEvent, callback: C) -> Self
    where
        C: ModelCallback + 'static,
    {
        self.callbacks.register(event, Arc::new(callback));
        self
    }

    /// Register a synchronous closure for `event`
    pub fn on<F>(self, event: LifecycleEvent, f: F) -> Self
    where
        F: Fn(&mut Record) -> Result<CallbackOutcome, EventError> + Send + Sync + 'static,
    {
        self.add_callback(event, FnCallback::new(f))
    }

    /// Register a callback by event name (`"beforeSave"`, `"afterDestroy"`, ...)
    pub fn add_callback_named<C>(self, event: &str, callback: C) -> ModelResult<Self>
    where
        C: ModelCallback + 'static,
    {
        let event: LifecycleEvent = event.parse()?;
        Ok(self.add_callback(event, callback))
    }

    /// Declare an association. Redeclaring a name replaces the earlier one.
    ///
    /// `belongs_to` also declares its foreign key as a string field unless a
    /// field of that name exists already.
    pub fn associate(mut self, name: impl Into<String>, association: Association) -> Self {
        let name = name.into();
        if association.kind == AssociationKind::BelongsTo {
            let foreign_key = association
                .foreign_key
                .clone()
                .unwrap_or_else(|| inference::belongs_to_foreign_key(&name));
            self.fields.entry(foreign_key).or_insert(FieldType::String);
        }
        self.associations.insert(name, association);
        self
    }

    pub fn has_many(self, name: impl Into<String>, target_collection: impl Into<String>) -> Self {
        self.associate(name, Association::has_many(target_collection))
    }

    pub fn belongs_to(
        self,
        name: impl Into<String>,
        target_collection: impl Into<String>,
    ) -> Self {
        self.associate(name, Association::belongs_to(target_collection))
    }

    pub fn has_one(self, name: impl Into<String>, target_collection: impl Into<String>) -> Self {
        self.associate(name, Association::has_one(target_collection))
    }

    /// Freeze the schema and bind it to `adapter`.
    ///
    /// Fails with a configuration error when no table name or an empty one
    /// was set. Performs no I/O.
    pub fn seal<A>(self, adapter: Arc<A>) -> ModelResult<Model<A>>
    where
        A: Adapter + ?Sized,
    {
        let table_name = match self.table_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(ModelError::configuration("Table name must be set")),
        };
        let singular_name = self
            .singular_name
            .unwrap_or_else(|| inference::singularize(&table_name));

        tracing::debug!(
            table = %table_name,
            fields = self.fields.len(),
            associations = self.associations.len(),
            "sealed model"
        );

        let schema = Schema {
            table_name,
            singular_name,
            fields: self.fields,
            indexes: self.indexes,
            validations: self.validations,
            callbacks: self.callbacks,
            associations: self.associations,
        };
        Ok(Model::from_parts(Arc::new(schema), adapter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryAdapter;
    use modelize_validation::{max_length, min_length, required};

    fn adapter() -> Arc<MemoryAdapter> {
        Arc::new(MemoryAdapter::new())
    }

    #[test]
    fn test_seal_requires_table_name() {
        let error = ModelBuilder::new()
            .field("name", FieldType::String)
            .seal(adapter())
            .unwrap_err();
        assert!(matches!(error, ModelError::Configuration(ref m) if m == "Table name must be set"));

        let error = ModelBuilder::new().table_name("").seal(adapter()).unwrap_err();
        assert!(matches!(error, ModelError::Configuration(_)));

        let model = ModelBuilder::new().table_name(" ").seal(adapter()).unwrap();
        assert_eq!(model.table_name(), " ");
    }

    #[test]
    fn test_last_table_name_wins() {
        let model = ModelBuilder::new()
            .table_name("drafts")
            .table_name("posts")
            .seal(adapter())
            .unwrap();
        assert_eq!(model.table_name(), "posts");
    }

    #[test]
    fn test_field_redeclaration_overwrites() {
        let model = ModelBuilder::new()
            .table_name("products")
            .field("price", FieldType::String)
            .field("price", FieldType::Number)
            .seal(adapter())
            .unwrap();
        assert_eq!(model.get_fields().get("price"), Some(&FieldType::Number));
    }

    #[test]
    fn test_indexes_keep_duplicates_in_order() {
        let model = ModelBuilder::new()
            .table_name("products")
            .global_secondary_index("CategoryIndex", "category", Some("name"))
            .index(IndexDescriptor::new("CategoryIndex", "category"))
            .seal(adapter())
            .unwrap();

        let indexes = model.get_indexes();
        assert_eq!(indexes.len(), 2);
        assert_eq!(indexes[0].range_key.as_deref(), Some("name"));
        assert_eq!(indexes[1].range_key, None);
    }

    #[test]
    fn test_validations_append_across_calls() {
        let model = ModelBuilder::new()
            .table_name("users")
            .validates("name", required())
            .validates("email", required())
            .validates_all(
                "name",
                [
                    Arc::new(min_length(3)) as SharedRule,
                    Arc::new(max_length(10)) as SharedRule,
                ],
            )
            .seal(adapter())
            .unwrap();

        let validations = model.get_validations();
        assert_eq!(validations.fields(), vec!["name", "email"]);
        let names: Vec<_> = validations
            .get("name")
            .unwrap()
            .iter()
            .map(|rule| rule.rule_name())
            .collect();
        assert_eq!(names, vec!["required", "length", "length"]);
    }

    #[test]
    fn test_callbacks_by_name() {
        let builder = ModelBuilder::new()
            .table_name("users")
            .add_callback_named("beforeSave", FnCallback::new(|_: &mut Record| Ok(().into())))
            .unwrap();
        let model = builder.seal(adapter()).unwrap();
        assert_eq!(
            model.get_callbacks().callback_count(LifecycleEvent::BeforeSave),
            1
        );

        let error = ModelBuilder::new()
            .add_callback_named("beforeFlush", FnCallback::new(|_: &mut Record| Ok(().into())))
            .unwrap_err();
        assert!(matches!(error, ModelError::Configuration(_)));
    }

    #[test]
    fn test_belongs_to_declares_foreign_key_field() {
        let model = ModelBuilder::new()
            .table_name("users")
            .field("team_id", FieldType::Number)
            .belongs_to("company", "companies")
            .belongs_to("team", "teams")
            .associate("manager", Association::belongs_to("users").foreign_key("boss_id"))
            .seal(adapter())
            .unwrap();

        let fields = model.get_fields();
        assert_eq!(fields.get("company_id"), Some(&FieldType::String));
        // existing declarations are left alone
        assert_eq!(fields.get("team_id"), Some(&FieldType::Number));
        assert_eq!(fields.get("boss_id"), Some(&FieldType::String));
        assert_eq!(model.get_associations().len(), 3);
    }

    #[test]
    fn test_singular_name_defaults_and_override() {
        let model = ModelBuilder::new().table_name("users").seal(adapter()).unwrap();
        assert_eq!(model.schema().singular_name(), "user");

        let model = ModelBuilder::new()
            .table_name("people")
            .singular_name("person")
            .seal(adapter())
            .unwrap();
        assert_eq!(model.schema().singular_name(), "person");
    }
}
