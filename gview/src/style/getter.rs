use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::layer::Feature;

/// Produces a value for a field value seen for the first time.
pub type Generator<T> = Arc<dyn Fn() -> T + Send + Sync>;

/// Source of one visual attribute of a feature: either a constant or a value derived from a
/// feature property.
#[derive(Debug, Clone, PartialEq)]
pub enum Getter<T> {
    /// Same value for every feature.
    Raw(T),
    /// Value chosen per distinct value of a feature property.
    Field(FieldGetter<T>),
}

impl<T: Clone> Getter<T> {
    /// Value of the attribute for the given feature.
    pub fn evaluate(&self, feature: &Feature) -> T {
        match self {
            Getter::Raw(value) => value.clone(),
            Getter::Field(getter) => getter.evaluate(feature),
        }
    }

    /// The constant of a raw getter, or the default value of a field getter.
    pub fn default_value(&self) -> &T {
        match self {
            Getter::Raw(value) => value,
            Getter::Field(getter) => getter.default_value(),
        }
    }

    /// Property the getter is bound to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Getter::Raw(_) => None,
            Getter::Field(getter) => Some(getter.field()),
        }
    }

    /// Creates a getter bound to `field`, or a raw getter if `field` is `None`, keeping the default
    /// value of this getter. A new field getter starts with an empty memo table.
    pub fn with_field(&self, field: Option<&str>, generator: Generator<T>) -> Self {
        let default_value = self.default_value().clone();
        match field {
            Some(field) => {
                Getter::Field(FieldGetter::from_generator(field, default_value, generator))
            }
            None => Getter::Raw(default_value),
        }
    }
}

/// Getter bound to a feature property.
///
/// The first time a distinct property value is seen, the generator is called and its result is
/// memoized. Every later evaluation for the same value returns the memoized result. Features that
/// do not have a hashable value for the property get the default value.
///
/// The memo table belongs to this getter only. Cloning a getter copies the table into a new,
/// independent one.
pub struct FieldGetter<T> {
    field: String,
    default_value: T,
    generator: Generator<T>,
    memo: Mutex<HashMap<String, T>>,
}

impl<T: Clone> FieldGetter<T> {
    /// Creates a new getter.
    pub fn new(
        field: impl Into<String>,
        default_value: T,
        generator: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        Self::from_generator(field, default_value, Arc::new(generator))
    }

    /// Creates a new getter with a shared generator.
    pub fn from_generator(
        field: impl Into<String>,
        default_value: T,
        generator: Generator<T>,
    ) -> Self {
        Self {
            field: field.into(),
            default_value,
            generator,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Property the getter reads.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Value for features without a hashable value of the property.
    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    /// Value of the attribute for the given feature.
    pub fn evaluate(&self, feature: &Feature) -> T {
        let Some(key) = feature.property_key(&self.field) else {
            return self.default_value.clone();
        };

        self.memo
            .lock()
            .entry(key)
            .or_insert_with(|| (self.generator)())
            .clone()
    }

    /// Memoized value for the given property value, if it was already generated.
    pub fn cached(&self, value: &str) -> Option<T> {
        self.memo.lock().get(value).cloned()
    }

    /// Number of distinct property values seen so far.
    pub fn cached_count(&self) -> usize {
        self.memo.lock().len()
    }
}

impl<T: Clone> Clone for FieldGetter<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            default_value: self.default_value.clone(),
            generator: self.generator.clone(),
            memo: Mutex::new(self.memo.lock().clone()),
        }
    }
}

/// Two field getters are equal if they read the same field with the same default and share the
/// generator. Memo tables are not compared.
impl<T: PartialEq> PartialEq for FieldGetter<T> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field
            && self.default_value == other.default_value
            && Arc::ptr_eq(&self.generator, &other.generator)
    }
}

impl<T: Debug> Debug for FieldGetter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldGetter")
            .field("field", &self.field)
            .field("default_value", &self.default_value)
            .field("cached", &self.memo.lock().len())
            .finish_non_exhaustive()
    }
}
