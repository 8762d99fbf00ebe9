use std::{
    any::{Any, type_name},
    collections::BTreeMap,
    sync::Arc,
};

use crate::support::dictionary::ConfigError;

/// Name-keyed store of constructed models.
///
/// Models that depend on another model's output (turbulent dispersion on
/// drag, for example) fetch it here by name when they are constructed.
/// Entries are shared as `Arc<T>`; `T` may be a trait object.
#[derive(Default)]
pub struct ObjectRegistry {
    objects: BTreeMap<String, Box<dyn Any + Send + Sync>>,
}

impl ObjectRegistry {
    /// Stores `object` under `name`, replacing any previous entry.
    pub fn insert<T>(&mut self, name: impl Into<String>, object: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let name = name.into();
        log::debug!("registering object {name}");
        self.objects.insert(name, Box::new(object));
    }

    /// Fetches the object `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ObjectNotFound`] if no object of type `T` is
    /// stored under `name`.
    pub fn lookup<T>(&self, name: &str) -> Result<Arc<T>, ConfigError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.objects
            .get(name)
            .and_then(|object| object.downcast_ref::<Arc<T>>())
            .cloned()
            .ok_or_else(|| ConfigError::ObjectNotFound {
                name: name.to_string(),
                expected: type_name::<T>(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.objects.contains_key(name)
    }

    /// Stored names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.objects.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("names", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Named: Send + Sync {
        fn name(&self) -> &str;
    }

    struct Fixed(&'static str);

    impl Named for Fixed {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn stores_trait_objects() {
        let mut objects = ObjectRegistry::default();
        let model: Arc<dyn Named> = Arc::new(Fixed("SchillerNaumann"));
        objects.insert("dragModel.(air in water)", model);

        let found = objects.lookup::<dyn Named>("dragModel.(air in water)").unwrap();
        assert_eq!(found.name(), "SchillerNaumann");
    }

    #[test]
    fn missing_or_mistyped_objects_are_errors() {
        let mut objects = ObjectRegistry::default();
        objects.insert("sigma", Arc::new(0.07_f64));

        let err = objects.lookup::<dyn Named>("dragModel.(air in water)").err().unwrap();
        assert!(matches!(
            &err,
            ConfigError::ObjectNotFound { name, available, .. }
                if name == "dragModel.(air in water)" && available == &["sigma"]
        ));

        assert!(objects.lookup::<dyn Named>("sigma").is_err());
        assert_eq!(*objects.lookup::<f64>("sigma").unwrap(), 0.07);
    }
}
