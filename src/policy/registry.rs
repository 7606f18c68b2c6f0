use super::builtin::{OpenServicePolicy, StaticServicePolicy};
use super::{PolicyDeclarations, ServicePolicy};
use crate::error::PolicyConfigurationError;
use ahash::AHashMap;

/// Builds a policy instance from administrator declarations.
pub type PolicyFactory = fn(&PolicyDeclarations) -> Box<dyn ServicePolicy>;

/// Defines the built-in policies, their registration, and lookup by name.
macro_rules! define_policies {
    ( $( ($name:literal, $policy:ty) ),* $(,)? ) => {
        pub(super) fn register_default_policies(factories: &mut AHashMap<String, PolicyFactory>) {
            $( factories.insert($name.to_string(), <$policy>::from_declarations as PolicyFactory); )*
        }

        pub(super) fn builtin_factory_by_name(name: &str) -> Option<PolicyFactory> {
            match name {
                $( $name => Some(<$policy>::from_declarations as PolicyFactory), )*
                _ => None,
            }
        }
    };
}

define_policies! {
    ("static", StaticServicePolicy),
    ("open", OpenServicePolicy),
}

/// Maps policy identifiers to factories. Resolved once, when a compiler is
/// built or its policy reloaded.
#[derive(Clone)]
pub struct PolicyRegistry {
    factories: AHashMap<String, PolicyFactory>,
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyRegistry {
    /// A registry holding the built-in `static` and `open` policies.
    pub fn new() -> Self {
        let mut factories = AHashMap::new();
        register_default_policies(&mut factories);
        Self { factories }
    }

    pub fn empty() -> Self {
        Self {
            factories: AHashMap::new(),
        }
    }

    pub fn with_policy(mut self, name: &str, factory: PolicyFactory) -> Self {
        self.register(name, factory);
        self
    }

    /// Lets `alias` select the built-in policy `builtin_name`.
    pub fn with_alias(mut self, alias: &str, builtin_name: &str) -> Self {
        if let Some(factory) = builtin_factory_by_name(builtin_name) {
            self.factories.insert(alias.to_string(), factory);
        }
        self
    }

    pub fn register(&mut self, name: &str, factory: PolicyFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn create(
        &self,
        name: &str,
        declarations: &PolicyDeclarations,
    ) -> Result<Box<dyn ServicePolicy>, PolicyConfigurationError> {
        self.factories
            .get(name)
            .map(|factory| factory(declarations))
            .ok_or_else(|| PolicyConfigurationError::UnknownPolicy(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
