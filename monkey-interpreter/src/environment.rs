use crate::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct EnvironmentCore {
    store: HashMap<Rc<str>, Rc<Object>>,
    outer: Option<Environment>,
}

/// Shared handle to one lexical scope.
///
/// Cloning the handle shares the scope: closures and enclosed scopes keep
/// their parent alive for as long as they live.
#[derive(Clone)]
pub struct Environment {
    environment: Rc<RefCell<EnvironmentCore>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: None,
            })),
        }
    }

    pub fn new_enclosed(outer: &Environment) -> Environment {
        Environment {
            environment: Rc::new(RefCell::new(EnvironmentCore {
                store: HashMap::new(),
                outer: Some(outer.clone()),
            })),
        }
    }

    pub fn get(&self, key: &str) -> Option<Rc<Object>> {
        let env = self.environment.borrow();
        match env.store.get(key) {
            Some(value) => Some(value.clone()),
            None => env.outer.as_ref().and_then(|outer| outer.get(key)),
        }
    }

    /// Binds in this scope only; outer bindings with the same name are shadowed.
    pub fn set(&self, key: Rc<str>, value: Rc<Object>) {
        self.environment.borrow_mut().store.insert(key, value);
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.environment, &other.environment)
    }

    pub fn depth(&self) -> usize {
        match &self.environment.borrow().outer {
            Some(outer) => 1 + outer.depth(),
            None => 1,
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

// Bindings can hold closures over this very scope, so only names are shown.
impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env = self.environment.borrow();
        let mut names = env.store.keys().collect::<Vec<_>>();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("depth", &self.depth())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Environment;
    use crate::object::Object;

    #[test]
    fn test_depth() {
        let env1 = Environment::new();
        assert_eq!(env1.depth(), 1);

        let env2 = Environment::new_enclosed(&env1);
        assert_eq!(env1.depth(), 1);
        assert_eq!(env2.depth(), 2);

        let env3 = Environment::new_enclosed(&env2);
        assert_eq!(env3.depth(), 3);
    }

    #[test]
    fn test_lookup_walks_outer_scopes() {
        let outer = Environment::new();
        outer.set("a".into(), Object::integer(1));
        let inner = Environment::new_enclosed(&outer);
        inner.set("b".into(), Object::integer(2));

        assert_eq!(inner.get("a"), Some(Object::integer(1)));
        assert_eq!(inner.get("b"), Some(Object::integer(2)));
        assert_eq!(outer.get("b"), None);
        assert_eq!(inner.get("c"), None);
    }

    #[test]
    fn test_set_shadows_without_touching_outer() {
        let outer = Environment::new();
        outer.set("x".into(), Object::integer(1));
        let inner = Environment::new_enclosed(&outer);
        inner.set("x".into(), Object::integer(2));

        assert_eq!(inner.get("x"), Some(Object::integer(2)));
        assert_eq!(outer.get("x"), Some(Object::integer(1)));
    }

    #[test]
    fn test_clones_share_scope() {
        let env = Environment::new();
        let alias = env.clone();
        alias.set("x".into(), Object::boolean(true));

        assert!(env.ptr_eq(&alias));
        assert_eq!(env.get("x"), Some(Object::boolean(true)));
        assert!(!env.ptr_eq(&Environment::new()));
    }
}
