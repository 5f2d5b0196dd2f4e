use std::any::{Any, TypeId, type_name};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::module::{Definition, FactoryFn, Kind};
use crate::{InjectError, Module, Parameters, Qualifier};

new_key_type! {
    /// Arena key of an open scope. Keys of closed scopes never resolve again,
    /// even if a scope with the same id is reopened.
    pub struct ScopeKey;
}

struct ScopeSlot {
    id: Rc<str>,
    instances: HashMap<TypeId, Rc<dyn Any>>,
}

struct Inner {
    root_defs: HashMap<TypeId, Definition>,
    scope_defs: HashMap<Qualifier, HashMap<TypeId, Definition>>,
    singles: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
    arena: RefCell<SlotMap<ScopeKey, ScopeSlot>>,
    by_id: RefCell<HashMap<Rc<str>, ScopeKey>>,
    resolving: RefCell<Vec<TypeId>>,
}

/// Object graph built from [`Module`]s. Cheap to clone; clones share state.
///
/// Single-threaded: handles are `Rc` based and meant for the UI thread.
#[derive(Clone)]
pub struct Container {
    inner: Rc<Inner>,
}

impl Container {
    pub fn start(modules: impl IntoIterator<Item = Module>) -> Self {
        let mut root_defs = HashMap::new();
        let mut scope_defs: HashMap<Qualifier, HashMap<TypeId, Definition>> = HashMap::new();

        for module in modules {
            for (tid, def) in module.root {
                if let Some(old) = root_defs.insert(tid, def) {
                    log::warn!("definition for `{}` overridden", old.type_name);
                }
            }
            for (qualifier, defs) in module.scopes {
                let table = scope_defs.entry(qualifier.clone()).or_default();
                for (tid, def) in defs {
                    if let Some(old) = table.insert(tid, def) {
                        log::warn!(
                            "definition for `{}` in scope `{qualifier}` overridden",
                            old.type_name
                        );
                    }
                }
            }
        }

        log::debug!(
            "container started: {} root definitions, {} scope declarations",
            root_defs.len(),
            scope_defs.len()
        );

        Self {
            inner: Rc::new(Inner {
                root_defs,
                scope_defs,
                singles: RefCell::new(HashMap::new()),
                arena: RefCell::new(SlotMap::with_key()),
                by_id: RefCell::new(HashMap::new()),
                resolving: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get<T: 'static>(&self) -> Result<Rc<T>, InjectError> {
        self.get_with_params(Parameters::new())
    }

    pub fn get_with_params<T: 'static>(&self, params: Parameters) -> Result<Rc<T>, InjectError> {
        let any = self.resolve_root(TypeId::of::<T>(), type_name::<T>(), &params)?;
        downcast(any)
    }

    /// Returns the open scope named `id`, opening it if needed.
    pub fn get_or_create_scope(
        &self,
        id: &str,
        qualifier: Qualifier,
    ) -> Result<ScopeHandle, InjectError> {
        if !self.inner.scope_defs.contains_key(&qualifier) {
            return Err(InjectError::UnknownQualifier(qualifier.to_string()));
        }

        if let Some(key) = self.inner.by_id.borrow().get(id).copied()
            && let Some(slot) = self.inner.arena.borrow().get(key)
        {
            return Ok(ScopeHandle {
                container: self.clone(),
                key,
                id: slot.id.clone(),
                qualifier,
            });
        }

        let id: Rc<str> = Rc::from(id);
        let key = self.inner.arena.borrow_mut().insert(ScopeSlot {
            id: id.clone(),
            instances: HashMap::new(),
        });
        self.inner.by_id.borrow_mut().insert(id.clone(), key);
        log::debug!("opened scope `{id}` ({qualifier})");

        Ok(ScopeHandle {
            container: self.clone(),
            key,
            id,
            qualifier,
        })
    }

    /// Drops the scope named `id` and every instance it owns. Returns `false`
    /// if no such scope is open.
    pub fn close_scope(&self, id: &str) -> bool {
        let key = self.inner.by_id.borrow().get(id).copied();
        match key {
            Some(key) => self.close_key(key),
            None => {
                log::debug!("close_scope(`{id}`): not open");
                false
            }
        }
    }

    fn close_key(&self, key: ScopeKey) -> bool {
        let slot = self.inner.arena.borrow_mut().remove(key);
        let Some(slot) = slot else {
            return false;
        };
        {
            let mut by_id = self.inner.by_id.borrow_mut();
            if by_id.get(&slot.id) == Some(&key) {
                by_id.remove(&slot.id);
            }
        }
        log::debug!(
            "closed scope `{}`, releasing {} instance(s)",
            slot.id,
            slot.instances.len()
        );
        // Instances drop here, outside any container borrow, so their Drop
        // impls may use the container.
        drop(slot);
        true
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.inner.by_id.borrow().contains_key(id)
    }

    pub fn open_scopes(&self) -> usize {
        self.inner.arena.borrow().len()
    }

    fn resolve_root(
        &self,
        tid: TypeId,
        name: &'static str,
        params: &Parameters,
    ) -> Result<Rc<dyn Any>, InjectError> {
        if let Some(v) = self.inner.singles.borrow().get(&tid).cloned() {
            return Ok(v);
        }
        let def = self
            .inner
            .root_defs
            .get(&tid)
            .cloned()
            .ok_or(InjectError::NoDefinition { type_name: name })?;

        let resolver = Resolver {
            container: self,
            scope: None,
            params,
        };
        let value = self.create(tid, &def, &resolver)?;
        if def.kind == Kind::Single {
            self.inner.singles.borrow_mut().insert(tid, value.clone());
        }
        Ok(value)
    }

    fn resolve_scoped(
        &self,
        handle: &ScopeHandle,
        tid: TypeId,
        name: &'static str,
        params: &Parameters,
    ) -> Result<Rc<dyn Any>, InjectError> {
        let cached = {
            let arena = self.inner.arena.borrow();
            let slot = arena
                .get(handle.key)
                .ok_or_else(|| InjectError::ScopeClosed(handle.id.to_string()))?;
            slot.instances.get(&tid).cloned()
        };
        if let Some(v) = cached {
            return Ok(v);
        }

        let def = self
            .inner
            .scope_defs
            .get(&handle.qualifier)
            .and_then(|defs| defs.get(&tid))
            .cloned();
        let Some(def) = def else {
            // Scopes see root definitions too.
            return self.resolve_root(tid, name, params);
        };

        let resolver = Resolver {
            container: self,
            scope: Some(handle),
            params,
        };
        let value = self.create(tid, &def, &resolver)?;
        if def.kind == Kind::Scoped {
            let mut arena = self.inner.arena.borrow_mut();
            // The factory may have closed the scope.
            let slot = arena
                .get_mut(handle.key)
                .ok_or_else(|| InjectError::ScopeClosed(handle.id.to_string()))?;
            slot.instances.insert(tid, value.clone());
        }
        Ok(value)
    }

    fn create(
        &self,
        tid: TypeId,
        def: &Definition,
        resolver: &Resolver<'_>,
    ) -> Result<Rc<dyn Any>, InjectError> {
        if self.inner.resolving.borrow().contains(&tid) {
            return Err(InjectError::Cycle(def.type_name));
        }
        self.inner.resolving.borrow_mut().push(tid);
        let factory: FactoryFn = def.factory.clone();
        let result = factory(resolver);
        self.inner.resolving.borrow_mut().pop();
        if result.is_ok() {
            log::trace!("created `{}` ({:?})", def.type_name, def.kind);
        }
        result
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("root_definitions", &self.inner.root_defs.len())
            .field("scope_declarations", &self.inner.scope_defs.len())
            .field("open_scopes", &self.open_scopes())
            .finish()
    }
}

fn downcast<T: 'static>(any: Rc<dyn Any>) -> Result<Rc<T>, InjectError> {
    any.downcast::<T>().map_err(|_| InjectError::NoDefinition {
        type_name: type_name::<T>(),
    })
}

/// Handle to one open scope. Stays valid as a value after the scope closes,
/// but every lookup through it then fails with [`InjectError::ScopeClosed`].
#[derive(Clone)]
pub struct ScopeHandle {
    container: Container,
    key: ScopeKey,
    id: Rc<str>,
    qualifier: Qualifier,
}

impl ScopeHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn qualifier(&self) -> &Qualifier {
        &self.qualifier
    }

    pub fn is_closed(&self) -> bool {
        !self.container.inner.arena.borrow().contains_key(self.key)
    }

    pub fn get<T: 'static>(&self) -> Result<Rc<T>, InjectError> {
        self.get_with_params(Parameters::new())
    }

    /// `params` reach the factory only when the instance is created; a cached
    /// scoped instance is returned as is.
    pub fn get_with_params<T: 'static>(&self, params: Parameters) -> Result<Rc<T>, InjectError> {
        let any = self
            .container
            .resolve_scoped(self, TypeId::of::<T>(), type_name::<T>(), &params)?;
        downcast(any)
    }

    pub fn close(&self) -> bool {
        self.container.close_key(self.key)
    }
}

impl fmt::Debug for ScopeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeHandle")
            .field("id", &self.id)
            .field("qualifier", &self.qualifier)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// What a factory sees while it builds an instance.
pub struct Resolver<'a> {
    container: &'a Container,
    scope: Option<&'a ScopeHandle>,
    params: &'a Parameters,
}

impl Resolver<'_> {
    /// Resolves a dependency from the enclosing scope, falling back to root
    /// definitions.
    pub fn get<T: 'static>(&self) -> Result<Rc<T>, InjectError> {
        match self.scope {
            Some(scope) => scope.get::<T>(),
            None => self.container.get::<T>(),
        }
    }

    pub fn params(&self) -> &Parameters {
        self.params
    }

    pub fn container(&self) -> &Container {
        self.container
    }

    pub fn scope_id(&self) -> Option<&str> {
        self.scope.map(ScopeHandle::id)
    }
}
