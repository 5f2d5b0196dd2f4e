use std::any::{Any, TypeId, type_name};
use std::rc::Rc;

use crate::{InjectError, Qualifier, Resolver};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind {
    /// One instance for the container's lifetime.
    Single,
    /// A new instance on every request.
    Factory,
    /// One instance per open scope, dropped with the scope.
    Scoped,
}

pub(crate) type FactoryFn = Rc<dyn Fn(&Resolver<'_>) -> Result<Rc<dyn Any>, InjectError>>;

#[derive(Clone)]
pub(crate) struct Definition {
    pub(crate) kind: Kind,
    pub(crate) type_name: &'static str,
    pub(crate) factory: FactoryFn,
}

fn definition<T: 'static>(
    kind: Kind,
    f: impl Fn(&Resolver<'_>) -> Result<T, InjectError> + 'static,
) -> (TypeId, Definition) {
    (
        TypeId::of::<T>(),
        Definition {
            kind,
            type_name: type_name::<T>(),
            factory: Rc::new(move |r| f(r).map(|v| Rc::new(v) as Rc<dyn Any>)),
        },
    )
}

/// A set of definitions, combined into a [`Container`](crate::Container) at
/// start-up.
///
/// ```rust
/// use sheet_inject::*;
///
/// struct Clock(u32);
/// struct Greeter(std::rc::Rc<Clock>);
///
/// let module = Module::new()
///     .single(|_| Ok(Clock(7)))
///     .scope("greeting", |s| s.scoped(|r| Ok(Greeter(r.get::<Clock>()?))));
/// let container = Container::start([module]);
///
/// let scope = container.get_or_create_scope("greeting-1", named("greeting")).unwrap();
/// assert_eq!(scope.get::<Greeter>().unwrap().0.0, 7);
/// ```
#[derive(Default)]
pub struct Module {
    pub(crate) root: Vec<(TypeId, Definition)>,
    pub(crate) scopes: Vec<(Qualifier, Vec<(TypeId, Definition)>)>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single<T: 'static>(
        mut self,
        f: impl Fn(&Resolver<'_>) -> Result<T, InjectError> + 'static,
    ) -> Self {
        self.root.push(definition(Kind::Single, f));
        self
    }

    pub fn factory<T: 'static>(
        mut self,
        f: impl Fn(&Resolver<'_>) -> Result<T, InjectError> + 'static,
    ) -> Self {
        self.root.push(definition(Kind::Factory, f));
        self
    }

    /// Declares the definitions available inside scopes opened with
    /// `qualifier`.
    pub fn scope(
        mut self,
        qualifier: impl Into<Qualifier>,
        declare: impl FnOnce(ScopeDsl) -> ScopeDsl,
    ) -> Self {
        let dsl = declare(ScopeDsl::default());
        self.scopes.push((qualifier.into(), dsl.defs));
        self
    }
}

#[derive(Default)]
pub struct ScopeDsl {
    defs: Vec<(TypeId, Definition)>,
}

impl ScopeDsl {
    pub fn scoped<T: 'static>(
        mut self,
        f: impl Fn(&Resolver<'_>) -> Result<T, InjectError> + 'static,
    ) -> Self {
        self.defs.push(definition(Kind::Scoped, f));
        self
    }

    pub fn factory<T: 'static>(
        mut self,
        f: impl Fn(&Resolver<'_>) -> Result<T, InjectError> + 'static,
    ) -> Self {
        self.defs.push(definition(Kind::Factory, f));
        self
    }
}
