use std::cell::OnceCell;
use std::marker::PhantomData;
use std::rc::Rc;

use sheet_core::View;
use sheet_inject::{Container, InjectError, Parameters, ScopeHandle, named};

use crate::{SheetError, SheetManager};

/// A unit of UI content that owns an injection scope.
///
/// The scope opens on first access and must be closed exactly once, when the
/// screen is dismissed. Anything resolved through the scope afterwards fails
/// with [`InjectError::ScopeClosed`].
pub trait ScopedScreen {
    /// Scope id and qualifier. Unique per active instance.
    fn scope_name(&self) -> &str;

    fn scope(&self) -> Result<ScopeHandle, SheetError>;

    /// Not guarded against a second call; closing an already closed scope
    /// does nothing.
    fn close_scope(&self);

    /// Resolves another instance from this screen's scope.
    fn scoped<T: 'static>(&self) -> Result<Rc<T>, SheetError>
    where
        Self: Sized,
    {
        Ok(self.scope()?.get::<T>()?)
    }

    fn scoped_with_params<T: 'static>(&self, params: Parameters) -> Result<Rc<T>, SheetError>
    where
        Self: Sized,
    {
        Ok(self.scope()?.get_with_params::<T>(params)?)
    }
}

/// Screen content shown inside the local bottom sheet.
pub trait BottomSheet: ScopedScreen {
    /// Builds the sheet from the current state. Called every frame the sheet
    /// is composed.
    fn content(&self, sheets: &SheetManager) -> View;
}

pub(crate) fn same_screen(a: &Rc<dyn BottomSheet>, b: &Rc<dyn BottomSheet>) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

/// Lazily opened scope plus its view-model, for embedding in a screen.
///
/// The view-model is resolved through the scope on every access rather than
/// cached here, so closing the scope really releases it.
pub struct ScreenScope<VM: 'static> {
    container: Container,
    name: String,
    scope: OnceCell<ScopeHandle>,
    _vm: PhantomData<fn() -> VM>,
}

impl<VM: 'static> ScreenScope<VM> {
    pub fn new(container: &Container, scope_name: impl Into<String>) -> Self {
        Self {
            container: container.clone(),
            name: scope_name.into(),
            scope: OnceCell::new(),
            _vm: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> Result<ScopeHandle, InjectError> {
        if let Some(s) = self.scope.get() {
            return Ok(s.clone());
        }
        let opened = self
            .container
            .get_or_create_scope(&self.name, named(self.name.clone()))?;
        Ok(self.scope.get_or_init(|| opened).clone())
    }

    pub fn view_model(&self) -> Result<Rc<VM>, InjectError> {
        self.scope()?.get::<VM>()
    }

    pub fn get<T: 'static>(&self) -> Result<Rc<T>, InjectError> {
        self.scope()?.get::<T>()
    }

    pub fn get_with_params<T: 'static>(&self, params: Parameters) -> Result<Rc<T>, InjectError> {
        self.scope()?.get_with_params::<T>(params)
    }

    pub fn is_open(&self) -> bool {
        self.scope.get().is_some_and(|s| !s.is_closed())
    }

    pub fn close(&self) {
        match self.scope.get() {
            Some(s) => {
                if !s.close() {
                    log::debug!("scope `{}` was already closed", self.name);
                }
            }
            None => log::debug!("scope `{}` never opened; nothing to close", self.name),
        }
    }
}

/// Screens keeping their scope in a [`ScreenScope`] implement this and get
/// [`ScopedScreen`] from it.
pub trait ScreenScoped {
    type ViewModel: 'static;

    fn screen_scope(&self) -> &ScreenScope<Self::ViewModel>;
}

impl<S: ScreenScoped> ScopedScreen for S {
    fn scope_name(&self) -> &str {
        self.screen_scope().name()
    }

    fn scope(&self) -> Result<ScopeHandle, SheetError> {
        Ok(self.screen_scope().scope()?)
    }

    fn close_scope(&self) {
        self.screen_scope().close()
    }
}
