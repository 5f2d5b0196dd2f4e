use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::InjectError;

/// Name of a scope declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Qualifier(Cow<'static, str>);

impl Qualifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Qualifier {
    fn from(s: &'static str) -> Self {
        Qualifier(Cow::Borrowed(s))
    }
}

impl From<String> for Qualifier {
    fn from(s: String) -> Self {
        Qualifier(Cow::Owned(s))
    }
}

pub fn named(name: impl Into<Qualifier>) -> Qualifier {
    name.into()
}

/// Positional arguments handed to a factory the first time it runs.
#[derive(Clone, Default)]
pub struct Parameters(Vec<Rc<dyn Any>>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: 'static>(mut self, value: T) -> Self {
        self.0.push(Rc::new(value));
        self
    }

    pub fn get<T: 'static>(&self, index: usize) -> Result<&T, InjectError> {
        self.0
            .get(index)
            .and_then(|v| v.downcast_ref::<T>())
            .ok_or(InjectError::MissingParameter {
                index,
                type_name: type_name::<T>(),
            })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameters({})", self.0.len())
    }
}

#[macro_export]
macro_rules! parameters_of {
    ($($value:expr),* $(,)?) => {
        $crate::Parameters::new()$(.with($value))*
    };
}
