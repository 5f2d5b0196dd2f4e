use sheet_inject::InjectError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SheetError {
    /// The ambient manager was read while no `SheetProvider` was composing.
    #[error("local sheet not initialized: no SheetProvider is composing")]
    NotInitialized,

    #[error(transparent)]
    Inject(#[from] InjectError),
}
