//! Backend bridge engine: HTTP dispatch and effect execution.
mod dispatch;
mod engine;
mod persist;
mod types;

pub use dispatch::{DispatchSettings, Dispatcher, ReqwestDispatcher};
pub use engine::EngineHandle;
pub use persist::{ensure_storage_dir, AtomicFileWriter, PersistError};
pub use types::{
    DispatchCommand, DispatchError, EngineEvent, FailureKind, RequestId, INVALID_JSON_HINT,
    NETWORK_HINT,
};
pub use reqwest::Method;
