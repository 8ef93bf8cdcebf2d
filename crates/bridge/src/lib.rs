pub mod api;
pub mod error;
pub mod settings;
pub mod types;

pub use api::BridgeClient;
pub use error::{ApiError, ApiResult};
pub use settings::{DeviceServerSettings, ModelServerSettings, Settings};
pub use types::*;
