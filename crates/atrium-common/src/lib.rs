pub mod errors;
pub mod events;
pub mod id;
pub mod listeners;
pub mod types;

pub use errors::{AtriumError, ConfigError, PlatformError, StateError, WindowError};
pub use events::{EventBus, HostEvent};
pub use id::Sequence;
pub use listeners::{Listeners, Subscription};
pub use types::{AppInfo, Bounds, WindowId};

pub type Result<T> = std::result::Result<T, AtriumError>;
