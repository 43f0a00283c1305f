pub mod errors;
pub mod id;
pub mod types;

pub use errors::{ConfigError, GlimpseError, PreviewError};
pub use id::{new_id, SessionId};
pub use types::{CommitKind, LoaderId, ProviderId, Rect, TransitionType};

pub type Result<T> = std::result::Result<T, GlimpseError>;
