mod error;
mod traits;
mod types;

pub use error::{LenvError, NetworkStage};
pub use traits::{ActivationStrategy, ArchiveExtractor, Downloader};
pub use types::{Version, VersionParseError, find_version};
