pub mod api;
pub mod error;
pub mod session;
pub mod settings;

pub use api::{ChurchApiClient, GroupSource, SnapshotSource};
pub use error::FetchError;
pub use session::RosterSession;
pub use settings::{load_settings, Settings};
