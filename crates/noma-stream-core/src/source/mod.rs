mod fixture;
mod http;

use async_trait::async_trait;

use crate::moment::Moment;
use crate::Result;

pub use fixture::FixtureSource;
pub use http::HttpSource;

/// The data collaborator behind the stream.
///
/// All three calls may fail; the engine treats a failure as "no new
/// items" and keeps navigating the already-loaded pool.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// The first page of the stream.
    async fn fetch_initial(&self) -> Result<Vec<Moment>>;

    /// The next page, `offset` counting moments already loaded.
    async fn fetch_more(&self, offset: usize) -> Result<Vec<Moment>>;

    /// A replacement pool for pull-to-refresh.
    async fn refresh(&self) -> Result<Vec<Moment>>;
}
