//! VPN server discovery
//!
//! The provider's listing page is fetched over HTTP, hostnames are scraped
//! out of the HTML, and the resulting list is cached in a flat file that is
//! refreshed once it goes stale.

pub mod cache;
pub mod client;
pub mod scrape;

pub use cache::{load_hostnames, CacheStatus, ServerListCache};
pub use client::ListingClient;
pub use scrape::extract_hostnames;

use crate::Result;
use async_trait::async_trait;

/// Anything that can produce the current list of server hostnames
#[async_trait]
pub trait HostnameSource: Send + Sync {
    /// Fetch the ordered hostname list; errors are fatal to the run
    async fn fetch_hostnames(&self) -> Result<Vec<String>>;
}
