pub mod fetcher;
pub mod preview;

pub use fetcher::{ContentFetcher, FetchError, HttpFetcher};
