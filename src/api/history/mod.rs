pub mod client;
pub mod query;

pub use client::HistoryApiClient;
pub use query::HistoryQuery;
