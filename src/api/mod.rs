pub mod error;
pub mod history;
pub mod kalshi;

pub use error::ApiError;
pub use history::{HistoryApiClient, HistoryQuery};
pub use kalshi::{KalshiClient, KalshiMarket, PriceLabel};
