pub mod client;
pub mod models;

pub use client::KalshiClient;
pub use models::{KalshiMarket, KalshiMarketResponse, PriceLabel};
