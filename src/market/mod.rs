pub mod fetcher;
pub mod traits;

pub use fetcher::CoinGeckoFetcher;
pub use traits::MarketDataSource;
