pub mod schema;

pub use schema::{GatewayConfig, RangeConfig, RateLimitConfig, RegionConfig, SignalConfig};
