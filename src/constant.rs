pub const DEFAULT_PROTOCOLS_API_URL: &str = "https://api.llama.fi/lite/protocols2";
pub const USER_AGENT: &str = "OnionFi/1.0";

pub const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FEED_CACHE_SECS: u64 = 300;

pub const DEFAULT_TARGET_CHAIN: &str = "Lisk";
pub const DEFAULT_CHAIN_ASSET: &str = "LSK";
pub const DEFAULT_TOP_MIN_TVL: f64 = 100_000_000.0;
pub const DEFAULT_TOP_LIMIT: usize = 20;

pub const LISK_SEPOLIA_CHAIN_ID: u64 = 4202;

pub const USDT_ADDRESS: &str = "0x2728DD8B45B788e26d12B13Db5A244e5403e7eda";
pub const LSK_ADDRESS: &str = "0x8a21CF9Ba08Ae709D64Cb25AfAA951183EC9FF6D";

/// Decimals of the amount posted to the AI routing endpoint (wei).
pub const ROUTING_AMOUNT_DECIMALS: u8 = 18;
