use crate::auth::jwt::MAX_TTL_MINUTES;

pub const MARKET_PLACEHOLDER: &str = "<Market>";

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_minutes: i64,
}

/// Upstream market-data endpoints and how failures are reported.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Reachability probe for the overall summary; `None` skips it.
    pub parent_api: Option<String>,
    pub overall_summary_api: String,
    /// Contains [`MARKET_PLACEHOLDER`].
    pub market_summary_api: String,
    pub timeout_secs: u64,
    pub strict_status: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub market: MarketConfig,
    pub debug: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            ttl_minutes: ttl_minutes(std::env::var("JWT_TTL_MINUTES").ok().as_deref())?,
        };
        let market = MarketConfig {
            parent_api: non_empty(
                std::env::var("PARENT_API")
                    .unwrap_or_else(|_| "https://bittrex.github.io/api/v3#tag-Markets".into()),
            ),
            overall_summary_api: std::env::var("OVERALL_SUMMARY_API")
                .unwrap_or_else(|_| "https://api.bittrex.com/v3/markets/summaries".into()),
            market_summary_api: std::env::var("MARKET_SUMMARY_API").unwrap_or_else(|_| {
                "https://api.bittrex.com/v3/markets/<Market>/summary".into()
            }),
            timeout_secs: env_parse("UPSTREAM_TIMEOUT_SECS").unwrap_or(10),
            strict_status: env_flag("STRICT_UPSTREAM_STATUS"),
        };
        if !market.market_summary_api.contains(MARKET_PLACEHOLDER) {
            anyhow::bail!("MARKET_SUMMARY_API must contain {MARKET_PLACEHOLDER}");
        }
        Ok(Self {
            database_url,
            jwt,
            market,
            debug: env_flag("DEBUG"),
        })
    }
}

fn ttl_minutes(raw: Option<&str>) -> anyhow::Result<i64> {
    let Some(raw) = raw else { return Ok(30) };
    match raw.trim().parse::<i64>() {
        Ok(v) if (1..=MAX_TTL_MINUTES).contains(&v) => Ok(v),
        _ => anyhow::bail!("JWT_TTL_MINUTES must be between 1 and {MAX_TTL_MINUTES}, got {raw:?}"),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

pub(crate) fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(v: &str) -> bool {
    matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn non_empty(v: String) -> Option<String> {
    let v = v.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}
