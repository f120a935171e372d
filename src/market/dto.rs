use serde::Serialize;

pub const OVERALL_FAILURE: &str = "Unable to retrive the overall summary";
pub const MARKET_FAILURE: &str = "Unable to retrive the data for give company";
pub const INVALID_COMPANY: &str = "Invalid input, Please provide the valid input";

/// Failure body of the overall summary (`message`, lowercase).
#[derive(Debug, Serialize)]
pub struct SummaryFailure {
    pub message: &'static str,
}

/// Failure body of the per-market summary (`Message`).
#[derive(Debug, Serialize)]
pub struct MarketFailure {
    #[serde(rename = "Message")]
    pub message: &'static str,
}
