//! Collaborator endpoint constants.

/// Default base URL of the rate ingestion service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Path that (re)materializes rate history for a period.
pub const REFRESH_PATH: &str = "/fetch_data";

/// Path that lists the stored rate history.
pub const RATES_PATH: &str = "/exchange_rates";
