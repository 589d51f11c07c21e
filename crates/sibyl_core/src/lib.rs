pub mod config;
pub mod contracts;

pub use config::SibylConfig;
pub use contracts::{ExternalData, FinalResult, Plan, ToolReport, WeatherReport, WikiSummary};
