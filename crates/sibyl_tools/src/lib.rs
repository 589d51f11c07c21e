pub mod weather;
pub mod wikipedia;

pub use weather::WeatherTool;
pub use wikipedia::WikipediaTool;
