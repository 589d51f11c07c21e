pub mod extract;
pub mod formatter;
pub mod llm;
pub mod orchestrator;
pub mod planner;
pub mod prompts;
pub mod providers;
pub mod throttle;

pub use orchestrator::Orchestrator;
