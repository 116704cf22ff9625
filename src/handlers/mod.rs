pub mod comparison;
pub mod dispatch;

pub use dispatch::AnalysisDispatcher;
