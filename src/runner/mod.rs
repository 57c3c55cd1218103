//! @ai:module:intent Question fan-out to agents and answer grading
//! @ai:module:layer application
//! @ai:module:public_api BenchmarkExecutor, AnswerMatcher

pub mod executor;
pub mod matching;

pub use executor::BenchmarkExecutor;
pub use matching::AnswerMatcher;
