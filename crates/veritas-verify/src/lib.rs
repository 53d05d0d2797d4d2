//! Veritas Verification Layer
//!
//! The async half of the pipeline: fans extracted claims out to
//! fact-checking sources, memoises their verdicts, consults an optional
//! text classifier and drives the synchronous scoring in `veritas-core`.
//!
//! # Example
//!
//! ```rust,no_run
//! use veritas_verify::{Pipeline, PipelineConfig};
//!
//! # async fn run() -> Result<(), veritas_verify::PipelineError> {
//! let pipeline = Pipeline::builder(PipelineConfig::default())
//!     .with_simulated_sources()
//!     .build()?;
//!
//! let report = pipeline
//!     .analyze_content("A secret study proves the cover-up.")
//!     .await;
//! println!("{} ({})", report.risk.overall_score, report.risk.tier);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod classifier;
pub mod config;
pub mod engine;
mod error;
pub mod pipeline;
pub mod rate_limit;
pub mod source;

pub use cache::{CacheStats, VerificationCache};
pub use classifier::{ClassifierAssessment, ClassifierReport, TextClassifier};
pub use config::{CacheConfig, EngineConfig, PipelineConfig};
pub use engine::ConsensusEngine;
pub use error::{ClassifierError, PipelineError, VerifyError};
pub use pipeline::{AnalysisReport, AnalysisRequest, Pipeline, PipelineBuilder};
pub use rate_limit::RateLimiter;
pub use source::{simulated_sources, SimulatedSource, SourceReport, SourceVerifier};
