//! trip-planner-rs: a small HTTP backend that turns trip parameters into a
//! Gemini-generated travel plan.
//!
//! The planner checks the request, renders a prompt, calls the provider with
//! bounded retry on overload, and strips markdown from the answer.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use trip_planner_rs::{server, TripPlanner};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let planner = TripPlanner::gemini(std::env::var("GOOGLE_API_KEY").ok());
//!     server::run_serve(Arc::new(planner), "127.0.0.1", 5000).await
//! }
//! ```

pub mod core;
pub mod error;
pub mod server;
pub mod services;
pub mod types;

pub use core::{RetryPolicy, TripPlanner};
pub use error::{PlannerError, Result};
pub use server::build_router;
pub use services::{normalize, GeminiClient, GenerationClient, GenerationReply};
pub use types::{PlanResponse, TripDetails, TripField, TripRequest};

#[cfg(feature = "cli")]
pub mod cli;
