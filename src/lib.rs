//! # slideshow-ai - client for the SlideShow AI chat service
//!
//! Sends a user query to the slideshow generation service and reassembles its
//! streamed, newline-delimited JSON answer into a single string.
//!
//! ## Features
//! - Async, tokio compatible
//! - Incremental NDJSON body parsing, nothing is buffered whole
//! - Optional real-time echo of fragments as they arrive
//! - Trait-based sender so the transport can be swapped in tests
//!
//! ## Architecture
//!
//! - **`ApiClient`**: "send and stream" capability; `HttpApiClient` is the
//!   reqwest-backed implementation
//! - **`ndjson`**: cuts the response body into lines
//! - **`stream`**: parses lines into fragments and aggregates them
//! - **`SlideShowAi`**: the facade tying the two together
//!
//! Request failures never escape [`SlideShowAi::chat`]; they come back as an
//! `"Error: ..."` string. Use [`SlideShowAi::try_chat`] for a typed error.
//!
//! ## Example
//! ```no_run
//! use slideshow_ai::options::TransportOptions;
//! use slideshow_ai::SlideShowAi;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = TransportOptions::new().with_timeout(Duration::from_secs(120));
//!     let slideshow = SlideShowAi::with_transport(transport)?;
//!
//!     let answer = slideshow.try_chat("What is artificial intelligence?", false).await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod model;
pub mod ndjson;
pub mod options;
pub mod slideshow;
pub mod stream;

// Re-exports for convenience
pub use client::{ApiClient, ClientError, LineStream};
pub use http::HttpApiClient;
pub use slideshow::{SlideShowAi, API_URL};
