//! HTTP client for the notifications API.
//!
//! [`HttpApi`] implements the read and write capabilities from
//! `notitray-core`, so it plugs straight into a
//! [`Coordinator`](notitray_core::Coordinator):
//!
//! ```no_run
//! use notitray_client::HttpApi;
//! use notitray_core::{Coordinator, ListQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = HttpApi::new("https://lms.example.com")?;
//! let coordinator = Coordinator::new(api);
//! coordinator.fetch_counts().await?;
//! coordinator.fetch_list(ListQuery::default()).await?;
//! println!("{} unread", coordinator.snapshot().tabs_count.total());
//! # Ok(())
//! # }
//! ```

mod client;
mod endpoints;
mod error;

pub use client::{DEFAULT_TIMEOUT, HttpApi};
pub use endpoints::Endpoints;
pub use error::{ClientError, Result};
