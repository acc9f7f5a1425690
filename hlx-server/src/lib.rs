//! # HLX Server
//!
//! Server side of the HLX control protocol: the dispatch table, the
//! per-entity request handlers, and the [`Simulator`] that serves them over
//! telnet. The `hlxsimd` binary wraps the simulator for standalone use:
//!
//! ```text
//! $ hlxsimd --url telnet://0.0.0.0:23 --config /var/lib/hlxsimd/backup.json
//! ```
//!
//! Embedders can run the same machinery in-process:
//!
//! ```rust,no_run
//! use hlx_server::Simulator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hlx_server::ServerError> {
//!     let simulator = Simulator::new(None)?;
//!     let local = simulator.start("telnet://127.0.0.1:0").await?;
//!     println!("serving on {local}");
//!     # Ok(())
//! }
//! ```

mod controllers;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod simulator;

pub use dispatcher::{CommandDispatcher, Outcome, RequestHandler};
pub use error::{Result, ServerError};
pub use simulator::Simulator;
