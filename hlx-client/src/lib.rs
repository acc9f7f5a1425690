//! # HLX Client
//!
//! Connects to an HLX controller (or [the simulator]) over telnet, mirrors
//! its state locally, and exposes typed controllers for every entity kind:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use hlx_client::Application;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hlx_client::ClientError> {
//!     let app = Application::new()?;
//!     app.connect("telnet://192.168.1.48", Duration::from_secs(10)).await?;
//!     app.refresh(Duration::from_secs(30)).await?;
//!
//!     let kitchen = app.zones().set_volume(2, -25, Duration::from_secs(5)).await?;
//!     println!("kitchen volume now {kitchen}");
//!     Ok(())
//! }
//! ```
//!
//! Unsolicited notifications from other clients flow into the same mirror
//! and out of [`Application::subscribe`] as [`StateChange`] events.
//!
//! [the simulator]: https://github.com/openhlx/openhlx-rs

pub mod application;
pub mod command_manager;
pub mod controllers;
pub mod error;
pub mod events;

pub use application::Application;
pub use command_manager::CommandManager;
pub use error::{ClientError, Result};
pub use events::{ClientEvent, StateChange};
