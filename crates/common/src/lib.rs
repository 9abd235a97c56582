//! Common utilities and shared types for campus-complaints.
//!
//! This crate provides foundational components used across all
//! campus-complaints crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Sessions**: Authenticated identity claims via [`Session`] and [`UserRole`]
//!
//! # Example
//!
//! ```no_run
//! use campus_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod session;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use session::{Session, UserRole};
