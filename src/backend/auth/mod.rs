//! Authentication Module
//!
//! This module owns the credential directory and its HTTP surface.
//!
//! # Architecture
//!
//! - **`directory`** - The `CredentialDirectory` trait and its record type
//! - **`memory`** - In-memory directory (no database configured, tests)
//! - **`postgres`** - PostgreSQL directory backed by `sqlx`
//! - **`handlers`** - Signup, signin and admin removal handlers
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── directory.rs    - Directory trait, record and error types
//! ├── memory.rs       - In-memory implementation
//! ├── postgres.rs     - PostgreSQL implementation
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Credentials
//!
//! The server never sees a secret. Clients send a credential hash derived from
//! username and secret; it is stored as given and compared by exact equality.
//! A failed signin does not reveal whether the username exists.
//!
//! # Example
//!
//! ```rust,no_run
//! use relaychat::backend::auth::{CredentialDirectory, MemoryDirectory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let directory = MemoryDirectory::new();
//! directory.register("alice", "h1").await?;
//! let record = directory.authenticate("alice", "h1").await?;
//! assert_eq!(record.username, "alice");
//! # Ok(())
//! # }
//! ```

/// Directory trait and record types
pub mod directory;

/// In-memory credential directory
pub mod memory;

/// PostgreSQL credential directory
pub mod postgres;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use directory::{CredentialDirectory, CredentialRecord, DirectoryError, SharedDirectory};
pub use handlers::{remove_users, signin, signup};
pub use memory::MemoryDirectory;
pub use postgres::PgDirectory;
