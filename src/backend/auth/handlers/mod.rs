//! Authentication Handlers Module
//!
//! HTTP handlers for the credential directory.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - Registration handler
//! ├── signin.rs   - Authentication handler
//! └── admin.rs    - Bulk removal handler
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`signin`** - POST /api/auth/signin
//! - **`remove_users`** - DELETE /api/admin/users (admin token required)
//!
//! Signup and a removal that deleted something trigger a presence broadcast.

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Signin handler
pub mod signin;

/// Admin handlers
pub mod admin;

pub use types::{AuthResponse, CredentialRequest, RemoveUsersRequest, RemoveUsersResponse, UserResponse};

pub use admin::remove_users;
pub use signin::signin;
pub use signup::signup;
