//! User Admin Core
//!
//! Platform-agnostic types and pure logic for the user administration panel.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserId`, `Status`, `UserInput`, `UserPayload`
//! - **Search**: the case-sensitive substring filter behind the list's search box
//! - **Form Binding**: `UserForm`, an explicit field-to-value map for the edit surface
//! - **Error Handling**: client-side validation errors (`AdminError`)
//!
//! Nothing in this crate performs I/O.
//!
//! # Example
//!
//! ```rust
//! use admin_core::{FormField, FormMode, UserForm};
//!
//! let mut form = UserForm::blank();
//! form.set(FormField::FirstName, "Bo");
//! form.set(FormField::LastName, "X");
//! form.set(FormField::Age, "25");
//! form.set(FormField::Address, "Y");
//! form.set(FormField::Password, "p");
//!
//! let payload = form.to_input(FormMode::Create)?.into_payload()?;
//! assert_eq!(payload.age, 25);
//! # Ok::<(), admin_core::AdminError>(())
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod form;
pub mod search;
pub mod types;

pub use error::{AdminError, Result};
pub use form::{FormField, FormMode, UserForm};
pub use search::{filter_users, matches_query};
pub use types::{parse_age, Status, User, UserId, UserInput, UserPayload};
