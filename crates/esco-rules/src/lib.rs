//! ESCO Rules
//!
//! Host-independent rules shared by the ESCO zomes:
//! - Roles and the calling actor
//! - The access policy table (role, resource, action) -> scope
//! - The appointment status lifecycle
//! - Booking overlap detection
//! - Field validation for accounts, profiles and clinical entries
//! - DNA properties
//! - Plain-text export of dossiers and prescription sheets
//!
//! Nothing in this crate touches the Holochain host, so everything here is
//! unit-testable natively.

pub mod booking;
pub mod export;
pub mod lifecycle;
pub mod policy;
pub mod properties;
pub mod role;
pub mod validation;

pub use booking::*;
pub use lifecycle::*;
pub use policy::*;
pub use properties::*;
pub use role::*;
pub use validation::*;
