//! Foundation types for rollcall.
//!
//! Every other rollcall crate depends on `rollcall-types`. Nothing here
//! touches the store; these are the validated values that flow between the
//! HTTP surface and the façades.
//!
//! # Key Types
//!
//! - [`Username`] / [`DisplayName`] -- validated contributor fields
//! - [`ContributorRecord`] -- the `name;bio` value stored per username
//! - [`Contributor`] -- a listed directory entry
//! - [`ImageId`] -- opaque identifier of an uploaded image
//! - [`ListQuery`] -- validated sort and pagination parameters

pub mod contributor;
pub mod error;
pub mod image;
pub mod query;

pub use contributor::{Contributor, ContributorRecord, DisplayName, Username, FIELD_SEPARATOR};
pub use error::TypeError;
pub use image::ImageId;
pub use query::{ListQuery, SortBy};
