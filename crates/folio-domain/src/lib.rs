//! Domain types shared by the folio site crates
//!
//! This crate provides the data model the site controllers operate on:
//! - GalleryTile / GalleryImage: photo tiles and the images derived from them
//! - PublicationEntry: one entry of the publication list
//! - Theme: the persisted light/dark preference
//! - LinkKind / LinkResolution: the outcome of publication link resolution

pub mod gallery;
pub mod link;
pub mod publication;
pub mod theme;

pub use gallery::*;
pub use link::*;
pub use publication::*;
pub use theme::*;
