//! Catalog of channels and their videos.
//!
//! The catalog is produced by `extract` runs and consumed by the download
//! pipeline. Channels are bucketed by their normalized title; videos are
//! deduplicated by full structural equality.

mod model;
mod normalize;
mod store;

pub use model::{Catalog, Channel, Video, VideoSet};
pub use normalize::normalize;
pub use store::{load_catalog, save_catalog, CatalogError};
