//! File storage for uploaded media.
//!
//! Uploaded product images are persisted through the [`FileStorage`] trait and
//! referenced elsewhere only by their `{name, location}` descriptors; callers
//! never learn the storage medium. The bundled backend writes to the local
//! filesystem under a configured upload directory.

mod filename;
mod storage;

pub use filename::sanitize_filename;
pub use storage::{FileStorage, LocalFileStorage};
