//! Asset classification, path mapping, discovery and processing.

mod kind;
mod process;
mod route;
mod scan;

// Types
pub use kind::{AssetKind, Classifier, normalize_ext};
pub use route::{VariantSet, map_destinations};

// Scanning (pure functions)
pub use scan::{ScanOptions, discover_files};

// Processing (side effects)
pub use process::{FileOutcome, copy_passthrough, is_raster_fresh, process_raster};
