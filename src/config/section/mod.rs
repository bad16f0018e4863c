//! Configuration section definitions.
//!
//! Each module corresponds to a section in `densify.toml`:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `paths`    | `[paths]`      | Source and destination roots         |
//! | `variants` | `[variants]`   | Base width, scales, freshness gate   |
//! | `formats`  | `[formats]`    | Raster and pass-through extensions   |
//! | `encode`   | `[encode]`     | Lossy quality, worker threads        |

mod encode;
mod formats;
mod paths;
mod variants;

pub use encode::EncodeConfig;
pub use formats::FormatsConfig;
pub use paths::PathsConfig;
pub use variants::VariantsConfig;
