//! Per-asset error taxonomy.
//!
//! None of these abort a run: they are caught at the file boundary and
//! recorded in the [`RunReport`](super::RunReport).

use std::path::{Path, PathBuf};

use image::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// Source could not be opened or parsed as an image
    #[error("cannot decode `{}`", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// Resize or save failed (disk full, unsupported colour mode)
    #[error("cannot encode `{}`", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    /// Destination extension has no encoder
    #[error("no encoder for `{}`", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Copy or mkdir failed
    #[error("I/O error at `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AssetError {
    pub fn decode(path: &Path, source: ImageError) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn encode(path: &Path, source: ImageError) -> Self {
        Self::Encode {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn unsupported(path: &Path) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Render with the full `source()` chain, `outer: inner: root`.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Short category label for reports.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Decode { .. } => "decode",
            Self::Encode { .. } | Self::UnsupportedFormat { .. } => "encode",
            Self::Io { .. } => "io",
        }
    }
}
