//! Error types.

use std::io::Error as IoError;
use std::path::PathBuf;
use std::process::ExitStatus;

use image::ImageError;

/// Errors that abort a glyph generation run.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration was missing, unreadable or out of range.
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    /// The source image could not be opened or decoded.
    #[error("failed to load image '{}'", path.display())]
    ImageLoad {
        /// The image path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: ImageError,
    },
    /// A diagnostic image could not be written.
    #[error("failed to save image '{}'", path.display())]
    ImageSave {
        /// The image path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: ImageError,
    },
    /// The reference font file could not be read.
    #[error("failed to read reference font '{}'", path.display())]
    FontLoad {
        /// The font path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// The reference font file was read but is not a usable font.
    #[error("failed to parse reference font '{}': {reason}", path.display())]
    FontParse {
        /// The font path.
        path: PathBuf,
        /// The reason reported by the rasterizer.
        reason: String,
    },
    /// A diagnostics directory could not be created.
    #[error("failed to create directory '{}'", path.display())]
    CreateDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// A stale diagnostics directory could not be removed.
    #[error("failed to remove directory '{}'", path.display())]
    RemoveDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// The sampling window is larger than the source mask.
    #[error(
        "sampling window {window_width}x{window_height} does not fit in a \
         {mask_width}x{mask_height} mask"
    )]
    WindowTooLarge {
        /// Window width in pixels.
        window_width: u32,
        /// Window height in pixels.
        window_height: u32,
        /// Mask width in pixels.
        mask_width: u32,
        /// Mask height in pixels.
        mask_height: u32,
    },
    /// The font container could not be saved.
    #[error(transparent)]
    FontWrite(#[from] FontWriteError),
}

/// An error describing an invalid [`Config`](crate::Config).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read or deserialized.
    #[error("failed to read configuration '{}'", path.display())]
    Load {
        /// The configuration path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: plist::Error,
    },
    /// The threshold is outside of `[0, 1]`.
    #[error("threshold must be within [0, 1], found {0}")]
    Threshold(f64),
    /// The ink ratio tolerance is outside of `[0, 1]`.
    #[error("ratio tolerance must be within [0, 1], found {0}")]
    RatioTolerance(f64),
    /// The sample count is zero.
    #[error("sample count must be positive")]
    SampleCount,
    /// The sampling window has a zero dimension.
    #[error("window dimensions must be positive, found {width}x{height}")]
    WindowSize {
        /// Window width in pixels.
        width: u32,
        /// Window height in pixels.
        height: u32,
    },
    /// The character set is empty.
    #[error("character set must not be empty")]
    EmptyCharacterSet,
    /// A font metric is too small to place shapes in.
    #[error("font metric '{name}' must be at least {min}, found {found}")]
    Metric {
        /// The metric's name.
        name: &'static str,
        /// The smallest accepted value.
        min: i64,
        /// The configured value.
        found: i64,
    },
}

/// An error that occurs while saving a [`Font`](crate::Font) to disk.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FontWriteError {
    /// An existing font directory could not be removed.
    #[error("failed to remove existing font directory '{}'", path.display())]
    Cleanup {
        /// The font directory.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// A font directory could not be created.
    #[error("failed to create directory '{}'", path.display())]
    CreateDir {
        /// The directory path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// A property list file could not be written.
    #[error("failed to write '{}'", path.display())]
    Plist {
        /// The plist path.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: plist::Error,
    },
    /// A glyph could not be written.
    #[error("failed to save glyph '{name}'")]
    Glif {
        /// The glyph name.
        name: String,
        /// The underlying error.
        #[source]
        source: GlifWriteError,
    },
}

/// The possible inner error types that can occur when writing out a .glif file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GlifWriteError {
    /// XML serialization error.
    #[error("failed to serialize glif XML")]
    Xml(#[from] quick_xml::Error),
    /// The serialized glyph could not be written to disk.
    #[error("failed to write glif file")]
    Io(#[from] IoError),
}

/// An error returned by the external font compiler.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The compiler executable could not be launched.
    #[error("failed to launch '{program}'")]
    Spawn {
        /// The program name.
        program: String,
        /// The underlying error.
        #[source]
        source: IoError,
    },
    /// The compiler ran and exited unsuccessfully.
    #[error("'{program}' failed ({status}): {stderr}")]
    Failed {
        /// The program name.
        program: String,
        /// The exit status.
        status: ExitStatus,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}
