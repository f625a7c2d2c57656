//! urlqr - render a URL as a QR-code PNG
//!
//! The flow is linear: configure logging, make sure the output directory
//! exists, validate the URL, then encode it and write the image.
//!
//! # Example
//!
//! ```no_run
//! use urlqr::{AppConfig, output, qr};
//!
//! fn main() -> urlqr::Result<()> {
//!     let config = AppConfig::load(None)?;
//!     let cwd = std::env::current_dir()?;
//!
//!     output::create_directory(&cwd.join(&config.output.directory))?;
//!     let path = output::output_path(&cwd, &config.output.directory, &config.output.name);
//!     let generated = qr::generate_qr_code("https://example.com", &path, &config.render)?;
//!
//!     println!("wrote {}", generated.path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod color;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;
pub mod validate;

// Re-exports for convenience
pub use error::{Error, Result};

pub use color::Color;
pub use config::{AppConfig, ErrorCorrection, LogRotation, LoggingOptions, OutputOptions, RenderOptions};
pub use qr::{Generated, QrDecoder, QrEncoder, QrGenerator};
pub use validate::is_valid_url;
