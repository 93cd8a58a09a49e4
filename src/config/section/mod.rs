//! Configuration section definitions.
//!
//! Each module corresponds to a section in `assetline.toml`:
//!
//! | Module     | TOML Section                     | Purpose                         |
//! |------------|----------------------------------|---------------------------------|
//! | `pipeline` | `[pipeline]`                     | Stage toggles, failure policy   |
//! | `output`   | `[build]`                        | Output directory, fingerprints  |
//! | `builtin`  | `[builtin]`                      | Built-in capability toggles     |
//! | `external` | `[[converter]]`, `[[compressor]]`| Command-backed capabilities     |

mod builtin;
mod external;
mod output;
mod pipeline;

pub use builtin::BuiltinConfig;
pub use external::{CompressorEntry, ConverterEntry};
pub use output::BuildConfig;
pub use pipeline::{CompressFailure, PipelineConfig};
