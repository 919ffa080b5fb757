pub mod config;
pub mod errors;
pub mod logging;
pub mod sink;
pub mod width;
pub mod wrap;

// Re-export commonly used types
pub use config::{Config, Device};
pub use errors::{AppError, AppResult};
pub use sink::{print_message, LineSink, VecSink, WriterSink};
pub use width::{rune_width, str_width};
pub use wrap::{wrap, wrap_with, WrapOptions};
