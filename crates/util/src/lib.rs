pub mod path_processing;
pub mod text_processing;

pub use path_processing::{LOG_PATH_ENV, LogFileError, default_log_path, expand_tilde, open_log_file};
pub use text_processing::{GEMINI_KEY_PREFIX, looks_like_gemini_key, mask_secret, redact_sensitive};
