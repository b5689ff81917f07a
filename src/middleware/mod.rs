mod hidden_files;
mod request_log;

pub use hidden_files::hidden_files_middleware;
pub use request_log::{client_addr, request_log_middleware};
