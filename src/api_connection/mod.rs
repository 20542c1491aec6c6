pub mod connection;
pub mod endpoints;

pub use connection::{strip_code_fences, ApiConnectionError, ChatCompletion};
pub use endpoints::{ChatMessage, Provider};
