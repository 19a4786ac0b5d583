pub mod error;
pub mod messages;
pub mod types;

pub use error::ReportError;
pub use messages::*;
pub use types::*;
