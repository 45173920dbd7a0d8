mod environment;
mod error;

pub use environment::{Environment, SDK_OPERATION_TIMEOUT};
pub use error::{ApiErrorResponse, AppError};
