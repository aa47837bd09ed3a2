mod dispatcher;
mod handler;
mod progress;
mod request;
mod worker;

pub use dispatcher::{Dispatcher, DEFAULT_MAX_CONCURRENT_REQUESTS};
pub use handler::{FnRequestHandler, RequestHandler};
pub use progress::ProgressSnapshot;
pub use request::{Request, ResultEntry};
