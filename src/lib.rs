#![doc = include_str!("../README.md")]

pub mod dispatch;
mod error;

pub use dispatch::{
    Dispatcher, FnRequestHandler, ProgressSnapshot, Request, RequestHandler, ResultEntry,
};
pub use error::{Error, Result};
