// Alist API 模块

pub mod client;
pub mod constants;
pub mod executor;
pub mod request;
pub mod types;

pub use client::AlistClient;
pub use executor::{ApiRequest, RequestExecutor, TransportOptions};
pub use types::*;
