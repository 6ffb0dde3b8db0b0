// 认证模块

pub mod otp;
pub mod types;

pub use types::{AuthState, Credentials};
