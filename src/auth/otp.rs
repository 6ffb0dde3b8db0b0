// 两步验证码计算

use crate::error::{AlistError, Result};
use totp_rs::{Algorithm, Secret, TOTP};

/// 验证码位数
const OTP_DIGITS: usize = 6;
/// 时间步长（秒）
const OTP_STEP: u64 = 30;
/// 允许的前后偏移步数
const OTP_SKEW: u8 = 1;

fn build_totp(secret: &str) -> Result<TOTP> {
    let bytes = Secret::Encoded(secret.trim().to_uppercase())
        .to_bytes()
        .map_err(|e| AlistError::TwoFactor(format!("密钥格式错误: {:?}", e)))?;
    Ok(TOTP::new_unchecked(
        Algorithm::SHA1,
        OTP_DIGITS,
        OTP_SKEW,
        OTP_STEP,
        bytes,
    ))
}

/// 计算当前时刻的验证码
pub fn current_code(secret: &str) -> Result<String> {
    build_totp(secret)?
        .generate_current()
        .map_err(|e| AlistError::TwoFactor(format!("系统时间异常: {}", e)))
}

/// 计算指定时间戳（秒）的验证码
pub fn code_at(secret: &str, timestamp: u64) -> Result<String> {
    Ok(build_totp(secret)?.generate(timestamp))
}
