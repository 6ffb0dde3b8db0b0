// Alist API 数据类型

use crate::api::constants::CODE_SUCCESS;
use crate::error::{AlistError, Result};
use base64::Engine;
use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// 统一响应信封 `{code, message, data}`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope {
    /// 业务码（200 表示成功）
    pub code: i64,

    /// 消息
    #[serde(default)]
    pub message: String,

    /// 数据，仅在 code == 200 时有意义
    #[serde(default)]
    pub data: Option<Value>,
}

impl ApiEnvelope {
    /// 解析响应体
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }

    /// 检查业务码，失败时返回服务端消息
    pub fn check(self) -> Result<Option<Value>> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(AlistError::RemoteApi {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// 检查业务码并将 data 解析为目标类型
    pub fn into_data<T: DeserializeOwned>(self, route: &'static str) -> Result<T> {
        match self.check()? {
            Some(Value::Null) | None => Err(AlistError::EmptyPayload { route }),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }
}

/// 服务端可能把空列表返回为 null
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 登录返回数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
}

/// 两步验证密钥
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorSecret {
    /// 二维码图片（data:image/png;base64,...）
    #[serde(default)]
    pub qr: String,

    /// Base32 编码的 TOTP 密钥
    pub secret: String,
}

impl TwoFactorSecret {
    /// 解码二维码 data URL 为 PNG 字节
    pub fn qr_png(&self) -> Result<Vec<u8>> {
        let encoded = match self.qr.split_once(',') {
            Some((_, data)) => data,
            None => self.qr.as_str(),
        };
        base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| AlistError::TwoFactor(format!("二维码解码失败: {}", e)))
    }
}

/// 用户信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(rename = "Salt")]
    pub salt: String,
    pub password: String,
    pub base_path: String,
    /// 角色（0=普通用户，1=游客，2=管理员）
    pub role: i32,
    pub disabled: bool,
    /// 权限位
    pub permission: i32,
    pub sso_id: String,
    /// 是否已开启两步验证
    pub otp: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == 2
    }

    pub fn is_guest(&self) -> bool {
        self.role == 1
    }
}

/// 目录信息（/api/fs/dirs）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dir {
    pub name: String,
    pub modified: String,
}

/// 对象类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Unknown,
    Folder,
    Video,
    Audio,
    Text,
    Image,
}

impl From<i32> for FileKind {
    fn from(value: i32) -> Self {
        match value {
            1 => FileKind::Folder,
            2 => FileKind::Video,
            3 => FileKind::Audio,
            4 => FileKind::Text,
            5 => FileKind::Image,
            _ => FileKind::Unknown,
        }
    }
}

/// 文件 / 目录信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct File {
    /// 文件名
    pub name: String,

    /// 修改时间（RFC 3339）
    pub modified: String,

    /// 文件大小（字节）
    pub size: i64,

    /// 是否是目录
    pub is_dir: bool,

    /// 签名
    pub sign: String,

    /// 缩略图地址
    pub thumb: String,

    /// 对象类型
    #[serde(rename = "type")]
    pub file_type: i32,

    /// 直链（仅 /api/fs/get 返回）
    pub raw_url: String,
}

impl File {
    /// 是否是目录
    pub fn is_directory(&self) -> bool {
        self.is_dir
    }

    pub fn kind(&self) -> FileKind {
        FileKind::from(self.file_type)
    }

    /// 解析修改时间，格式不合法时返回 None
    pub fn modified_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.modified).ok()
    }
}

/// 目录列表数据（/api/fs/list）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListData {
    #[serde(deserialize_with = "null_as_default")]
    pub content: Vec<File>,
    pub total: i64,
    pub readme: String,
    pub write: bool,
    pub provider: String,
}

/// 站点设置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub allow_indexed: String,
    pub allow_mounted: String,
    pub announcement: String,
    pub audio_autoplay: String,
    pub audio_cover: String,
    pub auto_update_index: String,
    pub default_page_size: String,
    pub external_previews: String,
    pub favicon: String,
    pub filename_char_mapping: String,
    pub forward_direct_link_params: String,
    pub hide_files: String,
    pub home_container: String,
    pub home_icon: String,
    pub iframe_previews: String,
    pub logo: String,
    pub main_color: String,
    pub ocr_api: String,
    pub package_download: String,
    pub pagination_type: String,
    pub robots_txt: String,
    pub search_index: String,
    pub settings_layout: String,
    pub site_title: String,
    pub sso_login_enabled: String,
    pub sso_login_platform: String,
    pub version: String,
    pub video_autoplay: String,
}
