// 各接口请求体定义

use serde::Serialize;
use std::collections::HashMap;

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<&'a str>,
}

/// POST /api/auth/2fa/verify
#[derive(Debug, Clone, Serialize)]
pub struct VerifyTwoFactorRequest<'a> {
    pub code: &'a str,
    pub secret: &'a str,
}

/// POST /api/fs/mkdir
#[derive(Debug, Clone, Serialize)]
pub struct MkdirRequest<'a> {
    pub path: &'a str,
}

/// POST /api/fs/rename
#[derive(Debug, Clone, Serialize)]
pub struct RenameRequest<'a> {
    pub name: &'a str,
    pub path: &'a str,
}

/// POST /api/fs/remove
#[derive(Debug, Clone, Serialize)]
pub struct RemoveRequest<'a> {
    pub dir: &'a str,
    pub names: &'a [String],
}

/// POST /api/fs/remove_empty_directory
#[derive(Debug, Clone, Serialize)]
pub struct RemoveEmptyDirRequest<'a> {
    pub src_dir: &'a str,
}

/// POST /api/fs/copy 与 /api/fs/move
#[derive(Debug, Clone, Serialize)]
pub struct TransferObjectsRequest<'a> {
    pub src_dir: &'a str,
    pub dst_dir: &'a str,
    pub names: &'a [String],
}

/// POST /api/fs/recursive_move
#[derive(Debug, Clone, Serialize)]
pub struct RecursiveMoveRequest<'a> {
    pub src_dir: &'a str,
    pub dst_dir: &'a str,
}

/// 单个重命名对
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameObject<'a> {
    pub src_name: &'a str,
    pub new_name: &'a str,
}

/// POST /api/fs/batch_rename 与 /api/fs/regex_rename
#[derive(Debug, Clone, Serialize)]
pub struct BatchRenameRequest<'a> {
    pub src_dir: &'a str,
    pub rename_objects: Vec<RenameObject<'a>>,
}

impl<'a> BatchRenameRequest<'a> {
    /// 由 旧名 → 新名 映射构造，顺序不保证
    pub fn from_map(src_dir: &'a str, mapping: &'a HashMap<String, String>) -> Self {
        let rename_objects = mapping
            .iter()
            .map(|(src_name, new_name)| RenameObject { src_name, new_name })
            .collect();
        Self {
            src_dir,
            rename_objects,
        }
    }
}

/// POST /api/fs/dirs
#[derive(Debug, Clone, Serialize)]
pub struct DirsRequest<'a> {
    pub path: &'a str,
    pub password: &'a str,
    pub force_root: bool,
}

/// POST /api/fs/list
#[derive(Debug, Clone, Serialize)]
pub struct ListRequest<'a> {
    pub path: &'a str,
    pub password: &'a str,
    pub page_num: u32,
    pub per_page: u32,
    pub refresh: bool,
}

/// POST /api/fs/get
#[derive(Debug, Clone, Serialize)]
pub struct GetRequest<'a> {
    pub path: &'a str,
    pub password: &'a str,
}
