// Alist API 常量定义

/// 固定 User-Agent，每个请求都会携带
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.90 Safari/537.36";

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// 请求体类型
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// 业务成功码
pub const CODE_SUCCESS: i64 = 200;

// 认证
pub const API_LOGIN: &str = "/api/auth/login";
pub const API_ME: &str = "/api/me";
pub const API_2FA_GENERATE: &str = "/api/auth/2fa/generate";
pub const API_2FA_VERIFY: &str = "/api/auth/2fa/verify";

// 文件系统
pub const API_FS_MKDIR: &str = "/api/fs/mkdir";
pub const API_FS_RENAME: &str = "/api/fs/rename";
pub const API_FS_REMOVE: &str = "/api/fs/remove";
pub const API_FS_REMOVE_EMPTY_DIR: &str = "/api/fs/remove_empty_directory";
pub const API_FS_COPY: &str = "/api/fs/copy";
pub const API_FS_MOVE: &str = "/api/fs/move";
pub const API_FS_RECURSIVE_MOVE: &str = "/api/fs/recursive_move";
pub const API_FS_REGEX_RENAME: &str = "/api/fs/regex_rename";
pub const API_FS_BATCH_RENAME: &str = "/api/fs/batch_rename";
pub const API_FS_DIRS: &str = "/api/fs/dirs";
pub const API_FS_LIST: &str = "/api/fs/list";
pub const API_FS_GET: &str = "/api/fs/get";

// 站点
pub const API_SETTINGS: &str = "/api/settings";
