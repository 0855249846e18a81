// ==========================================
// 数据发布里程碑跟踪 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供上层 (CLI/UI 宿主) 调用
// ==========================================

pub mod error;
pub mod tracker_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use tracker_api::TrackerApi;
