// ==========================================
// 数据发布里程碑跟踪 - API层错误类型
// ==========================================
// 职责: 定义对外接口的错误类型, 所有拒绝必须带显式原因
// ==========================================

use thiserror::Error;

/// API层错误类型
/// 拒绝类错误必须携带结构化违规明细, 供前端逐条展示
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("未知列名: {field}")]
    UnknownField { field: String },

    #[error("无法解析的取值: 列={field}, 值={value}")]
    UnparseableValue { field: String, value: String },

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 业务规则拒绝
    // ==========================================
    /// 单字段编辑被业务门拒绝 (带详细原因)
    #[error("字段校验被拒: {reason}")]
    ValidationRejected {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ValidationViolation {
    /// 违规类型（STANDARDS_GATE / PUBLICATION_GATE / CLOSING_GATE / STATUS_GATE）
    pub violation_type: String,
    /// 记录编号 (Cod)
    pub code: String,
    /// 被拒绝的列名
    pub field: String,
    /// 违规原因
    pub reason: String,
    /// 额外信息（可选）
    pub details: Option<serde_json::Value>,
}
