// ==========================================
// 数据发布里程碑跟踪系统 - 核心库
// ==========================================
// 技术栈: Rust (纯计算核心, 无持久化依赖)
// 系统定位: 决策支持核心 (人工最终控制权)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "es");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则与派生计算
pub mod engine;

// 边界层 - 外部行数据转换
pub mod importer;

// 配置层 - 校验配置档
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 性能计时
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AlertState, DataKind, GateMode, Milestone, MilestoneState, RecordDateStatus, RecordStatus,
    SiNoFlag, StandardStatus,
};

// 领域实体
pub use domain::{Alerta, RawRegistro, Registro, SubStandard};

// 配置
pub use config::ValidationProfile;

// 引擎
pub use engine::{
    AlertClassifier, BusinessCalendar, DeadlineEngine, ProgressCalculator, RecalcEngine,
    RecalcResult, RuleCorrection, RuleValidator,
};

// API
pub use api::{ApiError, ApiResult, TrackerApi, ValidationViolation};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "数据发布里程碑跟踪系统";
