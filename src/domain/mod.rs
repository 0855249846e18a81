// ==========================================
// 数据发布里程碑跟踪 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、告警条目
// 红线: 不含引擎逻辑, 不含边界解析逻辑
// ==========================================

pub mod alerta;
pub mod registro;
pub mod types;

// 重导出核心类型
pub use alerta::Alerta;
pub use registro::{RawRegistro, Registro, SubStandard};
pub use types::{
    AlertState, DataKind, GateMode, Milestone, MilestoneState, RecordDateStatus, RecordStatus,
    SiNoFlag, StandardStatus,
};
