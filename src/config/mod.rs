// ==========================================
// 数据发布里程碑跟踪 - 配置层
// ==========================================
// 职责: 校验门策略与期限参数档案
// 构建后注入引擎, 运行期只读
// ==========================================

pub mod validation_profile;

// 重导出核心配置对象
pub use validation_profile::ValidationProfile;
