// ==========================================
// 数据发布里程碑跟踪 - 引擎层
// ==========================================
// 职责: 实现跟踪表的全部业务规则与派生计算
// 红线: 引擎不做 I/O, 所有自动修正必须输出 reason
// ==========================================

pub mod alerts;
pub mod business_calendar;
pub mod deadline;
pub mod progress;
pub mod recalc;
pub mod rules;

// 重导出核心引擎
pub use alerts::AlertClassifier;
pub use business_calendar::BusinessCalendar;
pub use deadline::DeadlineEngine;
pub use progress::ProgressCalculator;
pub use recalc::{RecalcEngine, RecalcResult};
pub use rules::{RuleCorrection, RuleValidator};
