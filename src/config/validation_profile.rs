use crate::domain::types::GateMode;
use serde::{Deserialize, Serialize};

/// 校验与派生参数档案
///
/// 一次性构建后注入引擎, 运行期不变;
/// 三个校验门各自独立选择 Strict/Permissive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationProfile {
    /// 标准日期门: Strict=拒绝子标准未完成的登记, Permissive=接受并强制 "No aplica"
    #[serde(default = "default_standards_gate")]
    pub standards_gate: GateMode,

    /// 发布日期门: Strict=拒绝 "Disponer datos temáticos"≠Si 的登记, Permissive=自动置 Si
    #[serde(default = "default_publication_gate")]
    pub publication_gate: GateMode,

    /// 结项门: Strict=全量前置条件 (六标志 Si + 六子标准 Completo + 六阶段日期齐备且 ≤ 结项日期),
    /// Permissive=最小口径 (仅要求已发布)
    #[serde(default = "default_closing_gate")]
    pub closing_gate: GateMode,

    /// 分析期限偏移 (工作日): Fecha de entrega de información + N
    #[serde(default = "default_analysis_offset")]
    pub analysis_offset_days: i64,

    /// 排期期限偏移 (工作日): Plazo de análisis + N
    #[serde(default = "default_schedule_offset")]
    pub schedule_offset_days: i64,

    /// 结项通知期限偏移 (工作日): Publicación + N
    #[serde(default = "default_closing_offset")]
    pub closing_offset_days: i64,

    /// "即将到期" 窗口 (工作日, 含当天)
    #[serde(default = "default_due_soon_window")]
    pub due_soon_window_days: i64,
}

fn default_standards_gate() -> GateMode {
    GateMode::Permissive
}

fn default_publication_gate() -> GateMode {
    GateMode::Permissive
}

fn default_closing_gate() -> GateMode {
    GateMode::Strict
}

fn default_analysis_offset() -> i64 {
    5
}

fn default_schedule_offset() -> i64 {
    3
}

fn default_closing_offset() -> i64 {
    7
}

fn default_due_soon_window() -> i64 {
    5
}

impl Default for ValidationProfile {
    fn default() -> Self {
        ValidationProfile {
            standards_gate: default_standards_gate(),
            publication_gate: default_publication_gate(),
            closing_gate: default_closing_gate(),
            analysis_offset_days: default_analysis_offset(),
            schedule_offset_days: default_schedule_offset(),
            closing_offset_days: default_closing_offset(),
            due_soon_window_days: default_due_soon_window(),
        }
    }
}

impl ValidationProfile {
    /// 参数合法性检查: 偏移与窗口必须为正
    pub fn validate(&self) -> Result<(), String> {
        if self.analysis_offset_days <= 0 {
            return Err(format!(
                "analysis_offset_days 必须为正: {}",
                self.analysis_offset_days
            ));
        }
        if self.schedule_offset_days <= 0 {
            return Err(format!(
                "schedule_offset_days 必须为正: {}",
                self.schedule_offset_days
            ));
        }
        if self.closing_offset_days <= 0 {
            return Err(format!(
                "closing_offset_days 必须为正: {}",
                self.closing_offset_days
            ));
        }
        if self.due_soon_window_days < 0 {
            return Err(format!(
                "due_soon_window_days 不能为负: {}",
                self.due_soon_window_days
            ));
        }
        Ok(())
    }
}
