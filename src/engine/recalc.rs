// ==========================================
// 数据发布里程碑跟踪 - 批量重算引擎
// ==========================================
// 职责: 全表一键校验与派生 (规则修正 → 截止日期 → 进度)
// 输入: 记录集合 (就地修改)
// 输出: RecalcResult (批次ID + 统计 + 修正清单)
// 红线: 单条记录内规则先于派生执行; 整个批次可重复执行且收敛
// ==========================================

use crate::config::ValidationProfile;
use crate::domain::registro::Registro;
use crate::engine::business_calendar::BusinessCalendar;
use crate::engine::deadline::DeadlineEngine;
use crate::engine::progress::ProgressCalculator;
use crate::engine::rules::{RuleCorrection, RuleValidator};
use crate::perf::PerfGuard;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

// ==========================================
// RecalcResult - 批量重算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecalcResult {
    pub pass_id: String,                  // 批次ID
    pub total_records: usize,             // 处理记录数
    pub corrected_records: usize,         // 发生自动修正的记录数
    pub deadlines_updated: usize,         // 截止日期变动的记录数
    pub progress_updated: usize,          // 进度变动的记录数
    pub corrections: Vec<RuleCorrection>, // 全部修正明细
    pub elapsed_ms: i64,                  // 耗时(毫秒)
}

// ==========================================
// RecalcEngine - 批量重算引擎
// ==========================================
pub struct RecalcEngine {
    rules: RuleValidator,
    deadlines: DeadlineEngine,
}

impl RecalcEngine {
    pub fn new(profile: &ValidationProfile, calendar: BusinessCalendar) -> Self {
        RecalcEngine {
            rules: RuleValidator::new(profile),
            deadlines: DeadlineEngine::new(profile, calendar),
        }
    }

    /// 单条记录的校验与派生 (规则 → 截止日期 → 进度)
    ///
    /// # 返回
    /// - (修正清单, 截止日期是否变动, 进度是否变动)
    pub fn process_record(&self, registro: &mut Registro) -> (Vec<RuleCorrection>, bool, bool) {
        // === 步骤 1: 业务规则自动修正 ===
        let corrections = self.rules.normalize(registro);

        // === 步骤 2: 派生截止日期刷新 ===
        let deadline_changed = self.deadlines.refresh(registro);

        // === 步骤 3: 进度百分比重算 ===
        let progress_changed = ProgressCalculator::apply(registro);

        (corrections, deadline_changed, progress_changed)
    }

    /// 全表批量校验与派生
    #[instrument(skip(self, registros), fields(total = registros.len()))]
    pub fn run(&self, registros: &mut [Registro]) -> RecalcResult {
        let guard = PerfGuard::with_items("recalc_pass", registros.len());
        let pass_id = Uuid::new_v4().to_string();

        let mut corrections = Vec::new();
        let mut corrected_records = 0usize;
        let mut deadlines_updated = 0usize;
        let mut progress_updated = 0usize;

        for registro in registros.iter_mut() {
            let (record_corrections, deadline_changed, progress_changed) =
                self.process_record(registro);
            if !record_corrections.is_empty() {
                corrected_records += 1;
                corrections.extend(record_corrections);
            }
            if deadline_changed {
                deadlines_updated += 1;
            }
            if progress_changed {
                progress_updated += 1;
            }
        }

        let elapsed_ms = guard.elapsed_ms();
        tracing::info!(
            pass_id = %pass_id,
            total = registros.len(),
            corrected = corrected_records,
            corrections = corrections.len(),
            deadlines_updated,
            progress_updated,
            "批量校验与派生完成"
        );

        RecalcResult {
            pass_id,
            total_records: registros.len(),
            corrected_records,
            deadlines_updated,
            progress_updated,
            corrections,
            elapsed_ms,
        }
    }
}
