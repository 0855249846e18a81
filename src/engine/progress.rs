// ==========================================
// 数据发布里程碑跟踪 - 完成度计算
// ==========================================
// 职责: 计算 Porcentaje Avance (0-100)
// 红线: 结项通知日期存在 → 无条件 100, 不看其余阶段
// ==========================================

use crate::domain::registro::Registro;

// ==========================================
// ProgressCalculator - 完成度纯函数
// ==========================================
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// 计算完成度
    ///
    /// # 规则
    /// 1. Fecha de oficio de cierre 存在 → 100 (硬规则)
    /// 2. 否则四个阶段各占 25 分:
    ///    - 协议: Acuerdo de compromiso = Si
    ///    - 分析与排期: Análisis y cronograma 日期存在
    ///    - 标准: Estándares 日期存在
    ///    - 发布: Publicación 日期存在
    pub fn compute(registro: &Registro) -> i32 {
        if registro.closing_notice_date.is_some() {
            return 100;
        }

        let mut score = 0;
        if registro.agreement_flag.is_si() {
            score += 25;
        }
        if registro.analysis_schedule_date.is_some() {
            score += 25;
        }
        if registro.standards_date.is_some() {
            score += 25;
        }
        if registro.publication_date.is_some() {
            score += 25;
        }
        score
    }

    /// 写回派生列
    ///
    /// # 返回
    /// - bool: 值是否发生变化
    pub fn apply(registro: &mut Registro) -> bool {
        let value = Self::compute(registro);
        if registro.progress_percent != value {
            registro.progress_percent = value;
            true
        } else {
            false
        }
    }
}
