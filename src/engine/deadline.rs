// ==========================================
// 数据发布里程碑跟踪 - 期限派生引擎
// ==========================================
// 职责: 从锚点日期派生三个期限列 (Plazo 列)
// 红线: 只写派生列, 不触碰人工登记列; 锚点缺失时派生列必须清空
// 幂等: 重复刷新不产生新变化
// ==========================================

use crate::config::ValidationProfile;
use crate::domain::registro::Registro;
use crate::engine::business_calendar::BusinessCalendar;

// ==========================================
// DeadlineEngine - 期限派生
// ==========================================
// 派生链:
//   Fecha de entrega de información + 5 工作日 → Plazo de análisis
//   Plazo de análisis              + 3 工作日 → Plazo de cronograma
//   Publicación                    + 7 工作日 → Plazo de oficio de cierre
pub struct DeadlineEngine {
    calendar: BusinessCalendar,
    analysis_offset_days: i64,
    schedule_offset_days: i64,
    closing_offset_days: i64,
}

impl DeadlineEngine {
    pub fn new(profile: &ValidationProfile, calendar: BusinessCalendar) -> Self {
        DeadlineEngine {
            calendar,
            analysis_offset_days: profile.analysis_offset_days,
            schedule_offset_days: profile.schedule_offset_days,
            closing_offset_days: profile.closing_offset_days,
        }
    }

    /// 刷新单条记录的三个派生期限
    ///
    /// # 返回
    /// - bool: 是否有期限发生变化
    pub fn refresh(&self, registro: &mut Registro) -> bool {
        let mut changed = false;

        // === 规则 1: Plazo de análisis ===
        let analysis = registro
            .info_delivery_date
            .map(|d| self.calendar.add_business_days(d, self.analysis_offset_days));
        if registro.analysis_deadline != analysis {
            registro.analysis_deadline = analysis;
            changed = true;
        }

        // === 规则 2: Plazo de cronograma (链式依赖规则 1 的结果) ===
        let schedule = registro
            .analysis_deadline
            .map(|d| self.calendar.add_business_days(d, self.schedule_offset_days));
        if registro.schedule_deadline != schedule {
            registro.schedule_deadline = schedule;
            changed = true;
        }

        // === 规则 3: Plazo de oficio de cierre ===
        let closing = registro
            .publication_date
            .map(|d| self.calendar.add_business_days(d, self.closing_offset_days));
        if registro.closing_notice_deadline != closing {
            registro.closing_notice_deadline = closing;
            changed = true;
        }

        if changed {
            tracing::debug!(
                code = %registro.code,
                analysis = ?registro.analysis_deadline,
                schedule = ?registro.schedule_deadline,
                closing = ?registro.closing_notice_deadline,
                "派生期限已刷新"
            );
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn engine() -> DeadlineEngine {
        DeadlineEngine::new(&ValidationProfile::default(), BusinessCalendar::new())
    }

    // ==========================================
    // 测试 1: 正向派生
    // ==========================================

    #[test]
    fn test_derive_analysis_and_schedule_deadlines() {
        let mut r = Registro::new("R-1");
        r.info_delivery_date = Some(d(2025, 1, 6)); // 周一

        let changed = engine().refresh(&mut r);

        assert!(changed);
        assert_eq!(r.analysis_deadline, Some(d(2025, 1, 13))); // +5 工作日
        assert_eq!(r.schedule_deadline, Some(d(2025, 1, 16))); // 再 +3 工作日
        assert_eq!(r.closing_notice_deadline, None); // 未发布
    }

    #[test]
    fn test_derive_closing_deadline_from_publication() {
        let mut r = Registro::new("R-2");
        r.publication_date = Some(d(2025, 1, 16)); // 周四

        engine().refresh(&mut r);

        // +7 工作日: 17, 20, 21, 22, 23, 24, 27
        assert_eq!(r.closing_notice_deadline, Some(d(2025, 1, 27)));
    }

    // ==========================================
    // 测试 2: 锚点清空 → 派生列清空
    // ==========================================

    #[test]
    fn test_clearing_anchor_clears_derived() {
        let mut r = Registro::new("R-3");
        r.info_delivery_date = Some(d(2025, 1, 6));
        let eng = engine();
        eng.refresh(&mut r);
        assert!(r.analysis_deadline.is_some());

        r.info_delivery_date = None;
        let changed = eng.refresh(&mut r);

        assert!(changed);
        assert_eq!(r.analysis_deadline, None);
        assert_eq!(r.schedule_deadline, None);
    }

    // ==========================================
    // 测试 3: 幂等性
    // ==========================================

    #[test]
    fn test_refresh_is_idempotent() {
        let mut r = Registro::new("R-4");
        r.info_delivery_date = Some(d(2025, 1, 6));
        r.publication_date = Some(d(2025, 1, 16));

        let eng = engine();
        assert!(eng.refresh(&mut r)); // 第一次: 有变化
        let snapshot = r.clone();
        assert!(!eng.refresh(&mut r)); // 第二次: 无变化

        assert_eq!(r.analysis_deadline, snapshot.analysis_deadline);
        assert_eq!(r.schedule_deadline, snapshot.schedule_deadline);
        assert_eq!(r.closing_notice_deadline, snapshot.closing_notice_deadline);
    }

    // ==========================================
    // 测试 4: 自定义偏移
    // ==========================================

    #[test]
    fn test_custom_offsets_from_profile() {
        let profile = ValidationProfile {
            analysis_offset_days: 2,
            schedule_offset_days: 1,
            ..ValidationProfile::default()
        };
        let eng = DeadlineEngine::new(&profile, BusinessCalendar::new());

        let mut r = Registro::new("R-5");
        r.info_delivery_date = Some(d(2025, 1, 6)); // 周一
        eng.refresh(&mut r);

        assert_eq!(r.analysis_deadline, Some(d(2025, 1, 8))); // +2
        assert_eq!(r.schedule_deadline, Some(d(2025, 1, 9))); // +1
    }

    // ==========================================
    // 测试 5: 既有脏值被纠正
    // ==========================================

    #[test]
    fn test_stale_derived_value_overwritten() {
        let mut r = Registro::new("R-6");
        r.info_delivery_date = Some(d(2025, 1, 6));
        r.analysis_deadline = Some(d(2025, 2, 1)); // 上游改动后的脏值

        let changed = engine().refresh(&mut r);

        assert!(changed);
        assert_eq!(r.analysis_deadline, Some(d(2025, 1, 13)));
    }
}
