// ==========================================
// 数据发布里程碑跟踪 - 告警分类引擎
// ==========================================
// 职责: 按五个里程碑逐条评估记录, 生成告警清单
// 输入: 记录快照 + 评估日 (today)
// 输出: Vec<Alerta> (按严重度降序, 同级按滞后降序)
// 口径: 逾期滞后 = 自然日; 临期剩余 = 工作日 (负数表示);
//       迟完成滞后 = 工作日
// ==========================================

use crate::config::ValidationProfile;
use crate::domain::alerta::Alerta;
use crate::domain::registro::Registro;
use crate::domain::types::{AlertState, Milestone, MilestoneState, RecordDateStatus};
use crate::engine::business_calendar::BusinessCalendar;
use crate::i18n;
use chrono::NaiveDate;

// ==========================================
// AlertClassifier - 告警分类器
// ==========================================
pub struct AlertClassifier {
    calendar: BusinessCalendar,
    due_soon_window_days: i64,
}

impl AlertClassifier {
    pub fn new(profile: &ValidationProfile, calendar: BusinessCalendar) -> Self {
        AlertClassifier {
            calendar,
            due_soon_window_days: profile.due_soon_window_days,
        }
    }

    // ==========================================
    // 状态机
    // ==========================================

    /// 单个里程碑的状态判定
    ///
    /// # 规则
    /// - 无计划无实际 → NoDeadline
    /// - 无计划有实际 → Completed (无基准, 不算迟)
    /// - 有计划有实际 → 实际 > 计划 即 CompletedLate (滞后按工作日计, 可为 0), 否则 Completed
    /// - 有计划无实际 → Overdue / DueSoon / OnTrack (窗口含当天)
    pub fn milestone_state(
        &self,
        scheduled: Option<NaiveDate>,
        actual: Option<NaiveDate>,
        today: NaiveDate,
    ) -> MilestoneState {
        match (scheduled, actual) {
            (None, None) => MilestoneState::NoDeadline,
            (None, Some(_)) => MilestoneState::Completed,
            (Some(s), Some(a)) => {
                // 迟完成按日期比较判定; 工作日仅用于滞后量度
                if a > s {
                    MilestoneState::CompletedLate
                } else {
                    MilestoneState::Completed
                }
            }
            (Some(s), None) => {
                if self.calendar.is_overdue(s, today) {
                    MilestoneState::Overdue
                } else if self
                    .calendar
                    .is_due_soon(s, today, self.due_soon_window_days)
                {
                    MilestoneState::DueSoon
                } else {
                    MilestoneState::OnTrack
                }
            }
        }
    }

    /// 五个里程碑的 (计划日期, 实际日期) 绑定
    ///
    /// 信息交付的计划基准 = 协议承诺的交付日期
    fn milestone_bindings(
        registro: &Registro,
    ) -> [(Milestone, Option<NaiveDate>, Option<NaiveDate>); 5] {
        [
            (
                Milestone::InfoDelivery,
                registro.agreement_delivered_date,
                registro.info_delivery_date,
            ),
            (
                Milestone::AnalysisSchedule,
                registro.schedule_deadline,
                registro.analysis_schedule_date,
            ),
            (
                Milestone::Standards,
                registro.standards_scheduled_date,
                registro.standards_date,
            ),
            (
                Milestone::Publication,
                registro.publication_scheduled_date,
                registro.publication_date,
            ),
            (
                Milestone::Closing,
                registro.closing_notice_deadline,
                registro.closing_notice_date,
            ),
        ]
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 单条记录的告警清单 (未排序)
    pub fn classify(&self, registro: &Registro, today: NaiveDate) -> Vec<Alerta> {
        let mut alerts = Vec::new();

        // === 步骤 1: 五个里程碑逐一评估 ===
        for (milestone, scheduled, actual) in Self::milestone_bindings(registro) {
            if let Some(alerta) = self.alert_for_milestone(registro, milestone, scheduled, actual, today)
            {
                alerts.push(alerta);
            }
        }

        // === 步骤 2: 协议承诺复合告警 ===
        // 承诺交付日已过且信息仍未交付 → 额外追加一条协议级告警
        // (与步骤 1 的信息交付逾期告警并存, 不互斥)
        if let Some(delivered) = registro.agreement_delivered_date {
            if registro.info_delivery_date.is_none() && self.calendar.is_overdue(delivered, today) {
                let lag = BusinessCalendar::lag_calendar_days(delivered, today);
                alerts.push(self.make_alert(
                    registro,
                    Milestone::Agreement,
                    AlertState::Overdue,
                    Some(delivered),
                    None,
                    lag,
                    i18n::t("alerts.agreement_pending"),
                ));
            }
        }

        alerts
    }

    /// 全量记录的告警清单, 按 (严重度, 滞后降序) 排序
    pub fn classify_all(&self, registros: &[Registro], today: NaiveDate) -> Vec<Alerta> {
        let mut alerts: Vec<Alerta> = registros
            .iter()
            .flat_map(|r| self.classify(r, today))
            .collect();
        alerts.sort_by_key(|a| a.sort_key());

        tracing::debug!(
            total = alerts.len(),
            vencidos = alerts.iter().filter(|a| a.state == AlertState::Overdue).count(),
            proximos = alerts.iter().filter(|a| a.state == AlertState::DueSoon).count(),
            "告警分类完成"
        );
        alerts
    }

    /// 记录级日期状态投影 (跟踪表行着色口径)
    ///
    /// 取全部里程碑中最差的未完成状态:
    /// 任一逾期 → Vencido; 否则任一临期 → Proximo; 否则 Normal
    pub fn record_date_status(&self, registro: &Registro, today: NaiveDate) -> RecordDateStatus {
        let mut status = RecordDateStatus::Normal;
        for (_, scheduled, actual) in Self::milestone_bindings(registro) {
            match self.milestone_state(scheduled, actual, today) {
                MilestoneState::Overdue => return RecordDateStatus::Vencido,
                MilestoneState::DueSoon => status = RecordDateStatus::Proximo,
                _ => {}
            }
        }
        status
    }

    // ==========================================
    // 私有工具
    // ==========================================

    fn alert_for_milestone(
        &self,
        registro: &Registro,
        milestone: Milestone,
        scheduled: Option<NaiveDate>,
        actual: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Option<Alerta> {
        let state = self.milestone_state(scheduled, actual, today);
        let alert_state = state.alert_state()?;

        let (lag_days, description) = match alert_state {
            AlertState::Overdue => {
                let lag = BusinessCalendar::lag_calendar_days(scheduled?, today);
                (
                    lag,
                    i18n::t_with_args(
                        "alerts.overdue",
                        &[("hito", milestone.to_label()), ("dias", &lag.to_string())],
                    ),
                )
            }
            AlertState::DueSoon => {
                let remaining = self.calendar.remaining_business_days(today, scheduled?);
                (
                    -remaining,
                    i18n::t_with_args(
                        "alerts.due_soon",
                        &[("hito", milestone.to_label()), ("dias", &remaining.to_string())],
                    ),
                )
            }
            AlertState::CompletedLate => {
                let lag = self.calendar.count_business_days(scheduled?, actual?);
                (
                    lag,
                    i18n::t_with_args(
                        "alerts.completed_late",
                        &[("hito", milestone.to_label()), ("dias", &lag.to_string())],
                    ),
                )
            }
        };

        Some(self.make_alert(registro, milestone, alert_state, scheduled, actual, lag_days, description))
    }

    #[allow(clippy::too_many_arguments)]
    fn make_alert(
        &self,
        registro: &Registro,
        milestone: Milestone,
        state: AlertState,
        scheduled_date: Option<NaiveDate>,
        actual_date: Option<NaiveDate>,
        lag_days: i64,
        description: String,
    ) -> Alerta {
        Alerta {
            code: registro.code.clone(),
            entity: registro.entity.clone(),
            info_level: registro.info_level.clone(),
            officer: registro.officer.clone(),
            milestone,
            state,
            scheduled_date,
            actual_date,
            lag_days,
            description,
        }
    }
}
