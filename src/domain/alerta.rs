// ==========================================
// 数据发布里程碑跟踪 - 告警领域模型
// ==========================================
// 一条告警 = 某记录的某里程碑处于风险/延迟状态
// ==========================================

use crate::domain::types::{AlertState, Milestone};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Alerta - 告警条目
// ==========================================
// lag_days 口径 (与源系统保持一致, 不统一单位):
//   Overdue       -> 自然日, 正数
//   DueSoon       -> 剩余工作日取负
//   CompletedLate -> 工作日, 正数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alerta {
    // ===== 记录标识 =====
    pub code: String,               // Cod
    pub entity: Option<String>,     // Entidad
    pub info_level: Option<String>, // Nivel Información
    pub officer: Option<String>,    // Funcionario

    // ===== 告警内容 =====
    pub milestone: Milestone,              // Hito
    pub state: AlertState,                 // Estado
    pub scheduled_date: Option<NaiveDate>, // Fecha programada
    pub actual_date: Option<NaiveDate>,    // Fecha real
    pub lag_days: i64,                     // Días Rezago
    pub description: String,               // 用户可读描述 (按当前 locale)
}

impl Alerta {
    /// 排序键: 状态优先级升序, 同级内 lag 降序
    pub fn sort_key(&self) -> (u8, i64) {
        (self.state.priority(), -self.lag_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alerta(state: AlertState, lag: i64) -> Alerta {
        Alerta {
            code: "R-1".to_string(),
            entity: None,
            info_level: None,
            officer: None,
            milestone: Milestone::Publication,
            state,
            scheduled_date: None,
            actual_date: None,
            lag_days: lag,
            description: String::new(),
        }
    }

    #[test]
    fn test_sort_key_state_priority_first() {
        let vencido = alerta(AlertState::Overdue, 1);
        let proximo = alerta(AlertState::DueSoon, -5);
        let retraso = alerta(AlertState::CompletedLate, 30);
        assert!(vencido.sort_key() < proximo.sort_key(), "Vencido 必须排在最前");
        assert!(proximo.sort_key() < retraso.sort_key(), "Próximo 排在 retraso 之前");
    }

    #[test]
    fn test_sort_key_lag_descending_within_state() {
        let a = alerta(AlertState::Overdue, 10);
        let b = alerta(AlertState::Overdue, 3);
        assert!(a.sort_key() < b.sort_key(), "同级内 lag 大者在前");
    }
}
