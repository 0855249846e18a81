// ==========================================
// 数据发布里程碑跟踪 - 业务规则校验引擎
// ==========================================
// 职责: 维护九条跟踪表业务规则的不变量
//   批量口径: 按固定顺序自动修正 (normalize)
//   编辑口径: 提供门前置检查原语, 由 API 层决定拒绝或放行
// 红线: 规则顺序固定, 每条规则只观察前序规则落定后的状态;
//       全过程幂等, 第二次执行不得产生新修正
// ==========================================

use crate::config::ValidationProfile;
use crate::domain::registro::{Registro, SubStandard};
use crate::domain::types::{GateMode, RecordStatus, SiNoFlag};
use crate::i18n;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// RuleCorrection - 批量修正记录
// ==========================================
// 一条修正 = normalize 过程中对某记录某列的一次自动改写
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleCorrection {
    pub correction_type: String, // 修正类型 (SCREAMING_SNAKE 代码)
    pub code: String,            // 记录编号 (Cod)
    pub field: String,           // 被改写的列名
    pub reason: String,          // 用户可读原因 (按当前 locale)
    pub details: Option<serde_json::Value>, // 结构化明细 (可解释性)
}

// ==========================================
// RuleValidator - 规则校验器
// ==========================================
pub struct RuleValidator {
    standards_gate: GateMode,
    publication_gate: GateMode,
    closing_gate: GateMode,
}

impl RuleValidator {
    pub fn new(profile: &ValidationProfile) -> Self {
        RuleValidator {
            standards_gate: profile.standards_gate,
            publication_gate: profile.publication_gate,
            closing_gate: profile.closing_gate,
        }
    }

    // ==========================================
    // 批量口径: normalize
    // ==========================================

    /// 按固定顺序执行全部规则, 就地修正记录
    ///
    /// # 规则顺序
    /// 1. 协议交付日期 ⇔ Acuerdo de compromiso
    /// 2. 分析完成日期 ⇔ Análisis de información
    /// 3. 标准门: Estándares 日期存在时子标准必须全部落定
    /// 4. 发布门: Disponer datos temáticos 与 Publicación 的联动
    /// 5. 结项门: 前置条件破坏时自动清除 Fecha de oficio de cierre
    /// 6. 状态迁移: Completado 的进入与退出
    ///
    /// # 返回
    /// - Vec<RuleCorrection>: 本次执行的全部修正 (空 = 记录本已合规)
    pub fn normalize(&self, registro: &mut Registro) -> Vec<RuleCorrection> {
        let mut corrections = Vec::new();
        let code = registro.code.clone();

        // === 规则 1: 协议交付日期 ⇔ 协议标志 ===
        self.sync_flag_with_date(
            registro.agreement_delivered_date,
            &mut registro.agreement_flag,
            "Acuerdo de compromiso",
            &code,
            &mut corrections,
        );

        // === 规则 2: 分析完成日期 ⇔ 分析标志 ===
        self.sync_flag_with_date(
            registro.analysis_schedule_date,
            &mut registro.analysis_info_flag,
            "Análisis de información",
            &code,
            &mut corrections,
        );

        // === 规则 3: 标准门 ===
        if registro.standards_date.is_some() {
            match self.standards_gate {
                GateMode::Permissive => {
                    // 未落定的子标准强制为 "No aplica"
                    for sub in registro.unresolved_sub_standards() {
                        registro.set_sub_standard(
                            sub,
                            crate::domain::types::StandardStatus::NotApplicable,
                        );
                        corrections.push(RuleCorrection {
                            correction_type: "SUB_STANDARD_FORCED".to_string(),
                            code: registro.code.clone(),
                            field: sub.column_label().to_string(),
                            reason: i18n::t_with_args(
                                "corrections.sub_standard_forced",
                                &[("campo", sub.short_label())],
                            ),
                            details: None,
                        });
                    }
                }
                GateMode::Strict => {
                    // 未落定的子标准存在 → 清除标准日期
                    let unresolved = registro.unresolved_sub_standards();
                    if !unresolved.is_empty() {
                        let campos = join_short_labels(&unresolved);
                        let cleared = registro.standards_date.take();
                        corrections.push(RuleCorrection {
                            correction_type: "STANDARDS_DATE_CLEARED".to_string(),
                            code: registro.code.clone(),
                            field: "Estándares".to_string(),
                            reason: i18n::t_with_args(
                                "corrections.standards_date_cleared",
                                &[("campos", &campos)],
                            ),
                            details: Some(serde_json::json!({
                                "fecha_eliminada": cleared,
                                "subestandares": campos,
                            })),
                        });
                    }
                }
            }
        }

        // === 规则 4: 发布门 ===
        if registro.dispose_thematic_flag.is_no() && registro.publication_date.is_some() {
            // 明确的 "No" 优先: 清除发布日期
            let cleared = registro.publication_date.take();
            corrections.push(RuleCorrection {
                correction_type: "PUBLICATION_CLEARED".to_string(),
                code: registro.code.clone(),
                field: "Publicación".to_string(),
                reason: i18n::t("corrections.publication_cleared"),
                details: Some(serde_json::json!({ "fecha_eliminada": cleared })),
            });
        } else if registro.publication_date.is_some() && !registro.dispose_thematic_flag.is_si() {
            match self.publication_gate {
                GateMode::Permissive => {
                    registro.dispose_thematic_flag = SiNoFlag::Si;
                    corrections.push(RuleCorrection {
                        correction_type: "DISPOSE_FORCED".to_string(),
                        code: registro.code.clone(),
                        field: "Disponer datos temáticos".to_string(),
                        reason: i18n::t("corrections.dispose_forced"),
                        details: None,
                    });
                }
                GateMode::Strict => {
                    let cleared = registro.publication_date.take();
                    corrections.push(RuleCorrection {
                        correction_type: "PUBLICATION_CLEARED".to_string(),
                        code: registro.code.clone(),
                        field: "Publicación".to_string(),
                        reason: i18n::t("rules.publication_requires_dispose"),
                        details: Some(serde_json::json!({ "fecha_eliminada": cleared })),
                    });
                }
            }
        }

        // === 规则 5: 结项门 (前置条件破坏 → 自动清除) ===
        if let Some(closing) = registro.closing_notice_date {
            let failures = self.closing_precondition_failures(registro, closing);
            if !failures.is_empty() {
                let campos = failures.join(", ");
                registro.closing_notice_date = None;
                corrections.push(RuleCorrection {
                    correction_type: "CLOSING_CLEARED".to_string(),
                    code: registro.code.clone(),
                    field: "Fecha de oficio de cierre".to_string(),
                    reason: i18n::t_with_args("corrections.closing_cleared", &[("campos", &campos)]),
                    details: Some(serde_json::json!({
                        "fecha_eliminada": closing,
                        "condiciones": failures,
                    })),
                });
            }
        }

        // === 规则 6: 状态迁移 ===
        if registro.closing_notice_date.is_some() {
            // 结项通知已登记 → Completado (Finalizado 属于更后阶段, 透传)
            if matches!(
                registro.status,
                RecordStatus::Empty | RecordStatus::InProgress | RecordStatus::InProgressClosing
            ) {
                let previous = registro.status;
                registro.status = RecordStatus::Completed;
                corrections.push(RuleCorrection {
                    correction_type: "STATUS_COMPLETED".to_string(),
                    code: registro.code.clone(),
                    field: "Estado".to_string(),
                    reason: i18n::t("corrections.status_completed"),
                    details: Some(serde_json::json!({ "estado_anterior": previous.to_label() })),
                });
            }
        } else if registro.status == RecordStatus::Completed {
            // 结项通知缺失 → Completado 不可保留
            registro.status = RecordStatus::InProgress;
            corrections.push(RuleCorrection {
                correction_type: "STATUS_DOWNGRADED".to_string(),
                code: registro.code.clone(),
                field: "Estado".to_string(),
                reason: i18n::t("corrections.status_downgraded"),
                details: None,
            });
        }

        if !corrections.is_empty() {
            tracing::debug!(
                code = %registro.code,
                corrections = corrections.len(),
                "业务规则自动修正"
            );
        }
        corrections
    }

    // ==========================================
    // 编辑口径: 门前置检查原语
    // ==========================================

    /// 标准日期编辑的阻断项
    ///
    /// Strict 门要求六个子标准全部 "Completo"; Permissive 门不阻断
    /// (接受写入后由 normalize 强制 "No aplica")
    pub fn standards_edit_blockers(&self, registro: &Registro) -> Vec<SubStandard> {
        match self.standards_gate {
            GateMode::Strict => registro.incomplete_sub_standards(),
            GateMode::Permissive => Vec::new(),
        }
    }

    /// 发布日期编辑是否被阻断
    ///
    /// 明确的 Disponer = 'No' 在任何门下都拒绝 (写入会被 normalize 立即撤销);
    /// Strict 门额外要求 Disponer = 'Si'; Permissive 门对空白放行
    /// (接受写入后由 normalize 自动置 Si)
    pub fn publication_edit_blocked(&self, registro: &Registro) -> bool {
        if registro.dispose_thematic_flag.is_no() {
            return true;
        }
        self.publication_gate.is_strict() && !registro.dispose_thematic_flag.is_si()
    }

    /// 结项日期的前置条件缺口 (批量与编辑共用)
    ///
    /// # 口径
    /// - Permissive (最小): 仅要求已发布
    /// - Strict (全量): 六标志 Si + 六子标准 Completo + 六阶段日期齐备且 ≤ 结项日期
    ///
    /// # 返回
    /// - Vec<String>: 缺口描述列表 (空 = 前置条件满足)
    pub fn closing_precondition_failures(
        &self,
        registro: &Registro,
        closing_date: NaiveDate,
    ) -> Vec<String> {
        let mut failures = Vec::new();

        match self.closing_gate {
            GateMode::Permissive => {
                if registro.publication_date.is_none() {
                    failures.push("Publicación".to_string());
                }
            }
            GateMode::Strict => {
                for (label, flag) in registro.all_flags() {
                    if !flag.is_si() {
                        failures.push(format!("{} ≠ 'Si'", label));
                    }
                }
                for sub in registro.incomplete_sub_standards() {
                    failures.push(format!("{} ≠ 'Completo'", sub.column_label()));
                }
                for (label, date) in registro.stage_dates() {
                    match date {
                        None => failures.push(format!("{} (sin fecha)", label)),
                        Some(d) if d > closing_date => {
                            failures.push(format!("{} (posterior al cierre)", label));
                        }
                        Some(_) => {}
                    }
                }
            }
        }
        failures
    }

    /// Estado = 'Completado' 的编辑是否被阻断 (要求结项通知日期已登记)
    pub fn completado_edit_blocked(&self, registro: &Registro) -> bool {
        registro.closing_notice_date.is_none()
    }

    // ==========================================
    // 私有工具
    // ==========================================

    /// 日期 ⇔ 标志 双向绑定:
    /// - 日期存在且标志 ≠ Si → 置 Si (日期事实优先)
    /// - 日期缺失且标志 = Si → 清空 (保留人工明确的 "No")
    fn sync_flag_with_date(
        &self,
        date: Option<NaiveDate>,
        flag: &mut SiNoFlag,
        column: &str,
        code: &str,
        corrections: &mut Vec<RuleCorrection>,
    ) {
        if date.is_some() && !flag.is_si() {
            *flag = SiNoFlag::Si;
            corrections.push(RuleCorrection {
                correction_type: "FLAG_SET".to_string(),
                code: code.to_string(),
                field: column.to_string(),
                reason: i18n::t_with_args("corrections.flag_set", &[("campo", column)]),
                details: None,
            });
        } else if date.is_none() && flag.is_si() {
            *flag = SiNoFlag::Empty;
            corrections.push(RuleCorrection {
                correction_type: "FLAG_CLEARED".to_string(),
                code: code.to_string(),
                field: column.to_string(),
                reason: i18n::t_with_args("corrections.flag_cleared", &[("campo", column)]),
                details: None,
            });
        }
    }
}

fn join_short_labels(subs: &[SubStandard]) -> String {
    subs.iter()
        .map(|s| s.short_label())
        .collect::<Vec<_>>()
        .join(", ")
}
