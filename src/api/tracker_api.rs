// ==========================================
// 数据发布里程碑跟踪 - 对外接口门面
// ==========================================
// 职责: 批量校验派生 / 单字段编辑 / 告警计算 / 工作日计数
// 红线: 编辑口径对门违规先拒绝后写入, 调用方保留原记录;
//       批量口径不拒绝, 自动修正并输出 reason
// ==========================================

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::config::ValidationProfile;
use crate::domain::alerta::Alerta;
use crate::domain::registro::Registro;
use crate::domain::types::{
    DataKind, MilestoneState, RecordDateStatus, RecordStatus, SiNoFlag, StandardStatus,
};
use crate::engine::alerts::AlertClassifier;
use crate::engine::business_calendar::BusinessCalendar;
use crate::engine::recalc::{RecalcEngine, RecalcResult};
use crate::engine::rules::RuleValidator;
use crate::i18n;
use crate::importer::field_mapper;
use chrono::NaiveDate;

// ==========================================
// TrackerApi - 跟踪表核心门面
// ==========================================

/// 跟踪表核心对外接口
///
/// 职责:
/// 1. 批量校验与派生 (validate_and_derive_all)
/// 2. 单字段交互编辑 (validate_field)
/// 3. 告警计算与记录级日期状态
/// 4. 工作日计数
pub struct TrackerApi {
    calendar: BusinessCalendar,
    rules: RuleValidator,
    recalc: RecalcEngine,
    alerts: AlertClassifier,
}

impl TrackerApi {
    /// 按配置档构造 (仅排除周末的默认日历)
    pub fn new(profile: ValidationProfile) -> ApiResult<Self> {
        Self::with_calendar(profile, BusinessCalendar::new())
    }

    /// 按配置档 + 注入日历构造
    pub fn with_calendar(profile: ValidationProfile, calendar: BusinessCalendar) -> ApiResult<Self> {
        profile.validate().map_err(ApiError::InvalidInput)?;
        Ok(TrackerApi {
            rules: RuleValidator::new(&profile),
            recalc: RecalcEngine::new(&profile, calendar.clone()),
            alerts: AlertClassifier::new(&profile, calendar.clone()),
            calendar,
        })
    }

    // ==========================================
    // 批量口径
    // ==========================================

    /// 全表批量校验与派生 (幂等)
    pub fn validate_and_derive_all(&self, registros: &mut [Registro]) -> RecalcResult {
        self.recalc.run(registros)
    }

    // ==========================================
    // 编辑口径
    // ==========================================

    /// 单字段交互编辑
    ///
    /// # 规则
    /// - 列名按原表格表头识别 (接受尾随空格与重音变体)
    /// - 门违规在写入前拒绝, 返回结构化违规清单
    /// - 接受后对该记录重跑 规则 → 截止日期 → 进度
    ///
    /// # 返回
    /// - Ok(Registro): 编辑并重新派生后的记录 (原记录不被修改)
    /// - Err(ApiError): 未知列 / 不可解析取值 / 门拒绝
    pub fn validate_field(
        &self,
        registro: &Registro,
        column: &str,
        value: &str,
    ) -> ApiResult<Registro> {
        let col = column.trim();
        let mut updated = registro.clone();

        // === 步骤 1: 按列分派 (解析 + 门前置检查) ===
        match col {
            // --- 标识与透传文本列 ---
            "Cod" => {
                let code = value.trim();
                if code.is_empty() {
                    return Err(ApiError::InvalidInput("编号 (Cod) 不能为空".to_string()));
                }
                updated.code = code.to_string();
            }
            "Entidad" => updated.entity = opt_text(value),
            "Nivel Información" => updated.info_level = opt_text(value),
            "Funcionario" => updated.officer = opt_text(value),
            "Frecuencia actualizacion" | "Frecuencia actualización" => {
                updated.update_frequency = opt_text(value)
            }
            "Observación" => updated.observation = opt_text(value),
            "TipoDato" => {
                updated.data_kind = if field_mapper::is_blank(value) {
                    None
                } else {
                    Some(self.parse_kind_field(col, value)?)
                }
            }

            // --- 无门限的日期列 ---
            "Suscripción acuerdo de compromiso" => {
                updated.agreement_signed_date = self.parse_date_field(col, value)?
            }
            "Entrega acuerdo de compromiso" => {
                updated.agreement_delivered_date = self.parse_date_field(col, value)?
            }
            "Fecha de entrega de información" => {
                updated.info_delivery_date = self.parse_date_field(col, value)?
            }
            "Análisis y cronograma" => {
                updated.analysis_schedule_date = self.parse_date_field(col, value)?
            }
            "Estándares (fecha programada)" => {
                updated.standards_scheduled_date = self.parse_date_field(col, value)?
            }
            "Fecha de publicación programada" => {
                updated.publication_scheduled_date = self.parse_date_field(col, value)?
            }

            // --- 门控日期列 ---
            "Estándares" => {
                let date = self.parse_date_field(col, value)?;
                if date.is_some() {
                    self.check_standards_gate(&updated)?;
                }
                updated.standards_date = date;
            }
            "Publicación" => {
                let date = self.parse_date_field(col, value)?;
                if date.is_some() {
                    self.check_publication_gate(&updated)?;
                }
                updated.publication_date = date;
            }
            "Fecha de oficio de cierre" => {
                let date = self.parse_date_field(col, value)?;
                if let Some(closing) = date {
                    self.check_closing_gate(&updated, closing)?;
                }
                updated.closing_notice_date = date;
            }

            // --- 标志列 ---
            "Acuerdo de compromiso" => updated.agreement_flag = self.parse_flag_field(col, value)?,
            "Análisis de información" => {
                updated.analysis_info_flag = self.parse_flag_field(col, value)?
            }
            "Cronograma concertado" => {
                updated.schedule_agreed_flag = self.parse_flag_field(col, value)?
            }
            "Disponer datos temáticos" => {
                updated.dispose_thematic_flag = self.parse_flag_field(col, value)?
            }
            "Oficio de cierre" => updated.closing_office_flag = self.parse_flag_field(col, value)?,
            "Catálogo" => updated.catalog_flag = self.parse_flag_field(col, value)?,

            // --- 子标准列 ---
            "Registro (completo)" => updated.std_registro = self.parse_std_field(col, value)?,
            "ET (completo)" => updated.std_et = self.parse_std_field(col, value)?,
            "CO (completo)" => updated.std_co = self.parse_std_field(col, value)?,
            "DD (completo)" => updated.std_dd = self.parse_std_field(col, value)?,
            "REC (completo)" => updated.std_rec = self.parse_std_field(col, value)?,
            "SERVICIO (completo)" => updated.std_servicio = self.parse_std_field(col, value)?,

            // --- 状态列 ---
            "Estado" => {
                let status = self.parse_status_field(col, value)?;
                self.check_status_gate(&updated, status)?;
                updated.status = status;
            }

            // --- 派生列 (不可人工编辑) ---
            "Plazo de análisis" | "Plazo de cronograma" | "Plazo de oficio de cierre"
            | "Porcentaje Avance" => {
                return Err(ApiError::InvalidInput(format!(
                    "'{}' 为派生列, 由系统计算, 不可人工编辑",
                    col
                )));
            }

            _ => {
                return Err(ApiError::UnknownField {
                    field: col.to_string(),
                });
            }
        }

        // === 步骤 2: 规则修正 + 截止日期 + 进度 重新派生 ===
        self.recalc.process_record(&mut updated);

        tracing::debug!(code = %updated.code, column = col, "字段编辑通过");
        Ok(updated)
    }

    // ==========================================
    // 查询口径
    // ==========================================

    /// 告警计算 (纯投影, 不修改记录)
    pub fn compute_alerts(&self, registros: &[Registro], today: NaiveDate) -> Vec<Alerta> {
        self.alerts.classify_all(registros, today)
    }

    /// 单个里程碑的状态判定
    pub fn milestone_state(
        &self,
        scheduled: Option<NaiveDate>,
        actual: Option<NaiveDate>,
        today: NaiveDate,
    ) -> MilestoneState {
        self.alerts.milestone_state(scheduled, actual, today)
    }

    /// 记录级日期状态 (行着色口径)
    pub fn date_status(&self, registro: &Registro, today: NaiveDate) -> RecordDateStatus {
        self.alerts.record_date_status(registro, today)
    }

    /// 工作日计数 ("N días hábiles" 展示口径)
    pub fn count_business_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        self.calendar.count_business_days(start, end)
    }

    // ==========================================
    // 私有工具: 取值解析
    // ==========================================

    fn parse_date_field(&self, column: &str, value: &str) -> ApiResult<Option<NaiveDate>> {
        field_mapper::parse_date_checked(value).map_err(|bad| ApiError::UnparseableValue {
            field: column.to_string(),
            value: bad,
        })
    }

    fn parse_flag_field(&self, column: &str, value: &str) -> ApiResult<SiNoFlag> {
        SiNoFlag::parse(value).ok_or_else(|| ApiError::UnparseableValue {
            field: column.to_string(),
            value: value.trim().to_string(),
        })
    }

    fn parse_std_field(&self, column: &str, value: &str) -> ApiResult<StandardStatus> {
        StandardStatus::parse(value).ok_or_else(|| ApiError::UnparseableValue {
            field: column.to_string(),
            value: value.trim().to_string(),
        })
    }

    fn parse_status_field(&self, column: &str, value: &str) -> ApiResult<RecordStatus> {
        RecordStatus::parse(value).ok_or_else(|| ApiError::UnparseableValue {
            field: column.to_string(),
            value: value.trim().to_string(),
        })
    }

    fn parse_kind_field(&self, column: &str, value: &str) -> ApiResult<DataKind> {
        DataKind::parse(value).ok_or_else(|| ApiError::UnparseableValue {
            field: column.to_string(),
            value: value.trim().to_string(),
        })
    }

    // ==========================================
    // 私有工具: 门前置检查
    // ==========================================

    fn check_standards_gate(&self, registro: &Registro) -> ApiResult<()> {
        let blockers = self.rules.standards_edit_blockers(registro);
        if blockers.is_empty() {
            return Ok(());
        }
        let campos = blockers
            .iter()
            .map(|s| s.short_label())
            .collect::<Vec<_>>()
            .join(", ");
        let violations = blockers
            .iter()
            .map(|s| ValidationViolation {
                violation_type: "STANDARDS_GATE".to_string(),
                code: registro.code.clone(),
                field: s.column_label().to_string(),
                reason: format!("{} ≠ 'Completo'", s.short_label()),
                details: None,
            })
            .collect();
        Err(ApiError::ValidationRejected {
            reason: i18n::t_with_args("rules.standards_incomplete", &[("campos", &campos)]),
            violations,
        })
    }

    fn check_publication_gate(&self, registro: &Registro) -> ApiResult<()> {
        if !self.rules.publication_edit_blocked(registro) {
            return Ok(());
        }
        Err(ApiError::ValidationRejected {
            reason: i18n::t("rules.publication_requires_dispose"),
            violations: vec![ValidationViolation {
                violation_type: "PUBLICATION_GATE".to_string(),
                code: registro.code.clone(),
                field: "Disponer datos temáticos".to_string(),
                reason: format!(
                    "Disponer datos temáticos = '{}'",
                    registro.dispose_thematic_flag.to_label()
                ),
                details: None,
            }],
        })
    }

    fn check_closing_gate(&self, registro: &Registro, closing: NaiveDate) -> ApiResult<()> {
        let failures = self.rules.closing_precondition_failures(registro, closing);
        if failures.is_empty() {
            return Ok(());
        }
        let campos = failures.join(", ");
        let violations = failures
            .iter()
            .map(|f| ValidationViolation {
                violation_type: "CLOSING_GATE".to_string(),
                code: registro.code.clone(),
                field: "Fecha de oficio de cierre".to_string(),
                reason: f.clone(),
                details: None,
            })
            .collect();
        Err(ApiError::ValidationRejected {
            reason: i18n::t_with_args("rules.closing_preconditions", &[("campos", &campos)]),
            violations,
        })
    }

    fn check_status_gate(&self, registro: &Registro, status: RecordStatus) -> ApiResult<()> {
        if status == RecordStatus::Completed && self.rules.completado_edit_blocked(registro) {
            return Err(ApiError::ValidationRejected {
                reason: i18n::t("rules.completado_requires_closing"),
                violations: vec![ValidationViolation {
                    violation_type: "STATUS_GATE".to_string(),
                    code: registro.code.clone(),
                    field: "Estado".to_string(),
                    reason: "Fecha de oficio de cierre (sin fecha)".to_string(),
                    details: None,
                }],
            });
        }
        Ok(())
    }
}

fn opt_text(value: &str) -> Option<String> {
    let t = value.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}
