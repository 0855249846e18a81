// ==========================================
// 数据发布里程碑跟踪 - 字段映射器
// ==========================================
// 职责: 边界行 (RawRegistro, 原表格列名) ⇔ 领域记录 (Registro)
// 口径: 日期一律 DD/MM/YYYY 字符串; 空串/NaN 占位 = 缺失;
//       批量导入宽容 (解析失败按缺失处理并记录 debug 日志)
// ==========================================

use crate::domain::registro::{RawRegistro, Registro};
use crate::domain::types::{DataKind, RecordStatus, SiNoFlag, StandardStatus};
use anyhow::Context;
use chrono::NaiveDate;
use std::path::Path;

/// 表格单元格的规范日期写法
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// 电子表格导出常见的缺失占位
pub fn is_blank(value: &str) -> bool {
    let t = value.trim();
    t.is_empty() || matches!(t.to_lowercase().as_str(), "nan" | "none" | "nat" | "-")
}

/// 非空单元格的日期解析 (DD/MM/YYYY, 兼容 ISO 写法)
///
/// # 返回
/// - None: 无法按任何已知格式解析
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let t = value.trim();
    NaiveDate::parse_from_str(t, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(t, "%Y-%m-%d"))
        .ok()
}

/// 批量口径: 空白与解析失败一律按缺失处理
pub fn parse_date_lenient(value: &str) -> Option<NaiveDate> {
    if is_blank(value) {
        return None;
    }
    match parse_date(value) {
        Some(d) => Some(d),
        None => {
            tracing::debug!(value, "日期解析失败, 按缺失处理");
            None
        }
    }
}

/// 编辑口径: 空白 = 清除日期; 非空但不可解析 = 错误 (携带原始取值)
pub fn parse_date_checked(value: &str) -> Result<Option<NaiveDate>, String> {
    if is_blank(value) {
        return Ok(None);
    }
    parse_date(value).map(Some).ok_or_else(|| value.trim().to_string())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_date_opt(date: Option<NaiveDate>) -> String {
    date.map(format_date).unwrap_or_default()
}

// ==========================================
// FieldMapper - 行级双向转换
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    /// 边界行 → 领域记录 (宽容转换, 不报错)
    pub fn from_raw(raw: &RawRegistro) -> Registro {
        let code = raw.code.trim().to_string();
        let mut r = Registro::new(code.clone());

        r.entity = opt_string(&raw.entity);
        r.info_level = opt_string(&raw.info_level);
        r.officer = opt_string(&raw.officer);
        r.update_frequency = opt_string(&raw.update_frequency);
        r.data_kind = parse_data_kind(&raw.data_kind, &code);

        r.agreement_signed_date = parse_date_lenient(&raw.agreement_signed_date);
        r.agreement_delivered_date = parse_date_lenient(&raw.agreement_delivered_date);
        r.agreement_flag = parse_flag(&raw.agreement_flag, "Acuerdo de compromiso", &code);

        r.info_delivery_date = parse_date_lenient(&raw.info_delivery_date);
        r.analysis_deadline = parse_date_lenient(&raw.analysis_deadline);
        r.schedule_deadline = parse_date_lenient(&raw.schedule_deadline);
        r.analysis_schedule_date = parse_date_lenient(&raw.analysis_schedule_date);
        r.analysis_info_flag = parse_flag(&raw.analysis_info_flag, "Análisis de información", &code);
        r.schedule_agreed_flag = parse_flag(&raw.schedule_agreed_flag, "Cronograma concertado", &code);

        r.std_registro = parse_std(&raw.std_registro, "Registro (completo)", &code);
        r.std_et = parse_std(&raw.std_et, "ET (completo)", &code);
        r.std_co = parse_std(&raw.std_co, "CO (completo)", &code);
        r.std_dd = parse_std(&raw.std_dd, "DD (completo)", &code);
        r.std_rec = parse_std(&raw.std_rec, "REC (completo)", &code);
        r.std_servicio = parse_std(&raw.std_servicio, "SERVICIO (completo)", &code);
        r.standards_scheduled_date = parse_date_lenient(&raw.standards_scheduled_date);
        r.standards_date = parse_date_lenient(&raw.standards_date);

        r.dispose_thematic_flag =
            parse_flag(&raw.dispose_thematic_flag, "Disponer datos temáticos", &code);
        r.publication_scheduled_date = parse_date_lenient(&raw.publication_scheduled_date);
        r.publication_date = parse_date_lenient(&raw.publication_date);

        r.closing_notice_deadline = parse_date_lenient(&raw.closing_notice_deadline);
        r.closing_notice_date = parse_date_lenient(&raw.closing_notice_date);
        r.closing_office_flag = parse_flag(&raw.closing_office_flag, "Oficio de cierre", &code);
        r.catalog_flag = parse_flag(&raw.catalog_flag, "Catálogo", &code);

        r.status = parse_status(&raw.status, &code);
        r.progress_percent = raw.progress_percent.unwrap_or(0).clamp(0, 100) as i32;
        r.observation = opt_string(&raw.observation);

        r
    }

    /// 领域记录 → 边界行 (规范写法)
    pub fn to_raw(registro: &Registro) -> RawRegistro {
        RawRegistro {
            code: registro.code.clone(),
            entity: registro.entity.clone().unwrap_or_default(),
            info_level: registro.info_level.clone().unwrap_or_default(),
            officer: registro.officer.clone().unwrap_or_default(),
            data_kind: registro
                .data_kind
                .map(|k| k.to_label().to_string())
                .unwrap_or_default(),
            update_frequency: registro.update_frequency.clone().unwrap_or_default(),
            agreement_signed_date: format_date_opt(registro.agreement_signed_date),
            agreement_delivered_date: format_date_opt(registro.agreement_delivered_date),
            agreement_flag: registro.agreement_flag.to_label().to_string(),
            info_delivery_date: format_date_opt(registro.info_delivery_date),
            analysis_deadline: format_date_opt(registro.analysis_deadline),
            schedule_deadline: format_date_opt(registro.schedule_deadline),
            analysis_schedule_date: format_date_opt(registro.analysis_schedule_date),
            analysis_info_flag: registro.analysis_info_flag.to_label().to_string(),
            schedule_agreed_flag: registro.schedule_agreed_flag.to_label().to_string(),
            std_registro: registro.std_registro.to_label().to_string(),
            std_et: registro.std_et.to_label().to_string(),
            std_co: registro.std_co.to_label().to_string(),
            std_dd: registro.std_dd.to_label().to_string(),
            std_rec: registro.std_rec.to_label().to_string(),
            std_servicio: registro.std_servicio.to_label().to_string(),
            standards_scheduled_date: format_date_opt(registro.standards_scheduled_date),
            standards_date: format_date_opt(registro.standards_date),
            dispose_thematic_flag: registro.dispose_thematic_flag.to_label().to_string(),
            publication_scheduled_date: format_date_opt(registro.publication_scheduled_date),
            publication_date: format_date_opt(registro.publication_date),
            closing_notice_deadline: format_date_opt(registro.closing_notice_deadline),
            closing_notice_date: format_date_opt(registro.closing_notice_date),
            closing_office_flag: registro.closing_office_flag.to_label().to_string(),
            catalog_flag: registro.catalog_flag.to_label().to_string(),
            status: registro.status.to_label().to_string(),
            progress_percent: Some(registro.progress_percent as i64),
            observation: registro.observation.clone().unwrap_or_default(),
        }
    }
}

// ==========================================
// JSON 行文件读写
// ==========================================

/// 读取 JSON 行文件 (对象数组, 键为原表格列名)
pub fn load_registros(path: &Path) -> anyhow::Result<Vec<Registro>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("读取记录文件失败: {}", path.display()))?;
    let rows: Vec<RawRegistro> = serde_json::from_str(&content)
        .with_context(|| format!("解析记录文件失败: {}", path.display()))?;
    let registros: Vec<Registro> = rows.iter().map(FieldMapper::from_raw).collect();
    tracing::info!(path = %path.display(), total = registros.len(), "记录加载完成");
    Ok(registros)
}

/// 写出 JSON 行文件 (规范写法)
pub fn dump_registros(path: &Path, registros: &[Registro]) -> anyhow::Result<()> {
    let rows: Vec<RawRegistro> = registros.iter().map(FieldMapper::to_raw).collect();
    let content = serde_json::to_string_pretty(&rows).context("序列化记录失败")?;
    std::fs::write(path, content)
        .with_context(|| format!("写出记录文件失败: {}", path.display()))?;
    tracing::info!(path = %path.display(), total = registros.len(), "记录写出完成");
    Ok(())
}

// ==========================================
// 私有工具
// ==========================================

fn opt_string(value: &str) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        Some(value.trim().to_string())
    }
}

fn parse_flag(value: &str, field: &'static str, code: &str) -> SiNoFlag {
    match SiNoFlag::parse(value) {
        Some(f) => f,
        None => {
            tracing::debug!(code, field, value, "无法识别的标志取值, 按未填写处理");
            SiNoFlag::Empty
        }
    }
}

fn parse_std(value: &str, field: &'static str, code: &str) -> StandardStatus {
    match StandardStatus::parse(value) {
        Some(s) => s,
        None => {
            tracing::debug!(code, field, value, "无法识别的子标准取值, 按未开始处理");
            StandardStatus::NotStarted
        }
    }
}

fn parse_status(value: &str, code: &str) -> RecordStatus {
    match RecordStatus::parse(value) {
        Some(s) => s,
        None => {
            tracing::debug!(code, value, "无法识别的状态取值, 按未填写处理");
            RecordStatus::Empty
        }
    }
}

fn parse_data_kind(value: &str, code: &str) -> Option<DataKind> {
    if is_blank(value) {
        return None;
    }
    match DataKind::parse(value) {
        Some(k) => Some(k),
        None => {
            tracing::debug!(code, value, "无法识别的 TipoDato 取值, 按缺失处理");
            None
        }
    }
}
