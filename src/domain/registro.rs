// ==========================================
// 数据发布里程碑跟踪 - 记录领域模型
// ==========================================
// 对齐: 原跟踪表格的列结构 (一行 = 一个数据集的发布流程)
// 红线: 派生列 (plazo/avance) 只由引擎写入, 上层只读
// ==========================================

use crate::domain::types::{DataKind, RecordStatus, SiNoFlag, StandardStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SubStandard - 子标准维度
// ==========================================
// 六个子标准共同构成 "Estándares" 阶段的完成口径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubStandard {
    Registro, // 登记表
    Et,       // 结构化模板 (ET)
    Co,       // 上下文件 (CO)
    Dd,       // 数据字典 (DD)
    Rec,      // 资源目录 (REC)
    Servicio, // 服务 (SERVICIO)
}

impl SubStandard {
    pub const ALL: [SubStandard; 6] = [
        SubStandard::Registro,
        SubStandard::Et,
        SubStandard::Co,
        SubStandard::Dd,
        SubStandard::Rec,
        SubStandard::Servicio,
    ];

    /// 拒绝原因里使用的短名
    pub fn short_label(&self) -> &'static str {
        match self {
            SubStandard::Registro => "Registro",
            SubStandard::Et => "ET",
            SubStandard::Co => "CO",
            SubStandard::Dd => "DD",
            SubStandard::Rec => "REC",
            SubStandard::Servicio => "SERVICIO",
        }
    }

    /// 表格列名
    pub fn column_label(&self) -> &'static str {
        match self {
            SubStandard::Registro => "Registro (completo)",
            SubStandard::Et => "ET (completo)",
            SubStandard::Co => "CO (completo)",
            SubStandard::Dd => "DD (completo)",
            SubStandard::Rec => "REC (completo)",
            SubStandard::Servicio => "SERVICIO (completo)",
        }
    }
}

// ==========================================
// Registro - 数据集发布流程记录
// ==========================================
// 用途: 边界解析后的内部规范形态, 引擎唯一操作对象
// 日期一律为 NaiveDate (序列化 ISO), DD/MM/YYYY 只存在于边界
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registro {
    // ===== 标识 =====
    pub code: String,                     // Cod (唯一标识)
    pub entity: Option<String>,           // Entidad (责任机构)
    pub info_level: Option<String>,       // Nivel Información
    pub officer: Option<String>,          // Funcionario (责任人)
    pub data_kind: Option<DataKind>,      // TipoDato (Nuevo/Actualizar)
    pub update_frequency: Option<String>, // Frecuencia actualizacion (透传)

    // ===== 协议阶段 =====
    pub agreement_signed_date: Option<NaiveDate>, // Suscripción acuerdo de compromiso
    pub agreement_delivered_date: Option<NaiveDate>, // Entrega acuerdo de compromiso
    pub agreement_flag: SiNoFlag,                 // Acuerdo de compromiso (双向绑定: 有交付日期 ⇔ Si)

    // ===== 信息交付与分析阶段 =====
    pub info_delivery_date: Option<NaiveDate>, // Fecha de entrega de información
    pub analysis_deadline: Option<NaiveDate>,  // Plazo de análisis (派生: 交付 +5 工作日)
    pub schedule_deadline: Option<NaiveDate>,  // Plazo de cronograma (派生: 分析期限 +3 工作日)
    pub analysis_schedule_date: Option<NaiveDate>, // Análisis y cronograma (实际完成)
    pub analysis_info_flag: SiNoFlag,          // Análisis de información (双向绑定)
    pub schedule_agreed_flag: SiNoFlag,        // Cronograma concertado

    // ===== 标准阶段 =====
    pub std_registro: StandardStatus, // Registro (completo)
    pub std_et: StandardStatus,       // ET (completo)
    pub std_co: StandardStatus,       // CO (completo)
    pub std_dd: StandardStatus,       // DD (completo)
    pub std_rec: StandardStatus,      // REC (completo)
    pub std_servicio: StandardStatus, // SERVICIO (completo)
    pub standards_scheduled_date: Option<NaiveDate>, // Estándares (fecha programada)
    pub standards_date: Option<NaiveDate>, // Estándares (实际完成, 受子标准门限制)

    // ===== 发布阶段 =====
    pub dispose_thematic_flag: SiNoFlag, // Disponer datos temáticos (发布前置条件)
    pub publication_scheduled_date: Option<NaiveDate>, // Fecha de publicación programada
    pub publication_date: Option<NaiveDate>, // Publicación (实际发布)

    // ===== 结项阶段 =====
    pub closing_notice_deadline: Option<NaiveDate>, // Plazo de oficio de cierre (派生: 发布 +7 工作日)
    pub closing_notice_date: Option<NaiveDate>,     // Fecha de oficio de cierre
    pub closing_office_flag: SiNoFlag,              // Oficio de cierre
    pub catalog_flag: SiNoFlag,                     // Catálogo

    // ===== 生命周期 =====
    pub status: RecordStatus,        // Estado
    pub progress_percent: i32,       // Porcentaje Avance (派生: 0-100)
    pub observation: Option<String>, // Observación
}

impl Registro {
    /// 以编号创建空记录 (其余字段为各自的"未填写"形态)
    pub fn new(code: impl Into<String>) -> Self {
        Registro {
            code: code.into(),
            entity: None,
            info_level: None,
            officer: None,
            data_kind: None,
            update_frequency: None,
            agreement_signed_date: None,
            agreement_delivered_date: None,
            agreement_flag: SiNoFlag::Empty,
            info_delivery_date: None,
            analysis_deadline: None,
            schedule_deadline: None,
            analysis_schedule_date: None,
            analysis_info_flag: SiNoFlag::Empty,
            schedule_agreed_flag: SiNoFlag::Empty,
            std_registro: StandardStatus::NotStarted,
            std_et: StandardStatus::NotStarted,
            std_co: StandardStatus::NotStarted,
            std_dd: StandardStatus::NotStarted,
            std_rec: StandardStatus::NotStarted,
            std_servicio: StandardStatus::NotStarted,
            standards_scheduled_date: None,
            standards_date: None,
            dispose_thematic_flag: SiNoFlag::Empty,
            publication_scheduled_date: None,
            publication_date: None,
            closing_notice_deadline: None,
            closing_notice_date: None,
            closing_office_flag: SiNoFlag::Empty,
            catalog_flag: SiNoFlag::Empty,
            status: RecordStatus::Empty,
            progress_percent: 0,
            observation: None,
        }
    }

    /// 读取单个子标准状态
    pub fn sub_standard(&self, s: SubStandard) -> StandardStatus {
        match s {
            SubStandard::Registro => self.std_registro,
            SubStandard::Et => self.std_et,
            SubStandard::Co => self.std_co,
            SubStandard::Dd => self.std_dd,
            SubStandard::Rec => self.std_rec,
            SubStandard::Servicio => self.std_servicio,
        }
    }

    /// 写入单个子标准状态
    pub fn set_sub_standard(&mut self, s: SubStandard, status: StandardStatus) {
        match s {
            SubStandard::Registro => self.std_registro = status,
            SubStandard::Et => self.std_et = status,
            SubStandard::Co => self.std_co = status,
            SubStandard::Dd => self.std_dd = status,
            SubStandard::Rec => self.std_rec = status,
            SubStandard::Servicio => self.std_servicio = status,
        }
    }

    /// 未达 "Completo" 的子标准 (严格门口径)
    pub fn incomplete_sub_standards(&self) -> Vec<SubStandard> {
        SubStandard::ALL
            .iter()
            .copied()
            .filter(|s| self.sub_standard(*s) != StandardStatus::Complete)
            .collect()
    }

    /// 未解决 (既非 Completo 也非 No aplica) 的子标准 (宽松门口径)
    pub fn unresolved_sub_standards(&self) -> Vec<SubStandard> {
        SubStandard::ALL
            .iter()
            .copied()
            .filter(|s| !self.sub_standard(*s).is_resolved())
            .collect()
    }

    /// 六个 Si/No 标志 (列名, 当前值) —— 严格结项门逐一检查
    pub fn all_flags(&self) -> [(&'static str, SiNoFlag); 6] {
        [
            ("Acuerdo de compromiso", self.agreement_flag),
            ("Análisis de información", self.analysis_info_flag),
            ("Cronograma concertado", self.schedule_agreed_flag),
            ("Disponer datos temáticos", self.dispose_thematic_flag),
            ("Oficio de cierre", self.closing_office_flag),
            ("Catálogo", self.catalog_flag),
        ]
    }

    /// 六个阶段实际日期 (列名, 当前值) —— 严格结项门要求全部存在且 ≤ 结项日期
    pub fn stage_dates(&self) -> [(&'static str, Option<NaiveDate>); 6] {
        [
            ("Suscripción acuerdo de compromiso", self.agreement_signed_date),
            ("Entrega acuerdo de compromiso", self.agreement_delivered_date),
            ("Fecha de entrega de información", self.info_delivery_date),
            ("Análisis y cronograma", self.analysis_schedule_date),
            ("Estándares", self.standards_date),
            ("Publicación", self.publication_date),
        ]
    }
}

// ==========================================
// RawRegistro - 边界行结构体
// ==========================================
// 用途: 外部协作方 (UI/存储层) 交换的 JSON 行, 键为原表格列名
// 日期为 DD/MM/YYYY 字符串; 单元格缺失按空串处理
// 列名保留源表格的尾随空格怪癖, 同时以 alias 接受修正写法
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRegistro {
    #[serde(rename = "Cod", default)]
    pub code: String,
    #[serde(rename = "Entidad", default)]
    pub entity: String,
    #[serde(rename = "Nivel Información ", alias = "Nivel Información", default)]
    pub info_level: String,
    #[serde(rename = "Funcionario", default)]
    pub officer: String,
    #[serde(rename = "TipoDato", default)]
    pub data_kind: String,
    #[serde(
        rename = "Frecuencia actualizacion ",
        alias = "Frecuencia actualizacion",
        alias = "Frecuencia actualización",
        default
    )]
    pub update_frequency: String,
    #[serde(rename = "Suscripción acuerdo de compromiso", default)]
    pub agreement_signed_date: String,
    #[serde(rename = "Entrega acuerdo de compromiso", default)]
    pub agreement_delivered_date: String,
    #[serde(rename = "Acuerdo de compromiso", default)]
    pub agreement_flag: String,
    #[serde(rename = "Fecha de entrega de información", default)]
    pub info_delivery_date: String,
    #[serde(rename = "Plazo de análisis", default)]
    pub analysis_deadline: String,
    #[serde(rename = "Plazo de cronograma", default)]
    pub schedule_deadline: String,
    #[serde(rename = "Análisis y cronograma", default)]
    pub analysis_schedule_date: String,
    #[serde(rename = "Análisis de información", default)]
    pub analysis_info_flag: String,
    #[serde(rename = "Cronograma concertado", default)]
    pub schedule_agreed_flag: String,
    #[serde(rename = "Registro (completo)", default)]
    pub std_registro: String,
    #[serde(rename = "ET (completo)", default)]
    pub std_et: String,
    #[serde(rename = "CO (completo)", default)]
    pub std_co: String,
    #[serde(rename = "DD (completo)", default)]
    pub std_dd: String,
    #[serde(rename = "REC (completo)", default)]
    pub std_rec: String,
    #[serde(rename = "SERVICIO (completo)", default)]
    pub std_servicio: String,
    #[serde(rename = "Estándares (fecha programada)", default)]
    pub standards_scheduled_date: String,
    #[serde(rename = "Estándares", default)]
    pub standards_date: String,
    #[serde(rename = "Disponer datos temáticos", default)]
    pub dispose_thematic_flag: String,
    #[serde(rename = "Fecha de publicación programada", default)]
    pub publication_scheduled_date: String,
    #[serde(rename = "Publicación", default)]
    pub publication_date: String,
    #[serde(rename = "Plazo de oficio de cierre", default)]
    pub closing_notice_deadline: String,
    #[serde(rename = "Fecha de oficio de cierre", default)]
    pub closing_notice_date: String,
    #[serde(rename = "Oficio de cierre", default)]
    pub closing_office_flag: String,
    #[serde(rename = "Catálogo", default)]
    pub catalog_flag: String,
    #[serde(rename = "Estado", default)]
    pub status: String,
    #[serde(rename = "Porcentaje Avance", default)]
    pub progress_percent: Option<i64>,
    #[serde(rename = "Observación", default)]
    pub observation: String,
}
