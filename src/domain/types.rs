// ==========================================
// 数据发布里程碑跟踪 - 领域类型定义
// ==========================================
// 红线: 取值为闭集枚举, 内部不传递裸字符串
// 序列化格式: 与源表格的西语标签完全一致
// 边界解析宽容 (大小写/重音/常见变体), 内部规范化
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Si/No 标志 (Flag)
// ==========================================
// 空串表示"尚未填写", 与 "No" 含义不同:
// "No" 是人工明确的否定, 空串是流程未到达
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiNoFlag {
    #[default]
    #[serde(rename = "")]
    Empty, // 未填写
    #[serde(rename = "Si")]
    Si, // 是
    #[serde(rename = "No")]
    No, // 否
}

impl SiNoFlag {
    /// 宽容解析: 接受 Si/SI/sí/Sí/yes 等写法; 空白/NaN 占位视为未填写
    pub fn parse(s: &str) -> Option<Self> {
        let t = s.trim();
        if t.is_empty() {
            return Some(SiNoFlag::Empty);
        }
        match t.to_lowercase().as_str() {
            "si" | "sí" | "yes" => Some(SiNoFlag::Si),
            "no" => Some(SiNoFlag::No),
            "nan" | "none" | "-" => Some(SiNoFlag::Empty),
            _ => None,
        }
    }

    /// 表格单元格的规范写法
    pub fn to_label(&self) -> &'static str {
        match self {
            SiNoFlag::Empty => "",
            SiNoFlag::Si => "Si",
            SiNoFlag::No => "No",
        }
    }

    pub fn is_si(&self) -> bool {
        matches!(self, SiNoFlag::Si)
    }

    pub fn is_no(&self) -> bool {
        matches!(self, SiNoFlag::No)
    }
}

impl fmt::Display for SiNoFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

// ==========================================
// 子标准完成状态 (Standard Status)
// ==========================================
// 六个子标准列 (Registro/ET/CO/DD/REC/SERVICIO) 共用
// 空白单元格按 "Sin iniciar" 处理
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardStatus {
    #[default]
    #[serde(rename = "Sin iniciar")]
    NotStarted, // 未开始
    #[serde(rename = "En proceso")]
    InProgress, // 进行中
    #[serde(rename = "Completo")]
    Complete, // 已完成
    #[serde(rename = "No aplica")]
    NotApplicable, // 不适用
}

impl StandardStatus {
    /// 宽容解析 (大小写不敏感); 未识别返回 None
    pub fn parse(s: &str) -> Option<Self> {
        let t = s.trim();
        if t.is_empty() {
            return Some(StandardStatus::NotStarted);
        }
        match t.to_lowercase().as_str() {
            "sin iniciar" => Some(StandardStatus::NotStarted),
            "en proceso" => Some(StandardStatus::InProgress),
            "completo" => Some(StandardStatus::Complete),
            "no aplica" => Some(StandardStatus::NotApplicable),
            "nan" | "none" | "-" => Some(StandardStatus::NotStarted),
            _ => None,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            StandardStatus::NotStarted => "Sin iniciar",
            StandardStatus::InProgress => "En proceso",
            StandardStatus::Complete => "Completo",
            StandardStatus::NotApplicable => "No aplica",
        }
    }

    /// 是否已解决 (登记标准日期后允许保留的状态)
    pub fn is_resolved(&self) -> bool {
        matches!(self, StandardStatus::Complete | StandardStatus::NotApplicable)
    }
}

impl fmt::Display for StandardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

// ==========================================
// 记录生命周期状态 (Record Status)
// ==========================================
// 核心只自动管理 Completado 的进入/退出;
// 其余取值由上层维护, 本核心透传
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    #[default]
    #[serde(rename = "")]
    Empty, // 未填写
    #[serde(rename = "En proceso")]
    InProgress, // 进行中
    #[serde(rename = "En proceso oficio de cierre")]
    InProgressClosing, // 结项通知办理中
    #[serde(rename = "Completado")]
    Completed, // 已完成 (仅当结项通知日期存在)
    #[serde(rename = "Finalizado")]
    Finalized, // 已终结
}

impl RecordStatus {
    pub fn parse(s: &str) -> Option<Self> {
        let t = s.trim();
        if t.is_empty() {
            return Some(RecordStatus::Empty);
        }
        match t.to_lowercase().as_str() {
            "en proceso" => Some(RecordStatus::InProgress),
            "en proceso oficio de cierre" => Some(RecordStatus::InProgressClosing),
            "completado" => Some(RecordStatus::Completed),
            "finalizado" => Some(RecordStatus::Finalized),
            "nan" | "none" | "-" => Some(RecordStatus::Empty),
            _ => None,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            RecordStatus::Empty => "",
            RecordStatus::InProgress => "En proceso",
            RecordStatus::InProgressClosing => "En proceso oficio de cierre",
            RecordStatus::Completed => "Completado",
            RecordStatus::Finalized => "Finalizado",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

// ==========================================
// 数据类型 (TipoDato)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataKind {
    #[serde(rename = "Nuevo")]
    New, // 新增数据集
    #[serde(rename = "Actualizar")]
    Update, // 更新既有数据集
}

impl DataKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nuevo" => Some(DataKind::New),
            "actualizar" => Some(DataKind::Update),
            _ => None,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            DataKind::New => "Nuevo",
            DataKind::Update => "Actualizar",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

// ==========================================
// 校验门策略 (Gate Mode)
// ==========================================
// Strict: 拒绝违规写入; Permissive: 接受并自动修正
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateMode {
    Strict,     // 严格: 前置条件不满足即拒绝
    Permissive, // 宽松: 接受写入, 自动修正关联字段
}

impl GateMode {
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "STRICT" => GateMode::Strict,
            "PERMISSIVE" => GateMode::Permissive,
            _ => GateMode::Strict, // 默认值
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, GateMode::Strict)
    }
}

impl fmt::Display for GateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateMode::Strict => write!(f, "STRICT"),
            GateMode::Permissive => write!(f, "PERMISSIVE"),
        }
    }
}

// ==========================================
// 里程碑 (Hito)
// ==========================================
// 告警扫描关注的五个通用里程碑 + 协议逾期复合规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Milestone {
    #[serde(rename = "Acuerdo de compromiso")]
    Agreement, // 承诺协议 (复合规则专用)
    #[serde(rename = "Entrega de información")]
    InfoDelivery, // 信息交付
    #[serde(rename = "Análisis y cronograma")]
    AnalysisSchedule, // 分析与排期
    #[serde(rename = "Estándares")]
    Standards, // 标准完成
    #[serde(rename = "Publicación")]
    Publication, // 数据发布
    #[serde(rename = "Cierre")]
    Closing, // 结项
}

impl Milestone {
    pub fn to_label(&self) -> &'static str {
        match self {
            Milestone::Agreement => "Acuerdo de compromiso",
            Milestone::InfoDelivery => "Entrega de información",
            Milestone::AnalysisSchedule => "Análisis y cronograma",
            Milestone::Standards => "Estándares",
            Milestone::Publication => "Publicación",
            Milestone::Closing => "Cierre",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

// ==========================================
// 告警状态 (Alert State)
// ==========================================
// 顺序: Overdue < DueSoon < CompletedLate (排序优先级)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertState {
    #[serde(rename = "Vencido")]
    Overdue, // 已逾期
    #[serde(rename = "Próximo a vencer")]
    DueSoon, // 即将到期
    #[serde(rename = "Completado con retraso")]
    CompletedLate, // 延迟完成
}

impl AlertState {
    /// 排序优先级 (越小越靠前)
    pub fn priority(&self) -> u8 {
        match self {
            AlertState::Overdue => 1,
            AlertState::DueSoon => 2,
            AlertState::CompletedLate => 3,
        }
    }

    pub fn to_label(&self) -> &'static str {
        match self {
            AlertState::Overdue => "Vencido",
            AlertState::DueSoon => "Próximo a vencer",
            AlertState::CompletedLate => "Completado con retraso",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

// ==========================================
// 里程碑状态机 (Milestone State)
// ==========================================
// 单个里程碑相对"今天"的完整状态视图;
// 告警只取其中 Overdue / DueSoon / CompletedLate 三态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneState {
    NoDeadline,    // 无计划日期
    OnTrack,       // 计划内
    DueSoon,       // 即将到期
    Overdue,       // 已逾期
    Completed,     // 按期完成
    CompletedLate, // 延迟完成
}

impl MilestoneState {
    /// 对应的告警状态 (非告警态返回 None)
    pub fn alert_state(&self) -> Option<AlertState> {
        match self {
            MilestoneState::Overdue => Some(AlertState::Overdue),
            MilestoneState::DueSoon => Some(AlertState::DueSoon),
            MilestoneState::CompletedLate => Some(AlertState::CompletedLate),
            _ => None,
        }
    }
}

impl fmt::Display for MilestoneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneState::NoDeadline => write!(f, "NO_DEADLINE"),
            MilestoneState::OnTrack => write!(f, "ON_TRACK"),
            MilestoneState::DueSoon => write!(f, "DUE_SOON"),
            MilestoneState::Overdue => write!(f, "OVERDUE"),
            MilestoneState::Completed => write!(f, "COMPLETED"),
            MilestoneState::CompletedLate => write!(f, "COMPLETED_LATE"),
        }
    }
}

// ==========================================
// 记录日期状态 (行级着色投影)
// ==========================================
// 取记录五个里程碑中最差的未完结状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordDateStatus {
    #[default]
    #[serde(rename = "normal")]
    Normal, // 无风险
    #[serde(rename = "proximo")]
    Proximo, // 存在即将到期的里程碑
    #[serde(rename = "vencido")]
    Vencido, // 存在已逾期的里程碑
}

impl fmt::Display for RecordDateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordDateStatus::Normal => write!(f, "normal"),
            RecordDateStatus::Proximo => write!(f, "proximo"),
            RecordDateStatus::Vencido => write!(f, "vencido"),
        }
    }
}
