// ==========================================
// 数据发布里程碑跟踪 - 边界层
// ==========================================
// 职责: 外部 JSON 行 (原表格列名) 与领域记录的双向转换
// ==========================================

// 模块声明
pub mod field_mapper;

// 重导出核心类型
pub use field_mapper::{
    dump_registros, format_date, format_date_opt, load_registros, parse_date_checked,
    parse_date_lenient, FieldMapper, DATE_FORMAT,
};
