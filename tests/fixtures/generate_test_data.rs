// ==========================================
// 测试数据生成器
// ==========================================
// 用途: 生成5个测试数据集JSON文件 (原表格列名的行数组)
// 输出: tests/fixtures/datasets/*.json
// 运行: cargo run --bin generate_test_data
// ==========================================

use chrono::{Duration, Local};
use serde_json::{json, Value};
use std::error::Error;
use std::fs;

// 数据集输出目录
const DATASET_DIR: &str = "tests/fixtures/datasets";

// 登记行结构 (字段与原表格列一一对应, 日期为 DD/MM/YYYY 字符串)
#[derive(Clone, Default)]
struct RegistroRow {
    code: String,
    entity: String,
    info_level: String,
    officer: String,
    data_kind: String,
    update_frequency: String,
    agreement_signed_date: String,
    agreement_delivered_date: String,
    agreement_flag: String,
    info_delivery_date: String,
    analysis_deadline: String,
    schedule_deadline: String,
    analysis_schedule_date: String,
    analysis_info_flag: String,
    schedule_agreed_flag: String,
    std_registro: String,
    std_et: String,
    std_co: String,
    std_dd: String,
    std_rec: String,
    std_servicio: String,
    standards_scheduled_date: String,
    standards_date: String,
    dispose_thematic_flag: String,
    publication_scheduled_date: String,
    publication_date: String,
    closing_notice_deadline: String,
    closing_notice_date: String,
    closing_office_flag: String,
    catalog_flag: String,
    status: String,
    progress_percent: Option<i64>,
    observation: String,
}

impl RegistroRow {
    /// 按原表格列名输出一行 JSON (保留尾随空格列名怪癖)
    fn to_json(&self) -> Value {
        json!({
            "Cod": self.code,
            "Entidad": self.entity,
            "Nivel Información ": self.info_level,
            "Funcionario": self.officer,
            "TipoDato": self.data_kind,
            "Frecuencia actualizacion ": self.update_frequency,
            "Suscripción acuerdo de compromiso": self.agreement_signed_date,
            "Entrega acuerdo de compromiso": self.agreement_delivered_date,
            "Acuerdo de compromiso": self.agreement_flag,
            "Fecha de entrega de información": self.info_delivery_date,
            "Plazo de análisis": self.analysis_deadline,
            "Plazo de cronograma": self.schedule_deadline,
            "Análisis y cronograma": self.analysis_schedule_date,
            "Análisis de información": self.analysis_info_flag,
            "Cronograma concertado": self.schedule_agreed_flag,
            "Registro (completo)": self.std_registro,
            "ET (completo)": self.std_et,
            "CO (completo)": self.std_co,
            "DD (completo)": self.std_dd,
            "REC (completo)": self.std_rec,
            "SERVICIO (completo)": self.std_servicio,
            "Estándares (fecha programada)": self.standards_scheduled_date,
            "Estándares": self.standards_date,
            "Disponer datos temáticos": self.dispose_thematic_flag,
            "Fecha de publicación programada": self.publication_scheduled_date,
            "Publicación": self.publication_date,
            "Plazo de oficio de cierre": self.closing_notice_deadline,
            "Fecha de oficio de cierre": self.closing_notice_date,
            "Oficio de cierre": self.closing_office_flag,
            "Catálogo": self.catalog_flag,
            "Estado": self.status,
            "Porcentaje Avance": self.progress_percent,
            "Observación": self.observation,
        })
    }
}

// 固定日期字符串 (测试数据用确定性日期, 便于人工核对)
fn dmy(day: u32, month: u32, year: i32) -> String {
    format!("{:02}/{:02}/{:04}", day, month, year)
}

// 相对今天的日期字符串 (告警数据集用)
fn today_offset(days: i64) -> String {
    (Local::now().date_naive() + Duration::days(days))
        .format("%d/%m/%Y")
        .to_string()
}

// 行骨架: 基础信息列按序号循环取值
fn base_row(index: usize) -> RegistroRow {
    let entities = [
        "Secretaría de Planeación",
        "Secretaría de Hacienda",
        "Secretaría de Salud",
        "Secretaría de Movilidad",
        "Oficina TIC",
    ];
    let officers = ["A. Gómez", "L. Rodríguez", "M. Torres", "C. Ruiz"];

    RegistroRow {
        code: format!("REG{:03}", index + 1),
        entity: entities[index % entities.len()].to_string(),
        info_level: ["Detalle", "Agregado"][index % 2].to_string(),
        officer: officers[index % officers.len()].to_string(),
        data_kind: ["Nuevo", "Actualizar"][index % 2].to_string(),
        update_frequency: ["Mensual", "Trimestral", "Anual"][index % 3].to_string(),
        ..Default::default()
    }
}

// 生成正常推进中的登记行: 按序号轮换四个推进阶段
fn generate_normal_row(index: usize) -> RegistroRow {
    let mut row = base_row(index);
    let week = (index / 4) as u32;
    let day = 6 + week * 7; // 2025-01-06 起每4行后移一周 (周一)

    match index % 4 {
        // 阶段0: 仅签署并交付协议, 信息待交付
        0 => {
            row.agreement_signed_date = dmy(day.min(28), 1, 2025);
            row.agreement_delivered_date = dmy(day.min(28), 1, 2025);
            row.agreement_flag = "Si".to_string();
            row.status = "En proceso".to_string();
        }
        // 阶段1: 信息已交付, 平台截止日留空 (由批量校验派生)
        1 => {
            row.agreement_signed_date = dmy(day.min(28), 1, 2025);
            row.agreement_delivered_date = dmy(day.min(28), 1, 2025);
            row.agreement_flag = "Si".to_string();
            row.info_delivery_date = dmy((day + 2).min(28), 1, 2025);
            row.status = "En proceso".to_string();
        }
        // 阶段2: 分析与估准推进中
        2 => {
            row.agreement_signed_date = dmy(2, 1, 2025);
            row.agreement_delivered_date = dmy(2, 1, 2025);
            row.agreement_flag = "Si".to_string();
            row.info_delivery_date = dmy(6, 1, 2025);
            row.analysis_schedule_date = dmy(14, 1, 2025);
            row.analysis_info_flag = "Si".to_string();
            row.schedule_agreed_flag = "Si".to_string();
            row.std_registro = "Completo".to_string();
            row.std_et = "En proceso".to_string();
            row.standards_scheduled_date = dmy(10, 2, 2025);
            row.status = "En proceso".to_string();
        }
        // 阶段3: 已发布, 结项在途
        _ => {
            row.agreement_signed_date = dmy(2, 1, 2025);
            row.agreement_delivered_date = dmy(2, 1, 2025);
            row.agreement_flag = "Si".to_string();
            row.info_delivery_date = dmy(6, 1, 2025);
            row.analysis_schedule_date = dmy(14, 1, 2025);
            row.analysis_info_flag = "Si".to_string();
            row.schedule_agreed_flag = "Si".to_string();
            row.std_registro = "Completo".to_string();
            row.std_et = "Completo".to_string();
            row.std_co = "Completo".to_string();
            row.std_dd = "Completo".to_string();
            row.std_rec = "Completo".to_string();
            row.std_servicio = "Completo".to_string();
            row.standards_scheduled_date = dmy(3, 2, 2025);
            row.standards_date = dmy(3, 2, 2025);
            row.dispose_thematic_flag = "Si".to_string();
            row.publication_scheduled_date = dmy(17, 2, 2025);
            row.publication_date = dmy(17, 2, 2025);
            row.status = "En proceso oficio de cierre".to_string();
        }
    }
    row
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成测试数据集...");
    fs::create_dir_all(DATASET_DIR)?;

    // 1. 生成正常推进数据 (20条)
    generate_normal_rows()?;

    // 2. 生成旗标不一致数据 (待自动修正)
    generate_flag_inconsistencies()?;

    // 3. 生成空白与乱码单元格数据
    generate_blank_and_garbage_cells()?;

    // 4. 生成结项候选数据
    generate_closing_candidates()?;

    // 5. 生成告警场景数据 (相对今天)
    generate_alert_scenarios()?;

    println!("✓ 所有测试数据集生成完成！");
    Ok(())
}

fn write_dataset(name: &str, rows: &[RegistroRow]) -> Result<(), Box<dyn Error>> {
    let values: Vec<Value> = rows.iter().map(RegistroRow::to_json).collect();
    let path = format!("{}/{}", DATASET_DIR, name);
    fs::write(&path, serde_json::to_string_pretty(&values)?)?;
    Ok(())
}

fn generate_normal_rows() -> Result<(), Box<dyn Error>> {
    let rows: Vec<RegistroRow> = (0..20).map(generate_normal_row).collect();
    write_dataset("01_normal_rows.json", &rows)?;
    println!("✓ 生成 01_normal_rows.json (20条)");
    Ok(())
}

fn generate_flag_inconsistencies() -> Result<(), Box<dyn Error>> {
    // 日期与旗标互相矛盾的行, 批量校验应逐条修正并留痕
    let mut rows = Vec::new();

    // 有日期但旗标为 No → 旗标应改为 Si
    let mut r = base_row(100);
    r.agreement_signed_date = dmy(6, 1, 2025);
    r.agreement_delivered_date = dmy(6, 1, 2025);
    r.agreement_flag = "No".to_string();
    r.status = "En proceso".to_string();
    rows.push(r);

    // 旗标为 Si 但无日期 → 旗标应清空
    let mut r = base_row(101);
    r.analysis_info_flag = "Si".to_string();
    r.schedule_agreed_flag = "Si".to_string();
    rows.push(r);

    // 估准未齐但已"发布" → 发布日期按配置处理
    let mut r = base_row(102);
    r.agreement_signed_date = dmy(6, 1, 2025);
    r.agreement_delivered_date = dmy(6, 1, 2025);
    r.agreement_flag = "Si".to_string();
    r.info_delivery_date = dmy(8, 1, 2025);
    r.analysis_schedule_date = dmy(15, 1, 2025);
    r.std_registro = "Completo".to_string();
    r.std_et = "Sin iniciar".to_string();
    r.standards_date = dmy(3, 2, 2025);
    r.publication_date = dmy(17, 2, 2025);
    r.status = "En proceso".to_string();
    rows.push(r);

    // 不予发布 (Disponer=No) 却有发布日期 → 发布日期应清除
    let mut r = base_row(103);
    r.agreement_signed_date = dmy(6, 1, 2025);
    r.agreement_delivered_date = dmy(6, 1, 2025);
    r.agreement_flag = "Si".to_string();
    r.dispose_thematic_flag = "No".to_string();
    r.publication_date = dmy(17, 2, 2025);
    r.status = "En proceso".to_string();
    rows.push(r);

    // 状态为 Completado 但无结项日期 → 应降级
    let mut r = base_row(104);
    r.agreement_signed_date = dmy(6, 1, 2025);
    r.agreement_delivered_date = dmy(6, 1, 2025);
    r.agreement_flag = "Si".to_string();
    r.status = "Completado".to_string();
    r.progress_percent = Some(100);
    rows.push(r);

    write_dataset("02_flag_inconsistencies.json", &rows)?;
    println!("✓ 生成 02_flag_inconsistencies.json (5条)");
    Ok(())
}

fn generate_blank_and_garbage_cells() -> Result<(), Box<dyn Error>> {
    // 空白占位符与无法解析的单元格, 批量导入应宽松处理 (按无值对待)
    let mut rows = Vec::new();

    // 各式空白占位符
    let mut r = base_row(200);
    r.agreement_signed_date = "-".to_string();
    r.agreement_delivered_date = "nan".to_string();
    r.info_delivery_date = "NaT".to_string();
    r.agreement_flag = "none".to_string();
    r.status = "-".to_string();
    rows.push(r);

    // 乱码日期与乱码旗标
    let mut r = base_row(201);
    r.agreement_signed_date = "mañana".to_string();
    r.agreement_delivered_date = "32/13/2025".to_string();
    r.agreement_flag = "quizás".to_string();
    r.status = "pendiente???".to_string();
    rows.push(r);

    // 备选日期写法: ISO 与无前导零都应被接受
    let mut r = base_row(202);
    r.agreement_signed_date = "2025-01-06".to_string();
    r.agreement_delivered_date = "6/1/2025".to_string();
    r.agreement_flag = "sí".to_string();
    r.info_delivery_date = dmy(8, 1, 2025);
    r.status = "En proceso".to_string();
    rows.push(r);

    write_dataset("03_blank_and_garbage_cells.json", &rows)?;
    println!("✓ 生成 03_blank_and_garbage_cells.json (3条)");
    Ok(())
}

fn generate_closing_candidates() -> Result<(), Box<dyn Error>> {
    let mut rows = Vec::new();

    // 全链条齐备 + 结项日期在案 → 状态应自动置为 Completado
    let mut r = base_row(300);
    r.agreement_signed_date = dmy(2, 1, 2025);
    r.agreement_delivered_date = dmy(2, 1, 2025);
    r.agreement_flag = "Si".to_string();
    r.info_delivery_date = dmy(6, 1, 2025);
    r.analysis_schedule_date = dmy(14, 1, 2025);
    r.analysis_info_flag = "Si".to_string();
    r.schedule_agreed_flag = "Si".to_string();
    r.std_registro = "Completo".to_string();
    r.std_et = "Completo".to_string();
    r.std_co = "Completo".to_string();
    r.std_dd = "Completo".to_string();
    r.std_rec = "Completo".to_string();
    r.std_servicio = "Completo".to_string();
    r.standards_scheduled_date = dmy(3, 2, 2025);
    r.standards_date = dmy(3, 2, 2025);
    r.dispose_thematic_flag = "Si".to_string();
    r.publication_scheduled_date = dmy(17, 2, 2025);
    r.publication_date = dmy(17, 2, 2025);
    r.closing_notice_date = dmy(26, 2, 2025);
    r.closing_office_flag = "Si".to_string();
    r.catalog_flag = "Si".to_string();
    r.status = "En proceso oficio de cierre".to_string();
    rows.push(r);

    // 结项日期在案但前置条件不满足 (未发布) → 结项日期应被清除
    let mut r = base_row(301);
    r.agreement_signed_date = dmy(2, 1, 2025);
    r.agreement_delivered_date = dmy(2, 1, 2025);
    r.agreement_flag = "Si".to_string();
    r.info_delivery_date = dmy(6, 1, 2025);
    r.closing_notice_date = dmy(26, 2, 2025);
    r.status = "En proceso".to_string();
    rows.push(r);

    write_dataset("04_closing_candidates.json", &rows)?;
    println!("✓ 生成 04_closing_candidates.json (2条)");
    Ok(())
}

fn generate_alert_scenarios() -> Result<(), Box<dyn Error>> {
    // 相对今天的日期, 供人工跑 CLI 观察告警输出
    let mut rows = Vec::new();

    // 分析截止已过期, 未完成
    let mut r = base_row(400);
    r.agreement_signed_date = today_offset(-30);
    r.agreement_delivered_date = today_offset(-30);
    r.agreement_flag = "Si".to_string();
    r.info_delivery_date = today_offset(-20);
    r.status = "En proceso".to_string();
    r.observation = "Vencido esperado".to_string();
    rows.push(r);

    // 估准临近到期 (今天+3天)
    let mut r = base_row(401);
    r.agreement_signed_date = today_offset(-40);
    r.agreement_delivered_date = today_offset(-40);
    r.agreement_flag = "Si".to_string();
    r.info_delivery_date = today_offset(-35);
    r.analysis_schedule_date = today_offset(-25);
    r.analysis_info_flag = "Si".to_string();
    r.schedule_agreed_flag = "Si".to_string();
    r.standards_scheduled_date = today_offset(3);
    r.status = "En proceso".to_string();
    r.observation = "Próximo esperado".to_string();
    rows.push(r);

    // 发布迟交 (计划今天-14, 实际今天-7)
    let mut r = base_row(402);
    r.agreement_signed_date = today_offset(-60);
    r.agreement_delivered_date = today_offset(-60);
    r.agreement_flag = "Si".to_string();
    r.info_delivery_date = today_offset(-50);
    r.analysis_schedule_date = today_offset(-40);
    r.analysis_info_flag = "Si".to_string();
    r.schedule_agreed_flag = "Si".to_string();
    r.std_registro = "Completo".to_string();
    r.std_et = "Completo".to_string();
    r.std_co = "Completo".to_string();
    r.std_dd = "Completo".to_string();
    r.std_rec = "Completo".to_string();
    r.std_servicio = "Completo".to_string();
    r.standards_date = today_offset(-30);
    r.dispose_thematic_flag = "Si".to_string();
    r.publication_scheduled_date = today_offset(-14);
    r.publication_date = today_offset(-7);
    r.status = "En proceso".to_string();
    r.observation = "Completado con retraso esperado".to_string();
    rows.push(r);

    // 协议已交付但信息迟迟未交付 → 复合告警
    let mut r = base_row(403);
    r.agreement_signed_date = today_offset(-15);
    r.agreement_delivered_date = today_offset(-10);
    r.agreement_flag = "Si".to_string();
    r.status = "En proceso".to_string();
    r.observation = "Alerta de acuerdo pendiente esperada".to_string();
    rows.push(r);

    write_dataset("05_alert_scenarios.json", &rows)?;
    println!("✓ 生成 05_alert_scenarios.json (4条)");
    Ok(())
}
