// ==========================================
// 数据发布里程碑跟踪系统 - 批处理主入口
// ==========================================
// 职责: 读取 JSON 行文件 → 批量校验派生 → 告警汇总 → 写出规范行
// 用法: cronograma-core <registros.json> [salida.json]
//         [--hoy DD/MM/YYYY] [--perfil perfil.json]
// ==========================================

use anyhow::{bail, Context};
use chrono::NaiveDate;
use cronograma_core::config::ValidationProfile;
use cronograma_core::domain::registro::RawRegistro;
use cronograma_core::domain::types::AlertState;
use cronograma_core::importer::field_mapper::{
    self, dump_registros, load_registros, FieldMapper,
};
use cronograma_core::{logging, TrackerApi};
use std::path::PathBuf;

struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    today: Option<NaiveDate>,
    profile_path: Option<PathBuf>,
}

const USAGE: &str =
    "用法: cronograma-core <registros.json> [salida.json] [--hoy DD/MM/YYYY] [--perfil perfil.json]";

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut today: Option<NaiveDate> = None;
    let mut profile_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--hoy" => {
                let v = args.next().context("--hoy 需要日期参数 (DD/MM/YYYY)")?;
                let parsed = field_mapper::parse_date_checked(&v)
                    .map_err(|bad| anyhow::anyhow!("无法解析 --hoy 日期: {}", bad))?
                    .context("--hoy 日期不能为空")?;
                today = Some(parsed);
            }
            "--perfil" => {
                let v = args.next().context("--perfil 需要文件路径参数")?;
                profile_path = Some(PathBuf::from(v));
            }
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, USAGE),
            _ if input.is_none() => input = Some(PathBuf::from(arg)),
            _ if output.is_none() => output = Some(PathBuf::from(arg)),
            other => bail!("多余参数: {}\n{}", other, USAGE),
        }
    }

    Ok(CliArgs {
        input: input.context(USAGE)?,
        output,
        today,
        profile_path,
    })
}

fn load_profile(path: Option<&PathBuf>) -> anyhow::Result<ValidationProfile> {
    match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("读取配置档失败: {}", p.display()))?;
            let profile: ValidationProfile = serde_json::from_str(&content)
                .with_context(|| format!("解析配置档失败: {}", p.display()))?;
            Ok(profile)
        }
        None => Ok(ValidationProfile::default()),
    }
}

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 决策支持核心", cronograma_core::APP_NAME);
    tracing::info!("系统版本: {}", cronograma_core::VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;
    let profile = load_profile(args.profile_path.as_ref())?;
    let api = TrackerApi::new(profile).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    // === 步骤 1: 加载记录 ===
    let mut registros = load_registros(&args.input)?;

    // === 步骤 2: 批量校验与派生 ===
    let result = api.validate_and_derive_all(&mut registros);
    for c in &result.corrections {
        tracing::info!(
            code = %c.code,
            field = %c.field,
            tipo = %c.correction_type,
            "{}",
            c.reason
        );
    }
    tracing::info!(
        pass_id = %result.pass_id,
        total = result.total_records,
        corregidos = result.corrected_records,
        elapsed_ms = result.elapsed_ms,
        "批量校验完成"
    );

    // === 步骤 3: 告警汇总 ===
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let alerts = api.compute_alerts(&registros, today);
    let vencidos = alerts
        .iter()
        .filter(|a| a.state == AlertState::Overdue)
        .count();
    let proximos = alerts
        .iter()
        .filter(|a| a.state == AlertState::DueSoon)
        .count();
    let con_retraso = alerts
        .iter()
        .filter(|a| a.state == AlertState::CompletedLate)
        .count();
    tracing::info!(
        fecha = %today,
        total = alerts.len(),
        vencidos,
        proximos,
        con_retraso,
        "告警汇总"
    );
    for a in alerts.iter().filter(|a| a.state == AlertState::Overdue) {
        tracing::warn!(code = %a.code, hito = %a.milestone, dias = a.lag_days, "{}", a.description);
    }

    // === 步骤 4: 写出规范行 ===
    match &args.output {
        Some(path) => dump_registros(path, &registros)?,
        None => {
            let rows: Vec<RawRegistro> = registros.iter().map(FieldMapper::to_raw).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    Ok(())
}
