use anyhow::{anyhow, bail, Context, Result};
use cabinet_store_lib::domain::entities::TargetScreen;
use cabinet_store_lib::{init_logging, AppConfig, AppState, EntityKind};
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tokio::runtime::Runtime;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ExportTarget {
    /// 全コレクション
    Document,
    Collection(EntityKind),
    Snapshot(Option<TargetScreen>),
    Summary,
}

#[derive(Debug, Clone)]
struct CliOptions {
    output: Option<PathBuf>,
    pretty: bool,
    target: ExportTarget,
    date: Option<NaiveDate>,
}

fn usage() -> &'static str {
    "Usage: cabinet_store_export [--collection <Kind> | --snapshot [screen] | --summary] [--date <YYYY-MM-DD>] [--output <path>] [--pretty]"
}

fn write_output(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}

fn emit_payload(target: Option<&Path>, payload: &str) -> Result<()> {
    if let Some(path) = target {
        write_output(path, payload)?;
        println!("Export written to {}", path.display());
    } else {
        println!("{payload}");
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(args)?;

    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let payload = rt.block_on(async {
        let state = AppState::new(AppConfig::from_env())
            .await
            .context("Failed to open cabinet store")?;
        collect(&state, &options).await
    })?;

    let payload = to_json(&payload, options.pretty)?;
    emit_payload(options.output.as_deref(), &payload)
}

async fn collect(state: &AppState, options: &CliOptions) -> Result<Value> {
    let document = state.hub.store().load().await;
    match &options.target {
        ExportTarget::Document => Ok(serde_json::to_value(&document)?),
        ExportTarget::Collection(kind) => {
            let mut value = serde_json::to_value(&document)?;
            value
                .get_mut(kind.as_str())
                .map(Value::take)
                .ok_or_else(|| anyhow!("Collection {kind} missing from document"))
        }
        ExportTarget::Snapshot(screen) => {
            let screen = screen.unwrap_or_else(|| state.screen());
            let today = options.date.unwrap_or_else(|| Local::now().date_naive());
            let snapshot = state.display_snapshot(screen, today).await;
            Ok(serde_json::to_value(&snapshot)?)
        }
        ExportTarget::Summary => {
            let counts: serde_json::Map<String, Value> = EntityKind::ALL
                .iter()
                .map(|kind| (kind.as_str().to_string(), json!(document.len_of(*kind))))
                .collect();
            Ok(json!({
                "backend": state.hub.store().backend_name(),
                "degraded": state.hub.store().is_degraded(),
                "documentKey": state.hub.store().key(),
                "counts": counts,
            }))
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(serde_json::to_string(value)?)
    }
}

fn parse_args<I>(args: I) -> Result<CliOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut output: Option<PathBuf> = None;
    let mut pretty = false;
    let mut target = ExportTarget::Document;
    let mut date: Option<NaiveDate> = None;

    let mut iter = args.into_iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--output requires a path\n{}", usage()))?;
                output = Some(PathBuf::from(path));
            }
            "--pretty" => {
                pretty = true;
            }
            "--collection" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--collection requires a kind\n{}", usage()))?;
                target = ExportTarget::Collection(parse_kind(&value)?);
            }
            "--snapshot" => {
                // 画面名は省略可
                let screen = match iter.peek() {
                    Some(next) if !next.starts_with('-') => {
                        let value = iter.next().unwrap_or_default();
                        Some(parse_screen(&value)?)
                    }
                    _ => None,
                };
                target = ExportTarget::Snapshot(screen);
            }
            "--summary" => {
                target = ExportTarget::Summary;
            }
            "--date" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--date requires a value\n{}", usage()))?;
                date = Some(
                    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .with_context(|| format!("Invalid date '{value}'. Expected YYYY-MM-DD."))?,
                );
            }
            "-h" | "--help" => {
                println!("{}", usage());
                std::process::exit(0);
            }
            other => {
                bail!("Unknown argument: {other}\n{}", usage());
            }
        }
    }

    Ok(CliOptions {
        output,
        pretty,
        target,
        date,
    })
}

fn parse_kind(value: &str) -> Result<EntityKind> {
    EntityKind::parse(value).ok_or_else(|| {
        let known: Vec<&str> = EntityKind::ALL.iter().map(|kind| kind.as_str()).collect();
        anyhow!("Unknown collection: {value}. Expected one of {}.", known.join(", "))
    })
}

fn parse_screen(value: &str) -> Result<TargetScreen> {
    TargetScreen::parse(value)
        .ok_or_else(|| anyhow!("Unknown screen: {value}. Expected 'salle_attente', 'accueil' or 'toutes'."))
}
