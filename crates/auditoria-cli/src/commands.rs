use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use auditoria_core::models::photo::AuditPhoto;
use auditoria_core::models::template_item::TemplateItem;
use auditoria_media::offload::{compress_blocking, extract_blocking, process_upload};
use auditoria_scoring::authoring::{authoring_warnings, prefill_sequential_config};
use auditoria_scoring::summary::{parse_entries, summarize_audit};
use auditoria_scoring::validation::{AnswerSubmission, validate_answer};
use auditoria_scoring::{max_score, score_for_answer, sequential_scores};

use crate::cli::{
    CompressArgs, ExifArgs, PhotoArgs, PrefillArgs, ScoreArgs, SequenceArgs, SummarizeArgs,
    ValidateArgs,
};
use crate::config::{self, AuditoriaConfig};

fn print_json<T: Serialize + ?Sized>(value: &T) -> eyre::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_item(path: &Path) -> eyre::Result<TemplateItem> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    Ok(TemplateItem::from_json(&raw)?)
}

fn read_bytes(path: &Path) -> eyre::Result<Arc<[u8]>> {
    let bytes = std::fs::read(path).map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    Ok(bytes.into())
}

/// MIME type from a file extension, for inputs given without one.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("tif" | "tiff") => "image/tiff",
        Some("bmp") => "image/bmp",
        Some("heic" | "heif") => "image/heic",
        _ => "application/octet-stream",
    }
}

pub fn score(args: &ScoreArgs) -> eyre::Result<()> {
    let item = read_item(&args.item)?;
    print_json(&json!({
        "valor": args.value,
        "pontuacao": score_for_answer(Some(&item), &args.value),
        "pontuacaoMaxima": max_score(Some(&item)),
        "avisos": authoring_warnings(&item),
    }))
}

pub fn sequence(args: &SequenceArgs) -> eyre::Result<()> {
    print_json(&sequential_scores(args.first, args.count))
}

pub fn validate(args: &ValidateArgs) -> eyre::Result<()> {
    let item = read_item(&args.item)?;
    let submission = AnswerSubmission {
        value: args.value.clone(),
        observation: args.observation.clone(),
        photo_count: args.photos,
    };
    let violations = validate_answer(&item, &submission);
    for violation in &violations {
        tracing::warn!(kind = ?violation.kind, "{violation}");
    }
    print_json(&violations)
}

pub fn prefill(args: &PrefillArgs) -> eyre::Result<()> {
    let item = read_item(&args.item)?;
    print_json(&prefill_sequential_config(&item, args.first))
}

pub fn summarize(args: &SummarizeArgs) -> eyre::Result<()> {
    let raw = std::fs::read_to_string(&args.audit)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", args.audit.display()))?;
    let entries = parse_entries(&raw)?;
    print_json(&summarize_audit(&entries))
}

pub async fn compress(args: &CompressArgs, config: &AuditoriaConfig) -> eyre::Result<()> {
    let buffer = read_bytes(&args.input)?;
    let mime = args
        .mime
        .clone()
        .unwrap_or_else(|| guess_mime(&args.input).to_string());

    let result = compress_blocking(buffer, mime, config.compression()).await?;
    std::fs::write(&args.output, &result.buffer)?;

    print_json(&json!({
        "output": args.output.display().to_string(),
        "mimeType": result.mime_type,
        "largura": result.width,
        "altura": result.height,
        "bytes": result.buffer.len(),
    }))
}

pub async fn exif(args: &ExifArgs) -> eyre::Result<()> {
    let buffer = read_bytes(&args.input)?;
    print_json(&extract_blocking(buffer).await)
}

pub async fn photo(args: &PhotoArgs, config: &AuditoriaConfig) -> eyre::Result<()> {
    let buffer = read_bytes(&args.input)?;
    let mime = args
        .mime
        .clone()
        .unwrap_or_else(|| guess_mime(&args.input).to_string());

    let (compressed, exif) = process_upload(buffer, mime, config.compression()).await?;
    let record = AuditPhoto::new(args.audit, args.item, &compressed, exif);

    let target = args.output_dir.join(&record.storage_key);
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, &compressed.buffer)?;
    tracing::info!(
        photo_id = %record.id,
        path = %target.display(),
        bytes = record.size_bytes,
        "photo stored"
    );

    println!("{}", record.to_json()?);
    Ok(())
}

pub fn config_init(path: &Path, force: bool) -> eyre::Result<()> {
    let written = config::init_config(path, force)?;
    println!("{}", path.display());
    print_json(&written)
}

pub fn config_show(config: &AuditoriaConfig) -> eyre::Result<()> {
    print_json(config)
}
