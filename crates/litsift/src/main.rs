//! litsift CLI.
//!
//! One machine-readable payload per invocation on stdout (JSON unless
//! `--output text`); diagnostics ride the payload itself as `warnings`,
//! `timings_ms`, and doctor `checks` rather than a log stream.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use litsift_local::batch::{self, FailureMode};
use litsift_local::extract::{self, LocalExtractor, PdfFallback};
use litsift_local::lexicon::{LexiconSources, LexiconStore};
use litsift_local::{download, export, papers, Screener};

#[derive(Parser, Debug)]
#[command(
    name = "litsift",
    version,
    about = "Lexicon-relevance screening for scholarly PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score PDFs against the screening lexicons and write a ranked artifact.
    Score(ScoreCmd),
    /// Look up citation metadata for a DOI (OpenAlex).
    Meta(MetaCmd),
    /// Download a PDF from a direct URL, named so the DOI survives the trip.
    Download(DownloadCmd),
    /// Environment / configuration self-check (no secrets in output).
    Doctor(DoctorCmd),
    /// Print version info.
    Version(VersionCmd),
}

#[derive(clap::Args, Debug)]
struct ScoreCmd {
    /// Directory scanned (non-recursive) for *.pdf files.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    dir: Option<PathBuf>,
    /// Score a single PDF instead of a directory.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Replace the built-in target lexicon (one term per line, `#` comments).
    #[arg(long)]
    target_lexicon: Option<PathBuf>,
    /// Replace the built-in bycatch lexicon.
    #[arg(long)]
    bycatch_lexicon: Option<PathBuf>,
    /// Replace the built-in research-design lexicon.
    #[arg(long)]
    research_lexicon: Option<PathBuf>,
    /// Extra personal names excluded from token counts (one per line).
    #[arg(long)]
    names_file: Option<PathBuf>,
    /// Accept an empty target lexicon instead of failing at startup.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = false)]
    allow_empty_target: bool,
    /// Documents scored concurrently (clamped to 1..=16).
    #[arg(long, default_value_t = 4)]
    max_parallel: usize,
    /// Per-document failure handling: degrade|fail
    #[arg(long, default_value = "degrade")]
    on_error: String,
    /// Artifact format: csv|json
    #[arg(long, default_value = "csv")]
    format: String,
    /// Artifact path (default: .generated/litsift-score-<yymmdd>-<epoch>.<ext>)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Override the clock for deterministic artifact names.
    #[arg(long)]
    now_epoch_s: Option<u64>,
}

#[derive(clap::Args, Debug)]
struct MetaCmd {
    /// DOI to resolve (plain, `doi:`, or `https://doi.org/` forms); repeatable.
    #[arg(long = "doi", required = true)]
    dois: Vec<String>,
    /// HTTP timeout per lookup.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,
    /// Artifact path (default: .generated/litsift-meta-<yymmdd>-<epoch>.json)
    #[arg(long)]
    out: Option<PathBuf>,
    /// Override the clock for deterministic artifact names.
    #[arg(long)]
    now_epoch_s: Option<u64>,
    /// Output: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

#[derive(clap::Args, Debug)]
struct DownloadCmd {
    /// Direct PDF URL (http/https).
    #[arg(long)]
    url: String,
    /// DOI used for the dated file name; omit to keep the URL's basename.
    #[arg(long)]
    doi: Option<String>,
    /// Destination directory.
    #[arg(long, default_value = ".")]
    dest: PathBuf,
    /// Refuse payloads larger than this many bytes.
    #[arg(long, default_value_t = download::DEFAULT_MAX_PDF_BYTES)]
    max_bytes: u64,
    /// HTTP timeout for the transfer.
    #[arg(long, default_value_t = 60_000)]
    timeout_ms: u64,
    /// Override the clock for deterministic file names.
    #[arg(long)]
    now_epoch_s: Option<u64>,
}

#[derive(clap::Args, Debug)]
struct DoctorCmd {
    /// Output: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
    /// Target lexicon override to validate (defaults check the built-ins).
    #[arg(long)]
    target_lexicon: Option<PathBuf>,
    /// Bycatch lexicon override to validate.
    #[arg(long)]
    bycatch_lexicon: Option<PathBuf>,
    /// Research-design lexicon override to validate.
    #[arg(long)]
    research_lexicon: Option<PathBuf>,
    /// Directory the writable-artifacts check probes.
    #[arg(long, default_value = ".generated")]
    export_dir: PathBuf,
}

#[derive(clap::Args, Debug)]
struct VersionCmd {
    /// Output: json|text
    #[arg(long = "output", alias = "format", default_value = "json")]
    output: String,
}

fn now_epoch_s(override_s: Option<u64>) -> u64 {
    override_s.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    })
}

/// yymmdd (UTC); the stamp score artifacts and dated downloads carry.
fn date_stamp(epoch_s: u64) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp(epoch_s as i64, 0)
        .map(|t| t.format("%y%m%d").to_string())
        .unwrap_or_else(|| "000000".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Score(args) => {
            let mode = match args.on_error.as_str() {
                "degrade" => FailureMode::Degrade,
                "fail" => FailureMode::Fail,
                other => bail!("unknown --on-error {other:?} (expected degrade|fail)"),
            };
            if !matches!(args.format.as_str(), "csv" | "json") {
                bail!("unknown --format {:?} (expected csv|json)", args.format);
            }
            let sources = LexiconSources {
                target_file: args.target_lexicon,
                bycatch_file: args.bycatch_lexicon,
                research_file: args.research_lexicon,
                allow_empty_target: args.allow_empty_target,
            };
            let screener = Arc::new(Screener::from_sources(
                &sources,
                args.names_file.as_deref(),
                Arc::new(LocalExtractor::new()),
            )?);
            let summary = match (&args.dir, &args.file) {
                (Some(dir), None) => {
                    batch::screen_directory(screener, dir, args.max_parallel, mode).await?
                }
                (None, Some(file)) => {
                    batch::screen_paths(screener, vec![file.clone()], args.max_parallel, mode)
                        .await?
                }
                _ => bail!("pass exactly one of --dir or --file"),
            };

            let now = now_epoch_s(args.now_epoch_s);
            let stamp = date_stamp(now);
            let out = match args.out {
                Some(p) => p,
                None => PathBuf::from(format!(
                    ".generated/litsift-score-{stamp}-{now}.{}",
                    args.format
                )),
            };
            match args.format.as_str() {
                "json" => {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&out, serde_json::to_vec_pretty(&summary)?)?;
                }
                _ => export::write_csv(&out, &summary.results)?,
            }

            let mut payload = serde_json::to_value(&summary)?;
            if let Some(obj) = payload.as_object_mut() {
                obj.insert("schema_version".to_string(), json!(1));
                obj.insert("kind".to_string(), json!("score"));
                obj.insert("artifact".to_string(), json!(out.display().to_string()));
            }
            println!("{payload}");
        }
        Commands::Meta(args) => {
            let http = litsift_local::default_client()?;
            let mut results = Vec::new();
            let mut warnings: Vec<String> = Vec::new();
            // One lookup at a time; a failed DOI never blocks the rest.
            for doi in &args.dois {
                match papers::fetch_metadata(&http, doi, args.timeout_ms).await {
                    Ok(meta) => results.push(meta),
                    Err(e) => warnings.push(format!("{doi}: {e}")),
                }
            }
            if results.is_empty() {
                bail!("no DOI resolved: {}", warnings.join("; "));
            }

            let now = now_epoch_s(args.now_epoch_s);
            let stamp = date_stamp(now);
            let out = match args.out {
                Some(p) => p,
                None => PathBuf::from(format!(".generated/litsift-meta-{stamp}-{now}.json")),
            };
            let body = json!({
                "looked_up": args.dois.len(),
                "resolved": results.len(),
                "failed": warnings.len(),
                "results": &results,
                "warnings": &warnings,
            });
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&out, serde_json::to_vec_pretty(&body)?)?;

            match args.output.as_str() {
                "text" => {
                    for (i, meta) in results.iter().enumerate() {
                        if i > 0 {
                            println!();
                        }
                        println!("{}", meta.title.as_deref().unwrap_or("(untitled)"));
                        if !meta.authors.is_empty() {
                            println!("{}", meta.authors.join(", "));
                        }
                        let year = meta
                            .year
                            .map(|y| y.to_string())
                            .unwrap_or_else(|| "n.d.".to_string());
                        match &meta.venue {
                            Some(v) => println!("{v}, {year}"),
                            None => println!("{year}"),
                        }
                        println!("doi:{}", meta.doi);
                        if let Some(u) = &meta.pdf_url {
                            println!("pdf: {u}");
                        }
                    }
                    for w in &warnings {
                        println!("warning: {w}");
                    }
                }
                _ => {
                    let mut payload = body;
                    if let Some(obj) = payload.as_object_mut() {
                        obj.insert("schema_version".to_string(), json!(1));
                        obj.insert("kind".to_string(), json!("meta"));
                        obj.insert("ok".to_string(), json!(warnings.is_empty()));
                        obj.insert("artifact".to_string(), json!(out.display().to_string()));
                    }
                    println!("{payload}");
                }
            }
        }
        Commands::Download(args) => {
            let http = litsift_local::default_client()?;
            let now = now_epoch_s(args.now_epoch_s);
            let file_name = args
                .doi
                .as_deref()
                .map(|d| download::dated_file_name(&date_stamp(now), &papers::normalize_doi(d)));
            let receipt = download::download_pdf(
                &http,
                &args.url,
                &args.dest,
                file_name.as_deref(),
                args.max_bytes,
                args.timeout_ms,
            )
            .await?;
            let mut payload = serde_json::to_value(&receipt)?;
            if let Some(obj) = payload.as_object_mut() {
                obj.insert("schema_version".to_string(), json!(1));
                obj.insert("kind".to_string(), json!("download"));
                obj.insert("ok".to_string(), json!(true));
            }
            println!("{payload}");
        }
        Commands::Doctor(args) => {
            let t0 = Instant::now();
            let mut checks: Vec<serde_json::Value> = Vec::new();

            let sources = LexiconSources {
                target_file: args.target_lexicon.clone(),
                bycatch_file: args.bycatch_lexicon.clone(),
                research_file: args.research_lexicon.clone(),
                allow_empty_target: false,
            };
            match LexiconStore::load(&sources) {
                Ok(store) => checks.push(json!({
                    "name": "lexicons",
                    "ok": true,
                    "message": format!(
                        "target={} bycatch={} research={}",
                        store.target.len(),
                        store.bycatch.len(),
                        store.research.len()
                    ),
                    "hint": "",
                })),
                Err(e) => checks.push(json!({
                    "name": "lexicons",
                    "ok": false,
                    "message": e.to_string(),
                    "hint": "check --target-lexicon/--bycatch-lexicon/--research-lexicon paths",
                })),
            }

            let export_ok = (|| -> Result<()> {
                std::fs::create_dir_all(&args.export_dir)?;
                let probe = args.export_dir.join(format!(".probe-{}", std::process::id()));
                std::fs::write(&probe, b"probe")?;
                std::fs::remove_file(&probe)?;
                Ok(())
            })()
            .is_ok();
            checks.push(json!({
                "name": "export_dir_writable",
                "ok": export_ok,
                "message": args.export_dir.display().to_string(),
                "hint": if export_ok { "" } else { "artifacts cannot be written here; pass --export-dir" },
            }));

            let engine = (|| -> Result<()> {
                let bytes = extract::synthetic_pdf(&["lexicon relevance probe"])?;
                let pages = extract::pdf_pages_from_bytes(&bytes, PdfFallback::Off)?;
                if !pages.iter().any(|p| p.contains("relevance probe")) {
                    bail!("probe text missing from extraction");
                }
                Ok(())
            })();
            checks.push(json!({
                "name": "pdf_engine",
                "ok": engine.is_ok(),
                "message": match &engine {
                    Ok(()) => "round-trip ok".to_string(),
                    Err(e) => e.to_string(),
                },
                "hint": if engine.is_ok() { "" } else { "pdf text extraction is broken in this build" },
            }));

            let ok = checks.iter().all(|c| c["ok"].as_bool().unwrap_or(false));
            let payload = json!({
                "schema_version": 1,
                "kind": "doctor",
                "ok": ok,
                "name": "litsift",
                "version": env!("CARGO_PKG_VERSION"),
                "platform": {
                    "os": std::env::consts::OS,
                    "arch": std::env::consts::ARCH,
                },
                "elapsed_ms": t0.elapsed().as_millis() as u64,
                "configured": {
                    "pdf_fallback": match PdfFallback::from_env() {
                        PdfFallback::Auto => "auto",
                        PdfFallback::Off => "off",
                    },
                    "openalex_endpoint": papers::endpoint(),
                    "export_dir": args.export_dir.display().to_string(),
                },
                "checks": checks,
            });
            match args.output.as_str() {
                "text" => {
                    println!("litsift doctor: {}", if ok { "ok" } else { "problems found" });
                    for c in payload["checks"].as_array().into_iter().flatten() {
                        let name = c["name"].as_str().unwrap_or("?");
                        let line_ok = c["ok"].as_bool().unwrap_or(false);
                        let message = c["message"].as_str().unwrap_or("");
                        if line_ok {
                            println!("- {name}: ok ({message})");
                        } else {
                            println!("- {name}: FAIL ({message})");
                            let hint = c["hint"].as_str().unwrap_or("");
                            if !hint.is_empty() {
                                println!("  hint: {hint}");
                            }
                        }
                    }
                }
                _ => println!("{payload}"),
            }
        }
        Commands::Version(args) => match args.output.as_str() {
            "text" => println!("litsift {}", env!("CARGO_PKG_VERSION")),
            _ => {
                let v = json!({
                    "schema_version": 1,
                    "kind": "version",
                    "ok": true,
                    "name": "litsift",
                    "version": env!("CARGO_PKG_VERSION"),
                });
                println!("{v}");
            }
        },
    }
    Ok(())
}
