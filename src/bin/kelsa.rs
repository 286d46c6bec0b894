use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kelsa::{
    CharCountLevel, Clock, DirectoryDownloads, DraftStore, ExportTrigger, Field, FileBackend,
    FixedClock, FormController, KelsaConfig, LetterRecord, NotificationKind, NotificationPort,
    PdfAssembler, PreviewPage, SubmitOutcome, SvgSnapshot, SystemClock, validate_field,
};

#[derive(Parser, Debug)]
#[command(name = "kelsa", version)]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the form fields and their constraints.
    Fields,
    /// Validate every field of a letter JSON file.
    Validate(LetterArgs),
    /// Submit a letter and print what the preview page shows.
    Preview(LetterArgs),
    /// Submit a letter, preview it and export it as a PDF.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct LetterArgs {
    /// Input letter JSON (flat object keyed by field name).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Treat this day (YYYY-MM-DD) as today.
    #[arg(long)]
    today: Option<NaiveDate>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    letter: LetterArgs,

    /// Directory the PDF is written into.
    #[arg(long)]
    out_dir: PathBuf,

    /// Optional JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep the session store in this directory instead of memory.
    #[arg(long)]
    session: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;
    match cli.cmd {
        Command::Fields => cmd_fields(),
        Command::Validate(args) => cmd_validate(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing(debug: bool) -> anyhow::Result<()> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}

/// Prints user-facing notifications to stderr.
struct ConsoleNotifier;

impl NotificationPort for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NotificationKind) {
        eprintln!("[{kind}] {message}");
    }
}

fn clock(today: Option<NaiveDate>) -> Arc<dyn Clock> {
    match today {
        Some(day) => Arc::new(FixedClock(day)),
        None => Arc::new(SystemClock),
    }
}

fn cmd_fields() -> anyhow::Result<()> {
    for field in Field::ALL {
        let c = field.constraints();
        println!(
            "{:<18} {:<18} {:<9} {:?}",
            field.key(),
            c.label,
            if c.required { "required" } else { "optional" },
            c.kind
        );
    }
    Ok(())
}

fn cmd_validate(args: LetterArgs) -> anyhow::Result<()> {
    let record = LetterRecord::from_path(&args.in_path)?;
    let today = clock(args.today).today();

    let mut failed_required = 0usize;
    for field in Field::ALL {
        let value = record.raw(field).unwrap_or_default();
        let verdict = validate_field(value, &field.constraints(), today);
        if verdict.valid {
            println!("{:<18} ok", field.key());
        } else {
            println!("{:<18} error: {}", field.key(), verdict.message);
            if field.is_required() {
                failed_required += 1;
            }
        }
    }
    for key in record.unknown_keys() {
        tracing::warn!(key, "ignoring unknown field");
    }

    if failed_required > 0 {
        anyhow::bail!("{failed_required} required field(s) invalid");
    }
    Ok(())
}

fn cmd_preview(args: LetterArgs) -> anyhow::Result<()> {
    let notifier: Arc<dyn NotificationPort> = Arc::new(ConsoleNotifier);
    let page = submit_letter(
        &args,
        DraftStore::in_memory(),
        &KelsaConfig::default(),
        Arc::clone(&notifier),
    )?;
    println!(
        "{}",
        serde_json::to_string_pretty(page.display()).context("serialize display model")?
    );
    page.leave()?.end_session()?;
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => KelsaConfig::from_path(path)?,
        None => KelsaConfig::default(),
    };
    let store = match &args.session {
        Some(dir) => DraftStore::new(Box::new(FileBackend::new(dir))),
        None => cfg.open_store(),
    };
    let notifier: Arc<dyn NotificationPort> = Arc::new(ConsoleNotifier);

    let mut page = submit_letter(&args.letter, store, &cfg, Arc::clone(&notifier))?;

    let trigger = ExportTrigger::new(
        Box::new(SvgSnapshot::with_font_dirs(cfg.page, &cfg.font_dirs)),
        Box::new(PdfAssembler::new(cfg.jpeg_quality)?),
        Box::new(DirectoryDownloads::new(&args.out_dir)),
        notifier,
        clock(args.letter.today),
    )
    .with_scale(cfg.snapshot_scale)
    .with_page(cfg.page);

    let path = page.export(&trigger)?;
    page.leave()?.end_session()?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

/// Drive the form page with the file's values, submit, and open the preview page.
fn submit_letter(
    args: &LetterArgs,
    store: DraftStore,
    cfg: &KelsaConfig,
    notifier: Arc<dyn NotificationPort>,
) -> anyhow::Result<PreviewPage> {
    let record = LetterRecord::from_path(&args.in_path)?;
    let mut form = FormController::open(store, Arc::clone(&notifier), clock(args.today))?
        .with_char_limits(cfg.char_limits());

    for (key, value) in record.entries() {
        let Some(field) = Field::from_key(key) else {
            tracing::warn!(key, "ignoring unknown field");
            continue;
        };
        form.on_input(field, value)?;
        let verdict = form.on_blur(field);
        if !verdict.valid {
            eprintln!("{:<18} {}", field.key(), verdict.message);
        }
    }

    match form.body_char_level() {
        CharCountLevel::Normal => {}
        level => tracing::warn!(
            chars = form.body_char_count(),
            ?level,
            "letter body is long"
        ),
    }

    if let SubmitOutcome::Rejected { invalid } = form.submit()? {
        let names: Vec<&str> = invalid.iter().map(|f| f.key()).collect();
        anyhow::bail!("letter rejected, fix: {}", names.join(", "));
    }

    let handoff = form.handoff()?;
    Ok(PreviewPage::from_handoff(handoff, notifier)?)
}
