use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glyphseed::{GenerationParams, InsigniaSession, Millis, PaletteMode, SessionOpts};

#[derive(Parser, Debug)]
#[command(name = "glyphseed", version)]
struct Cli {
    /// Session configuration JSON (missing fields take defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seed and display metadata for a text.
    Seed(TextArgs),
    /// Print the derived generation parameters as JSON.
    Params(TextArgs),
    /// Write the vector export.
    Svg(SvgArgs),
    /// Rasterize the export to PNG.
    Png(PngArgs),
    /// Feed live edits through a session and report what ran.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct TextArgs {
    /// Input text.
    text: String,

    /// Palette mode: auto, cool, warm, sunset, or neon. Anything else means auto.
    #[arg(long, default_value = "auto")]
    mode: PaletteMode,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    input: TextArgs,

    /// Output path. Defaults to the seed-derived file name in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PngArgs {
    #[command(flatten)]
    input: TextArgs,

    /// Edge length in pixels. Missing or unparsable values use the configured default.
    #[arg(long)]
    size: Option<String>,

    /// Output path. Defaults to the seed-derived file name in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Successive values of the text input.
    #[arg(required = true)]
    edits: Vec<String>,

    #[arg(long, default_value = "auto")]
    mode: PaletteMode,

    /// Time between edits.
    #[arg(long, default_value_t = 50.0)]
    interval_ms: f64,

    /// Write the settled frame markup here.
    #[arg(long)]
    frame_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let opts = load_opts(cli.config.as_deref())?;
    match cli.cmd {
        Command::Seed(args) => cmd_seed(args),
        Command::Params(args) => cmd_params(args),
        Command::Svg(args) => cmd_svg(args, opts),
        Command::Png(args) => cmd_png(args, opts),
        Command::Replay(args) => cmd_replay(args, opts),
    }
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<SessionOpts> {
    let Some(path) = path else {
        return Ok(SessionOpts::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let opts = SessionOpts::from_json(&json)
        .with_context(|| format!("parse config '{}'", path.display()))?;
    Ok(opts)
}

fn write_out(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_seed(args: TextArgs) -> anyhow::Result<()> {
    if args.text.trim().is_empty() {
        anyhow::bail!("text is empty; nothing to seed");
    }
    let params = GenerationParams::derive(args.text.trim(), args.mode);
    println!("{}", params.seed_hex());
    for tag in params.meta_tags() {
        println!("{tag}");
    }
    println!("{}", InsigniaSession::text_hint(&args.text));
    Ok(())
}

fn cmd_params(args: TextArgs) -> anyhow::Result<()> {
    let params = GenerationParams::derive(args.text.trim(), args.mode);
    let json = serde_json::to_string_pretty(&params).context("serialize parameters")?;
    println!("{json}");
    Ok(())
}

fn session_for(input: &TextArgs, opts: SessionOpts) -> anyhow::Result<InsigniaSession> {
    let mut session = InsigniaSession::new(opts);
    session.set_mode(input.mode);
    session.generate_now(&input.text)?;
    Ok(session)
}

fn cmd_svg(args: SvgArgs, opts: SessionOpts) -> anyhow::Result<()> {
    let mut session = session_for(&args.input, opts)?;
    let artifact = session.export_svg()?;
    let out = args.out.unwrap_or_else(|| PathBuf::from(&artifact.filename));
    write_out(&out, &artifact.bytes)
}

fn cmd_png(args: PngArgs, opts: SessionOpts) -> anyhow::Result<()> {
    let size = match args.size.as_deref() {
        Some(raw) => glyphseed::parse_export_size(Some(raw))?,
        None => opts.default_export_size,
    };
    let mut session = session_for(&args.input, opts)?;
    let artifact = session.export_png(Some(size))?;
    let out = args.out.unwrap_or_else(|| PathBuf::from(&artifact.filename));
    write_out(&out, &artifact.bytes)?;
    println!("{}", session.status().message);
    Ok(())
}

fn cmd_replay(args: ReplayArgs, opts: SessionOpts) -> anyhow::Result<()> {
    let mut session = InsigniaSession::new(opts);
    session.set_mode(args.mode);
    let step = Millis(args.interval_ms.max(0.0));
    for edit in &args.edits {
        session.input(edit);
        session.advance(step);
    }
    session.run_until_idle();

    let stats = session.stats();
    match session.seed_label() {
        Some(label) => println!("{label}"),
        None => println!("(empty)"),
    }
    println!(
        "builds={} cold_starts={} reconciles={} superseded_inputs={} stale_tasks={}",
        stats.builds, stats.cold_starts, stats.reconciles, stats.superseded_inputs, stats.stale_tasks
    );

    if let Some(path) = args.frame_out {
        let markup = session
            .frame_markup()
            .context("the surface has nothing drawn")?;
        write_out(&path, markup.as_bytes())?;
    }
    Ok(())
}
