use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use ildacast_core::protocols::iwp::layout::DEFAULT_PORT;
use ildacast_core::{
    AnimationReport, ColorDepth, PlaybackStats, Player, PlayerConfig, Repeat, SendErrorPolicy,
    StopFlag, UdpTransport,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("ILDACAST_BUILD_COMMIT"),
    ", ",
    env!("ILDACAST_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "\
Examples:
  ildacast play show.ild --ip 192.168.1.123 --scan 1000 --repeat 0
  ildacast play show.ild --ip 192.168.1.123 --scan 100000 --fps 30 --repeat 100
  ildacast inspect show.ild --stdout --pretty";

#[derive(Parser, Debug)]
#[command(name = "ildacast")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Stream ILDA laser animations to an ILDAWaveX16 controller over UDP (IWP).",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Stream an ILDA file to a controller in real time.
    #[command(after_help = EXAMPLES)]
    Play(PlayArgs),
    /// Decode an ILDA file and write a JSON summary of its frames.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Path to an .ild file
    input: PathBuf,

    /// Controller IP address
    #[arg(long)]
    ip: IpAddr,

    /// Controller UDP port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Scan rate in Hz
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
    scan: u32,

    /// Pause 1/FPS seconds after every packet (0 sends as fast as possible)
    #[arg(long, default_value_t = 0.0)]
    fps: f64,

    /// How many times to play the file (0 = until interrupted)
    #[arg(long, default_value_t = 1)]
    repeat: u32,

    /// Color depth of point records on the wire
    #[arg(long, value_enum, default_value_t = Depth::Sixteen)]
    depth: Depth,

    /// Keep streaming when a datagram cannot be sent
    #[arg(long)]
    skip_send_errors: bool,

    /// Send a turn-off datagram when playback ends or is interrupted
    #[arg(long)]
    off_on_exit: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Path to an .ild file
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Exit with a non-zero code if the scan stopped before the end of the file
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Depth {
    /// 8-bit color channels (type 2 records)
    #[value(name = "8")]
    Eight,
    /// 16-bit color channels (type 3 records)
    #[value(name = "16")]
    Sixteen,
}

impl From<Depth> for ColorDepth {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Eight => ColorDepth::Rgb8,
            Depth::Sixteen => ColorDepth::Rgb16,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Play(args) => cmd_play(args, cli.quiet),
        Commands::Inspect(args) => cmd_inspect(args, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_play(args: PlayArgs, quiet: bool) -> Result<(), CliError> {
    if !args.fps.is_finite() || args.fps < 0.0 {
        return Err(CliError::new(
            format!("invalid --fps value: {}", args.fps),
            Some("use 0 to disable pacing or a positive rate in Hz".to_string()),
        ));
    }

    let input = resolve_input_path(&args.input)?;
    validate_input_file(&input)?;

    let animation = ildacast_core::load_animation_file(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if animation.frames.is_empty() {
        return Err(CliError::new(
            format!("no frames decoded from {}", input.display()),
            Some(format!(
                "scan stopped: {}; expected an ILDA file with format 0, 1, 4 or 5 sections",
                animation.end
            )),
        ));
    }
    if !animation.end.is_complete() {
        tracing::warn!(end = %animation.end, "playing the frames decoded before the scan stopped");
    }

    let target = SocketAddr::new(args.ip, args.port);
    let stop = StopFlag::new();
    let handler_flag = stop.clone();
    ctrlc::set_handler(move || handler_flag.request_stop())
        .context("Failed to install interrupt handler")?;

    let transport = UdpTransport::bind(target)
        .with_context(|| format!("Failed to open UDP socket for {}", target))?;
    let config = PlayerConfig {
        scan_rate_hz: args.scan,
        pacing: None,
        repeat: Repeat::from_count(args.repeat),
        depth: args.depth.into(),
        send_error_policy: if args.skip_send_errors {
            SendErrorPolicy::Skip
        } else {
            SendErrorPolicy::Abort
        },
        turn_off_on_exit: args.off_on_exit,
    }
    .with_pacing_rate(args.fps);

    let mut player = Player::new(transport, config)
        .with_context(|| format!("Failed to configure scan period on {}", target))?;
    let stats = player
        .play(&animation.frames, &stop)
        .with_context(|| format!("Streaming to {} failed", target))?;

    if !quiet {
        print_playback_summary(&stats, target);
    }
    Ok(())
}

fn print_playback_summary(stats: &PlaybackStats, target: SocketAddr) {
    let status = if stats.interrupted { "interrupted" } else { "OK" };
    eprintln!(
        "{}: streamed {} frames ({} packets, {} bytes) to {} in {} loop(s)",
        status,
        stats.frames_sent,
        stats.packets_sent,
        stats.bytes_sent,
        target,
        stats.loops_completed
    );
    if stats.packets_skipped > 0 {
        eprintln!("  {} packets skipped after send errors", stats.packets_skipped);
    }
    eprintln!(
        "  started {} finished {}",
        format_timestamp(stats.started_at),
        format_timestamp(stats.finished_at)
    );
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| "unknown".to_string())
}

fn cmd_inspect(args: InspectArgs, quiet: bool) -> Result<(), CliError> {
    let InspectArgs {
        input,
        report,
        stdout,
        pretty,
        compact,
        strict,
    } = args;

    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;
    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let rep = ildacast_core::inspect_file(&resolved_input).context("ILDA inspection failed")?;
    let json = serialize_report(&rep, pretty, compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if strict && !rep.scan_complete {
        return Err(CliError::new(
            format!("scan stopped early: {}", rep.scan_end),
            Some("the file is truncated or contains unsupported sections".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let report_dir = report_path
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose();
    // A parent that does not exist yet cannot hold the input file.
    let Ok(Some(report_dir)) = report_dir else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(
    rep: &AnimationReport,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path to an .ild file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path to an .ild file".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "ild" && ext != "ilda" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected an .ild or .ilda file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected an .ild file".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single animation file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
