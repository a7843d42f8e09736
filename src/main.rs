use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use godefinfo::config::ConfigError;
use godefinfo::{Backend, CheckedFile, Config, QueryError, SnapshotError, output, snapshot};

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "GODEFINFO_LOG";

/// godefinfo: print the definition of the Go identifier at an offset
#[derive(Parser, Debug)]
#[command(name = "godefinfo", version, about)]
struct Args {
    /// Front-end dump of the checked file (JSON)
    #[arg(short = 'f', value_name = "SNAPSHOT", required_unless_present = "stdin")]
    file: Option<PathBuf>,

    /// Read the dump from stdin
    #[arg(short = 'i', conflicts_with = "file")]
    stdin: bool,

    /// Byte offset of the identifier
    #[arg(short = 'o', value_name = "OFFSET")]
    offset: u32,

    /// Print a structured JSON record
    #[arg(long)]
    json: bool,

    /// Treat all front-end errors except unused values as fatal
    #[arg(long)]
    strict: bool,

    /// Log resolution steps to stderr
    #[arg(long)]
    debug: bool,

    /// Config file (defaults to <config dir>/godefinfo/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Repeat the whole query this many times (for profiling)
    #[arg(long = "debug.repetitions", value_name = "N", default_value_t = 1)]
    repetitions: u32,
}

#[derive(Debug, thiserror::Error)]
enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

fn init_tracing(config: &Config, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if let Ok(directive) = std::env::var(LOG_ENV) {
        EnvFilter::builder().parse_lossy(directive)
    } else {
        EnvFilter::new(config.log_filter.as_deref().unwrap_or("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Where the dump comes from.  Stdin can only be read once, so its bytes
/// are kept and re-parsed on every repetition.
enum Source {
    File(PathBuf),
    Bytes(Vec<u8>),
}

impl Source {
    fn load(&self) -> Result<CheckedFile, SnapshotError> {
        match self {
            Source::File(path) => snapshot::load_path(path),
            Source::Bytes(bytes) => snapshot::load(bytes.as_slice()),
        }
    }
}

fn run(args: &Args, backend: &Backend) -> Result<String, DriverError> {
    let source = match &args.file {
        Some(path) if !args.stdin => Source::File(path.clone()),
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(SnapshotError::from)?;
            Source::Bytes(bytes)
        }
    };

    let mut rendered = String::new();
    for round in 0..args.repetitions.max(1) {
        let file = source.load()?;
        let desc = backend.query(&file, args.offset)?;
        debug!(round, %desc, "resolved");
        rendered = if backend.config().json {
            output::render_json(&desc, backend.config().goroot().as_deref())?
        } else {
            output::render_text(&desc)
        };
    }
    Ok(rendered)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = match Config::load_with_override(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("godefinfo: {}", DriverError::from(err));
            return ExitCode::FAILURE;
        }
    };
    config.json |= args.json;
    config.strict |= args.strict;
    init_tracing(&config, args.debug);

    let backend = Backend::new(config);
    match run(&args, &backend) {
        Ok(out) => {
            print!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("godefinfo: {}", err);
            ExitCode::FAILURE
        }
    }
}
