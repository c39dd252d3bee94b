use clap::{ArgAction, Parser};
use composeuml::SchemaPolicy;
use composeuml::render::{Translator, Views};
use std::io::{Read, Write};
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt, prelude::*};

#[derive(Debug)]
enum CliError {
    Io { input: String, err: std::io::Error },
    Translate { input: String, err: composeuml::Error },
    Output(std::io::Error),
    Logging(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io { input, err } => write!(f, "I/O error reading {input}: {err}"),
            CliError::Translate { input, err } => write!(f, "{input}: {err}"),
            CliError::Output(err) => write!(f, "I/O error writing output: {err}"),
            CliError::Logging(msg) => write!(f, "invalid RUST_LOG: {msg}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Output(value)
    }
}

impl From<tracing_subscriber::filter::FromEnvError> for CliError {
    fn from(value: tracing_subscriber::filter::FromEnvError) -> Self {
        Self::Logging(value.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(name = "composeuml")]
#[command(version)]
#[command(about = "Print PlantUML component diagrams for docker-compose files")]
struct Cli {
    /// Print a graph of every service with its links and dependencies.
    #[arg(long = "link-graph")]
    link_graph: bool,

    /// Print the system boundaries: ports, volumes and routing rules.
    #[arg(long)]
    boundaries: bool,

    /// Print the system boundaries restricted to published ports.
    #[arg(long = "port_boundaries", visible_alias = "port-boundaries")]
    port_boundaries: bool,

    /// Print the system boundaries restricted to volumes.
    #[arg(long = "volume_boundaries", visible_alias = "volume-boundaries")]
    volume_boundaries: bool,

    /// Print the system boundaries restricted to Traefik routing rules.
    #[arg(
        long = "traefik_boundaries",
        visible_aliases = ["traefik-boundaries", "routing-boundaries"]
    )]
    traefik_boundaries: bool,

    /// Show service labels as notes.
    #[arg(long)]
    notes: bool,

    /// Group volumes, ports and routing rules into packages.
    #[arg(long)]
    group: bool,

    /// Reject documents whose `version` marker is missing or differs from VERSION.
    #[arg(long = "require-version", value_name = "VERSION")]
    require_version: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv, -vvvv).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Compose files to read; none or `-` reads stdin.
    #[arg(value_name = "FILES")]
    files: Vec<String>,
}

impl Cli {
    fn views(&self) -> Views {
        Views {
            link_graph: self.link_graph,
            boundaries: self.boundaries,
            port_boundaries: self.port_boundaries,
            volume_boundaries: self.volume_boundaries,
            routing_boundaries: self.traefik_boundaries,
            notes: self.notes,
            group: self.group,
        }
    }

    fn policy(&self) -> SchemaPolicy {
        match &self.require_version {
            Some(version) => SchemaPolicy::require_version(version.as_str()),
            None => SchemaPolicy::lenient(),
        }
    }

    fn inputs(&self) -> Vec<&str> {
        if self.files.is_empty() {
            return vec!["-"];
        }
        self.files.iter().map(String::as_str).collect()
    }
}

fn init_tracing(verbose: u8) -> Result<(), CliError> {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::try_from_default_env()?
    } else {
        let level = match verbose {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("error,composeuml={level}"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn read_input(input: &str) -> Result<String, CliError> {
    let read = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(input)
    };
    read.map_err(|err| CliError::Io {
        input: display_name(input).to_string(),
        err,
    })
}

fn display_name(input: &str) -> &str {
    if input == "-" { "<stdin>" } else { input }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let translator = Translator::new(cli.views()).with_policy(cli.policy());
    if translator.views().is_empty() {
        tracing::warn!("no view selected; pass --link-graph or one of the --*boundaries flags");
    }

    let mut stdout = std::io::stdout().lock();
    for input in cli.inputs() {
        let text = read_input(input)?;
        tracing::info!(input = display_name(input), bytes = text.len(), "translating");
        let output = translator
            .translate(&text)
            .map_err(|err| CliError::Translate {
                input: display_name(input).to_string(),
                err,
            })?;
        writeln!(stdout, "{output}")?;
    }
    stdout.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("{err}");
        std::process::exit(2);
    }

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
