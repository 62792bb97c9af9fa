//! Command-line interface for the sociogram engine.
//!
//! The `run` command loads faction and persona rows from JSON documents,
//! scores every ordered persona pair under the selected combination strategy,
//! optionally realizes a concrete following network, and renders the degree
//! ranking to stdout.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::SmallRng};
use sociogram_core::{
    CombinationStrategy, DegreeReport, FactionRegistry, NetworkReport, PersonaCatalog,
    Sociogram, SociogramBuilder, SociogramError,
};
use sociogram_providers_json::{JsonProviderError, read_faction_rows, read_persona_rows};
use thiserror::Error;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sociogram",
    about = "Score and realize a faction-driven following network."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Execute the scoring pipeline.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the faction rows JSON document.
    #[arg(long)]
    pub factions: PathBuf,

    /// Path to the persona rows JSON document.
    #[arg(long)]
    pub personas: PathBuf,

    /// Combination strategy for affinity and popularity.
    #[arg(long, value_enum, default_value = "union-baseline")]
    pub strategy: StrategyArg,

    /// Intra-faction scaling exponent (0 disables scaling).
    #[arg(long = "intra-exponent", default_value_t = 0.0)]
    pub intra_scaling_exponent: f64,

    /// Popularity offset used by the offset-union strategy.
    #[arg(long = "offset", default_value_t = 0.3)]
    pub popularity_offset: f64,

    /// Celebrity weight used by the celebrity-union strategy.
    #[arg(long = "celebrity-weight", default_value_t = 0.5)]
    pub celebrity_weight: f64,

    /// Draw a concrete network instead of reporting expected degrees.
    #[arg(long)]
    pub realize: bool,

    /// Seed for the random draw; entropy-seeded when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the scored edge list to this path as tab-separated lines.
    #[arg(long = "edges-out")]
    pub edges_out: Option<PathBuf>,
}

/// Combination strategies exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Probabilistic OR of affinity and popularity, affinity-gated.
    UnionBaseline,
    /// Union with population-scaled intra-faction affinities.
    UnionScaledIntra,
    /// Product of affinity and popularity ratio.
    Multiplicative,
    /// Affinity times the offset-shifted popularity ratio.
    OffsetUnion,
    /// Union of weighted popularity with affinity; not affinity-gated.
    CelebrityUnion,
}

impl From<StrategyArg> for CombinationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::UnionBaseline => Self::UnionBaseline,
            StrategyArg::UnionScaledIntra => Self::UnionScaledIntra,
            StrategyArg::Multiplicative => Self::Multiplicative,
            StrategyArg::OffsetUnion => Self::OffsetUnion,
            StrategyArg::CelebrityUnion => Self::CelebrityUnion,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input document or writing output.
    #[error("failed to access `{}`: {source}", path.display())]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// JSON ingestion failed.
    #[error(transparent)]
    Provider(#[from] JsonProviderError),
    /// Configuration validation failed.
    #[error(transparent)]
    Core(#[from] SociogramError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// The full pipeline output.
    pub report: NetworkReport,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading input, validating configuration, or
/// writing output fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sociogram_cli::cli::{Cli, Command, RunCommand, StrategyArg, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let factions = dir.path().join("factions.json");
/// let personas = dir.path().join("personas.json");
/// std::fs::write(
///     &factions,
///     r#"[{"faction": "Red", "intra_faction_following": "High"}]"#,
/// )?;
/// std::fs::write(
///     &personas,
///     r#"[
///         {"handle": "red1", "faction": "Red", "followers": 100},
///         {"handle": "red2", "faction": "Red"}
///     ]"#,
/// )?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         factions,
///         personas,
///         strategy: StrategyArg::UnionBaseline,
///         intra_scaling_exponent: 0.0,
///         popularity_offset: 0.3,
///         celebrity_weight: 0.5,
///         realize: false,
///         seed: None,
///         edges_out: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.report.persona_count(), 2);
/// assert_eq!(summary.report.edges().len(), 2);
/// # Ok(())
/// # }
/// ```
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => run_command(run),
    }
}

fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let engine = SociogramBuilder::new()
        .with_strategy(command.strategy.into())
        .with_intra_scaling_exponent(command.intra_scaling_exponent)
        .with_popularity_offset(command.popularity_offset)
        .with_celebrity_weight(command.celebrity_weight)
        .build()?;

    let faction_rows = read_faction_rows(open_reader(&command.factions)?)?;
    let persona_rows = read_persona_rows(open_reader(&command.personas)?)?;
    let registry = FactionRegistry::from_rows(faction_rows);
    let catalog = PersonaCatalog::build(persona_rows, &registry);

    let report = run_pipeline(&engine, &registry, &catalog, command.realize, command.seed);

    if let Some(path) = &command.edges_out {
        write_edges(&report, path)?;
    }

    Ok(ExecutionSummary { report })
}

fn run_pipeline(
    engine: &Sociogram,
    registry: &FactionRegistry,
    catalog: &PersonaCatalog,
    realize: bool,
    seed: Option<u64>,
) -> NetworkReport {
    if realize {
        let mut rng = seed.map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        engine.realize_report(registry, catalog, &mut rng)
    } else {
        engine.report(registry, catalog)
    }
}

fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn write_edges(report: &NetworkReport, path: &Path) -> Result<(), CliError> {
    let map_io = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(map_io)?;
    let mut writer = BufWriter::new(file);
    render_edges(report, &mut writer).map_err(map_io)?;
    writer.flush().map_err(map_io)
}

/// Renders the scored edge list as tab-separated lines, appending the
/// strategy sub-scores where the strategy computes them.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_edges(report: &NetworkReport, mut writer: impl Write) -> io::Result<()> {
    for edge in report.edges() {
        write!(
            writer,
            "{}\t{}\t{}",
            edge.source(),
            edge.target(),
            edge.probability()
        )?;
        if let Some(components) = edge.components() {
            write!(writer, "\t{}\t{}", components.faction, components.celebrity)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let report = &summary.report;
    if report.is_empty_population() {
        writeln!(writer, "no personas after filtering out ignored factions")?;
        return Ok(());
    }

    writeln!(writer, "personas: {}", report.persona_count())?;
    writeln!(writer, "edges scored: {}", report.edges().len())?;
    if let Some(network) = report.realized() {
        writeln!(
            writer,
            "edges realized: {} (forced: {})",
            network.edges().len(),
            network.forced_count()
        )?;
    }

    match report.degrees() {
        DegreeReport::Expected(ranking) => {
            writeln!(writer, "expected in-degree ranking:")?;
            for (position, entry) in ranking.iter().enumerate() {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{:.4}",
                    position + 1,
                    entry.handle(),
                    entry.display_name(),
                    entry.faction(),
                    entry.value()
                )?;
            }
        }
        DegreeReport::Actual(ranking) => {
            writeln!(writer, "actual in-degree ranking:")?;
            for (position, entry) in ranking.iter().enumerate() {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}",
                    position + 1,
                    entry.handle(),
                    entry.display_name(),
                    entry.faction(),
                    entry.value()
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    const FACTIONS: &str = r#"[
        {"faction": "Red", "intra_faction_following": "High"},
        {"faction": "Blue", "intra_faction_following": "None",
         "factions_who_never_follow": "Red"},
        {"faction": "Shadow", "ignore": 1}
    ]"#;

    const PERSONAS: &str = r#"[
        {"handle": "red1", "name": "Red One", "faction": "Red", "followers": 100},
        {"handle": "red2", "faction": "Red"},
        {"handle": "blue1", "faction": "Blue", "followers": 50},
        {"handle": "shadow1", "faction": "Shadow", "followers": 9000}
    ]"#;

    fn write_inputs(dir: &TempDir, factions: &str, personas: &str) -> (PathBuf, PathBuf) {
        let faction_path = dir.path().join("factions.json");
        let persona_path = dir.path().join("personas.json");
        fs::write(&faction_path, factions).expect("fixture must be writable");
        fs::write(&persona_path, personas).expect("fixture must be writable");
        (faction_path, persona_path)
    }

    fn run_args(factions: PathBuf, personas: PathBuf) -> RunCommand {
        RunCommand {
            factions,
            personas,
            strategy: StrategyArg::UnionBaseline,
            intra_scaling_exponent: 0.0,
            popularity_offset: 0.3,
            celebrity_weight: 0.5,
            realize: false,
            seed: None,
            edges_out: None,
        }
    }

    #[rstest]
    fn run_scores_and_ranks_expected_degrees() {
        let dir = TempDir::new().expect("temp dir must be creatable");
        let (factions, personas) = write_inputs(&dir, FACTIONS, PERSONAS);
        let cli = Cli {
            command: Command::Run(run_args(factions, personas)),
        };
        let summary = run_cli(cli).expect("run must succeed");

        // shadow1 is filtered with its ignored faction.
        assert_eq!(summary.report.persona_count(), 3);
        assert_eq!(summary.report.edges().len(), 6);
        let DegreeReport::Expected(ranking) = summary.report.degrees() else {
            panic!("non-realized runs must rank by expected degree");
        };
        let handles: Vec<&str> = ranking.iter().map(|entry| entry.handle().as_ref()).collect();
        assert_eq!(handles, vec!["red1", "red2", "blue1"]);
    }

    #[rstest]
    fn run_with_seed_is_reproducible() {
        let dir = TempDir::new().expect("temp dir must be creatable");
        let (factions, personas) = write_inputs(&dir, FACTIONS, PERSONAS);
        let run = |seed| {
            let mut args = run_args(factions.clone(), personas.clone());
            args.realize = true;
            args.seed = Some(seed);
            run_cli(Cli {
                command: Command::Run(args),
            })
            .expect("run must succeed")
        };
        let first = run(99);
        let second = run(99);
        let edges = |summary: &ExecutionSummary| {
            summary
                .report
                .realized()
                .expect("realization was requested")
                .edges()
                .to_vec()
        };
        assert_eq!(edges(&first), edges(&second));
    }

    #[rstest]
    fn run_writes_edge_list_when_requested() {
        let dir = TempDir::new().expect("temp dir must be creatable");
        let (factions, personas) = write_inputs(&dir, FACTIONS, PERSONAS);
        let edges_path = dir.path().join("edges.tsv");
        let mut args = run_args(factions, personas);
        args.edges_out = Some(edges_path.clone());
        let summary = run_cli(Cli {
            command: Command::Run(args),
        })
        .expect("run must succeed");

        let written = fs::read_to_string(&edges_path).expect("edge list must exist");
        assert_eq!(written.lines().count(), summary.report.edges().len());
        assert!(written.contains("red2\tred1\t1"));
    }

    #[rstest]
    fn run_reports_empty_population() {
        let dir = TempDir::new().expect("temp dir must be creatable");
        let (factions, personas) = write_inputs(
            &dir,
            r#"[{"faction": "Shadow", "ignore": true}]"#,
            r#"[{"handle": "shadow1", "faction": "Shadow"}]"#,
        );
        let summary = run_cli(Cli {
            command: Command::Run(run_args(factions, personas)),
        })
        .expect("an empty population is not an error");
        assert!(summary.report.is_empty_population());

        let mut buffer = Vec::new();
        render_summary(&summary, &mut buffer).expect("rendering must succeed");
        let text = String::from_utf8(buffer).expect("output must be UTF-8");
        assert!(text.contains("no personas"));
    }

    #[rstest]
    fn run_rejects_missing_input_files() {
        let dir = TempDir::new().expect("temp dir must be creatable");
        let err = run_cli(Cli {
            command: Command::Run(run_args(
                dir.path().join("absent.json"),
                dir.path().join("also-absent.json"),
            )),
        })
        .expect_err("missing inputs must fail");
        assert!(matches!(err, CliError::Io { .. }));
    }

    #[rstest]
    fn run_rejects_invalid_configuration() {
        let dir = TempDir::new().expect("temp dir must be creatable");
        let (factions, personas) = write_inputs(&dir, FACTIONS, PERSONAS);
        let mut args = run_args(factions, personas);
        args.popularity_offset = 1.5;
        let err = run_cli(Cli {
            command: Command::Run(args),
        })
        .expect_err("out-of-range offset must fail");
        assert!(matches!(
            err,
            CliError::Core(SociogramError::InvalidPopularityOffset { .. })
        ));
    }

    #[rstest]
    fn render_summary_includes_realized_counts() {
        let dir = TempDir::new().expect("temp dir must be creatable");
        let (factions, personas) = write_inputs(&dir, FACTIONS, PERSONAS);
        let mut args = run_args(factions, personas);
        args.realize = true;
        args.seed = Some(5);
        let summary = run_cli(Cli {
            command: Command::Run(args),
        })
        .expect("run must succeed");

        let mut buffer = Vec::new();
        render_summary(&summary, &mut buffer).expect("rendering must succeed");
        let text = String::from_utf8(buffer).expect("output must be UTF-8");
        assert!(text.contains("personas: 3"));
        assert!(text.contains("edges realized:"));
        assert!(text.contains("actual in-degree ranking:"));
    }

    #[test]
    fn clap_defaults_to_the_baseline_strategy() {
        let args = [
            "sociogram",
            "run",
            "--factions",
            "factions.json",
            "--personas",
            "personas.json",
        ];
        let cli = Cli::try_parse_from(args).expect("defaults must parse");
        let Command::Run(run) = cli.command;
        assert_eq!(run.strategy, StrategyArg::UnionBaseline);
        assert_eq!(run.intra_scaling_exponent, 0.0);
        assert!(!run.realize);
        assert!(run.seed.is_none());
    }

    #[test]
    fn clap_rejects_unknown_strategy() {
        let args = [
            "sociogram",
            "run",
            "--factions",
            "factions.json",
            "--personas",
            "personas.json",
            "--strategy",
            "unsupported",
        ];
        let result = Cli::try_parse_from(args);
        assert!(result.is_err());
    }
}
