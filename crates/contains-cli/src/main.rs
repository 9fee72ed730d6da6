//! Command-line interface for `contains-core`.
//!
//! Checks whether a needle document is structurally contained in a haystack
//! document and reports every mismatch. The exit code is 0 when the needle
//! is contained, 1 when mismatches were found and 2 on usage or I/O errors.

mod logging;

use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use contains_core::{contains_with, Collector, ContainsOptions, Mismatch, Node, Path, Report, Reporter};
use tracing::{debug, info};

const EXIT_CONTAINED: i32 = 0;
const EXIT_MISMATCH: i32 = 1;
const EXIT_ERROR: i32 = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    /// One message per mismatch.
    #[default]
    Text,
    /// A JSON array of mismatch objects.
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "deep-contains",
    version,
    about = "Check that a JSON or YAML document is structurally contained in another.",
    override_usage = "deep-contains [OPTION]... HAYSTACK [NEEDLE]",
    after_help = "When NEEDLE is omitted the needle is read from STDIN.\n\n\
                  Examples:\n  \
                  deep-contains response.json expected.json\n  \
                  curl -s localhost/users | deep-contains --yaml fixture.yaml -\n  \
                  deep-contains --strict-arrays --format json a.json b.json"
)]
struct Cli {
    /// Compare arrays strictly by position.
    #[arg(long = "strict-arrays", action = ArgAction::SetTrue)]
    strict_arrays: bool,

    /// Deliver composite needle values to the comparison as well.
    #[arg(long = "no-skip-containers", action = ArgAction::SetTrue)]
    no_skip_containers: bool,

    /// Maximum needle depth before the check fails.
    #[arg(long = "max-depth")]
    max_depth: Option<usize>,

    /// Candidate pairings enumerated before switching to the assignment solver.
    #[arg(long = "permutation-limit")]
    permutation_limit: Option<usize>,

    /// JSON object of options, e.g. '{"arrayStrictComparison":true}'. Explicit flags win.
    #[arg(long = "opts")]
    opts: Option<String>,

    /// Stop after reporting N mismatches.
    #[arg(long = "limit")]
    limit: Option<usize>,

    /// Read inputs as YAML instead of JSON.
    #[arg(long = "yaml", action = ArgAction::SetTrue)]
    yaml: bool,

    /// Output format for mismatches.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write output to FILE instead of STDOUT.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long = "log-json", action = ArgAction::SetTrue)]
    log_json: bool,

    /// Positional inputs (HAYSTACK \[NEEDLE]).
    #[arg()]
    inputs: Vec<OsString>,
}

fn main() {
    match try_main() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            let _ = writeln!(io::stderr(), "{err:#}");
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn try_main() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_json)?;
    run(&cli)
}

fn run(cli: &Cli) -> Result<i32> {
    let (haystack_source, needle_source) = input_sources(&cli.inputs)?;

    let haystack_text = read_input(&haystack_source)?;
    let needle_text = read_input(&needle_source)?;
    let haystack = parse_node(&haystack_text, cli.yaml).context("failed to parse haystack")?;
    let needle = parse_node(&needle_text, cli.yaml).context("failed to parse needle")?;

    let options = build_options(cli)?;
    debug!(?options, "running containment check");

    let collector = match cli.limit {
        Some(0) => bail!("--limit must be at least 1"),
        Some(limit) => Collector::new().with_limit(limit),
        None => Collector::new(),
    };
    let mut tally = Tally { collector, compared: 0 };
    contains_with(&haystack, &needle, &mut tally, &options).context("containment check failed")?;
    let compared = tally.compared;
    let report = tally.collector.into_report();
    info!(compared, mismatches = report.len(), "containment check finished");

    let rendered = render(&report, cli.format)?;
    if let Some(path) = &cli.output {
        fs::write(path, rendered.as_bytes())
            .with_context(|| format!("failed to write output to {}", path.display()))?;
    } else {
        print!("{rendered}");
        io::stdout().flush().ok();
    }

    Ok(if report.is_empty() { EXIT_CONTAINED } else { EXIT_MISMATCH })
}

// Counts compared values on top of the collector's strict equality.
struct Tally {
    collector: Collector,
    compared: usize,
}

impl Reporter for Tally {
    fn on_match(&mut self, actual: &Node, expected: &Node, path: &Path) {
        self.compared += 1;
        self.collector.on_match(actual, expected, path);
    }

    fn on_mismatch(&mut self, mismatch: Mismatch) {
        debug!(kind = %mismatch.kind, path = %mismatch.path, "mismatch");
        self.collector.on_mismatch(mismatch);
    }

    fn should_stop(&self) -> bool {
        self.collector.should_stop()
    }
}

fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render()),
        OutputFormat::Json => {
            let mut rendered =
                serde_json::to_string_pretty(report).context("failed to serialize mismatches")?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum InputSource {
    File(PathBuf),
    Stdin,
}

fn input_sources(inputs: &[OsString]) -> Result<(InputSource, InputSource)> {
    match inputs {
        [haystack] => pair_sources(source_from(haystack)?, InputSource::Stdin),
        [haystack, needle] => pair_sources(source_from(haystack)?, source_from(needle)?),
        [] => bail!("missing HAYSTACK argument; see --help"),
        _ => bail!("expected at most two inputs (HAYSTACK [NEEDLE]); got {}", inputs.len()),
    }
}

fn pair_sources(haystack: InputSource, needle: InputSource) -> Result<(InputSource, InputSource)> {
    if haystack == InputSource::Stdin && needle == InputSource::Stdin {
        bail!("only one input can be read from STDIN");
    }
    Ok((haystack, needle))
}

fn source_from(input: &OsString) -> Result<InputSource> {
    if input == "-" {
        return Ok(InputSource::Stdin);
    }
    let path = PathBuf::from(input);
    if path.as_os_str().is_empty() {
        bail!("expected file path; got empty string");
    }
    Ok(InputSource::File(path))
}

fn read_input(source: &InputSource) -> Result<String> {
    match source {
        InputSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        InputSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read STDIN")?;
            Ok(buffer)
        }
    }
}

fn parse_node(input: &str, yaml: bool) -> Result<Node> {
    if yaml {
        Node::from_yaml_str(input).map_err(|err| anyhow!(err))
    } else {
        Node::from_json_str(input).map_err(|err| anyhow!(err))
    }
}

fn build_options(cli: &Cli) -> Result<ContainsOptions> {
    let mut options = match &cli.opts {
        Some(raw) => ContainsOptions::from_json_str(raw.trim())
            .with_context(|| format!("failed to parse --opts: {raw}"))?,
        None => ContainsOptions::default(),
    };

    if cli.strict_arrays {
        options = options.with_array_strict_comparison(true);
    }
    if cli.no_skip_containers {
        options = options.with_skip_containers(false);
    }
    if let Some(depth) = cli.max_depth {
        options = options.with_max_depth(depth).context("invalid --max-depth")?;
    }
    if let Some(limit) = cli.permutation_limit {
        options = options.with_permutation_limit(limit).context("invalid --permutation-limit")?;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deep-contains").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    #[test]
    fn flags_override_opts_json() {
        let cli = cli(&[
            "--opts",
            r#"{"arrayStrictComparison":false,"maxDepth":8}"#,
            "--strict-arrays",
            "--max-depth",
            "16",
            "a.json",
        ]);
        let options = build_options(&cli).unwrap();
        assert!(options.array_strict_comparison());
        assert_eq!(options.max_depth(), 16);
        assert!(options.skip_containers());
    }

    #[test]
    fn opts_json_alone_is_applied() {
        let cli = cli(&["--opts", r#"{"skipContainers":false,"permutationLimit":6}"#, "a.json"]);
        let options = build_options(&cli).unwrap();
        assert!(!options.skip_containers());
        assert_eq!(options.permutation_limit(), 6);
    }

    #[test]
    fn invalid_flag_values_are_rejected() {
        assert!(build_options(&cli(&["--max-depth", "0", "a.json"])).is_err());
        assert!(build_options(&cli(&["--opts", r#"{"bogus":1}"#, "a.json"])).is_err());
    }

    #[test]
    fn single_input_reads_needle_from_stdin() {
        let sources = input_sources(&[OsString::from("a.json")]).unwrap();
        assert_eq!(sources, (InputSource::File(PathBuf::from("a.json")), InputSource::Stdin));
    }

    #[test]
    fn dash_selects_stdin_once() {
        let sources = input_sources(&[OsString::from("-"), OsString::from("b.json")]).unwrap();
        assert_eq!(sources.0, InputSource::Stdin);
        assert!(input_sources(&[OsString::from("-"), OsString::from("-")]).is_err());
        let err = input_sources(&[OsString::from("-")]).unwrap_err();
        assert!(err.to_string().contains("only one input can be read from STDIN"), "{err}");
    }

    #[test]
    fn input_count_is_validated() {
        assert!(input_sources(&[]).is_err());
        let three = [OsString::from("a"), OsString::from("b"), OsString::from("c")];
        assert!(input_sources(&three).is_err());
    }

    #[test]
    fn output_format_default_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(cli(&["a.json"]).format, OutputFormat::Text);
    }

    #[test]
    fn json_rendering_of_empty_report_is_empty_array() {
        let rendered = render(&Report::default(), OutputFormat::Json).unwrap();
        assert_eq!(rendered, "[]\n");
    }

    #[test]
    fn tally_counts_compared_leaves() {
        let haystack = Node::from_json_str(r#"{"a":1,"b":[1,2]}"#).unwrap();
        let needle = Node::from_json_str(r#"{"a":1,"b":[1,3]}"#).unwrap();
        let mut tally = Tally { collector: Collector::new(), compared: 0 };
        contains_with(&haystack, &needle, &mut tally, &ContainsOptions::default()).unwrap();
        assert_eq!(tally.compared, 3);
        assert_eq!(tally.collector.into_report().len(), 1);
    }
}
