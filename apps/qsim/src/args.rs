//! Command-line argument parsing.
//!
//! `parse_from` takes any iterator of strings so it can be tested without
//! touching `std::env::args()`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use qs_model::{ModelParams, QueueModel};

pub const USAGE: &str = "\
qsim: queue simulation, goodness-of-fit and analytic queueing formulas

USAGE:
    qsim simulate <scenario.json> [--out DIR] [--seed N]
    qsim model <M/M/1|M/G/1|M/M/c|M/G/c|G/G/c> --lambda L --mu M
               [--servers C] [--sigma S] [--ca CA] [--n N] [--json]
    qsim help

Set RUST_LOG=debug for per-run detail.
";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Run a scenario file.
    Simulate {
        scenario: PathBuf,
        /// Directory for CSV output; nothing is written when absent.
        out_dir:  Option<PathBuf>,
        /// Replaces the scenario's seed.
        seed:     Option<u64>,
    },
    /// Evaluate a closed-form model.
    Model {
        model:  QueueModel,
        params: ModelParams,
        /// Print the result as JSON instead of a table.
        json:   bool,
    },
    Help,
}

impl Args {
    pub fn parse_from<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

        let command = match args.get(1).map(String::as_str) {
            None | Some("help" | "-h" | "--help") => Command::Help,
            Some("simulate") => parse_simulate(&args[2..])?,
            Some("model") => parse_model(&args[2..])?,
            Some(other) => bail!("unknown command {other:?}\n\n{USAGE}"),
        };
        Ok(Self { command })
    }

    pub fn parse() -> Result<Self> {
        Self::parse_from(std::env::args())
    }
}

/// Value following `flag` at `rest[i]`, parsed as `T`.
fn flag_value<T>(rest: &[String], i: usize, flag: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = rest
        .get(i + 1)
        .with_context(|| format!("{flag} needs a value"))?;
    raw.parse()
        .with_context(|| format!("invalid value {raw:?} for {flag}"))
}

fn parse_simulate(rest: &[String]) -> Result<Command> {
    let Some(scenario) = rest.first() else {
        bail!("'simulate' needs a scenario file\n\n{USAGE}");
    };

    let mut out_dir = None;
    let mut seed = None;
    let mut i = 1;
    while i < rest.len() {
        match rest[i].as_str() {
            "--out" => out_dir = Some(flag_value::<PathBuf>(rest, i, "--out")?),
            "--seed" => seed = Some(flag_value(rest, i, "--seed")?),
            other => bail!("unexpected argument {other:?} for 'simulate'"),
        }
        i += 2;
    }

    Ok(Command::Simulate { scenario: PathBuf::from(scenario), out_dir, seed })
}

fn parse_model(rest: &[String]) -> Result<Command> {
    let Some(name) = rest.first() else {
        bail!("'model' needs a model name\n\n{USAGE}");
    };
    let model: QueueModel = name.parse()?;

    let mut lambda = None;
    let mut mu = None;
    let mut params = ModelParams::new(f64::NAN, f64::NAN);
    let mut json = false;
    let mut i = 1;
    while i < rest.len() {
        match rest[i].as_str() {
            "--json" => {
                json = true;
                i += 1;
                continue;
            }
            "--lambda" => lambda = Some(flag_value(rest, i, "--lambda")?),
            "--mu" => mu = Some(flag_value(rest, i, "--mu")?),
            "--servers" => params.servers = Some(flag_value(rest, i, "--servers")?),
            "--sigma" => params.service_std_dev = Some(flag_value(rest, i, "--sigma")?),
            "--ca" => params.arrival_cv = Some(flag_value(rest, i, "--ca")?),
            "--n" => params.n = flag_value(rest, i, "--n")?,
            other => bail!("unexpected argument {other:?} for 'model'"),
        }
        i += 2;
    }

    params.arrival_rate = lambda.context("'model' needs --lambda")?;
    params.service_rate = mu.context("'model' needs --mu")?;
    Ok(Command::Model { model, params, json })
}
