//! List fast properties from an index-rule configuration snapshot.
//!
//! Loads a snapshot file, walks the configured (or explicitly passed) rule
//! paths, and prints the fast-property list as compact JSON. With `--labels`
//! each property is wrapped in its FAST display label instead. Diagnostics
//! for skipped roots or rejected credentials go to the logger, never stdout.

use anyhow::{Context, Result, bail};
use indexlens::{PropertyClassifier, TreeStore, configured_rule_paths, fast_label, split_list};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;

    let store = TreeStore::load(&args.snapshot)
        .with_context(|| format!("loading snapshot {}", args.snapshot.display()))?;
    let rule_paths = args.paths.unwrap_or_else(configured_rule_paths);
    let classifier = PropertyClassifier::with_rule_paths(store, rule_paths);

    let fast = classifier.fast_properties(&args.flag);
    let output: Vec<String> = if args.labels {
        fast.iter().map(|prop| fast_label(prop)).collect()
    } else {
        fast
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

struct CliArgs {
    snapshot: PathBuf,
    flag: String,
    paths: Option<Vec<String>>,
    labels: bool,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut snapshot: Option<PathBuf> = None;
        let mut flag: Option<String> = None;
        let mut paths: Option<Vec<String>> = None;
        let mut labels = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--snapshot" => {
                    let path = next_value(&mut args, "--snapshot")?;
                    snapshot = Some(PathBuf::from(path));
                }
                "--flag" => {
                    let raw = next_value(&mut args, "--flag")?;
                    if raw.trim().is_empty() {
                        bail!("--flag must not be blank");
                    }
                    flag = Some(raw);
                }
                "--paths" => {
                    let raw = next_value(&mut args, "--paths")?;
                    let parsed = split_list(&raw);
                    if parsed.is_empty() {
                        bail!("--paths must contain at least one path");
                    }
                    paths = Some(parsed);
                }
                "--labels" => {
                    labels = true;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        let snapshot = snapshot.ok_or_else(|| anyhow::anyhow!("--snapshot is required"))?;
        let flag = flag.unwrap_or_else(|| "ordered".to_string());

        Ok(CliArgs {
            snapshot,
            flag,
            paths,
            labels,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: fast-props --snapshot PATH [--flag NAME] [--paths LIST] [--labels]\n\
Lists the properties flagged fast in an index-rule snapshot as compact JSON.\n\
--flag defaults to 'ordered'; --paths accepts a comma- or space-separated list and\n\
falls back to INDEXLENS_RULE_PATHS, then the built-in default rule path.\n"
}

fn print_usage() {
    print!("{}", usage());
}
