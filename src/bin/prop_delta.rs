//! Compute the delta between two property lists.
//!
//! Prints the entries of the fast list that have no counterpart in the other
//! list, comparing after stripping a leading `./` from each side. Lists come
//! from inline comma/space-separated values or from JSON array files, so the
//! helper composes with `fast-props` output.

use anyhow::{Context, Result, bail};
use indexlens::{delta_properties, split_list};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let fast = args.fast.load()?;
    let other = args.other.load()?;

    let delta = delta_properties(&fast, &other);
    println!("{}", serde_json::to_string(&delta)?);
    Ok(())
}

struct CliArgs {
    fast: ListSource,
    other: ListSource,
}

enum ListSource {
    Inline(Vec<String>),
    File(PathBuf),
}

impl ListSource {
    fn load(&self) -> Result<Vec<String>> {
        match self {
            ListSource::Inline(values) => Ok(values.clone()),
            ListSource::File(path) => read_json_list(path),
        }
    }
}

fn read_json_list(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        bail!("list file not found: {}", path.display());
    }
    let data = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("parsing {} as a JSON array of strings", path.display()))
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut fast: Option<ListSource> = None;
        let mut other: Option<ListSource> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--fast" => {
                    let raw = next_value(&mut args, "--fast")?;
                    set_once(&mut fast, ListSource::Inline(split_list(&raw)), "--fast")?;
                }
                "--fast-file" => {
                    let path = next_value(&mut args, "--fast-file")?;
                    set_once(&mut fast, ListSource::File(PathBuf::from(path)), "--fast")?;
                }
                "--other" => {
                    let raw = next_value(&mut args, "--other")?;
                    set_once(&mut other, ListSource::Inline(split_list(&raw)), "--other")?;
                }
                "--other-file" => {
                    let path = next_value(&mut args, "--other-file")?;
                    set_once(&mut other, ListSource::File(PathBuf::from(path)), "--other")?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                unknown => bail!("unknown flag: {unknown}"),
            }
        }

        let fast = fast.ok_or_else(|| anyhow::anyhow!("--fast or --fast-file is required"))?;
        // An absent other list is a valid (empty) comparison set.
        let other = other.unwrap_or(ListSource::Inline(Vec::new()));

        Ok(CliArgs { fast, other })
    }
}

fn set_once(slot: &mut Option<ListSource>, value: ListSource, group: &str) -> Result<()> {
    if slot.is_some() {
        bail!("{group}/{group}-file may only be provided once");
    }
    *slot = Some(value);
    Ok(())
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
    "Usage: prop-delta (--fast LIST | --fast-file PATH) [--other LIST | --other-file PATH]\n\
Prints the fast-list entries with no match in the other list as compact JSON.\n\
Inline lists are comma- or space-separated; files hold a JSON array of strings.\n\
Matching ignores a leading './' on either side.\n"
}

fn print_usage() {
    print!("{}", usage());
}
