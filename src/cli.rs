// src/cli.rs
use std::{env, path::PathBuf, time::Duration};

use crate::config::options::AppOptions;
use crate::core::net::HttpSource;
use crate::error::CliError;
use crate::publish::{GitPublisher, Publisher};
use crate::runner::{self, Outcome};

pub enum Command {
    Run(AppOptions),
    Help,
}

pub fn run() -> color_eyre::Result<()> {
    let opts = match parse_args(env::args().skip(1))? {
        Command::Help => {
            eprintln!("{}", include_str!("cli_help.txt"));
            return Ok(());
        }
        Command::Run(opts) => opts,
    };

    crate::log::init();

    let source = HttpSource::new(&opts.fetch)?;
    let git = opts.publish.enabled.then(|| GitPublisher::new(opts.publish.repo_dir.clone()));
    let publisher = git.as_ref().map(|g| g as &dyn Publisher);

    let outcome = runner::run(&opts, &source, publisher).inspect_err(|e| loge!("Run failed: {e}"))?;
    match outcome {
        Outcome::Created { path, teams } => logf!("Created {} with {teams} teams", path.display()),
        Outcome::Unchanged => {}
        Outcome::Updated { path, report, published } => {
            logf!("Updated {} ({} changes, published: {published})", path.display(), report.len())
        }
    }
    logf!("Done!");
    Ok(())
}

pub fn parse_args<I>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut opts = AppOptions::default();

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--url" => opts.fetch.url = args.next().ok_or(CliError::MissingValue("--url"))?,
            "-o" | "--out" => {
                let v = args.next().ok_or(CliError::MissingValue("--out"))?;
                opts.snapshot.path = PathBuf::from(v);}
            "--timeout" => {
                let secs: u64 = parse_num("--timeout", args.next())?;
                if secs == 0 {
                    return Err(CliError::InvalidValue { flag: "--timeout", value: s!("0") });
                }
                opts.fetch.timeout = Duration::from_secs(secs);}
            "--season-length" => opts.snapshot.season_length = parse_num("--season-length", args.next())?,
            "--no-push" => opts.publish.enabled = false,
            "--repo" => {
                let v = args.next().ok_or(CliError::MissingValue("--repo"))?;
                opts.publish.repo_dir = Some(PathBuf::from(v));}
            "-h" | "--help" => return Ok(Command::Help),
            other => return Err(CliError::UnknownArg(s!(other))),
        }
    }

    Ok(Command::Run(opts))
}

fn parse_num<T: std::str::FromStr>(flag: &'static str, v: Option<String>) -> Result<T, CliError> {
    let v = v.ok_or(CliError::MissingValue(flag))?;
    v.trim().parse().map_err(|_| CliError::InvalidValue { flag, value: v })
}
