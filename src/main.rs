use anyhow::Context;
use clap::Parser;
use hstouch::{BatchPolicy, Config, DomainToucher, HsdsStorage, TouchReport};
use log::info;
use std::process::ExitCode;

/// Create HSDS domains, or update the timestamp of domains that already exist
#[derive(Parser, Debug)]
#[command(name = "hstouch", version)]
#[command(args_override_self = true)]
#[command(after_help = "example: hstouch -e http://data.hdfgroup.org:7253 /hdfgroup/data/test/emptydomain.h5")]
struct Args {
    /// Service endpoint (overrides HS_ENDPOINT and ~/.hscfg)
    #[arg(short = 'e', long)]
    endpoint: Option<String>,

    /// User name (overrides HS_USERNAME and ~/.hscfg)
    #[arg(short = 'u', long)]
    username: Option<String>,

    /// Password (overrides HS_PASSWORD and ~/.hscfg)
    #[arg(short = 'p', long)]
    password: Option<String>,

    /// Log each domain as it is created or touched
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Continue with the remaining domains after a failure
    #[arg(long)]
    keep_going: bool,

    /// Domains to create or touch, e.g. /home/user/file.h5
    #[arg(required = true, value_name = "DOMAIN")]
    domains: Vec<String>,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(args: Args) -> anyhow::Result<TouchReport> {
    let config = Config::load()
        .context("failed to load configuration")?
        .with_overrides(args.endpoint, args.username, args.password);
    let endpoint = config.validate()?;
    info!("Using endpoint {}", endpoint);

    let client = config
        .client(&endpoint)
        .context("failed to create HSDS client")?;
    let toucher = DomainToucher::new(HsdsStorage::new(client));

    let policy = if args.keep_going {
        BatchPolicy::KeepGoing
    } else {
        BatchPolicy::FailFast
    };
    Ok(toucher.touch_all(&args.domains, policy).await)
}

/// Exit status for a finished batch, plus one stderr line per failed domain
fn exit_status(report: &TouchReport) -> (ExitCode, Vec<String>) {
    let lines: Vec<String> = report.failures().map(|(_, e)| e.to_string()).collect();
    let code = if lines.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    (code, lines)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(report) => {
            let (code, lines) = exit_status(&report);
            for line in lines {
                eprintln!("{}", line);
            }
            code
        }
        Err(e) => {
            eprintln!("hstouch: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use hstouch::{TouchError, TouchOutcome};

    fn report(results: Vec<(&str, Result<TouchOutcome, TouchError>)>) -> TouchReport {
        TouchReport {
            results: results.into_iter().map(|(d, r)| (d.to_string(), r)).collect(),
        }
    }

    #[test]
    fn later_flags_win() {
        let args = Args::try_parse_from([
            "hstouch", "-e", "http://a", "--endpoint", "http://b", "/home/x.h5",
        ])
        .unwrap();
        assert_eq!(args.endpoint.as_deref(), Some("http://b"));
        assert_eq!(args.domains, vec!["/home/x.h5"]);
    }

    #[test]
    fn domains_are_required() {
        let err = Args::try_parse_from(["hstouch", "-u", "joe"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let err = Args::try_parse_from(["hstouch", "-x", "/home/x.h5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn collects_domains_in_order() {
        let args = Args::try_parse_from([
            "hstouch", "-p", "pw", "--keep-going", "/a/1.h5", "/a/2.h5",
        ])
        .unwrap();
        assert_eq!(args.domains, vec!["/a/1.h5", "/a/2.h5"]);
        assert_eq!(args.password.as_deref(), Some("pw"));
        assert!(args.keep_going);
    }

    #[test]
    fn help_is_an_early_exit() {
        let err = Args::try_parse_from(["hstouch", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn all_successes_exit_zero() {
        let report = report(vec![
            ("/home/a.h5", Ok(TouchOutcome::Created)),
            ("/home/b.h5", Ok(TouchOutcome::Updated)),
        ]);
        let (code, lines) = exit_status(&report);
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(lines.is_empty());
    }

    #[test]
    fn first_failure_exits_one() {
        // fail-fast batches stop after the failing domain
        let report = report(vec![
            ("/home/a.h5", Ok(TouchOutcome::Created)),
            ("/nope/b.h5", Err(TouchError::ParentNotFound { parent: "/nope/".into() })),
        ]);
        let (code, lines) = exit_status(&report);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(lines, vec!["Parent domain: /nope/ not found"]);
    }

    #[test]
    fn every_failure_gets_a_line() {
        let report = report(vec![
            ("/locked/a.h5", Err(TouchError::Authorization { domain: "/locked/a.h5".into() })),
            ("/home/b.h5", Ok(TouchOutcome::Updated)),
            ("/x", Err(TouchError::TopLevelDomain { domain: "/x".into() })),
        ]);
        let (code, lines) = exit_status(&report);
        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            lines,
            vec![
                "Authorization failure: /locked/a.h5",
                "can't create top-level domain: /x",
            ]
        );
    }
}
