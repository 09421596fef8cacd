use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};

use resql::{ParserConfig, Translator};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    query: Option<String>,
    args: Vec<String>,
    config_path: Option<String>,
    strict: bool,
    max_len: Option<usize>,
    show_help: bool,
}

fn main() {
    init_logging();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let exit_code = run(std::env::args_os(), &mut input, &mut stdout, &mut stderr);
    drop(input);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<I, R, W, E>(args: I, input: &mut R, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    R: Read,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            let _ = write_usage(err);
            return 2;
        }
    };

    if options.show_help {
        if write_usage(out).is_err() {
            return 1;
        }
        return 0;
    }

    let config = match load_config(&options) {
        Ok(config) => config,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            return 2;
        }
    };

    let query = match options.query {
        Some(query) => query,
        None => {
            let mut buf = String::new();
            if let Err(e) = input.read_to_string(&mut buf) {
                let _ = writeln!(err, "error: failed to read query from stdin: {e}");
                return 2;
            }
            buf
        }
    };

    let selection_args = (!options.args.is_empty()).then_some(options.args);
    match Translator::new(config).translate(&query, selection_args) {
        Ok(parsed) => match serde_json::to_string_pretty(&parsed) {
            Ok(json) => {
                if writeln!(out, "{json}").is_err() {
                    return 1;
                }
                0
            }
            Err(e) => {
                let _ = writeln!(err, "error: failed to encode result: {e}");
                1
            }
        },
        Err(e) => {
            tracing::error!(
                target: "resql.cli",
                error = %e,
                query = %query,
                "executed query failed to translate"
            );
            let _ = writeln!(err, "error: {e}");
            if let Some(hint) = e.suggestion() {
                let _ = writeln!(err, "hint: {hint}");
            }
            e.exit_code()
        }
    }
}

fn parse_args<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    let mut options = CliOptions {
        query: None,
        args: Vec::new(),
        config_path: None,
        strict: false,
        max_len: None,
        show_help: false,
    };

    while let Some(argument) = iter.next() {
        let arg = argument.to_string_lossy();

        match arg.as_ref() {
            "-h" | "--help" => {
                options.show_help = true;
            }
            "--strict" => {
                options.strict = true;
            }
            "-a" | "--arg" => {
                let next = iter
                    .next()
                    .ok_or_else(|| String::from("missing value for `-a/--arg`"))?;
                options.args.push(next.to_string_lossy().into_owned());
            }
            "--max-len" => {
                let next = iter
                    .next()
                    .ok_or_else(|| String::from("missing integer argument for `--max-len`"))?;
                let value = next.to_string_lossy();
                let parsed = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid `--max-len` value: {value}"))?;
                options.max_len = Some(parsed);
            }
            "--config" => {
                if options.config_path.is_some() {
                    return Err(String::from("`--config` may only be provided once"));
                }
                let next = iter
                    .next()
                    .ok_or_else(|| String::from("missing JSON file path for `--config`"))?;
                options.config_path = Some(next.to_string_lossy().into_owned());
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("unknown option: {other}"));
            }
            other => {
                if options.query.is_some() {
                    return Err(String::from("only one QUERY may be provided"));
                }
                options.query = Some(other.to_owned());
            }
        }
    }

    Ok(options)
}

/// Config file first, then command-line overrides.
fn load_config(options: &CliOptions) -> Result<ParserConfig, String> {
    let mut config = match options.config_path.as_deref() {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("failed to read config `{path}`: {e}"))?;
            serde_json::from_str::<ParserConfig>(&raw)
                .map_err(|e| format!("invalid config `{path}`: {e}"))?
        }
        None => ParserConfig::default(),
    };
    if options.strict {
        config.keyword_scan = resql::KeywordScan::GrammarOrder;
    }
    if let Some(max) = options.max_len {
        config.max_query_len = max;
    }
    Ok(config)
}

fn write_usage<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Usage: resql [--strict] [--max-len N] [--config FILE] [-a|--arg VALUE]... [QUERY]\n\
         \n\
         Reads QUERY from stdin when it is not given. Prints locator, projection,\n\
         selection, selectionArgs and sort as JSON.\n\
         \n\
         Examples:\n\
         \n\
         resql \"SELECT * FROM content://media/external/audio/media\"\n\
         resql --arg 1 \"SELECT title FROM songs WHERE _id = ?\"\n\
         echo \"SELECT a FROM t ORDER BY a LIMIT 5\" | resql --strict\n",
    )
}
