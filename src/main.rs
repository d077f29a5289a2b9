use std::env;
use std::error::Error;
use std::fs::OpenOptions;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::exit;

use bleu_evaluator::read::{read_document, reference_paths, scan_directory, ReadError};
use bleu_evaluator::Bleu;
use chrono::{Local, SecondsFormat};
use env_logger::Target;
use log::{debug, error, info, LevelFilter};

const USAGE: &str = "\
Usage: bleu-evaluator [-v]... [-d] [-w N] reference [hypothesis]... < hypothesis
       bleu-evaluator [-v]... [-d] [-w N] --scan DIR
Reads the references from reference or reference0, reference1, ...
  -v, --verbose     raise log verbosity (repeat up to 3 times)
  -d, --details     print per-order precisions and lengths
  -w, --width N     decimals of the printed score (default 2)
  -s, --scan DIR    score every hyp_* file in DIR against its ref_* files
  -l, --log-file F  append log records to F instead of stderr";

#[derive(Debug)]
struct Config {
    verbosity: usize,
    details: bool,
    width: usize,
    scan: Option<PathBuf>,
    log_file: Option<PathBuf>,
    inputs: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            verbosity: 0,
            details: false,
            width: 2,
            scan: None,
            log_file: None,
            inputs: Vec::new(),
        }
    }
}

fn usage() -> ! {
    eprintln!("{}", USAGE);
    exit(1);
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Config, String> {
    let mut config = Config::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-v" | "--verbose" => config.verbosity += 1,
            "-vv" => config.verbosity += 2,
            "-vvv" => config.verbosity += 3,
            "-d" | "--details" => config.details = true,
            "-w" | "--width" => {
                config.width = args
                    .next()
                    .and_then(|w| w.parse().ok())
                    .ok_or_else(|| format!("{} expects a number", arg))?;
            }
            "-s" | "--scan" => {
                let dir = args.next().ok_or_else(|| format!("{} expects a directory", arg))?;
                config.scan = Some(PathBuf::from(dir));
            }
            "-l" | "--log-file" => {
                let file = args.next().ok_or_else(|| format!("{} expects a file", arg))?;
                config.log_file = Some(PathBuf::from(file));
            }
            "-h" | "--help" => return Err(String::new()),
            _ if arg.starts_with('-') => return Err(format!("unknown option: {}", arg)),
            _ => config.inputs.push(PathBuf::from(arg)),
        }
    }

    Ok(config)
}

fn log_level(verbosity: usize) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Records look like `2024-05-01T12:00:00+02:00 | INFO: message @ target:line`.
fn init_logging(config: &Config) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log_level(config.verbosity))
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} | {}: {} @ {}:{}",
                Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
                record.level(),
                record.args(),
                record.target(),
                record.line().unwrap_or(0)
            )
        });

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = match parse_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("{}", msg);
            }
            usage();
        }
    };

    init_logging(&config)?;

    debug!("{:?}", config);

    let (references, hypotheses) = match &config.scan {
        Some(dir) => scan_directory(dir)?,
        None => {
            let (stem, hypotheses) = match config.inputs.split_first() {
                Some((stem, rest)) => (stem, rest.to_vec()),
                None => usage(),
            };
            (reference_paths(stem), hypotheses)
        }
    };

    if references.is_empty() {
        error!("no reference files found");
        exit(1);
    }
    if config.scan.is_some() && hypotheses.is_empty() {
        error!("no hypothesis files found");
        exit(1);
    }

    let documents = references
        .iter()
        .map(|path| {
            info!("reading reference: {}", path.display());
            read_document(path)
        })
        .collect::<Result<Vec<_>, ReadError>>()?;
    let bleu = Bleu::new(&documents)?;
    info!("{} references, {} sentences each", documents.len(), bleu.len());

    if hypotheses.is_empty() {
        let mut hypothesis = String::new();
        io::stdin().read_to_string(&mut hypothesis)?;
        let score = bleu.score(&hypothesis)?;
        println!("{}", score.format(config.width, config.details));
        return Ok(());
    }

    for path in &hypotheses {
        info!("scoring hypothesis: {}", path.display());
        let score = bleu.score(&read_document(path)?)?;
        println!(
            "{}: {}",
            path.display(),
            score.format(config.width, config.details)
        );
    }

    Ok(())
}
