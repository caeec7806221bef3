extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate quickpat;
extern crate shlex;

use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use quickpat::prelude::*;

/// qp - quick-open style pattern matcher
///
/// Reads candidates from stdin and prints the ones matching QUERY.
///
///   qp NPE            camel case: NullPointerException, NoPermissionException
///   qp '>conf'        prefix: config.rs, Configuration
///   qp 'main.rs<'     exact: main.rs
///   qp '*.toml'       glob: Cargo.toml
#[derive(Parser, Debug)]
#[command(name = "qp", args_override_self = true, verbatim_doc_comment, version, about)]
struct QpOptions {
    /// The query, anchors and wildcards included
    #[arg(allow_hyphen_values = true, default_value = "")]
    query: String,

    /// Read candidates from FILE instead of stdin
    #[arg(long, short, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Comma separated rules the query may be classified into
    #[arg(long, value_delimiter = ',', value_enum, help_heading = "Search")]
    rules: Vec<MatchRule>,

    /// Match plain queries anywhere in the candidate instead of at its start
    #[arg(long, help_heading = "Search")]
    substring: bool,

    /// How characters are case folded
    #[arg(long, value_enum, default_value_t = CaseFolding::Unicode, help_heading = "Search")]
    case: CaseFolding,

    /// Wrap the matched parts of every line in [ ]
    #[arg(long, help_heading = "Output")]
    highlight: bool,

    /// Print the matched ranges as offset:len after every line
    #[arg(long, help_heading = "Output")]
    ranges: bool,

    /// Print the inferred rule and normalized query to stderr
    #[arg(long, help_heading = "Output")]
    explain: bool,

    /// Separate output lines with NUL instead of newline
    #[arg(long, help_heading = "Output")]
    print0: bool,

    /// Read NUL separated candidates
    #[arg(long, help_heading = "Input")]
    read0: bool,
}

impl QpOptions {
    fn search_options(&self) -> Result<SearchOptions> {
        let mut builder = SearchOptionsBuilder::default();
        if !self.rules.is_empty() {
            builder.allowed_rules(self.rules.clone());
        }
        builder
            .substring(self.substring)
            .case_folding(self.case)
            .build()
            .wrap_err("invalid search options")
    }
}

//------------------------------------------------------------------------------
fn main() {
    env_logger::builder().format_timestamp_nanos().init();
    if let Err(err) = color_eyre::install() {
        warn!("could not install error reporter: {err}");
    }

    match real_main() {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            // if downstream pipe is closed, exit silently
            let broken_pipe = err
                .downcast_ref::<std::io::Error>()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::BrokenPipe);
            if broken_pipe {
                std::process::exit(0)
            }
            eprintln!("qp: {err:?}");
            std::process::exit(2)
        }
    }
}

fn parse_args() -> QpOptions {
    let mut args = Vec::new();

    args.push(env::args().next().unwrap_or_else(|| String::from("qp")));
    args.extend(
        env::var("QP_DEFAULT_OPTIONS")
            .ok()
            .and_then(|val| shlex::split(&val))
            .unwrap_or_default(),
    );
    args.extend(env::args().skip(1));

    QpOptions::parse_from(args)
}

fn read_candidates(source: impl Read, read0: bool) -> Result<Vec<String>> {
    let delimiter = if read0 { b'\0' } else { b'\n' };
    let mut candidates = Vec::new();
    for chunk in BufReader::new(source).split(delimiter) {
        let mut chunk = chunk?;
        if !read0 && chunk.last() == Some(&b'\r') {
            chunk.pop();
        }
        candidates.push(String::from_utf8_lossy(&chunk).into_owned());
    }
    Ok(candidates)
}

fn format_ranges(ranges: &[MatchRange]) -> String {
    ranges
        .iter()
        .map(|r| format!("{}:{}", r.offset, r.len))
        .collect::<Vec<_>>()
        .join(",")
}

fn real_main() -> Result<i32> {
    let opts = parse_args();
    debug!("options: {opts:?}");

    //------------------------------------------------------------------------------
    let pattern = SearchPattern::new(opts.search_options()?);
    pattern.set_pattern(&opts.query);
    if opts.explain {
        eprintln!("rule: {}", pattern.match_rule());
        eprintln!("pattern: {:?}", pattern.pattern());
    }

    //------------------------------------------------------------------------------
    // read from file or pipe
    let candidates = match &opts.input {
        Some(path) => {
            let file = File::open(path).wrap_err_with(|| format!("could not open {}", path.display()))?;
            read_candidates(file, opts.read0)?
        }
        None => read_candidates(std::io::stdin().lock(), opts.read0)?,
    };
    trace!("read {} candidates", candidates.len());

    //------------------------------------------------------------------------------
    // filter and output
    let matches = IncrementalFilter::new().filter(pattern.snapshot(), &candidates);
    let output_ending = if opts.print0 { "\0" } else { "\n" };

    let mut stdout = BufWriter::new(std::io::stdout().lock());
    for m in &matches {
        let line = &candidates[m.index];
        if opts.highlight {
            write!(stdout, "{}", wrap_matches(line, &m.ranges))?;
        } else {
            write!(stdout, "{line}")?;
        }
        if opts.ranges {
            write!(stdout, "\t{}", format_ranges(&m.ranges))?;
        }
        write!(stdout, "{output_ending}")?;
    }
    stdout.flush()?;

    Ok(if matches.is_empty() { 1 } else { 0 })
}
