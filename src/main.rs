use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use confquill::config::Config;
use confquill::file::loader::{load_conf_file, load_conf_from_stdin};
use confquill::{ConfNode, Expansion};

/// ConfQuill - query CLI-style network device configs
#[derive(Parser)]
#[command(name = "confquill")]
#[command(version)]
#[command(about = "Query indentation-structured network device configs", long_about = None)]
struct Cli {
    /// Config file to read (omit or "-" to read from stdin)
    #[arg(short, long, global = true)]
    file: Option<String>,

    /// Spaces per indentation level when dumping
    #[arg(long, global = true, conflicts_with = "no_indent")]
    indent: Option<usize>,

    /// Write dumped lines as stored, without re-indenting
    #[arg(long, global = true)]
    no_indent: bool,

    /// Do not print the [trace] header above dumped subtrees
    #[arg(long, global = true)]
    no_header: bool,

    /// Dump original source lines instead of matched remainders
    #[arg(long, global = true)]
    original: bool,

    /// Log query internals to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the subtree matched by KEY (the whole config when omitted)
    Show { key: Option<String> },
    /// List the keywords following KEY
    Keys { key: Option<String> },
    /// Print every match of a wildcard query, one per line
    Expand {
        pattern: String,
        /// Print matches as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Print a single value following KEY
    Get {
        key: String,
        /// How to read the value
        #[arg(long = "as", value_enum, default_value_t = Scalar::Word)]
        kind: Scalar,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Scalar {
    Word,
    Tail,
    Tails,
    Quoted,
    Int,
    List,
    Ip,
    Cidr,
    Line,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Merges command-line flags over the config file.
fn apply_flags(mut config: Config, cli: &Cli) -> Config {
    if let Some(width) = cli.indent {
        config.indent = " ".repeat(width);
        config.no_indent = false;
    }
    if cli.no_indent {
        config.no_indent = true;
    }
    if cli.no_header {
        config.show_header = false;
    }
    if cli.original {
        config.use_original_text = true;
    }
    config
}

fn load(file: Option<&str>) -> Result<ConfNode> {
    match file {
        None | Some("-") => load_conf_from_stdin(),
        Some(path) => load_conf_file(path),
    }
}

fn matched(conf: &ConfNode, key: &str) -> Result<ConfNode> {
    let node = conf.get(key);
    if !node.is_match() {
        bail!("No match for {:?}", key);
    }
    Ok(node)
}

fn print_expansions(out: &mut impl Write, expansions: &[Expansion], json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, expansions)?;
        writeln!(out)?;
        return Ok(());
    }
    for expansion in expansions {
        writeln!(out, "{}", expansion.captures.join("\t"))?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = apply_flags(Config::load(), &cli);
    let conf = load(cli.file.as_deref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Show { key } => {
            let node = matched(&conf, key.as_deref().unwrap_or_default())?;
            node.dump(&mut out, &config.dump_options())?;
        }
        Command::Keys { key } => {
            let node = matched(&conf, key.as_deref().unwrap_or_default())?;
            for keyword in &node {
                writeln!(out, "{}", keyword)?;
            }
        }
        Command::Expand { pattern, json } => {
            let expansions: Vec<Expansion> = conf.expand(&pattern)?.collect();
            print_expansions(&mut out, &expansions, json || config.json_output)?;
        }
        Command::Get { key, kind } => {
            let node = conf.get(&key);
            let context = || format!("Failed to read {:?}", key);
            match kind {
                Scalar::Word => writeln!(out, "{}", node.word().with_context(context)?)?,
                Scalar::Tail => writeln!(out, "{}", node.tail().with_context(context)?)?,
                Scalar::Tails => {
                    for line in node.tails() {
                        writeln!(out, "{}", line)?;
                    }
                }
                Scalar::Quoted => writeln!(out, "{}", node.quoted().with_context(context)?)?,
                Scalar::Int => writeln!(out, "{}", node.int().with_context(context)?)?,
                Scalar::List => {
                    for item in node.junos_list().with_context(context)? {
                        writeln!(out, "{}", item)?;
                    }
                }
                Scalar::Ip => writeln!(out, "{}", node.ip().with_context(context)?)?,
                Scalar::Cidr => writeln!(out, "{}", node.cidr().with_context(context)?)?,
                Scalar::Line => writeln!(out, "{}", node.lineno().with_context(context)? + 1)?,
            }
        }
    }

    out.flush().context("Failed to write output")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}
