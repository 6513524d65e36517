use std::io::{Read, Write, stdin, stdout};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use toml_tree::{Document, Indent, Options};

mod merge;

#[derive(Parser, Debug)]
#[command(name = "toml-tree", about = "Print, merge and inspect TOML documents", version)]
struct Args {
    /// Indent table bodies with N spaces instead of a tab
    #[arg(long, value_name = "N", global = true)]
    indent_spaces: Option<usize>,

    /// Log parser activity to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a file and print it in canonical form
    Print { file: PathBuf },
    /// Deep-merge OVERRIDE on top of BASE and print the result
    Merge {
        base: PathBuf,
        #[arg(value_name = "OVERRIDE")]
        overlay: PathBuf,
    },
    /// Read TOML on stdin and print type-tagged JSON
    Json {
        /// Pretty-print the JSON output
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Document> {
    toml_tree::parse_file(path).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_document(doc: &Document, options: &Options) -> Result<()> {
    let mut out = stdout().lock();
    toml_tree::serialize_to_writer(&mut out, doc, options)?;
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = match args.indent_spaces {
        Some(n) => Options::default().with_indent(Indent::Spaces(n)),
        None => Options::default(),
    };

    match args.command {
        Command::Print { file } => {
            let doc = load(&file)?;
            print_document(&doc, &options)?;
        }
        Command::Merge { base, overlay } => {
            let mut doc = load(&base)?;
            let overlay = load(&overlay)?;
            merge::merge_into(&mut doc, overlay);
            print_document(&doc, &options)?;
        }
        Command::Json { pretty } => {
            let mut buf = String::new();
            stdin().read_to_string(&mut buf)?;
            let doc = toml_tree::parse_str(&buf).context("failed to parse stdin")?;
            let value = toml_tree::json::to_tagged_json(&doc);
            if pretty {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", serde_json::to_string(&value)?);
            }
        }
    }

    Ok(())
}
