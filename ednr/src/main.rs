//! `ednr` - a small command-line front end for the `edn-par` reader.
//!
//! This is demonstration/exercise tooling around the reader, not part of
//! it: it reads every top-level form out of a file (or stdin) and prints
//! each one back out, optionally prefixed with its source position, and
//! optionally with extra tagged-literal handlers registered up front.

mod error;

use std::fs;
use std::io::{self, Read as _};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use edn_par::{Reader, ReaderContext};
use edn_util::{Diagnostic, Ident};

use error::{EdnrError, Result};

/// Reads and prints edn forms.
///
/// Each file argument is read top to bottom, printing one line per
/// top-level form. With no file arguments, reads from stdin.
#[derive(Parser, Debug)]
#[command(name = "ednr")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Read and print edn forms", long_about = None)]
struct Cli {
    /// Files to read (`-` or no files at all means stdin)
    files: Vec<PathBuf>,

    /// Prefix each printed form with its `line:column`
    #[arg(long)]
    positions: bool,

    /// Register an extra tag (`tag` or `ns/tag`) that passes its form through unchanged
    #[arg(long = "register-tag", value_name = "TAG")]
    register_tag: Vec<String>,

    /// Enable debug logging
    #[arg(short, long, env = "EDNR_VERBOSE")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = ReaderContext::new();
    for tag in &cli.register_tag {
        let ident = parse_tag_ident(tag)?;
        tracing::debug!(tag = %ident, "registering pass-through tag");
        ctx.register_tag(ident, Arc::new(Ok));
    }

    let mut error_count = 0;
    if cli.files.is_empty() {
        error_count += read_source(&read_stdin()?, "<stdin>", &ctx, cli.positions);
    } else {
        for path in &cli.files {
            if path.as_os_str() == "-" {
                error_count += read_source(&read_stdin()?, "<stdin>", &ctx, cli.positions);
                continue;
            }
            let source = fs::read_to_string(path)
                .map_err(|source| EdnrError::Io { path: path.clone(), source })?;
            error_count += read_source(&source, &path.display().to_string(), &ctx, cli.positions);
        }
    }

    if error_count > 0 {
        return Err(EdnrError::ReadErrors { count: error_count });
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|source| EdnrError::Io { path: PathBuf::from("<stdin>"), source })?;
    Ok(buf)
}

/// Reads every top-level form out of `source`, printing each as it goes.
/// Returns the number of forms that failed to read; stops at the first
/// error, since a reader error leaves the scanner's position meaning
/// uncertain for anything that follows.
fn read_source(source: &str, origin: &str, ctx: &ReaderContext, positions: bool) -> usize {
    tracing::trace!(origin, "reading source");
    let mut reader = Reader::new(source, origin, ctx.clone());
    loop {
        match reader.try_read() {
            Ok(Some(form)) => {
                if positions {
                    println!("{}: {}", form.pos, form.value);
                } else {
                    println!("{}", form.value);
                }
            }
            Ok(None) => return 0,
            Err(err) => {
                let diagnostic = Diagnostic::from_read_error(&err);
                eprintln!("{}", diagnostic.render(None));
                return 1;
            }
        }
    }
}

fn parse_tag_ident(raw: &str) -> Result<Ident> {
    match raw.split_once('/') {
        Some((ns, name)) if !ns.is_empty() && !name.is_empty() => Ok(Ident::new(Some(ns), name)),
        Some(_) => Err(EdnrError::BadTagName(raw.to_string())),
        None if !raw.is_empty() => Ok(Ident::unqualified(raw)),
        None => Err(EdnrError::BadTagName(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_an_unqualified_tag() {
        let ident = parse_tag_ident("foo").unwrap();
        assert_eq!(ident.name, "foo");
        assert_eq!(ident.namespace, None);
    }

    #[test]
    fn parses_a_namespaced_tag() {
        let ident = parse_tag_ident("ns/foo").unwrap();
        assert_eq!(ident.name, "foo");
        assert_eq!(ident.namespace.as_deref(), Some("ns"));
    }

    #[test]
    fn rejects_empty_or_malformed_tags() {
        assert!(parse_tag_ident("").is_err());
        assert!(parse_tag_ident("ns/").is_err());
        assert!(parse_tag_ident("/foo").is_err());
    }

    #[test]
    fn cli_parses_files_and_flags() {
        let cli = Cli::parse_from(["ednr", "--positions", "a.edn", "b.edn"]);
        assert!(cli.positions);
        assert_eq!(cli.files, vec![PathBuf::from("a.edn"), PathBuf::from("b.edn")]);
    }

    #[test]
    fn cli_collects_register_tag_values() {
        let cli = Cli::parse_from(["ednr", "--register-tag", "inst", "--register-tag", "my/tag"]);
        assert_eq!(cli.register_tag, vec!["inst".to_string(), "my/tag".to_string()]);
    }
}
