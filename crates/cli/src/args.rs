use clap::Parser;
use std::path::PathBuf;

fn default_threads() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

fn parse_threads(s: &str) -> Result<usize, String> {
    let v: usize = s
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;
    if v == 0 {
        Err("threads must be greater than 0".into())
    } else {
        Ok(v)
    }
}

fn parse_indent(s: &str) -> Result<usize, String> {
    let v: usize = s
        .parse()
        .map_err(|e: std::num::ParseIntError| e.to_string())?;
    if v == 0 {
        Err("indent must be greater than 0".into())
    } else {
        Ok(v)
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Formats Dockerfiles into a canonical style",
    long_about = "dockfmt rewrites Dockerfiles into a canonical style: uppercase \
instruction keywords, normalized argument quoting and continuation layout, and \
consistently formatted embedded shell. Comments and unrecognized instructions \
pass through untouched.

Examples:
  dockfmt Dockerfile              # print the formatted file
  dockfmt -w Dockerfile api/Dockerfile
  dockfmt --check $(git ls-files '*Dockerfile*')
  dockfmt < Dockerfile            # filter stdin to stdout"
)]
pub struct Cli {
    /// Dockerfiles to format; reads stdin when empty
    pub files: Vec<PathBuf>,

    /// Rewrite files in place instead of printing to stdout
    #[arg(short = 'w', long)]
    pub write: bool,

    /// Exit non-zero when a file is not already formatted, writing nothing
    #[arg(long, conflicts_with = "write")]
    pub check: bool,

    /// Spaces of indentation for continuation lines
    #[arg(long, value_parser = parse_indent)]
    pub indent: Option<usize>,

    /// Do not force a trailing newline at end of file
    #[arg(long = "no-trailing-newline")]
    pub no_trailing_newline: bool,

    /// Print a space between redirect operators and their targets
    #[arg(long = "space-redirects")]
    pub space_redirects: bool,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the parsed structure as JSON instead of formatting
    #[arg(long = "dump-ast", conflicts_with_all = ["write", "check"])]
    pub dump_ast: bool,

    /// Number of files processed in parallel
    #[arg(long, default_value_t = default_threads(), value_parser = parse_threads)]
    pub threads: usize,

    /// Show debug logs
    #[arg(long)]
    pub debug: bool,

    /// Silence all logs
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_check_conflict() {
        let result = Cli::try_parse_from(["dockfmt", "-w", "--check", "Dockerfile"]);
        assert!(result.is_err());
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(Cli::try_parse_from(["dockfmt", "--indent", "0"]).is_err());
        assert!(Cli::try_parse_from(["dockfmt", "--threads", "0"]).is_err());
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["dockfmt", "Dockerfile"]).unwrap();
        assert!(!cli.write);
        assert!(!cli.check);
        assert_eq!(cli.indent, None);
        assert!(cli.threads >= 1);
    }
}
