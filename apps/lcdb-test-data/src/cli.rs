//! Command line interface definition

use clap::Parser;
use lcdb_config::ColorChoice;
use std::path::PathBuf;

/// Builds a set of example data (FASTA, FASTQ, BAM, GTF) in the specified
/// directory.
#[derive(Parser)]
#[command(name = "lcdb-test-data")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Builds a set of example data (FASTA, FASTQ, BAM, GTF) in the specified directory.")]
#[command(
    long_about = "Builds a set of example data (FASTA, FASTQ, BAM, GTF) in the specified directory.\n\n\
Automatically creates a conda environment in that directory to run the Snakefile. \
Extra arguments are sent to Snakemake (e.g., -npr or -j8)."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Directory to build the example data in
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Arguments passed verbatim to Snakemake
    #[arg(
        value_name = "SNAKEMAKE_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub snakemake_args: Vec<String>,
}

/// Options of the tool itself; they must precede `DATA_DIR`
#[derive(Parser)]
pub struct GlobalArgs {
    /// Emit every event as a JSON line on stdout
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,

    /// Color output control
    #[arg(long, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_passthrough_args_are_kept_verbatim() {
        let cli = Cli::parse_from(["lcdb-test-data", "data/test", "-npr", "-j8", "--forceall"]);
        assert_eq!(cli.data_dir, PathBuf::from("data/test"));
        assert_eq!(cli.snakemake_args, ["-npr", "-j8", "--forceall"]);
        assert!(!cli.global.json);
    }

    #[test]
    fn test_own_flags_before_data_dir() {
        let cli = Cli::parse_from([
            "lcdb-test-data",
            "--json",
            "--color",
            "never",
            "out",
            "-n",
            "--json",
        ]);
        assert!(cli.global.json);
        assert_eq!(cli.global.color, Some(ColorChoice::Never));
        assert_eq!(cli.snakemake_args, ["-n", "--json"]);
    }

    #[test]
    fn test_data_dir_is_required() {
        assert!(Cli::try_parse_from(["lcdb-test-data"]).is_err());
    }
}
