use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// validir: validate a directory tree against a template, or derive one.
#[derive(Debug, Parser)]
#[command(name = "validir")]
#[command(about = "Validate directory structures against a pre-defined template", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Quiet output (print nothing on success)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a directory against a template file.
    Validate(ValidateArgs),

    /// Generate a template file from a directory.
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Root of the directory to validate
    pub dir: PathBuf,

    /// Template file (.yaml, .yml or .json)
    pub template: PathBuf,

    /// Accept entries not listed in the template, whatever the template says
    #[arg(long)]
    pub allow_extra: bool,

    /// Result output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory to use as the template
    pub dir: PathBuf,

    /// Output file; `.json` writes JSON, anything else YAML
    pub output: PathBuf,

    /// Also record hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Mark the template as accepting unlisted entries
    #[arg(long)]
    pub allow_extra: bool,

    /// Record files as optional `*.<ext>` patterns instead of exact names
    #[arg(long)]
    pub by_extension: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_validate() {
        let cli = Cli::try_parse_from(["validir", "validate", "proj", "t.yaml", "--allow-extra"])
            .unwrap();
        let Command::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.dir, PathBuf::from("proj"));
        assert_eq!(args.template, PathBuf::from("t.yaml"));
        assert!(args.allow_extra);
        assert!(matches!(args.format, OutputFormat::Human));
    }

    #[test]
    fn parses_generate_with_global_flags() {
        let cli = Cli::try_parse_from([
            "validir",
            "generate",
            "proj",
            "out.json",
            "--include-hidden",
            "-vv",
            "-q",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 2);
        assert!(cli.quiet);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(args.include_hidden);
        assert!(!args.allow_extra);
        assert!(!args.by_extension);
    }

    #[test]
    fn parses_generate_by_extension() {
        let cli = Cli::try_parse_from(["validir", "generate", "proj", "t.yaml", "--by-extension"])
            .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert!(args.by_extension);
        assert!(!args.include_hidden);
    }

    #[test]
    fn requires_both_paths() {
        assert!(Cli::try_parse_from(["validir", "validate", "proj"]).is_err());
        assert!(Cli::try_parse_from(["validir"]).is_err());
    }
}
