mod args;
mod logging;
mod render;

use crate::args::{Cli, Command, GenerateArgs, ValidateArgs};
use clap::Parser;
use std::process::ExitCode;
use validir_core::{Error, FileNames, Policy, Template};

fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init_logging(cli.verbosity, cli.log_format);

    let result = match &cli.command {
        Command::Validate(args) => run_validate(args, &cli),
        Command::Generate(args) => run_generate(args, &cli),
    };

    result.unwrap_or_else(|e| {
        eprintln!("validir: {e}");
        ExitCode::from(2)
    })
}

fn run_validate(args: &ValidateArgs, cli: &Cli) -> Result<ExitCode, Error> {
    let template = Template::load(&args.template)?;
    tracing::debug!(
        template = %args.template.display(),
        entries = template.entries().len(),
        "template loaded"
    );

    let allow_extra = args.allow_extra || template.policy().allow_extra;
    let report = template.validate_with(&args.dir, allow_extra)?;

    let out = render::render(
        &report,
        &args.template,
        args.format,
        cli.verbosity,
        cli.quiet,
    );
    print!("{out}");

    Ok(if report.is_match() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_generate(args: &GenerateArgs, cli: &Cli) -> Result<ExitCode, Error> {
    let policy = Policy {
        skip_hidden: !args.include_hidden,
        allow_extra: args.allow_extra,
    };

    let names = if args.by_extension {
        FileNames::ByExtension
    } else {
        FileNames::Exact
    };

    validir_core::generate(&args.dir, &args.output, policy, names)?;

    if !cli.quiet {
        println!(
            "Wrote template extracted from '{}' to '{}'",
            args.dir.display(),
            args.output.display()
        );
    }

    Ok(ExitCode::SUCCESS)
}
