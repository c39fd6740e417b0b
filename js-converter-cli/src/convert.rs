use anyhow::Result;
use js_converter_core::{convert_operation, Config, ConvertOptions, OutputFormatter, OutputTarget};

use crate::cli::Cli;
use crate::OutputFormat;

pub fn handle_convert(cli: Cli, config: &Config) -> Result<()> {
    let target = match cli.out_dir {
        Some(dir) => OutputTarget::Directory(dir),
        None => OutputTarget::InPlace,
    };

    let mut options = ConvertOptions::from_config(target, config);
    if let Some(ledger) = cli.ledger {
        options.ledger_path = ledger;
    }

    let result = convert_operation(&cli.files, &options)?;

    // Handle output based on format
    match cli.output {
        OutputFormat::Json => {
            print!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if !cli.quiet {
                print!("{}", result.format(cli.output.into()));
            }
        },
    }

    Ok(())
}
