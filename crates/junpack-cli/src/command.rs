//! The install command: builds the core request from CLI arguments and
//! runs it.

use std::time::Duration;

use anyhow::Result;
use junpack_core::InstallOptions;
use junpack_core::InstallRequest;
use junpack_core::install_jdk;

use crate::cli::Cli;
use crate::cli::default_file_ending;
use crate::error::add_install_context;
use crate::output::OutputFormatter;
use crate::progress::CliSpinner;

pub fn execute(args: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let file_ending = args.file_ending.clone().unwrap_or_else(|| {
        let name = args
            .archive
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();
        default_file_ending(name)
    });

    let request = InstallRequest::new(&args.archive, file_ending, &args.destination);
    let options = InstallOptions {
        tool_timeout: args.tool_timeout.map(Duration::from_secs),
        unpack_jars: !args.skip_jars,
        seven_zip: args.seven_zip.clone(),
    };

    let report = if CliSpinner::should_show() && !args.quiet && !args.json {
        let spinner = CliSpinner::new("Installing JDK");
        let result = install_jdk(&request, &options);
        spinner.finish();
        add_install_context(result, &args.archive)?
    } else {
        add_install_context(install_jdk(&request, &options), &args.archive)?
    };

    formatter.format_install_result(&report)?;

    Ok(())
}
