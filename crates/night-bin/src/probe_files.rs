/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{error, info};
use night_image::probe;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::CliErrors;
use crate::file_io::read_file;
use crate::serde::Metadata;

/// Probe input files, extract metadata, and print to standard output.
///
/// Files that cannot be probed are logged and skipped, the command
/// fails if none could be read.
pub fn probe_input_files(args: &ArgMatches, options: &CmdOptions) -> Result<(), CliErrors> {
    let decoder_options = options.decoder_options();
    let mut probed = 0;

    for in_file in args.get_many::<String>("in").into_iter().flatten() {
        let contents = read_file(in_file)?;

        match probe(&contents, decoder_options) {
            Ok(info) => {
                let metadata = Metadata::new(in_file, contents.len(), info);
                let json = serde_json::to_string_pretty(&metadata)
                    .map_err(|e| CliErrors::Generic(e.to_string()))?;

                println!("{json}");
                probed += 1;
            }
            Err(e) => error!("Could not probe {in_file}: {e:?}")
        }
    }
    info!("Probed {probed} files");

    if probed == 0 {
        return Err(CliErrors::Generic("No file could be probed".to_string()));
    }
    Ok(())
}
