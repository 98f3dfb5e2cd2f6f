/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, trace};
use night_image::load_with_options;

use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::CliErrors;
use crate::file_io::{output_format, read_file, write_image};
use crate::glyph::render_glyph;
use crate::probe_files::probe_input_files;

fn convert(args: &ArgMatches, options: &CmdOptions) -> Result<(), CliErrors> {
    let (Some(input), Some(out)) = (args.get_one::<String>("in"), args.get_one::<String>("out"))
    else {
        return Err(CliErrors::Generic("Missing input or output".to_string()));
    };
    let format = output_format(out, args.get_one::<String>("format"))?;

    let contents = read_file(input)?;
    let image = load_with_options(&contents, options.decoder_options())?;

    trace!("Decoded {input} to {}x{}", image.width(), image.height());

    write_image(out, format, &image)?;
    info!("Converted {input} to {out}");
    Ok(())
}

pub fn exec_workflow_from_cmd(name: &str, args: &ArgMatches, options: &CmdOptions) -> Result<(), CliErrors> {
    match name {
        "probe" => probe_input_files(args, options),
        "convert" => convert(args, options),
        "glyph" => render_glyph(args),
        _ => Err(CliErrors::Generic(format!("Unknown command {name}")))
    }
}
