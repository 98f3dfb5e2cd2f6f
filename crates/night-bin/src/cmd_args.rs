/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

fn probe() -> Command {
    Command::new("probe")
        .about("Print format and dimensions of images as JSON")
        .arg(Arg::new("in")
            .help("Image files to inspect")
            .action(ArgAction::Append)
            .required(true))
}

#[rustfmt::skip]
fn convert() -> Command {
    Command::new("convert")
        .about("Decode an image and encode it as PNG or QOI")
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input file to read data from")
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output to write the data to")
            .required(true))
        .arg(Arg::new("format")
            .long("format")
            .help("Output format, inferred from the output extension when absent")
            .value_parser(["png", "qoi"]))
}

#[rustfmt::skip]
fn glyph() -> Command {
    Command::new("glyph")
        .about("Render a single glyph from a TrueType font into a PNG")
        .arg(Arg::new("font")
            .long("font")
            .help("TrueType font file")
            .required(true))
        .arg(Arg::new("char")
            .long("char")
            .help("Character to render")
            .required(true))
        .arg(Arg::new("size")
            .long("size")
            .help("Pixel height of one em")
            .default_value("32")
            .value_parser(value_parser!(f32)))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("PNG file to write the coverage to")
            .required(true))
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("night")
        .about("Inspect and convert images, render font glyphs")
        .subcommand_required(true)
        .subcommand(probe())
        .subcommand(convert())
        .subcommand(glyph())
        .arg(Arg::new("debug")
            .long("debug")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .global(true)
            .help_heading("ADVANCED")
            .help("Maximum width of images to decode")
            .default_value("16384")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("max-height")
            .long("max-height")
            .global(true)
            .help_heading("ADVANCED")
            .help("Maximum height of images to decode")
            .default_value("16384")
            .value_parser(value_parser!(usize)))
        .arg(Arg::new("strict")
            .long("strict")
            .global(true)
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Treat recoverable non-conformance as an error"))
}
