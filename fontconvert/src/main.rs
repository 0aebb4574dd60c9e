use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use fontconvert::{
    check_char_range, font_symbol_name, write_gfx_header, Error, FreeTypeRasterizer,
};
use gfx_font::CharRange;

/// Converts a TrueType or OpenType font to an Adafruit GFX font header.
///
/// Glyphs are rendered in monochrome and bit packed without row padding.
#[derive(clap::Parser, Debug)]
#[command(
    after_help = "Example: fontconvert Lexend-Bold.ttf 18 32 255 Lexend_Bold18pt7b.h"
)]
struct Args {
    /// Path to the font file
    font: PathBuf,
    /// Pixel size to render at
    size: u32,
    /// First character code to include
    first_char: u32,
    /// Last character code to include
    last_char: u32,
    /// Header file to write. Written to stdout if omitted
    output: Option<PathBuf>,
    /// Face to use when the font file is a collection
    #[arg(long, default_value_t = 0)]
    face_index: u32,
}

fn main() {
    env_logger::init();

    use clap::Parser as _;
    let args = Args::parse_from(wild::args());

    if let Err(e) = run(&args) {
        eprintln!("fontconvert: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    // check the range before touching the font
    let range = CharRange::new(args.first_char, args.last_char)?;
    check_char_range(range)?;
    let mut rasterizer = FreeTypeRasterizer::open(&args.font, args.face_index, args.size)?;
    let font = gfx_font::assemble(&mut rasterizer, range);
    if !font.substituted().is_empty() {
        log::warn!(
            "{} character(s) not found in '{}' were left empty",
            font.substituted().len(),
            args.font.display()
        );
    }

    let name = font_symbol_name(&args.font.to_string_lossy(), args.size);
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| Error::CreateOutput {
                path: path.clone(),
                source,
            })?;
            let mut out = BufWriter::new(file);
            write_gfx_header(&mut out, &name, &font)?;
            out.flush().map_err(fontconvert::HeaderError::from)?;
            log::info!(
                "wrote {name} ({} glyphs, {} bitmap bytes) to {}",
                font.glyphs().len(),
                font.bitmap().len(),
                path.display()
            );
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            write_gfx_header(&mut out, &name, &font)?;
        }
    }
    Ok(())
}
