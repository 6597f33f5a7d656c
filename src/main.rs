use capline::caption::{CaptionId, CaptionRecord};
use capline::extension::{self, ExtendOpts};
use capline::filter::GroupFilter;
use capline::loader;
use capline::placement::PhraseLayout;
use capline::serialiser;

use std::io::{self, Read, Write};
use std::ops::Range;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command) {
        eprintln!("An error occurred: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("    {}", cause);
        }
        std::process::exit(1);
    }
}

#[derive(ClapParser)]
#[command(about = "Compute caption extensions and phrase placement for lyric videos")]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Increase log verbosity (-v, -vv, -vvv).")]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute how many extra frames each caption of a group stays visible.
    Extend(ExtendArgs),
    /// Print scene positions for a run of phrase indices.
    Place(PlaceArgs),
    /// Print the camera depth at a point in time.
    Camera(CameraArgs),
}

#[derive(Args)]
struct ExtendArgs {
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The caption file (JSON, or SRT by extension). If not supplied, JSON is read from standard input.",
        default_value = "-"
    )]
    input: String,
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "The file to write to. If not supplied, results are written to standard output.",
        default_value = "-"
    )]
    output: String,
    #[arg(long, value_name = "NAME", group = "filter", help = "Only captions whose section equals NAME.")]
    section: Option<String>,
    #[arg(long, value_name = "REGEX", group = "filter", help = "Only captions whose section matches REGEX.")]
    section_pattern: Option<String>,
    #[arg(long, value_name = "IDS", group = "filter", value_delimiter = ',', help = "Only captions with these comma-separated ids.")]
    ids: Vec<String>,
    #[arg(long, default_value_t = 30.0, help = "Frame rate used to convert seconds to frames.")]
    fps: f64,
    #[arg(long, default_value_t = 0, help = "Fixed number of frames added to every extension.")]
    buffer_frames: i64,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Args)]
struct PlaceArgs {
    #[arg(long, help = "Number of phrases to place.")]
    count: usize,
    #[arg(long, default_value_t = 0, help = "Index of the first phrase.")]
    from: usize,
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Args)]
struct CameraArgs {
    #[arg(long, help = "Elapsed time in seconds.")]
    seconds: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Table,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Extend(args) => extend(args),
        Command::Place(args) => place(args),
        Command::Camera(args) => {
            println!("{}", PhraseLayout::default().camera_depth_at(args.seconds));
            Ok(())
        }
    }
}

fn extend(args: ExtendArgs) -> Result<()> {
    let records = read_captions(&args.input)?;
    if records.is_empty() {
        return Err(anyhow!("You appear to have supplied an empty caption file."));
    }
    if !(args.fps > 0.0) {
        bail!("Frame rate must be positive, got {}", args.fps);
    }

    let filter = build_filter(&args)?;
    let opts = ExtendOpts {
        frame_rate: args.fps,
        fixed_buffer_frames: args.buffer_frames,
    };
    let results = extension::compute_checked(&records, &filter, &opts)
        .context(format!("Failed to compute extensions for '{}'", args.input))?;

    let dst = open_output(&args.output)?;
    match args.format {
        Format::Table => serialiser::write_extension_table(dst, &records, &results),
        Format::Json => serialiser::write_json(dst, &results),
    }
}

fn place(args: PlaceArgs) -> Result<()> {
    let layout = PhraseLayout::default();
    let positions: Vec<_> = index_range(args.from, args.count)?
        .map(|i| layout.position_for(i))
        .collect();
    let dst = io::stdout();
    match args.format {
        Format::Table => serialiser::write_position_table(dst, args.from, &positions),
        Format::Json => serialiser::write_json(dst, &positions),
    }
}

fn index_range(from: usize, count: usize) -> Result<Range<usize>> {
    match from.checked_add(count) {
        Some(end) => Ok(from..end),
        None => bail!("Phrase indices {} + {} do not fit in an index", from, count),
    }
}

fn build_filter(args: &ExtendArgs) -> Result<GroupFilter> {
    if let Some(section) = &args.section {
        return Ok(GroupFilter::section(section.as_str()));
    }
    if let Some(pattern) = &args.section_pattern {
        return GroupFilter::section_pattern(pattern).context("Invalid --section-pattern");
    }
    if !args.ids.is_empty() {
        return Ok(GroupFilter::ids(args.ids.iter().map(|t| CaptionId::from_token(t))));
    }
    Ok(GroupFilter::All)
}

fn read_captions(input: &str) -> Result<Vec<CaptionRecord>> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        return loader::load_json(&buffer).context("Failed to parse captions from stdin");
    }
    loader::load_path(Path::new(input)).context(format!("Failed to load caption file: '{}'", input))
}

fn open_output(output: &str) -> Result<Box<dyn Write>> {
    if output == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        let file = std::fs::File::create(output).context(format!("Failed to create output file: '{}'", output))?;
        Ok(Box::new(file))
    }
}
