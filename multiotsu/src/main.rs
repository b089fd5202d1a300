use clap::{Args, Parser, Subcommand};
use multiotsu::cli::{default_output_path, log_level, report_lines};
use multiotsu::io::{ImageFormat, read_image, write_image};
use multiotsu::threshold::{RegionCount, SegmentOptions, find_thresholds, segment_image};
use std::path::PathBuf;
use std::process::ExitCode;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "multiotsu")]
#[command(version, about = "Multi-level Otsu segmentation", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment an image and write the recolored result
    Segment {
        /// Input image (BMP or PNG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output image; format follows the extension, BMP otherwise
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Print the best thresholds for each region count
    Thresholds {
        /// Input image (BMP or PNG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Region counts to search (comma-separated, from 2, 3, 4)
    #[arg(short = 'k', long = "regions", value_name = "K,...", value_delimiter = ',', default_value = "2,3,4")]
    regions: Vec<RegionCount>,

    /// Search on a single thread
    #[arg(long)]
    sequential: bool,

    /// Histogram subsampling factor
    #[arg(long, value_name = "N", default_value = "1")]
    sample: u32,
}

impl SearchArgs {
    fn options(&self) -> SegmentOptions {
        SegmentOptions::for_counts(&self.regions)
            .with_parallel(!self.sequential)
            .with_sample_factor(self.sample)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    let result = match cli.command {
        Commands::Segment {
            input,
            output,
            search,
        } => cmd_segment(input, output, &search),
        Commands::Thresholds { input, search } => cmd_thresholds(input, &search),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_segment(input: PathBuf, output: Option<PathBuf>, search: &SearchArgs) -> CliResult<()> {
    let pix = read_image(&input)?;
    log::info!(
        "read {} ({}x{}, {} bpp)",
        input.display(),
        pix.width(),
        pix.height(),
        pix.depth().bits()
    );

    let out = segment_image(&pix, &search.options())?;
    let output = output.unwrap_or_else(|| default_output_path(&input));
    write_image(&out.image, &output, ImageFormat::Unknown)?;

    println!("selected: {}", out.report.selected);
    println!("wrote {}", output.display());
    Ok(())
}

fn cmd_thresholds(input: PathBuf, search: &SearchArgs) -> CliResult<()> {
    let pix = read_image(&input)?;
    let report = find_thresholds(&pix, &search.options())?;
    for line in report_lines(&report) {
        println!("{}", line);
    }
    Ok(())
}
