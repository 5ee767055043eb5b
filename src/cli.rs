use crate::codec;
use crate::config::{FrameConfig, FramePreset, PipelineConfig};
use crate::error::SawyerError;
use crate::frame;
use crate::pipeline::{self, Direction, Job};
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = "Sawyer run-length codec for legacy park save and graphics files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct FrameArgs {
    /// Container preset [raw, sv4, sc4]
    #[arg(short, long, default_value = "raw")]
    preset: FramePreset,

    /// Override the trailer length in bytes
    #[arg(long, value_name = "BYTES")]
    trailer: Option<usize>,

    /// Require this exact decoded length
    #[arg(long, value_name = "BYTES")]
    expect_len: Option<usize>,

    /// Skip the preset's decoded length check
    #[arg(long, conflicts_with = "expect_len")]
    no_length_check: bool,
}

impl FrameArgs {
    fn frame(&self) -> FrameConfig {
        let mut frame = FrameConfig::from(self.preset);
        if let Some(trailer) = self.trailer {
            frame = frame.with_trailer_len(trailer);
        }
        if self.expect_len.is_some() || self.no_length_check {
            frame = frame.with_expected_len(self.expect_len);
        }
        frame
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Encodes raw files
    Encode {
        /// Files to encode
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Output file name (single input only, default: <input>.rle)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Copy the trailer from an existing encoded file
        #[arg(long, value_name = "FILE")]
        trailer_from: Option<PathBuf>,

        #[command(flatten)]
        frame: FrameArgs,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },
    /// Decodes encoded files
    Decode {
        /// Files to decode
        #[arg(required = true, value_name = "FILE")]
        inputs: Vec<PathBuf>,

        /// Output file name (single input only, default: <input>.raw)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        frame: FrameArgs,

        /// Number of threads to use (default: all available cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Show a progress bar
        #[arg(long)]
        progress: bool,
    },
    /// Lists the records of an encoded file
    Inspect {
        /// File to inspect
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        frame: FrameArgs,

        /// Print every record
        #[arg(short, long)]
        verbose: bool,
    },
}

/// Append `suffix` as an extra extension, keeping the original one.
fn derive_output(input: &Path, suffix: &str) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn plan_jobs(inputs: &[PathBuf], output: Option<&PathBuf>, suffix: &str) -> Result<Vec<Job>, SawyerError> {
    match (inputs, output) {
        ([input], Some(output)) => Ok(vec![Job { input: input.clone(), output: output.clone() }]),
        (_, Some(_)) => Err(SawyerError::ConfigError("--output requires a single input".to_string())),
        (inputs, None) => Ok(inputs
            .iter()
            .map(|input| Job { input: input.clone(), output: derive_output(input, suffix) })
            .collect()),
    }
}

fn run_files(
    direction: Direction,
    jobs: Vec<Job>,
    config: PipelineConfig,
    trailer: Option<Vec<u8>>,
) -> Result<(), SawyerError> {
    let verb = match direction {
        Direction::Encode => "Encoding",
        Direction::Decode => "Decoding",
    };
    println!("{} {} file(s) on {} thread(s)...", verb, jobs.len(), config.threads);

    let start = Instant::now();
    let reports = pipeline::run_batch(jobs, direction, &config, trailer.as_deref())?;
    let duration = start.elapsed();

    for report in &reports {
        println!(
            "  {} -> {}: {} -> {} bytes ({:.2}x)",
            report.job.input.display(),
            report.job.output.display(),
            report.stats.input_size,
            report.stats.output_size,
            report.stats.ratio,
        );
    }
    println!("  Elapsed Time: {:.2?}", duration);
    Ok(())
}

fn inspect_file(input: &Path, config: &FrameConfig, verbose: bool) -> Result<(), SawyerError> {
    let file = fs::read(input)?;
    let (body, trailer) = frame::split_trailer(&file, config.trailer_len)?;

    if verbose {
        for item in codec::records(body) {
            let (offset, record) = item?;
            match record {
                codec::Record::Literal(bytes) => println!("{:08X}  literal x{:<3} {:02X?}", offset, bytes.len(), bytes),
                codec::Record::Repeat { value, count } => println!("{:08X}  repeat  x{:<3} {:02X}", offset, count, value),
            }
        }
    }

    let info = codec::inspect(body)?;
    println!("{}", input.display());
    println!("  Encoded Size:  {} bytes", info.encoded_size);
    println!("  Decoded Size:  {} bytes", info.decoded_size);
    println!("  Records:       {} ({} literal, {} repeat)", info.records(), info.literal_runs, info.repeat_runs);
    println!("  Longest Run:   {}", info.longest_run);
    println!("  Ratio:         {:.2}x", info.ratio());
    if !trailer.is_empty() {
        println!("  Trailer:       {:02X?}", trailer);
    }
    frame::check_len(info.decoded_size, config.expected_len)
}

pub fn run() -> Result<(), SawyerError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { inputs, output, trailer_from, frame: frame_args, threads, progress } => {
            let frame = frame_args.frame();
            let trailer = match trailer_from {
                Some(path) => {
                    let file = fs::read(path)?;
                    let (_, trailer) = frame::split_trailer(&file, frame.trailer_len)?;
                    Some(trailer.to_vec())
                }
                None => None,
            };
            let config = PipelineConfig {
                frame,
                threads: threads.unwrap_or_else(num_cpus::get),
                progress,
            };
            let jobs = plan_jobs(&inputs, output.as_ref(), "rle")?;
            run_files(Direction::Encode, jobs, config, trailer)?;
        }
        Commands::Decode { inputs, output, frame: frame_args, threads, progress } => {
            let config = PipelineConfig {
                frame: frame_args.frame(),
                threads: threads.unwrap_or_else(num_cpus::get),
                progress,
            };
            let jobs = plan_jobs(&inputs, output.as_ref(), "raw")?;
            run_files(Direction::Decode, jobs, config, None)?;
        }
        Commands::Inspect { input, frame: frame_args, verbose } => {
            inspect_file(&input, &frame_args.frame(), verbose)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output() {
        assert_eq!(derive_output(Path::new("park.sv4"), "raw"), PathBuf::from("park.sv4.raw"));
        assert_eq!(derive_output(Path::new("dir/csg1.dat"), "rle"), PathBuf::from("dir/csg1.dat.rle"));
    }

    #[test]
    fn test_plan_jobs() {
        let inputs = vec![PathBuf::from("a.sv4"), PathBuf::from("b.sv4")];
        let jobs = plan_jobs(&inputs, None, "raw").unwrap();
        assert_eq!(jobs[1].output, PathBuf::from("b.sv4.raw"));

        let out = PathBuf::from("out.bin");
        assert!(plan_jobs(&inputs, Some(&out), "raw").is_err());
        let jobs = plan_jobs(&inputs[..1], Some(&out), "raw").unwrap();
        assert_eq!(jobs, vec![Job { input: inputs[0].clone(), output: out }]);
    }

    #[test]
    fn test_frame_args_override() {
        let args = FrameArgs { preset: FramePreset::Sv4, trailer: Some(0), expect_len: None, no_length_check: true };
        assert_eq!(args.frame(), FrameConfig::default());

        let args = FrameArgs { preset: FramePreset::Sv4, trailer: None, expect_len: None, no_length_check: false };
        assert_eq!(args.frame(), FrameConfig::from(FramePreset::Sv4));
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["sawyer", "decode", "--preset", "sv4", "-t", "2", "park.sv4"]).unwrap();
        match cli.command {
            Commands::Decode { inputs, frame, threads, .. } => {
                assert_eq!(inputs, vec![PathBuf::from("park.sv4")]);
                assert_eq!(frame.preset, FramePreset::Sv4);
                assert_eq!(threads, Some(2));
            }
            _ => panic!("expected decode"),
        }
    }
}
