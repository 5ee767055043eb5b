use crate::config::{FrameConfig, PipelineConfig};
use crate::error::{Result, SawyerError};
use crate::frame;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	Encode,
	Decode,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecStats {
	pub input_size: u64,
	pub output_size: u64,
	/// Raw size over encoded size, whichever way the data went.
	pub ratio: f64,
}

impl CodecStats {
	fn new(input_size: usize, output_size: usize, direction: Direction) -> Self {
		let (raw, encoded) = match direction {
			Direction::Encode => (input_size, output_size),
			Direction::Decode => (output_size, input_size),
		};
		let ratio = if encoded > 0 { raw as f64 / encoded as f64 } else { 0.0 };
		Self { input_size: input_size as u64, output_size: output_size as u64, ratio }
	}
}

/// Encode everything `reader` yields and write the framed stream.
///
/// Nothing reaches `writer` unless encoding succeeds.
pub fn encode<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	frame: &FrameConfig,
	trailer: Option<&[u8]>,
) -> Result<CodecStats> {
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	let packed = frame::pack(&buffer, frame, trailer)?;
	writer.write_all(&packed)?;
	writer.flush()?;

	Ok(CodecStats::new(buffer.len(), packed.len(), Direction::Encode))
}

/// Decode a framed stream from `reader` into `writer`.
///
/// Nothing reaches `writer` unless decoding succeeds.
pub fn decode<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	frame: &FrameConfig,
) -> Result<CodecStats> {
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	let unpacked = frame::unpack(&buffer, frame)?;
	writer.write_all(&unpacked.data)?;
	writer.flush()?;

	Ok(CodecStats::new(buffer.len(), unpacked.data.len(), Direction::Decode))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
	pub input: PathBuf,
	pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct JobReport {
	pub job: Job,
	pub stats: CodecStats,
}

/// A finished job whose output has not been written yet.
struct Processed {
	report: JobReport,
	data: Vec<u8>,
}

fn process_job(job: Job, direction: Direction, config: &PipelineConfig, trailer: Option<&[u8]>) -> Result<Processed> {
	log::debug!("{:?} {} -> {}", direction, job.input.display(), job.output.display());

	let mut reader = Cursor::new(fs::read(&job.input)?);
	let mut data = Vec::new();

	let stats = match direction {
		Direction::Encode => encode(&mut reader, &mut data, &config.frame, trailer)?,
		Direction::Decode => decode(&mut reader, &mut data, &config.frame)?,
	};

	log::info!("{}: {} -> {} bytes", job.input.display(), stats.input_size, stats.output_size);
	Ok(Processed { report: JobReport { job, stats }, data })
}

/// Write every output, removing the ones already written if any write fails.
fn write_outputs(processed: &[Processed]) -> Result<()> {
	for (i, item) in processed.iter().enumerate() {
		if let Err(e) = fs::write(&item.report.job.output, &item.data) {
			for written in &processed[..=i] {
				let path = &written.report.job.output;
				match fs::remove_file(path) {
					Err(rm) if rm.kind() != std::io::ErrorKind::NotFound => {
						log::warn!("cannot remove {}: {}", path.display(), rm);
					}
					_ => {}
				}
			}
			return Err(e.into());
		}
	}
	Ok(())
}

/// Run independent file jobs on a pool of `config.threads` workers.
///
/// Reports come back in job order. All jobs run in memory first and outputs
/// are only written once every job has succeeded, so a failed batch leaves
/// no output files behind.
pub fn run_batch(
	jobs: Vec<Job>,
	direction: Direction,
	config: &PipelineConfig,
	trailer: Option<&[u8]>,
) -> Result<Vec<JobReport>> {
	let pool = rayon::ThreadPoolBuilder::new()
		.num_threads(config.threads)
		.build()
		.map_err(|e| SawyerError::ConfigError(format!("Cannot build thread pool: {}", e)))?;

	let pb = if config.progress { ProgressBar::new(jobs.len() as u64) } else { ProgressBar::hidden() };
	if let Ok(style) = ProgressStyle::default_bar()
		.template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] Files {pos}/{len} ({eta})")
	{
		pb.set_style(style.progress_chars("#>-"));
	}

	let processed = pool.install(|| {
		jobs.into_par_iter()
			.map(|job| {
				let processed = process_job(job, direction, config, trailer);
				pb.inc(1);
				processed
			})
			.collect::<Result<Vec<_>>>()
	});
	let processed = match processed {
		Ok(processed) => processed,
		Err(e) => {
			pb.abandon_with_message("Failed");
			return Err(e);
		}
	};

	write_outputs(&processed)?;

	pb.finish_with_message("Done");
	Ok(processed.into_iter().map(|item| item.report).collect())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::FramePreset;

	#[test]
	fn test_stream_roundtrip() {
		let original = b"AAAAAAAABBBCDEFFFFFFFFFFFFFFFFF".to_vec();
		let frame = FrameConfig::from(FramePreset::Sc4);

		let mut encoded = Vec::new();
		let stats = encode(&mut Cursor::new(&original), &mut encoded, &frame, Some(&[1, 2, 3, 4])).unwrap();
		assert_eq!(stats.input_size, original.len() as u64);
		assert_eq!(stats.output_size, encoded.len() as u64);
		assert!(stats.ratio > 1.0);
		let encode_ratio = stats.ratio;

		let mut decoded = Vec::new();
		let stats = decode(&mut Cursor::new(&encoded), &mut decoded, &frame).unwrap();
		assert_eq!(decoded, original);
		assert_eq!(stats.output_size, original.len() as u64);
		// both directions report raw over encoded
		assert_eq!(stats.ratio, encode_ratio);
	}

	#[test]
	fn test_encode_empty_stream() {
		let mut out = Vec::new();
		let result = encode(&mut Cursor::new(Vec::new()), &mut out, &FrameConfig::default(), None);
		assert!(matches!(result, Err(SawyerError::EmptyInput)));
		assert!(out.is_empty());
	}

	#[test]
	fn test_decode_writes_nothing_on_error() {
		let mut out = Vec::new();
		let result = decode(&mut Cursor::new(vec![0x00, 0x01, 0x05]), &mut out, &FrameConfig::default());
		assert!(result.is_err());
		assert!(out.is_empty());
	}

	#[test]
	fn test_ratio_matches_stream_info() {
		let stream = [0x84, 0x00, 0x84, 0x00, 0xCF, 0x00];
		let mut decoded = Vec::new();
		let stats = decode(&mut Cursor::new(&stream[..]), &mut decoded, &FrameConfig::default()).unwrap();
		let info = crate::codec::inspect(&stream).unwrap();
		assert_eq!(stats.ratio, info.ratio());
		assert_eq!(stats.ratio, 50.0);
	}
}
