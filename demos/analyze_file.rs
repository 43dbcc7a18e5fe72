//! Example: Analyze a single WAV file
//!
//! Loads a WAV file, runs the full analysis and prints the features as JSON.
//!
//! ```text
//! cargo run --example analyze_file -- path/to/audio.wav
//! ```

use spectra_dsp::{analyze_audio, AnalysisConfig, AnalysisContext, Progress};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: analyze_file <file.wav>")?;

    let mut reader = hound::WavReader::open(&path)?;
    let spec = reader.spec();
    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max_value = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / max_value))
                .collect::<Result<_, _>>()?
        }
    };

    // Downmix to mono
    let channels = spec.channels.max(1) as usize;
    let samples: Vec<f32> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    let mut report = |p: Progress| eprintln!("[{:5.1}%] {}", p.percent, p.message);
    let mut ctx = AnalysisContext::with_progress(&mut report);

    let result = analyze_audio(&samples, spec.sample_rate, &AnalysisConfig::default(), &mut ctx)?;

    eprintln!("Analysis Results:");
    eprintln!("  Tempo: {:.2} BPM ({:?})", result.features.tempo, result.metadata.tempo_method);
    eprintln!("  Beats: {}", result.features.beats.len());
    eprintln!("  Frames: {}", result.metadata.frame_count);
    eprintln!("  Processing time: {:.2} ms", result.metadata.processing_time_ms);

    println!("{}", serde_json::to_string(&result.features)?);

    Ok(())
}
