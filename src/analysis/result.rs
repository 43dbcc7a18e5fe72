//! Analysis result types
//!
//! All results are plain data and serialize with camelCase field names so
//! they can be shipped across a message boundary as JSON.

use serde::{Deserialize, Serialize};

use super::metadata::AnalysisMetadata;
use crate::features::envelope::AmplitudeData;
use crate::spectrum::FrequencyData;

/// Key label reported while key detection is unavailable
pub const UNKNOWN_KEY: &str = "unknown";

/// Derived features of a signal, without the raw spectrogram or envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureSet {
    /// Spectral centroid per frame (Hz)
    pub spectral_centroid: Vec<f32>,

    /// Spectral rolloff per frame (Hz)
    pub spectral_rolloff: Vec<f32>,

    /// Zero-crossing rate per 25 ms window (crossings per second)
    pub zero_crossing_rate: Vec<f32>,

    /// Harmonic complexity per frame
    pub harmonic_complexity: Vec<f32>,

    /// 13 cepstral coefficients per frame
    pub mfcc: Vec<Vec<f32>>,

    /// Tempo in BPM (0.0 if undetermined)
    pub tempo: f32,

    /// Beat times in seconds
    pub beats: Vec<f32>,

    /// Key label (always [`UNKNOWN_KEY`])
    pub key: String,
}

/// Complete analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFeatures {
    /// Magnitude spectrogram
    pub frequency_data: FrequencyData,

    /// Amplitude envelope
    pub amplitude_data: AmplitudeData,

    /// Derived features
    #[serde(flatten)]
    pub features: FeatureSet,

    /// Timing and method metadata
    pub metadata: AnalysisMetadata,
}

/// Feature-only result: derived features plus the spectrogram, without the
/// amplitude envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFeatures {
    /// Magnitude spectrogram
    pub frequency_data: FrequencyData,

    /// Derived features
    #[serde(flatten)]
    pub features: FeatureSet,
}

/// Single-frame result of the low-latency path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedFrame {
    /// Magnitude spectrum (`fft_size / 2` bins)
    pub spectrum: Vec<f32>,

    /// Time-domain samples of the frame as received
    pub amplitude: Vec<f32>,

    /// Capture time in milliseconds since the UNIX epoch
    pub timestamp: f64,
}
