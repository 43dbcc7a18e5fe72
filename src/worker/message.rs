//! Request and response messages exchanged with the analysis worker
//!
//! Messages are internally tagged by `type` and serialize to camelCase JSON.
//! Required request fields are optional at the type level so that a
//! malformed request can still be decoded and answered with
//! [`Response::Error`].

use serde::{Deserialize, Serialize};

use crate::analysis::result::{AudioFeatures, ExtractedFeatures, ProcessedFrame};
use crate::config::ConfigOverrides;

/// Work submitted to the worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    /// Full analysis of a signal
    Analyze {
        /// Mono samples
        samples: Option<Vec<f32>>,
        /// Sample rate in Hz
        sample_rate: Option<u32>,
        /// Overrides merged into the worker's current configuration
        #[serde(default)]
        config: Option<ConfigOverrides>,
        /// Progress is reported under this id when present
        #[serde(default)]
        progress_id: Option<String>,
    },

    /// Spectrum of a single frame
    ProcessRealtime {
        /// Frame samples
        samples: Option<Vec<f32>>,
    },

    /// Derived features only (no spectrogram or envelope)
    ExtractFeatures {
        /// Mono samples
        samples: Option<Vec<f32>>,
        /// Sample rate in Hz
        sample_rate: Option<u32>,
        /// Progress is reported under this id when present
        #[serde(default)]
        progress_id: Option<String>,
    },
}

/// Result or notification produced by the worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Response {
    /// Full analysis finished
    AnalysisComplete {
        /// Analysis result
        result: Box<AudioFeatures>,
    },

    /// Realtime frame processed
    RealtimeFrame {
        /// Frame result
        frame: ProcessedFrame,
    },

    /// Feature-only extraction finished
    FeaturesExtracted {
        /// Extracted features and spectrogram
        features: ExtractedFeatures,
    },

    /// Progress of a running request
    Progress {
        /// Id supplied with the request
        id: String,
        /// Completion percentage (0.0-100.0)
        percent: f32,
        /// Human-readable stage description
        message: String,
    },

    /// Request failed
    Error {
        /// Failure description
        message: String,
    },
}

impl Response {
    /// Whether this response ends a request (anything but progress)
    pub fn is_final(&self) -> bool {
        !matches!(self, Response::Progress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_from_json() {
        let request: Request = serde_json::from_str(
            r#"{"type":"analyze","samples":[0.0,0.5],"sampleRate":44100,"progressId":"job-1"}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            Request::Analyze {
                samples: Some(vec![0.0, 0.5]),
                sample_rate: Some(44100),
                config: None,
                progress_id: Some("job-1".to_string()),
            }
        );
    }

    #[test]
    fn test_malformed_request_still_decodes() {
        let request: Request = serde_json::from_str(r#"{"type":"extractFeatures"}"#).unwrap();
        assert!(matches!(
            request,
            Request::ExtractFeatures {
                samples: None,
                sample_rate: None,
                ..
            }
        ));
    }

    #[test]
    fn test_error_response_json() {
        let response = Response::Error {
            message: "Invalid input: missing samples".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"type":"error","message":"Invalid input: missing samples"}"#);
        assert!(response.is_final());
    }
}
