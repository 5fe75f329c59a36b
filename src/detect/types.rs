use serde::{Deserialize, Serialize};

use super::error::DetectError;

/// Languages the detector accepts, matched case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Tamil,
    English,
    Hindi,
    Malayalam,
    Telugu,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "tamil" => Some(Language::Tamil),
            "english" => Some(Language::English),
            "hindi" => Some(Language::Hindi),
            "malayalam" => Some(Language::Malayalam),
            "telugu" => Some(Language::Telugu),
            _ => None,
        }
    }

    /// Lowercase form used in detection logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Tamil => "tamil",
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Malayalam => "malayalam",
            Language::Telugu => "telugu",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "AI_GENERATED")]
    AiGenerated,
    #[serde(rename = "HUMAN")]
    Human,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::AiGenerated => "AI_GENERATED",
            Classification::Human => "HUMAN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "AI_GENERATED" => Some(Classification::AiGenerated),
            "HUMAN" => Some(Classification::Human),
            _ => None,
        }
    }
}

/// Request body as it arrives on the wire, before any validation.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct RawDetectionRequest {
    pub language: Option<String>,
    #[serde(rename = "audioFormat")]
    pub audio_format: Option<String>,
    #[serde(rename = "audioBase64")]
    pub audio_base64: Option<String>,
}

impl RawDetectionRequest {
    /// Field presence, language membership and the mp3-only format check.
    ///
    /// `audioBase64` may be empty: a zero-length payload is a valid
    /// degenerate input further down the pipeline.
    pub fn validate(self) -> Result<DetectionRequest, DetectError> {
        let language_raw = match self.language {
            Some(l) if !l.is_empty() => l,
            _ => return Err(DetectError::MissingField("language")),
        };
        let audio_format = match self.audio_format {
            Some(f) if !f.is_empty() => f,
            _ => return Err(DetectError::MissingField("audioFormat")),
        };
        let audio_base64 = self
            .audio_base64
            .ok_or(DetectError::MissingField("audioBase64"))?;

        let language = Language::parse(&language_raw)
            .ok_or_else(|| DetectError::UnsupportedLanguage(language_raw.clone()))?;

        if !audio_format.eq_ignore_ascii_case("mp3") {
            return Err(DetectError::UnsupportedFormat(audio_format));
        }

        Ok(DetectionRequest {
            language,
            language_raw,
            audio_base64,
        })
    }
}

/// A validated request; `language_raw` keeps the caller's original
/// spelling for echoing back in the response.
#[derive(Debug, Clone)]
pub struct DetectionRequest {
    pub language: Language,
    pub language_raw: String,
    pub audio_base64: String,
}

/// Statistical descriptors of the decoded audio prefix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AudioFeatures {
    pub mean: f64,
    pub variance: f64,
    pub zero_crossings: usize,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(language: &str, format: &str, audio: &str) -> RawDetectionRequest {
        RawDetectionRequest {
            language: Some(language.to_string()),
            audio_format: Some(format.to_string()),
            audio_base64: Some(audio.to_string()),
        }
    }

    #[test]
    fn test_language_case_insensitive() {
        assert_eq!(Language::parse("ENGLISH"), Some(Language::English));
        assert_eq!(Language::parse("tamil"), Some(Language::Tamil));
        assert_eq!(Language::parse("MalaYalam"), Some(Language::Malayalam));
        assert_eq!(Language::parse("klingon"), None);
    }

    #[test]
    fn test_validate_accepts_valid_body() {
        let req = raw("English", "mp3", "QQ==").validate().unwrap();
        assert_eq!(req.language, Language::English);
        assert_eq!(req.language_raw, "English");
        assert_eq!(req.audio_base64, "QQ==");
    }

    #[test]
    fn test_validate_format_case_insensitive() {
        assert!(raw("English", "MP3", "QQ==").validate().is_ok());
        assert!(matches!(
            raw("English", "wav", "QQ==").validate(),
            Err(DetectError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_validate_missing_fields() {
        let body = RawDetectionRequest {
            language: None,
            audio_format: Some("mp3".to_string()),
            audio_base64: Some("QQ==".to_string()),
        };
        assert!(matches!(
            body.validate(),
            Err(DetectError::MissingField("language"))
        ));

        let body = RawDetectionRequest {
            language: Some("English".to_string()),
            audio_format: Some("".to_string()),
            audio_base64: Some("QQ==".to_string()),
        };
        assert!(matches!(
            body.validate(),
            Err(DetectError::MissingField("audioFormat"))
        ));
    }

    #[test]
    fn test_validate_unsupported_language() {
        assert!(matches!(
            raw("Klingon", "mp3", "QQ==").validate(),
            Err(DetectError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_empty_audio_is_accepted() {
        let req = raw("Hindi", "mp3", "").validate().unwrap();
        assert_eq!(req.audio_base64, "");
    }

    #[test]
    fn test_classification_wire_names() {
        assert_eq!(
            serde_json::to_string(&Classification::AiGenerated).unwrap(),
            "\"AI_GENERATED\""
        );
        assert_eq!(
            serde_json::to_string(&Classification::Human).unwrap(),
            "\"HUMAN\""
        );
        assert_eq!(
            Classification::parse("HUMAN"),
            Some(Classification::Human)
        );
    }
}
