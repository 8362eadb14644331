//! Subcommand implementations and their shared arguments.

pub mod ending;
pub mod play;
pub mod tone;

use clap::Args;
use tracing::warn;

use tz_engine::{Emotion, EngineError, OfflineGenerator, Persona, TextGenerator, Voice, map_tone};

use crate::http::HttpGenerator;

/// Text generator endpoint settings.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Chat-completions endpoint
    #[arg(
        long,
        env = "TZ_API_URL",
        default_value = "https://api.deepseek.com/v1/chat/completions"
    )]
    pub api_url: String,

    /// Model name
    #[arg(long, env = "TZ_MODEL", default_value = "deepseek-chat")]
    pub model: String,

    /// Bearer token; without one the session runs offline
    #[arg(long, env = "TZ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "TZ_TIMEOUT_SECS", default_value = "30")]
    pub timeout: u64,
}

/// Voice settings. `--persona` wins over `--tone`.
#[derive(Args, Debug, Clone, Default)]
pub struct VoiceArgs {
    /// Tone value (0-100) to derive the voice from
    #[arg(long)]
    pub tone: Option<u32>,

    /// Persona name, e.g. Calm_Conscientious
    #[arg(long)]
    pub persona: Option<String>,

    /// Emotion: neutral, anger, sadness, disgust, joy
    #[arg(long)]
    pub emotion: Option<String>,

    /// Emotion intensity (0.1-1.0)
    #[arg(long)]
    pub intensity: Option<f64>,
}

impl VoiceArgs {
    /// The requested voice, or `None` to keep the default.
    pub fn resolve(&self) -> Result<Option<Voice>, String> {
        if let Some(persona) = &self.persona {
            let persona: Persona = persona.parse().map_err(|e: EngineError| e.to_string())?;
            let emotion = match &self.emotion {
                Some(name) => name.parse().map_err(|e: EngineError| e.to_string())?,
                None => Emotion::Neutral,
            };
            let intensity = self.intensity.unwrap_or(Voice::default().intensity());
            return Ok(Some(Voice::new(persona, emotion, intensity)));
        }

        match self.tone {
            Some(tone) => parse_tone(tone).map(|t| Some(map_tone(t))),
            None => Ok(None),
        }
    }
}

/// Validate a 0-100 tone value.
pub fn parse_tone(tone: u32) -> Result<u8, String> {
    u8::try_from(tone)
        .ok()
        .filter(|t| *t <= 100)
        .ok_or_else(|| EngineError::InvalidTone(tone).to_string())
}

/// Pick the generator for a session.
pub fn build_generator(api: &ApiArgs, offline: bool) -> Result<Box<dyn TextGenerator>, String> {
    if offline {
        return Ok(Box::new(OfflineGenerator));
    }
    match &api.api_key {
        Some(key) if !key.trim().is_empty() => {
            let generator = HttpGenerator::new(&api.api_url, &api.model, key, api.timeout)?;
            Ok(Box::new(generator))
        }
        _ => {
            warn!("no API key configured, running offline");
            Ok(Box::new(OfflineGenerator))
        }
    }
}
