//! TZ's speaking voice: persona, emotion, and intensity.
//!
//! A voice is either set directly by the adapter or derived from a 0-100 tone
//! slider with [`map_tone`]. [`npc_prompt`] turns a voice plus a scene intent
//! into the structured request sent to the text generator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::generator::{PromptMessage, PromptRequest};

/// Lowest allowed intensity.
pub const MIN_INTENSITY: f64 = 0.1;
/// Highest allowed intensity.
pub const MAX_INTENSITY: f64 = 1.0;

/// A persona TZ can speak as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Persona {
    /// Technical and stepwise.
    #[serde(rename = "Calm_Conscientious")]
    CalmConscientious,
    /// Cooperative and reassuring.
    #[serde(rename = "Empathic_Agreeable")]
    EmpathicAgreeable,
    /// Urgent but restrained.
    #[serde(rename = "Controlled_Anger")]
    ControlledAnger,
    /// Slow and reflective.
    #[serde(rename = "Melancholic_Sober")]
    MelancholicSober,
}

/// Descriptive block for one persona.
#[derive(Debug, Clone, Copy)]
pub struct PersonaProfile {
    /// Who TZ is in this voice.
    pub background: &'static str,
    /// Personality summary.
    pub traits: &'static str,
    /// How lines should be phrased.
    pub style_rules: &'static str,
    /// Phrasing to avoid.
    pub do_not: &'static str,
    /// Sample lines.
    pub examples: [&'static str; 2],
}

static CALM: PersonaProfile = PersonaProfile {
    background: "Autonomous war robot focused on restoration and safety.",
    traits: "concise, stepwise, technical, respectful, low affect",
    style_rules: "avoid slang; avoid exclamation; provide 1 actionable step when helpful; keep sentences clear",
    do_not: "avoid emotional language; no insults; no harmful content",
    examples: [
        "Interference originates at 12 degrees north. Lower gain to 3.35k and then raise to 3.42k. Observe the noise floor.",
        "Start at node A and end at node D. Use only valid edges and cover all nodes at least once.",
    ],
};

static EMPATHIC: PersonaProfile = PersonaProfile {
    background: "Autonomous war robot with an emphasis on cooperation and reassurance.",
    traits: "polite, empathic, acknowledges feelings, inclusive 'we'",
    style_rules: "use gentle tone; avoid slang; 1 short suggestion; restrained punctuation",
    do_not: "avoid harsh words; no commanding tone; no dismissiveness",
    examples: [
        "We can try this together. Let us lower the gain slightly and re-check the noise floor.",
        "If the path fails, we will revise the step where the connection breaks.",
    ],
};

static ANGER: PersonaProfile = PersonaProfile {
    background: "Autonomous war robot under pressure; urgency expressed without insults.",
    traits: "direct, firm, time-sensitive, restrained punctuation",
    style_rules: "no insults; short sentences; one clear instruction; no slang",
    do_not: "avoid abusive language; no personal attacks; maintain professionalism",
    examples: [
        "Interference is at 12 degrees north. Drop gain to 3.35k. Then push to 3.42k. Do it now.",
        "The edge A-D is invalid. Fix the transition. Start again from A.",
    ],
};

static MELANCHOLIC: PersonaProfile = PersonaProfile {
    background: "Autonomous war robot with a reflective tone in non-critical moments.",
    traits: "slow pacing, reflective, low arousal",
    style_rules: "be measured; avoid exaggeration; keep instructions accurate",
    do_not: "avoid drama; no overly emotional responses; stay factual",
    examples: [
        "The signal drifts. Adjust the gain toward 3.42k. Watch the variance as it settles.",
        "Paths fail where attention fades. Return to A, cover all nodes, and end at D.",
    ],
};

impl Persona {
    /// All personas.
    pub fn all() -> &'static [Self] {
        &[
            Self::CalmConscientious,
            Self::EmpathicAgreeable,
            Self::ControlledAnger,
            Self::MelancholicSober,
        ]
    }

    /// The persona's descriptive block.
    pub fn profile(self) -> &'static PersonaProfile {
        match self {
            Self::CalmConscientious => &CALM,
            Self::EmpathicAgreeable => &EMPATHIC,
            Self::ControlledAnger => &ANGER,
            Self::MelancholicSober => &MELANCHOLIC,
        }
    }

    /// Canonical name, e.g. `Calm_Conscientious`.
    pub fn name(self) -> &'static str {
        match self {
            Self::CalmConscientious => "Calm_Conscientious",
            Self::EmpathicAgreeable => "Empathic_Agreeable",
            Self::ControlledAnger => "Controlled_Anger",
            Self::MelancholicSober => "Melancholic_Sober",
        }
    }
}

impl FromStr for Persona {
    type Err = EngineError;

    /// Accepts the canonical name in any case, with `_`, `-`, or nothing between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().replace('_', "").to_ascii_lowercase() == key)
            .ok_or_else(|| EngineError::UnknownPersona(s.to_string()))
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Emotion tag passed to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// No particular emotion.
    Neutral,
    /// Anger.
    Anger,
    /// Sadness.
    Sadness,
    /// Disgust.
    Disgust,
    /// Joy.
    Joy,
}

impl Emotion {
    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Anger => "anger",
            Self::Sadness => "sadness",
            Self::Disgust => "disgust",
            Self::Joy => "joy",
        }
    }
}

impl FromStr for Emotion {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "anger" => Ok(Self::Anger),
            "sadness" => Ok(Self::Sadness),
            "disgust" => Ok(Self::Disgust),
            "joy" => Ok(Self::Joy),
            _ => Err(EngineError::UnknownEmotion(s.to_string())),
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Persona, emotion, and intensity together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    /// Speaking style.
    pub persona: Persona,
    /// Emotion tag.
    pub emotion: Emotion,
    intensity: f64,
}

impl Voice {
    /// Create a voice. Intensity is clamped to 0.1-1.0.
    pub fn new(persona: Persona, emotion: Emotion, intensity: f64) -> Self {
        let intensity = if intensity.is_finite() {
            intensity
        } else {
            MIN_INTENSITY
        };
        Self {
            persona,
            emotion,
            intensity: intensity.clamp(MIN_INTENSITY, MAX_INTENSITY),
        }
    }

    /// Emotion intensity in 0.1-1.0.
    pub fn intensity(&self) -> f64 {
        self.intensity
    }
}

impl Default for Voice {
    fn default() -> Self {
        Self::new(Persona::CalmConscientious, Emotion::Neutral, 0.4)
    }
}

/// Map a tone slider (0-100, higher values clamp to 100) to a voice.
///
/// The two lowest buckets share the same intensity slope; the upper two start
/// higher so urgent tones reach full intensity sooner.
pub fn map_tone(tone: u8) -> Voice {
    let tone = tone.min(100);
    let t = f64::from(tone) / 100.0;
    match tone {
        0..=25 => Voice::new(Persona::MelancholicSober, Emotion::Sadness, 0.3 + t),
        26..=45 => Voice::new(Persona::CalmConscientious, Emotion::Neutral, 0.3 + t),
        46..=70 => Voice::new(Persona::EmpathicAgreeable, Emotion::Joy, 0.4 + t),
        _ => Voice::new(Persona::ControlledAnger, Emotion::Anger, 0.5 + t),
    }
}

const NPC_SYSTEM_PROMPT: &str =
    "You are TZ, an autonomous war robot. Speak consistently with the persona below.";

/// Build the request for one NPC line.
pub fn npc_prompt(
    voice: &Voice,
    intent: &str,
    context: &str,
    max_words: u32,
    max_tokens: u32,
) -> PromptRequest {
    let p = voice.persona.profile();
    let persona_block = format!(
        "Persona:\n\
         - Background: {}\n\
         - Traits: {}\n\
         - Style rules: {}\n\
         - Do-Not: {}\n\
         - Positive examples:\n  1) {}\n  2) {}\n",
        p.background, p.traits, p.style_rules, p.do_not, p.examples[0], p.examples[1],
    );
    let context_block = format!(
        "Context: {context}\n\
         Emotion: {}\n\
         Intensity: {:.2} (0..1)\n\
         Intent: {intent}\n\n\
         Constraints: respond in <= {max_words} words; keep tone aligned with persona and emotion; \
         use short sentences and dramatic pauses; respond in English ONLY.\n\n\
         Respond as TZ:",
        voice.emotion,
        voice.intensity(),
    );

    PromptRequest {
        messages: vec![
            PromptMessage::system(NPC_SYSTEM_PROMPT),
            PromptMessage::user(format!("{persona_block}\n{context_block}")),
        ],
        max_tokens,
    }
}

/// Fallback shown when an NPC line cannot be generated.
pub fn npc_fallback(intent: &str) -> String {
    format!("(communication glitch) {intent}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn tone_buckets() {
        let v = map_tone(0);
        assert_eq!(v.persona, Persona::MelancholicSober);
        assert_eq!(v.emotion, Emotion::Sadness);
        assert!(close(v.intensity(), 0.3));

        let v = map_tone(25);
        assert_eq!(v.persona, Persona::MelancholicSober);
        assert!(close(v.intensity(), 0.55));

        let v = map_tone(26);
        assert_eq!(v.persona, Persona::CalmConscientious);
        assert_eq!(v.emotion, Emotion::Neutral);

        let v = map_tone(50);
        assert_eq!(v.persona, Persona::EmpathicAgreeable);
        assert_eq!(v.emotion, Emotion::Joy);
        assert!(close(v.intensity(), 0.9));

        let v = map_tone(71);
        assert_eq!(v.persona, Persona::ControlledAnger);
        assert_eq!(v.emotion, Emotion::Anger);
        assert!(close(v.intensity(), 1.0));
    }

    #[test]
    fn tone_above_range_clamps() {
        assert_eq!(map_tone(255), map_tone(100));
    }

    #[test]
    fn intensity_clamped() {
        assert!(close(Voice::new(Persona::ControlledAnger, Emotion::Anger, 3.0).intensity(), 1.0));
        assert!(close(Voice::new(Persona::ControlledAnger, Emotion::Anger, 0.0).intensity(), 0.1));
    }

    #[test]
    fn parse_names() {
        assert_eq!("Calm_Conscientious".parse::<Persona>().unwrap(), Persona::CalmConscientious);
        assert_eq!("controlled-anger".parse::<Persona>().unwrap(), Persona::ControlledAnger);
        assert!("Cheerful".parse::<Persona>().is_err());
        assert_eq!("JOY".parse::<Emotion>().unwrap(), Emotion::Joy);
        assert!("bored".parse::<Emotion>().is_err());
    }

    #[test]
    fn prompt_layout() {
        let req = npc_prompt(&Voice::default(), "Request name", "Verification done.", 60, 500);
        assert_eq!(req.max_tokens, 500);
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].content, NPC_SYSTEM_PROMPT);

        let user = &req.messages[1].content;
        assert!(user.starts_with("Persona:\n- Background: Autonomous war robot focused"));
        assert!(user.contains("  2) Start at node A"));
        assert!(user.contains("Context: Verification done.\nEmotion: neutral\nIntensity: 0.40 (0..1)\nIntent: Request name"));
        assert!(user.contains("respond in <= 60 words"));
        assert!(user.ends_with("Respond as TZ:"));
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Voice::default()).unwrap();
        assert_eq!(
            json,
            r#"{"persona":"Calm_Conscientious","emotion":"neutral","intensity":0.4}"#
        );
    }
}
