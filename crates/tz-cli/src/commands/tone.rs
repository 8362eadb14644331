//! `tz tone`: show the voice a tone value maps to.

use colored::Colorize;

use tz_engine::map_tone;

use super::parse_tone;

/// Print the persona, emotion, and intensity for a tone value.
pub fn run(value: u32) -> Result<(), String> {
    let voice = map_tone(parse_tone(value)?);
    let profile = voice.persona.profile();

    println!("{} {value}", "Tone".bold());
    println!("  Persona:   {}", voice.persona);
    println!("  Emotion:   {}", voice.emotion);
    println!("  Intensity: {:.2}", voice.intensity());
    println!("  Traits:    {}", profile.traits.dimmed());
    Ok(())
}
