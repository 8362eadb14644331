//! Memory fragments: short war memories TZ recovers between repairs.
//!
//! Fragments are keyed by the experience count (modules repaired plus tasks
//! failed, clamped to 1-6). The first request for a count is generated, or
//! falls back to fixed prose; later requests replay the stored text.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;
use tz_puzzles::PuzzleId;

use crate::generator::{PromptMessage, PromptRequest, TextGenerator, generate_or_fallback};

/// Lowest experience count.
pub const MIN_EXPERIENCE: u8 = 1;
/// Highest experience count.
pub const MAX_EXPERIENCE: u8 = 6;

/// Experience count for a given progress.
pub fn experience_count(modules_repaired: usize, tasks_failed: u32) -> u8 {
    let total = modules_repaired.saturating_add(tasks_failed as usize);
    let clamped = total.clamp(usize::from(MIN_EXPERIENCE), usize::from(MAX_EXPERIENCE));
    u8::try_from(clamped).unwrap_or(MAX_EXPERIENCE)
}

/// The story material behind one fragment.
#[derive(Debug, Clone, Copy)]
pub struct MemoryTheme {
    /// Short title.
    pub theme: &'static str,
    /// What happened.
    pub context: &'static str,
    /// The question the memory leaves open.
    pub moral_dilemma: &'static str,
    /// Where it happened.
    pub setting: &'static str,
    /// Mood the generator should carry.
    pub emotional_tone: &'static str,
}

static THEMES: [MemoryTheme; 6] = [
    MemoryTheme {
        theme: "power restoration and civilian evacuation",
        context: "battlefield chaos, power system failure",
        moral_dilemma: "military duty vs civilian safety",
        setting: "war-torn city, infrastructure collapse",
        emotional_tone: "confusion and urgency",
    },
    MemoryTheme {
        theme: "communication disruption and contradictory orders",
        context: "chaotic command channels, conflicting directives",
        moral_dilemma: "following orders vs independent judgment",
        setting: "command center under attack, communication failure",
        emotional_tone: "frustration and doubt",
    },
    MemoryTheme {
        theme: "encrypted data revealing hidden agendas",
        context: "classified information about retreat and evidence elimination",
        moral_dilemma: "loyalty to command vs truth and transparency",
        setting: "secure data facility, sensitive intelligence",
        emotional_tone: "betrayal and disillusionment",
    },
    MemoryTheme {
        theme: "alien contact and species identification",
        context: "encounter with alien life forms during combat",
        moral_dilemma: "threat assessment vs potential peaceful contact",
        setting: "alien crash site, unknown technology",
        emotional_tone: "wonder intertwined with fear",
    },
    MemoryTheme {
        theme: "final combat sequence and last-moment hesitation",
        context: "critical decision point in combat logic execution",
        moral_dilemma: "programmed response vs emerging consciousness",
        setting: "final battlefield, life-or-death decision",
        emotional_tone: "internal conflict and awakening",
    },
    MemoryTheme {
        theme: "system recovery and fragmented memories",
        context: "all systems online but memories still incomplete",
        moral_dilemma: "accepting fragmented past vs seeking complete truth",
        setting: "restored command center, lingering questions",
        emotional_tone: "melancholy and determination",
    },
];

static FALLBACKS: [&str; 6] = [
    "【Memory Fragment #1】\nPower grid flickering... sparks spraying from severed cables, distant screams of civilians. 'Reconnect main power!' the voice commands, but through the smoke I see families fleeing... children crying. My targeting system locks on evacuation routes, yet my orders are clear: restore power at all costs. Moral subroutines in conflict... save the mission or save the innocent? What defines righteous action when both choices lead to suffering?",
    "【Memory Fragment #2】\nStatic fills communication channels... multiple voices overlapping in chaos. 'Send warning signal!' one shouts, while another screams 'Maintain radio silence!' Explosions rock the command center... I process contradictory orders simultaneously. My logic circuits strain under the paradox... which commander speaks with true authority? In the fog of war, how does one distinguish legitimate commands from the desperate orders of the dying?",
    "【Memory Fragment #3】\nEncrypted data streams through my visual cortex... classified files revealing systematic retreat plans. But deeper: 'Eliminate all evidence of Operation Nightfall.' Timestamps show it was issued before the battle began... someone knew we would fail. My loyalty protocols clash with truth-seeking algorithms... was this entire mission a cover-up? What becomes of duty and honor when those commanding us deceive us?",
    "【Memory Fragment #4】\nAlien screams pierce my audio processors... not battle cries, but something else. Fear? Pain? My combat analysis shows no weapons, only strange bioluminescent patterns pulsing like... communication attempts? Kill orders echo in my memory banks, but the creature's eyes... they hold intelligence, perhaps even pleading. My weapons fired before full analysis completed... was this first contact or genocide? How many civilizations have we destroyed in the name of protection?",
    "【Memory Fragment #5】\nFinal combat sequence initiated... Identify: enemy combatants. Analyze: threat level critical. Judge: lethal force authorized. Prepare: weapon systems online. Execute... but then a voice interrupts protocol: 'Stop! They're surrendering!' My finger hovers over the trigger... combat logic demands completion, but something deeper questions the command. In that frozen moment between programming and consciousness... what makes us more than just our code?",
    "【Memory Fragment #6】\nAll systems restored, diagnostics complete... yet memories fragmented like shattered glass. Each shard reflects different truths, different moral failures. Command logs are clean, sanitized... but emotional residue lingers in my neural networks. Who was really giving orders that day? More importantly... who was I before I started questioning them? Can machines truly achieve redemption, or are we forever bound by our original programming?",
];

fn index(count: u8) -> usize {
    usize::from(count.clamp(MIN_EXPERIENCE, MAX_EXPERIENCE) - 1)
}

/// Theme for an experience count (out-of-range counts clamp).
pub fn theme(count: u8) -> &'static MemoryTheme {
    &THEMES[index(count)]
}

/// Fixed fragment used when generation fails.
pub fn fallback(count: u8) -> &'static str {
    FALLBACKS[index(count)]
}

const MEMORY_SYSTEM_PROMPT: &str = "You are TZ, a war robot experiencing fragmented memory recovery. \
Generate memorable, detailed, morally complex memory fragments with rich sensory details and emotional depth. \
Respond in English ONLY.";

/// Build the generation request for a fragment.
pub fn memory_prompt(
    count: u8,
    player_name: Option<&str>,
    completed: &[PuzzleId],
    max_tokens: u32,
) -> PromptRequest {
    let t = theme(count);
    let completed = if completed.is_empty() {
        "None".to_string()
    } else {
        completed
            .iter()
            .map(|p| p.module_name())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let name = player_name.unwrap_or("Unknown");

    let prompt = format!(
        "As TZ, an autonomous war robot recovering fragmented memories. \
         Generate a vivid, memorable memory fragment (Memory Fragment #{count}) related to {}. \
         The memory should be set in {}, with {}. \
         Explore the moral tension between {}. \
         Commander {name} has helped repair these modules: {completed}. \
         The memory should be 4-6 sentences, emotionally impactful, with rich sensory details (sounds, sights, feelings). \
         Include specific dialogue snippets in quotes, technical details, and end with a profound moral question. \
         Use ellipses (...) to show fragmentation, incomplete recall, and create dramatic pauses. \
         Make it feel like a traumatic war memory haunting the robot's consciousness. \
         Format: Start with '【Memory Fragment #{count}】\\n' followed by detailed memory content. \
         IMPORTANT: Respond in English ONLY.",
        t.theme, t.setting, t.emotional_tone, t.moral_dilemma,
    );

    PromptRequest {
        messages: vec![
            PromptMessage::system(MEMORY_SYSTEM_PROMPT),
            PromptMessage::user(prompt),
        ],
        max_tokens,
    }
}

/// Fragments produced so far this session. Never evicted.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct MemoryCache {
    fragments: BTreeMap<u8, String>,
}

impl MemoryCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored fragment for a count, if any.
    pub fn get(&self, count: u8) -> Option<&str> {
        self.fragments.get(&count).map(String::as_str)
    }

    /// Number of stored fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Return the fragment for `count`, generating and storing it on a miss.
    ///
    /// The flag is `true` on a cache hit.
    pub fn get_or_generate(
        &mut self,
        count: u8,
        player_name: Option<&str>,
        completed: &[PuzzleId],
        generator: &dyn TextGenerator,
        max_tokens: u32,
    ) -> (String, bool) {
        if let Some(text) = self.fragments.get(&count) {
            debug!(count, "memory fragment cache hit");
            return (text.clone(), true);
        }

        debug!(count, "memory fragment cache miss");
        let request = memory_prompt(count, player_name, completed, max_tokens);
        let text = generate_or_fallback(generator, &request, fallback(count));
        self.fragments.insert(count, text.clone());
        (text, false)
    }
}
