//! Memory interludes between tasks.

use chrono::Utc;
use tz_puzzles::{Answer, Choice, normalize_text, parse_choice};

use super::{answer, yes_no_prompt};
use crate::journal::JournalEntry;
use crate::memory::experience_count;
use crate::response::{Message, Response};
use crate::script;
use crate::session::Session;
use crate::stage::{Next, Stage};

/// `Some(true)` to play the fragment, `Some(false)` to skip it.
fn wants_playback(text: &str) -> Option<bool> {
    match parse_choice(text) {
        Some(Choice::A) => return Some(true),
        Some(Choice::B) => return Some(false),
        _ => {}
    }
    match answer(text) {
        Some(Answer::Yes) => Some(true),
        Some(Answer::No) => Some(false),
        None => match normalize_text(text).as_str() {
            "播放" => Some(true),
            "跳过" => Some(false),
            _ => None,
        },
    }
}

impl Session {
    pub(crate) fn do_memory_choice(&mut self, next: Next, text: &str) -> Response {
        match wants_playback(text) {
            Some(true) => self.play_memory(next),
            Some(false) => match next {
                Next::Final => {
                    let mut response = Response::system(
                        "Skip the memory segment and proceed with the task...",
                    );
                    response.append(self.present_final_choice());
                    response
                }
                Next::Task(puzzle) => {
                    self.transition(Stage::TaskOffer(puzzle));
                    let mut response = Response::system(format!(
                        "Skipping memory. Proceeding to next module: {}",
                        puzzle.title()
                    ));
                    response.append(yes_no_prompt(script::READY_TO_BEGIN));
                    response
                }
            },
            None => Response::new().with(self.npc(
                "Ask for valid memory choice",
                "Player gave invalid choice for memory fragment. Ask them to choose A (play) or B (skip).",
                40,
            )),
        }
    }

    pub(crate) fn do_memory(&mut self, next: Next, text: &str) -> Response {
        let Some((interpretation, delta)) = parse_choice(text).and_then(script::memory_interpretation)
        else {
            return Response::new().with(self.npc(
                "Ask for valid choice",
                "Invalid choice. Ask player to choose A, B, or C for memory interpretation.",
                40,
            ));
        };

        self.shift_deviation(delta, "memory interpretation");
        let mut response = Response::system(interpretation).with(self.deviation_line());

        match next {
            Next::Final => response.append(self.present_final_choice()),
            Next::Task(puzzle) => {
                self.transition(Stage::TaskOffer(puzzle));
                response.push(Message::system(format!("Proceeding to: {}", puzzle.title())));
                response.append(yes_no_prompt(script::READY_TO_BEGIN));
            }
        }
        response
    }

    fn play_memory(&mut self, next: Next) -> Response {
        let count = experience_count(self.state.modules_count(), self.state.tasks_failed);
        let (fragment, cache_hit) = self.state.memory_fragments.get_or_generate(
            count,
            self.state.player_name.as_deref(),
            &self.state.modules_repaired,
            self.generator.as_ref(),
            self.config.memory_max_tokens,
        );
        self.journal.append(JournalEntry::MemoryFragment {
            experience_count: count,
            cache_hit,
            timestamp: Utc::now(),
        });
        self.transition(Stage::Memory(next));

        let mut response = Response::system("Memory segments are being activated and played...")
            .with(Message::system(fragment).with_delay(2000));
        response.extend_system(script::MEMORY_INTERPRETATION_OPTIONS);
        response
    }
}
