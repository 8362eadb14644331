//! Chapter two: offering, skipping, and solving the five repair tasks.

use chrono::Utc;
use tracing::info;
use tz_puzzles::{
    Answer, PuzzleId, Verdict, alien, check_decryption, check_frequency, check_path,
    check_sequence, interpret,
};

use super::{answer, answer_yes_no, yes_no_prompt};
use crate::journal::JournalEntry;
use crate::response::{Message, Response};
use crate::script;
use crate::session::Session;
use crate::stage::{Next, Stage};

impl Session {
    pub(crate) fn do_task_offer(&mut self, puzzle: PuzzleId, text: &str) -> Response {
        match answer(text) {
            Some(Answer::Yes) => {
                self.transition(Stage::Task(puzzle));
                Response::new().with(self.npc_brief(puzzle))
            }
            // The last two tasks are skipped without a confirmation step.
            Some(Answer::No) if puzzle.credits_on_exhaustion() => self.skip_task(puzzle),
            Some(Answer::No) => {
                self.transition(Stage::TaskConfirmReject(puzzle));
                yes_no_prompt("Skip this task? (yes/no)")
            }
            None => answer_yes_no(),
        }
    }

    pub(crate) fn do_confirm_reject(&mut self, puzzle: PuzzleId, text: &str) -> Response {
        match answer(text) {
            Some(Answer::Yes) => self.skip_task(puzzle),
            Some(Answer::No) => {
                self.transition(Stage::TaskOffer(puzzle));
                yes_no_prompt(&format!(
                    "Returning to {}. Accept this task? (yes/no)",
                    puzzle.title()
                ))
            }
            None => answer_yes_no(),
        }
    }

    pub(crate) fn do_task(&mut self, puzzle: PuzzleId, text: &str) -> Response {
        let (verdict, reading) = match puzzle {
            PuzzleId::Power => (check_path(text), None),
            PuzzleId::Amplifier => (check_frequency(text, self.config.target_frequency), None),
            PuzzleId::Decoder => (check_decryption(text), None),
            PuzzleId::AlienDecode => match interpret(text) {
                Some(reading) => (Verdict::pass(reading.message), Some(reading)),
                None => (Verdict::fail(alien::INVALID_CHOICE), None),
            },
            PuzzleId::CombatLogic => (check_sequence(text).verdict, None),
        };

        let attempt = self.state.attempts.record(puzzle);
        info!(
            puzzle = %puzzle,
            attempt,
            solved = verdict.solved,
            feedback = %verdict.message,
            "puzzle attempt"
        );
        self.journal.append(JournalEntry::PuzzleAttempt {
            puzzle,
            answer: text.to_string(),
            solved: verdict.solved,
            feedback: verdict.message.clone(),
            attempt,
            timestamp: Utc::now(),
        });

        let mut response = if verdict.solved {
            self.credit_module(puzzle);
            match reading {
                Some(reading) => {
                    let mut response =
                        Response::system(format!("✓ {}", reading.message));
                    let context = format!(
                        "Choice {}: {}. {}",
                        reading.choice,
                        reading.message,
                        script::success_context(puzzle)
                    );
                    response.push(self.npc("Respond to choice", &context, 80));
                    self.shift_deviation(reading.deviation_delta, "alien signal interpretation");
                    response.push(self.deviation_line());
                    response
                }
                None => {
                    let mut response = Response::system(script::success_banner(puzzle));
                    response.push(self.npc(
                        "Celebrate success",
                        script::success_context(puzzle),
                        60,
                    ));
                    if puzzle == PuzzleId::CombatLogic {
                        response.push(self.deviation_line());
                    }
                    response
                }
            }
        } else if !self.state.attempts.is_exhausted(puzzle) {
            let remaining = self.state.attempts.remaining(puzzle);
            return Response::system(format!(
                "✗ {}\nAttempts remaining: {remaining}",
                verdict.message
            ));
        } else {
            self.exhaust(puzzle, &verdict)
        };

        self.transition(Stage::MemoryChoice(Next::after(puzzle)));
        response.extend_system(script::MEMORY_CHOICE_OPTIONS);
        response
    }

    /// Out of attempts: count the failure and apply any consolation.
    fn exhaust(&mut self, puzzle: PuzzleId, verdict: &Verdict) -> Response {
        self.state.tasks_failed += 1;
        let credited = puzzle.credits_on_exhaustion();
        if credited {
            self.credit_module(puzzle);
        }
        if puzzle == PuzzleId::CombatLogic {
            self.shift_deviation(self.config.combat_failure_penalty, "combat logic failure");
        }
        info!(puzzle = %puzzle, credited, "attempts exhausted");
        self.journal.append(JournalEntry::PuzzleExhausted {
            puzzle,
            credited,
            timestamp: Utc::now(),
        });

        let mut response = Response::system(format!("✗ {}", verdict.message))
            .with(Message::system("✗ Attempts exhausted. Proceeding..."));
        response.push(self.npc(
            "Acknowledge failure",
            script::failure_context(puzzle),
            60,
        ));
        response
    }

    /// Count a declined task and move past it.
    fn skip_task(&mut self, puzzle: PuzzleId) -> Response {
        self.state.tasks_failed += 1;
        info!(puzzle = %puzzle, "task skipped");
        self.journal.append(JournalEntry::TaskSkipped {
            puzzle,
            timestamp: Utc::now(),
        });

        match puzzle.next() {
            Some(next) => {
                self.transition(Stage::TaskOffer(next));
                yes_no_prompt(script::skip_notice(puzzle))
            }
            None => {
                let mut response = Response::system(script::skip_notice(puzzle));
                response.append(self.present_final_choice());
                response
            }
        }
    }

    fn npc_brief(&self, puzzle: PuzzleId) -> Message {
        Message::npc(script::task_brief(puzzle)).with_delay(1200)
    }

    pub(crate) fn deviation_line(&self) -> Message {
        Message::system(format!(
            "Current deviation value: {:.2}",
            self.state.deviation.value()
        ))
    }
}

#[cfg(test)]
mod tests {
    use tz_puzzles::PuzzleId;

    use crate::handlers::testkit::{accept, session_at_power_offer};
    use crate::journal::JournalEntry;
    use crate::stage::{Next, Stage};

    #[test]
    fn accepting_shows_brief() {
        let mut s = session_at_power_offer();
        let r = s.process("yes");
        assert_eq!(s.stage(), Stage::Task(PuzzleId::Power));
        assert!(r.text().contains("Valid connections: A-C, C-B, C-D, B-D."));
    }

    #[test]
    fn unclear_offer_answer_self_loops() {
        let mut s = session_at_power_offer();
        let r = s.process("perhaps");
        assert_eq!(s.stage(), Stage::TaskOffer(PuzzleId::Power));
        assert_eq!(r.text(), "Please answer yes or no");
        assert!(r.quick_yes_no);
    }

    #[test]
    fn decline_then_confirm_skips() {
        let mut s = session_at_power_offer();
        let r = s.process("no");
        assert_eq!(s.stage(), Stage::TaskConfirmReject(PuzzleId::Power));
        assert_eq!(r.text(), "Skip this task? (yes/no)");

        let r = s.process("yes");
        assert_eq!(s.stage(), Stage::TaskOffer(PuzzleId::Amplifier));
        assert_eq!(r.text(), "Power task skipped. Next task: Signal Amplifier Tuning (yes/no)");
        assert_eq!(s.state().tasks_failed, 1);
        assert!(s.state().modules_repaired.is_empty());
    }

    #[test]
    fn decline_then_cancel_returns_to_offer() {
        let mut s = session_at_power_offer();
        s.process("no");
        let r = s.process("no");
        assert_eq!(s.stage(), Stage::TaskOffer(PuzzleId::Power));
        assert_eq!(
            r.text(),
            "Returning to Power Path Restoration. Accept this task? (yes/no)"
        );
        assert_eq!(s.state().tasks_failed, 0);
    }

    #[test]
    fn power_solved_credits_module() {
        let mut s = session_at_power_offer();
        accept(&mut s, PuzzleId::Power);
        let r = s.process("A-C-B-D");
        assert_eq!(s.stage(), Stage::MemoryChoice(Next::Task(PuzzleId::Amplifier)));
        assert_eq!(s.state().modules_repaired, [PuzzleId::Power]);
        assert_eq!(r.messages[0].text, "✓ Path verified successfully!");
        assert_eq!(r.last_text(), Some("B) Skip the memory segments"));
    }

    #[test]
    fn power_failures_show_remaining() {
        let mut s = session_at_power_offer();
        accept(&mut s, PuzzleId::Power);
        let r = s.process("B-C-D");
        assert_eq!(r.text(), "✗ Start point must be A.\nAttempts remaining: 2");
        let r = s.process("A-C-B");
        assert_eq!(r.text(), "✗ End point must be D.\nAttempts remaining: 1");
        assert_eq!(s.stage(), Stage::Task(PuzzleId::Power));
    }

    #[test]
    fn power_exhaustion_is_not_credited() {
        let mut s = session_at_power_offer();
        accept(&mut s, PuzzleId::Power);
        for _ in 0..3 {
            s.process("A-D");
        }
        assert_eq!(s.stage(), Stage::MemoryChoice(Next::Task(PuzzleId::Amplifier)));
        assert_eq!(s.state().tasks_failed, 1);
        assert!(s.state().modules_repaired.is_empty());
        assert!(s.journal().entries().iter().any(|e| matches!(
            e,
            JournalEntry::PuzzleExhausted { puzzle: PuzzleId::Power, credited: false, .. }
        )));
    }

    /// Skip the first three tasks to reach the alien offer.
    fn session_at_alien_offer() -> crate::session::Session {
        let mut s = session_at_power_offer();
        for _ in 0..3 {
            s.process("no");
            s.process("yes");
        }
        assert_eq!(s.stage(), Stage::TaskOffer(PuzzleId::AlienDecode));
        assert_eq!(s.state().tasks_failed, 3);
        s
    }

    #[test]
    fn alien_decline_skips_without_confirmation() {
        let mut s = session_at_alien_offer();
        let r = s.process("no");
        assert_eq!(s.stage(), Stage::TaskOffer(PuzzleId::CombatLogic));
        assert_eq!(r.text(), "Alien task skipped. Final task: Combat Logic (yes/no)");
        assert_eq!(s.state().tasks_failed, 4);
    }

    #[test]
    fn combat_decline_goes_to_final_choice() {
        let mut s = session_at_alien_offer();
        s.process("no");
        let r = s.process("no");
        assert_eq!(s.stage(), Stage::FinalChoice);
        assert_eq!(r.messages[0].text, "Combat logic skipped");
        assert_eq!(s.state().tasks_failed, 5);
    }

    #[test]
    fn alien_reading_shifts_deviation() {
        let mut s = session_at_alien_offer();
        accept(&mut s, PuzzleId::AlienDecode);
        let r = s.process("b");
        assert_eq!(s.stage(), Stage::MemoryChoice(Next::Task(PuzzleId::CombatLogic)));
        assert_eq!(r.messages[0].text, "✓ We don't understand.");
        assert!(r.text().contains("Current deviation value: 1.00"));
        assert!((s.state().deviation.value() - 1.0).abs() < 1e-9);
        assert_eq!(s.state().modules_repaired, [PuzzleId::AlienDecode]);
    }

    #[test]
    fn alien_exhaustion_is_credited() {
        let mut s = session_at_alien_offer();
        accept(&mut s, PuzzleId::AlienDecode);
        let r = s.process("d");
        assert_eq!(r.text(), "✗ Invalid choice. Please select A, B, or C.\nAttempts remaining: 2");
        s.process("e");
        s.process("zz");
        assert_eq!(s.stage(), Stage::MemoryChoice(Next::Task(PuzzleId::CombatLogic)));
        assert_eq!(s.state().modules_repaired, [PuzzleId::AlienDecode]);
        assert_eq!(s.state().tasks_failed, 4);
        assert_eq!(s.state().deviation.value(), 0.0);
    }

    #[test]
    fn combat_exhaustion_applies_penalty() {
        let mut s = session_at_alien_offer();
        s.process("no");
        accept(&mut s, PuzzleId::CombatLogic);
        for _ in 0..3 {
            s.process("1,2,3,4,5");
        }
        assert_eq!(s.stage(), Stage::MemoryChoice(Next::Final));
        assert_eq!(s.state().modules_repaired, [PuzzleId::CombatLogic]);
        assert!((s.state().deviation.value() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn combat_solved_reports_deviation() {
        let mut s = session_at_alien_offer();
        s.process("no");
        accept(&mut s, PuzzleId::CombatLogic);
        let r = s.process("3 4 5 1 2");
        assert_eq!(r.messages[0].text, "✓ Sequence correct!");
        assert!(r.text().contains("Current deviation value: 0.00"));
        assert_eq!(s.stage(), Stage::MemoryChoice(Next::Final));
    }

    #[test]
    fn amplifier_uses_configured_target() {
        use crate::config::EngineConfig;
        use crate::generator::OfflineGenerator;
        use crate::session::Session;

        let config = EngineConfig::default().with_target_frequency(2000);
        let mut s = Session::new(config, Box::new(OfflineGenerator));
        s.start();
        for input in ["hi", "yes", "Ada", "yes", "yes", "no", "yes", "yes"] {
            s.process(input);
        }
        assert_eq!(s.stage(), Stage::Task(PuzzleId::Amplifier));
        let r = s.process("3420");
        assert!(r.text().starts_with("✗ Too high."));
        s.process("2000");
        assert_eq!(s.state().modules_repaired, [PuzzleId::Amplifier]);
    }

    #[test]
    fn attempts_are_journaled() {
        let mut s = session_at_power_offer();
        accept(&mut s, PuzzleId::Power);
        s.process("A-D");
        s.process("A-C-D-B-D");
        let attempts: Vec<(u32, bool)> = s
            .journal()
            .entries()
            .iter()
            .filter_map(|e| match e {
                JournalEntry::PuzzleAttempt { attempt, solved, .. } => Some((*attempt, *solved)),
                _ => None,
            })
            .collect();
        assert_eq!(attempts, [(1, false), (2, true)]);
    }
}
