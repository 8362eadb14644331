//! Chapter one: contact, identification, and consent.

use chrono::Utc;
use tracing::info;
use tz_puzzles::{Answer, PuzzleId};

use super::{answer, answer_yes_no, yes_no_prompt};
use crate::journal::JournalEntry;
use crate::response::{Message, Response};
use crate::script;
use crate::session::Session;
use crate::stage::Stage;

impl Session {
    pub(crate) fn do_first_contact(&mut self, text: &str) -> Response {
        let context = format!("Player response: '{text}'. You are TZ, requesting identity verification.");
        let line = self.npc("Identity verification request", &context, 80);
        self.transition(Stage::AskIdent);

        let mut response = yes_no_prompt("Allow identity verification? (yes/no)");
        response.messages.insert(0, line);
        response
    }

    pub(crate) fn do_ask_ident(&mut self, text: &str) -> Response {
        match answer(text) {
            Some(Answer::Yes) => {
                self.transition(Stage::IdentifyName);
                let mut response = Response::new();
                response.extend_system(script::IDENTITY_VERIFICATION);
                response.push(self.npc(
                    "Request name",
                    "Identity verification complete. Requesting commander's name for final verification.",
                    60,
                ));
                response
            }
            Some(Answer::No) => {
                let line = self.npc(
                    "Confirm refusal",
                    "Commander refused identity verification. End respectfully.",
                    60,
                );
                self.transition(Stage::Ended);
                Response::new().with(line)
            }
            None => self.clarify_yes_no(),
        }
    }

    pub(crate) fn do_identify_name(&mut self, text: &str) -> Response {
        if text.is_empty() {
            return Response::new().with(self.npc("Ask name again", "No name provided", 40));
        }

        self.state.player_name = Some(text.to_string());
        self.journal.append(JournalEntry::PlayerNamed {
            name: text.to_string(),
            timestamp: Utc::now(),
        });
        info!(name = text, "commander identified");
        self.transition(Stage::Consent);

        let context = format!(
            "Commander {text} has responded. Ask if willing to help repair communication equipment."
        );
        let mut response = Response::new()
            .with(Message::system(format!("Name recorded: {text}")).with_delay(800))
            .with(self.npc("Request consent to help", &context, 48));
        response.append(yes_no_prompt("Do you agree to help? (yes/no)"));
        response
    }

    pub(crate) fn do_consent(&mut self, text: &str) -> Response {
        match answer(text) {
            Some(Answer::Yes) => {
                self.transition(Stage::Chapter2Intro);
                let mut response = Response::new();
                for line in script::DIAGNOSTICS {
                    response.push(Message::system(*line).with_delay(1500));
                }
                let context = format!(
                    "Commander {} agreed to help. Explain system damage and request repairs.",
                    self.commander()
                );
                response.push(self.npc("Explain system damage", &context, 80));
                response.append(yes_no_prompt(script::READY_TO_BEGIN));
                response
            }
            Some(Answer::No) => {
                let mut response = Response::new().with(self.npc(
                    "Emphasize urgency",
                    "Commander refused to help. Express understanding but emphasize urgency.",
                    60,
                ));
                response.append(yes_no_prompt("Reconsider? (yes/no)"));
                response
            }
            None => self.clarify_yes_no(),
        }
    }

    pub(crate) fn do_chapter2_intro(&mut self, text: &str) -> Response {
        match answer(text) {
            Some(Answer::Yes) => {
                self.transition(Stage::TaskOffer(PuzzleId::Power));
                let mut response = Response::new();
                response.extend_system(script::TASK_LIST);
                let context = format!(
                    "Commander {} is ready. Offer power path restoration task.",
                    self.commander()
                );
                response.push(self.npc("Offer power task", &context, 80).with_delay(1200));
                response.append(yes_no_prompt("Accept first task? (yes/no)"));
                response
            }
            Some(Answer::No) => {
                let mut response =
                    Response::new().with(self.npc("Ask if ready", "Not ready yet", 40));
                response.append(yes_no_prompt("Ready? (yes/no)"));
                response
            }
            None => self.clarify_yes_no(),
        }
    }

    /// NPC clarification plus the yes/no reminder. Never changes stage.
    fn clarify_yes_no(&self) -> Response {
        let mut response = Response::new().with(self.npc(
            "Clarification request",
            "Unclear answer. Ask for yes or no.",
            40,
        ));
        response.append(answer_yes_no());
        response
    }

    fn commander(&self) -> &str {
        self.state.player_name.as_deref().unwrap_or("Commander")
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testkit::offline_session;
    use crate::response::MessageKind;
    use crate::stage::Stage;
    use tz_puzzles::PuzzleId;

    #[test]
    fn first_contact_asks_for_verification() {
        let mut s = offline_session();
        s.start();
        let r = s.process("anyone there?");
        assert_eq!(s.stage(), Stage::AskIdent);
        assert_eq!(r.messages[0].kind, MessageKind::Npc);
        assert!(r.quick_yes_no);
    }

    #[test]
    fn refusing_verification_ends() {
        let mut s = offline_session();
        s.start();
        s.process("hi");
        s.process("no");
        assert_eq!(s.stage(), Stage::Ended);
    }

    #[test]
    fn unclear_answers_self_loop() {
        let mut s = offline_session();
        s.start();
        s.process("hi");
        for input in ["maybe", "", "what?"] {
            let r = s.process(input);
            assert_eq!(s.stage(), Stage::AskIdent);
            assert_eq!(r.last_text(), Some("Please answer yes or no"));
        }
    }

    #[test]
    fn chinese_yes_is_accepted() {
        let mut s = offline_session();
        s.start();
        s.process("hi");
        let r = s.process("同意");
        assert_eq!(s.stage(), Stage::IdentifyName);
        assert_eq!(r.messages.len(), 17);
    }

    #[test]
    fn empty_name_asks_again() {
        let mut s = offline_session();
        s.start();
        s.process("hi");
        s.process("yes");
        let r = s.process("   ");
        assert_eq!(s.stage(), Stage::IdentifyName);
        assert_eq!(r.messages[0].text, "(communication glitch) Ask name again...");
    }

    #[test]
    fn name_is_recorded() {
        let mut s = offline_session();
        s.start();
        s.process("hi");
        s.process("yes");
        let r = s.process("  Mara Voss ");
        assert_eq!(s.stage(), Stage::Consent);
        assert_eq!(s.state().player_name.as_deref(), Some("Mara Voss"));
        assert_eq!(r.messages[0].text, "Name recorded: Mara Voss");
        assert_eq!(r.last_text(), Some("Do you agree to help? (yes/no)"));
    }

    #[test]
    fn consent_refusal_loops() {
        let mut s = offline_session();
        s.start();
        s.process("hi");
        s.process("yes");
        s.process("Mara");
        let r = s.process("no");
        assert_eq!(s.stage(), Stage::Consent);
        assert_eq!(r.last_text(), Some("Reconsider? (yes/no)"));
        s.process("agree");
        assert_eq!(s.stage(), Stage::Chapter2Intro);
    }

    #[test]
    fn chapter_two_lists_tasks() {
        let mut s = offline_session();
        s.start();
        s.process("hi");
        s.process("yes");
        s.process("Mara");
        s.process("yes");
        let r = s.process("no");
        assert_eq!(s.stage(), Stage::Chapter2Intro);
        assert_eq!(r.last_text(), Some("Ready? (yes/no)"));

        let r = s.process("y");
        assert_eq!(s.stage(), Stage::TaskOffer(PuzzleId::Power));
        assert!(r.text().contains("Unlocking 5 module tasks:"));
        assert_eq!(r.last_text(), Some("Accept first task? (yes/no)"));
    }
}
