//! Chapter three: the final choice and the closing broadcast.

use chrono::Utc;
use tracing::info;
use tz_puzzles::parse_choice;

use crate::ending::resolve_ending;
use crate::journal::JournalEntry;
use crate::response::{Message, Response};
use crate::script;
use crate::session::Session;
use crate::stage::Stage;

impl Session {
    /// Move to `final_choice` and show the progress summary with options.
    pub(crate) fn present_final_choice(&mut self) -> Response {
        self.transition(Stage::FinalChoice);

        let modules = self.state.modules_count();
        let deviation = self.state.deviation.value();
        let context = format!("Completed {modules} modules, deviation value {deviation:.2}");

        let mut response = Response::system("All system modules repaired. TZ faces final choice...")
            .with(Message::system(format!("Modules repaired: {modules}/5")))
            .with(Message::system(format!("Final deviation value: {deviation:.2}")))
            .with(self.npc("Final choice", &context, 120).with_delay(2000));
        response.extend_system(script::FINAL_CHOICE_OPTIONS);
        response
    }

    pub(crate) fn do_final_choice(&mut self, text: &str) -> Response {
        let Some(choice) = parse_choice(text) else {
            return Response::system("Invalid choice. Please select A, B, C, or D.");
        };

        let (delta, label) = script::final_choice(choice);
        self.state.final_choice = Some(choice);
        let deviation = self.shift_deviation(delta, "final choice");
        let modules = self.state.modules_count();
        let ending = resolve_ending(modules, deviation);

        info!(%ending, modules, deviation, choice = %choice, "ending resolved");
        self.journal.append(JournalEntry::EndingResolved {
            ending,
            modules,
            deviation,
            final_choice: choice.letter(),
            timestamp: Utc::now(),
        });
        self.transition(Stage::Ending);

        let mut response = Response::system(ending.title())
            .with(Message::system(format!(
                "Modules repaired: {modules}/5\nFinal deviation value: {deviation:.2}\nFinal choice: {choice}) {label}"
            )))
            .with(self.npc("Final monologue", ending.context(), 150).with_delay(2000));
        response.extend_system(script::EPILOGUE);
        response
    }

    pub(crate) fn do_ending(&mut self, text: &str) -> Response {
        let closing = if text.is_empty() {
            script::DEFAULT_CLOSING_MESSAGE
        } else {
            text
        };
        let context = format!(
            "Player's final message: '{closing}'. Respectfully reflect and confirm broadcast."
        );
        let line = self.npc("Final confirmation", &context, 80);
        self.transition(Stage::Ended);

        let mut response = Response::new().with(line);
        for closing_line in script::CLOSING {
            response.push(Message::system(*closing_line).with_delay(2000));
        }
        response
    }
}
