//! Per-stage turn handlers, grouped by chapter.

mod finale;
mod intro;
mod memories;
mod tasks;

use tz_puzzles::{Answer, parse_answer};

use crate::response::{Message, Response};
use crate::script;

/// A yes/no prompt line with the shortcut flag set.
fn yes_no_prompt(prompt: &str) -> Response {
    Response::new().with(Message::system(prompt).with_delay(500)).yes_no()
}

/// Classify a yes/no turn.
fn answer(text: &str) -> Option<Answer> {
    parse_answer(text)
}

/// Plain "please answer yes or no" reminder.
fn answer_yes_no() -> Response {
    Response::system(script::ANSWER_YES_NO).yes_no()
}
