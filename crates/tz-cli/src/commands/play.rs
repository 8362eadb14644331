//! `tz play`: the interactive session loop.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use colored::Colorize;

use tz_engine::{EngineConfig, MessageKind, Response, Session, Stage, Voice};

use super::{ApiArgs, VoiceArgs, build_generator, parse_tone};

const HELP: &str = "\
Commands:
  /state                     Show the session state as JSON
  /journal [markdown|text]   Show the session journal
  /tone <0-100>              Change TZ's voice
  /reset                     Restart the session from the beginning
  /help                      Show this help
Type exit or quit to end the session.";

struct Output {
    json: bool,
    paced: bool,
}

impl Output {
    fn response(&self, response: &Response) -> Result<(), String> {
        if self.json {
            let line = serde_json::to_string(response).map_err(|e| e.to_string())?;
            println!("{line}");
            return Ok(());
        }

        for message in &response.messages {
            if self.paced {
                thread::sleep(Duration::from_millis(message.delay_ms));
            }
            match message.kind {
                MessageKind::Npc => println!("{} {}", "TZ:".cyan().bold(), message.text),
                MessageKind::System => println!("{}", message.text.dimmed()),
            }
        }
        if response.quick_yes_no {
            println!("{}", "[yes / no]".yellow());
        }
        println!();
        Ok(())
    }

    fn note(&self, text: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "note": text }));
        } else {
            println!("{}\n", text.yellow());
        }
    }
}

fn apply_voice(session: &mut Session, voice: Option<Voice>) {
    if let Some(v) = voice {
        session.set_voice(v.persona, v.emotion, v.intensity());
    }
}

/// Handle a `/command` line.
fn meta(
    session: &mut Session,
    command: &str,
    voice: &mut Option<Voice>,
    out: &Output,
) -> Result<(), String> {
    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or_default() {
        "state" => {
            let json = session.state().to_json().map_err(|e| e.to_string())?;
            println!("{json}");
        }
        "journal" => match parts.next().unwrap_or("markdown") {
            "markdown" | "md" => println!("{}", session.journal().export_markdown()),
            "text" | "txt" => println!("{}", session.journal().export_text()),
            other => out.note(&format!("unknown journal format: {other} (markdown, text)")),
        },
        "tone" => {
            let parsed = parts
                .next()
                .ok_or_else(|| "usage: /tone <0-100>".to_string())
                .and_then(|v| v.parse::<u32>().map_err(|_| format!("not a number: {v}")))
                .and_then(parse_tone);
            match parsed {
                Ok(tone) => {
                    let v = session
                        .apply_tone(u32::from(tone))
                        .map_err(|e| e.to_string())?;
                    *voice = Some(v);
                    out.note(&format!(
                        "Voice: {} / {} / {:.2}",
                        v.persona,
                        v.emotion,
                        v.intensity()
                    ));
                }
                Err(e) => out.note(&e),
            }
        }
        "reset" => {
            let response = session.start();
            apply_voice(session, *voice);
            out.response(&response)?;
        }
        "help" => println!("{HELP}\n"),
        other => out.note(&format!("unknown command: /{other} (try /help)")),
    }
    Ok(())
}

/// Run a session on stdin/stdout until it ends or input runs out.
pub fn run(api: &ApiArgs, voice: &VoiceArgs, offline: bool, json: bool, paced: bool) -> Result<(), String> {
    let mut voice = voice.resolve()?;
    let generator = build_generator(api, offline)?;
    let mut session = Session::new(EngineConfig::default(), generator);
    let out = Output { json, paced };

    if !json {
        println!("  {} TZ Emergency Channel", "Opening".bold());
        println!("  Type /help for commands, 'quit' to exit.\n");
    }

    let opening = session.start();
    apply_voice(&mut session, voice);
    out.response(&opening)?;

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        if !json {
            print!("> ");
            io::stdout().flush().map_err(|e| e.to_string())?;
        }

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if let Some(command) = input.strip_prefix('/') {
            meta(&mut session, command, &mut voice, &out)?;
            continue;
        }

        let response = session.process(input);
        out.response(&response)?;
        if session.stage() == Stage::Ended {
            break;
        }
    }

    Ok(())
}
