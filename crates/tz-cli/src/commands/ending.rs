//! `tz ending`: resolve an ending without playing.

use colored::Colorize;

use tz_engine::{Deviation, resolve_ending};
use tz_puzzles::PuzzleId;

/// Print the ending reached with `modules` repaired at `deviation`.
pub fn run(modules: usize, deviation: f64) -> Result<(), String> {
    let total = PuzzleId::all().len();
    if modules > total {
        return Err(format!("modules must be between 0 and {total}, got {modules}"));
    }
    if !deviation.is_finite() {
        return Err(format!("deviation must be a number, got {deviation}"));
    }

    let deviation = Deviation::new(deviation);
    let ending = resolve_ending(modules, deviation.value());

    println!("{}", ending.title().bold());
    println!("  Key:       {ending}");
    println!("  Modules:   {modules}/{total}");
    println!("  Deviation: {deviation}");
    println!("  {}", ending.context().dimmed());
    Ok(())
}
