// Code playgrounds - editable sources and simulated compile runs
use crate::deck::Deck;
use eframe::egui;
use log::debug;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

pub const COMPILING_MESSAGE: &str = "🔄 Compiling and running...";

const DEFAULT_OUTPUT: &str = "✅ Compilation successful!

Your code executed successfully!
Check the console for any output.

🎉 Great job!";

/// Canned program output for a section's playground
pub fn simulated_output(section_id: &str) -> &'static str {
    match section_id {
        "classes-objects" => {
            "✅ Compilation successful!

The Red Toyota is driving.
Car: 2020 Red Toyota
The Blue Honda is driving.
Car: 2019 Blue Honda
The Yellow Ferrari is driving.
Car: 2024 Yellow Ferrari

🎉 Program executed successfully!"
        }
        "inheritance" => {
            "✅ Compilation successful!

Vehicle created: Toyota
Car created: Toyota Camry
Tuut, tuut!
Driving the Toyota Camry
Car: 2023 Toyota Camry

🎉 Inheritance working perfectly!"
        }
        "polymorphism" => {
            "✅ Compilation successful!

Woof! Woof!
Meow! Meow!
Moo! Moo!

🎉 Polymorphism in action!"
        }
        _ => DEFAULT_OUTPUT,
    }
}

pub struct RunResult {
    pub section_id: String,
    pub output: String,
}

/// Per-section editor buffer and last output
pub struct PlaygroundState {
    pub code: String,
    pub output: Option<String>,
    /// Runs scheduled but not yet reported back
    pub pending: usize,
    pub output_at: Option<Instant>,
}

/// Deferred runs are neither cancelled nor merged: every run reports back and the
/// last result to arrive is what the section shows.
pub struct Playgrounds {
    entries: HashMap<String, PlaygroundState>,
    delay: Duration,
    result_tx: Sender<RunResult>,
    result_rx: Receiver<RunResult>,
    ctx: egui::Context,
}

impl Playgrounds {
    pub fn new(deck: &Deck, delay: Duration, ctx: egui::Context) -> Self {
        let entries = deck
            .sections
            .iter()
            .filter_map(|section| {
                section.playground.as_ref().map(|def| {
                    (
                        section.id.clone(),
                        PlaygroundState {
                            code: def.code.trim_start_matches('\n').to_string(),
                            output: None,
                            pending: 0,
                            output_at: None,
                        },
                    )
                })
            })
            .collect();
        let (result_tx, result_rx) = channel();

        Self {
            entries,
            delay,
            result_tx,
            result_rx,
            ctx,
        }
    }

    #[cfg(test)]
    pub fn get(&self, section_id: &str) -> Option<&PlaygroundState> {
        self.entries.get(section_id)
    }

    pub fn get_mut(&mut self, section_id: &str) -> Option<&mut PlaygroundState> {
        self.entries.get_mut(section_id)
    }

    /// Show the compiling banner and schedule the simulated result
    pub fn run(&mut self, section_id: &str) {
        let Some(entry) = self.entries.get_mut(section_id) else {
            return;
        };
        debug!("Running {} bytes of code for {}", entry.code.len(), section_id);
        entry.output = Some(COMPILING_MESSAGE.to_string());
        entry.output_at = None;
        entry.pending += 1;

        let tx = self.result_tx.clone();
        let ctx = self.ctx.clone();
        let delay = self.delay;
        let section_id = section_id.to_string();
        thread::spawn(move || {
            thread::sleep(delay);
            let output = simulated_output(&section_id).to_string();
            let _ = tx.send(RunResult { section_id, output });
            ctx.request_repaint();
        });
    }

    /// Apply every result that has arrived; returns how many were applied
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(result) = self.result_rx.try_recv() {
            self.apply(result);
            applied += 1;
        }
        applied
    }

    pub fn apply(&mut self, result: RunResult) {
        if let Some(entry) = self.entries.get_mut(&result.section_id) {
            entry.output = Some(result.output);
            entry.output_at = Some(Instant::now());
            entry.pending = entry.pending.saturating_sub(1);
        }
    }

    pub fn any_pending(&self) -> bool {
        self.entries.values().any(|entry| entry.pending > 0)
    }

    /// When the most recent output landed
    pub fn latest_output(&self) -> Option<Instant> {
        self.entries.values().filter_map(|entry| entry.output_at).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playgrounds(delay: Duration) -> Playgrounds {
        let deck = Deck::bundled().expect("bundled deck");
        Playgrounds::new(&deck, delay, egui::Context::default())
    }

    fn wait_for(playgrounds: &mut Playgrounds, count: usize) -> usize {
        let mut applied = 0;
        for _ in 0..200 {
            applied += playgrounds.poll();
            if applied >= count {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        applied
    }

    #[test]
    fn test_simulated_outputs() {
        assert!(simulated_output("polymorphism").contains("Moo! Moo!"));
        assert!(simulated_output("inheritance").contains("Tuut, tuut!"));
        assert!(simulated_output("classes-objects").contains("Yellow Ferrari"));
        assert_eq!(simulated_output("abstraction"), DEFAULT_OUTPUT);
    }

    #[test]
    fn test_only_sections_with_playgrounds_have_entries() {
        let playgrounds = playgrounds(Duration::ZERO);
        assert!(playgrounds.get("classes-objects").is_some());
        assert!(playgrounds.get("introduction").is_none());
    }

    #[test]
    fn test_run_shows_banner_then_output() {
        let mut playgrounds = playgrounds(Duration::from_millis(10));
        playgrounds.run("polymorphism");

        let entry = playgrounds.get("polymorphism").expect("entry");
        assert_eq!(entry.output.as_deref(), Some(COMPILING_MESSAGE));
        assert!(playgrounds.any_pending());

        assert_eq!(wait_for(&mut playgrounds, 1), 1);
        let entry = playgrounds.get("polymorphism").expect("entry");
        assert!(entry.output.as_deref().unwrap_or_default().contains("Woof! Woof!"));
        assert!(entry.output_at.is_some());
        assert!(!playgrounds.any_pending());
        assert_eq!(playgrounds.latest_output(), entry.output_at);
    }

    #[test]
    fn test_repeated_runs_all_report() {
        let mut playgrounds = playgrounds(Duration::ZERO);
        playgrounds.run("inheritance");
        playgrounds.run("inheritance");
        assert_eq!(playgrounds.get("inheritance").expect("entry").pending, 2);

        assert_eq!(wait_for(&mut playgrounds, 2), 2);
        assert_eq!(playgrounds.get("inheritance").expect("entry").pending, 0);
    }

    #[test]
    fn test_later_result_overwrites_earlier() {
        let mut playgrounds = playgrounds(Duration::ZERO);
        playgrounds.apply(RunResult {
            section_id: "classes-objects".into(),
            output: "first".into(),
        });
        playgrounds.apply(RunResult {
            section_id: "classes-objects".into(),
            output: "second".into(),
        });
        let entry = playgrounds.get("classes-objects").expect("entry");
        assert_eq!(entry.output.as_deref(), Some("second"));
    }

    #[test]
    fn test_run_unknown_section_is_ignored() {
        let mut playgrounds = playgrounds(Duration::ZERO);
        playgrounds.run("introduction");
        assert!(!playgrounds.any_pending());
    }
}
