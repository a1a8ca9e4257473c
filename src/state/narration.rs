// Voice narration of the current slide through a system speech program
use crate::config::NarrationConfig;
use crate::deck::Section;
use crate::error::SlidesError;
use log::{debug, warn};
use std::env;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

pub const START_LABEL: &str = "🔊 Voice Guide";
pub const STOP_LABEL: &str = "🔇 Stop Voice";

/// Programs tried in order when none is configured
const KNOWN_PROGRAMS: &[&str] = &["espeak-ng", "espeak", "say", "spd-say"];

/// Something that can speak text and be interrupted
pub trait SpeechBackend {
    fn speak(&mut self, text: &str) -> Result<(), SlidesError>;
    fn cancel(&mut self);
    /// False once the last utterance has finished or was cancelled
    fn is_speaking(&mut self) -> bool;
}

/// Voice parameters on the 0..=1 (rate, volume) and 0..=2 (pitch) scales
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voice {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Voice {
    pub fn from_config(config: &NarrationConfig) -> Self {
        Self {
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        }
    }
}

/// Runs one speech process per utterance
pub struct CommandSpeech {
    program: PathBuf,
    voice: Voice,
    child: Option<Child>,
}

impl CommandSpeech {
    /// Use `preferred` if set, otherwise the first known program found on PATH
    pub fn detect(preferred: &str, voice: Voice) -> Option<Self> {
        let program = if preferred.is_empty() {
            KNOWN_PROGRAMS.iter().find_map(|name| find_on_path(name))
        } else {
            find_on_path(preferred)
        }?;
        debug!("Narration via {}", program.display());
        Some(Self {
            program,
            voice,
            child: None,
        })
    }

    fn program_name(&self) -> String {
        self.program
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Flags for the detected program, followed by the text
    pub fn arguments(program: &str, voice: Voice, text: &str) -> Vec<String> {
        let mut args = match program {
            "espeak" | "espeak-ng" => vec![
                "-s".to_string(),
                ((175.0 * voice.rate).round() as i32).to_string(),
                "-p".to_string(),
                ((50.0 * voice.pitch).round().clamp(0.0, 99.0) as i32).to_string(),
                "-a".to_string(),
                ((100.0 * voice.volume).round().clamp(0.0, 200.0) as i32).to_string(),
            ],
            "say" => vec![
                "-r".to_string(),
                ((175.0 * voice.rate).round() as i32).to_string(),
            ],
            "spd-say" => vec![
                "-w".to_string(),
                "-r".to_string(),
                (((voice.rate - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32).to_string(),
                "-p".to_string(),
                (((voice.pitch - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32).to_string(),
                "-i".to_string(),
                (((voice.volume - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32).to_string(),
            ],
            _ => Vec::new(),
        };
        if matches!(program, "espeak" | "espeak-ng" | "spd-say") {
            args.push("--".to_string());
        }
        args.push(text.to_string());
        args
    }
}

impl SpeechBackend for CommandSpeech {
    fn speak(&mut self, text: &str) -> Result<(), SlidesError> {
        self.cancel();
        let args = Self::arguments(&self.program_name(), self.voice, text);
        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SlidesError::Speech {
                program: self.program.display().to_string(),
                source,
            })?;
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_speaking(&mut self) -> bool {
        match self.child.as_mut().map(|child| child.try_wait()) {
            Some(Ok(None)) => true,
            Some(Ok(Some(_))) | Some(Err(_)) => {
                self.child = None;
                false
            }
            None => false,
        }
    }
}

impl Drop for CommandSpeech {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let candidate = PathBuf::from(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then_some(candidate);
    }
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| {
            let plain = dir.join(program);
            let exe = dir.join(format!("{}.exe", program));
            [plain, exe]
        })
        .find(|path| path.is_file())
}

/// `"{title}. {paragraphs}"`
pub fn narration_text(section: &Section) -> String {
    format!("{}. {}", section.title, section.paragraph_text())
}

/// Owns the narrating flag. Without a backend the voice control is not offered.
pub struct Narrator {
    backend: Option<Box<dyn SpeechBackend>>,
    narrating: bool,
}

impl Narrator {
    pub fn new(backend: Option<Box<dyn SpeechBackend>>) -> Self {
        Self {
            backend,
            narrating: false,
        }
    }

    pub fn from_config(config: &NarrationConfig) -> Self {
        if !config.enabled {
            return Self::new(None);
        }
        let backend = CommandSpeech::detect(&config.program, Voice::from_config(config))
            .map(|speech| Box::new(speech) as Box<dyn SpeechBackend>);
        if backend.is_none() {
            debug!("No speech program found; narration disabled");
        }
        Self::new(backend)
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn is_narrating(&self) -> bool {
        self.narrating
    }

    pub fn button_label(&self) -> &'static str {
        if self.narrating {
            STOP_LABEL
        } else {
            START_LABEL
        }
    }

    /// Stop if narrating, otherwise read `section` aloud
    pub fn toggle(&mut self, section: Option<&Section>) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if self.narrating {
            backend.cancel();
            self.narrating = false;
            return;
        }
        let Some(section) = section else {
            return;
        };
        match backend.speak(&narration_text(section)) {
            Ok(()) => self.narrating = true,
            Err(e) => warn!("Narration failed: {}", e),
        }
    }

    /// Reset the flag once speech ends on its own
    pub fn poll(&mut self) {
        if !self.narrating {
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            if !backend.is_speaking() {
                self.narrating = false;
            }
        }
    }
}
