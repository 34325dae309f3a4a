//! Headless player session
//!
//! Drives the player store and surface against a simulated media element
//! whose clock advances in ticks. Player controls are read as text commands,
//! one per line, so a queue can be listened through from the terminal
//! without an audio device.

use crate::error::{AppError, Result};
use sound_core::{format_duration, parse_duration, parse_seconds, Episode, EpisodeId};
use sound_playback::{
    ButtonState, Controls, MediaEvent, MediaPrimitive, PlayerEvent, PlayerStore, PlayerSurface,
};
use std::collections::{HashMap, VecDeque};
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

/// Help text listing the accepted commands
pub const COMMAND_HELP: &str =
    "p play/pause | n next | b previous | s shuffle | l loop | seek <secs|HH:MM:SS> | i status | q quit";

/// Media element backed by a virtual clock
///
/// Knows the length of every resource it may be asked to load and reports
/// events the way a browser audio element would.
#[derive(Debug, Default)]
pub struct SimulatedMedia {
    durations: HashMap<String, Duration>,
    loaded: Option<String>,
    position: Duration,
    playing: bool,
    looping: bool,
    events: VecDeque<MediaEvent>,
}

impl SimulatedMedia {
    /// Create a media element able to play the given episodes
    pub fn for_episodes<'a>(episodes: impl IntoIterator<Item = &'a Episode>) -> Self {
        let durations = episodes
            .into_iter()
            .map(|e| (e.url.clone(), Duration::from_secs(e.duration)))
            .collect();
        Self {
            durations,
            ..Self::default()
        }
    }

    pub fn loaded(&self) -> Option<&str> {
        self.loaded.as_deref()
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Move the clock forward by `elapsed` of media time
    pub fn advance(&mut self, elapsed: Duration) {
        let Some(url) = &self.loaded else {
            return;
        };
        if !self.playing {
            return;
        }

        let duration = self.durations.get(url).copied().unwrap_or_default();
        self.position = (self.position + elapsed).min(duration);
        self.events.push_back(MediaEvent::TimeAdvanced(self.position));

        if self.position >= duration {
            if self.looping {
                self.position = Duration::ZERO;
            } else {
                self.playing = false;
                self.events.push_back(MediaEvent::Paused);
                self.events.push_back(MediaEvent::Ended);
            }
        }
    }

    /// Take the next reported event
    pub fn next_event(&mut self) -> Option<MediaEvent> {
        self.events.pop_front()
    }
}

impl MediaPrimitive for SimulatedMedia {
    fn load(&mut self, url: &str) {
        self.loaded = Some(url.to_string());
        self.position = Duration::ZERO;
        self.playing = false;
        self.events.push_back(MediaEvent::MetadataLoaded);
    }

    fn unload(&mut self) {
        self.loaded = None;
        self.position = Duration::ZERO;
        self.playing = false;
    }

    fn play(&mut self) {
        if self.loaded.is_some() && !self.playing {
            self.playing = true;
            self.events.push_back(MediaEvent::PlayStarted);
        }
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.events.push_back(MediaEvent::Paused);
        }
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}

/// A player control typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePlay,
    Next,
    Previous,
    ToggleShuffle,
    ToggleLoop,
    /// Jump to a position in seconds
    Seek(u64),
    Status,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self> {
        let mut words = input.split_whitespace();
        let name = words.next().unwrap_or_default().to_ascii_lowercase();
        let argument = words.next();

        if words.next().is_some() {
            return Err(AppError::InvalidCommand(input.trim().to_string()));
        }

        let command = match (name.as_str(), argument) {
            ("p" | "play" | "pause", None) => Command::TogglePlay,
            ("n" | "next", None) => Command::Next,
            ("b" | "prev" | "previous", None) => Command::Previous,
            ("s" | "shuffle", None) => Command::ToggleShuffle,
            ("l" | "loop", None) => Command::ToggleLoop,
            ("i" | "status", None) => Command::Status,
            ("q" | "quit", None) => Command::Quit,
            ("seek", Some(position)) => Command::Seek(parse_position(position)?),
            _ => return Err(AppError::InvalidCommand(input.trim().to_string())),
        };

        Ok(command)
    }
}

/// Seconds (`75`, `75.5`) or a timestamp (`00:01:15`)
fn parse_position(input: &str) -> Result<u64> {
    let parsed = if input.contains(':') {
        parse_duration(input)
    } else {
        parse_seconds(input)
    };
    parsed.map_err(|e| AppError::InvalidCommand(e.to_string()))
}

/// One-line rendition of the five player buttons
///
/// Disabled buttons are shown in parentheses, toggles that are on in
/// brackets. The play button reads `pause` while playing.
pub fn render_controls(controls: &Controls) -> String {
    let play_label = if controls.play_pause.active {
        "pause"
    } else {
        "play"
    };
    let play_pause = ButtonState {
        active: false,
        ..controls.play_pause
    };

    [
        render_button("shuffle", controls.shuffle),
        render_button("prev", controls.previous),
        render_button(play_label, play_pause),
        render_button("next", controls.next),
        render_button("loop", controls.looping),
    ]
    .join(" ")
}

fn render_button(label: &str, state: ButtonState) -> String {
    match (state.enabled, state.active) {
        (false, _) => format!("({})", label),
        (true, true) => format!("[{}]", label),
        (true, false) => label.to_string(),
    }
}

/// A store, a surface and the simulated element wired together
#[derive(Debug)]
pub struct Session {
    store: PlayerStore,
    surface: PlayerSurface<SimulatedMedia>,
    played: Vec<EpisodeId>,
}

impl Session {
    pub fn new(store: PlayerStore, media: SimulatedMedia) -> Self {
        Self {
            store,
            surface: PlayerSurface::new(media),
            played: Vec::new(),
        }
    }

    pub fn store(&self) -> &PlayerStore {
        &self.store
    }

    /// Mutate the store and push the result to the media element
    pub fn update<T>(&mut self, f: impl FnOnce(&mut PlayerStore) -> T) -> T {
        let result = f(&mut self.store);
        self.surface.sync(&self.store);
        self.pump();
        result
    }

    pub fn surface(&self) -> &PlayerSurface<SimulatedMedia> {
        &self.surface
    }

    /// Episodes that started playing during this session, in order
    pub fn played(&self) -> &[EpisodeId] {
        &self.played
    }

    pub fn episodes_played(&self) -> usize {
        self.played.len()
    }

    /// Whether there is still something to play
    pub fn is_active(&self) -> bool {
        self.store.current_episode().is_some()
    }

    /// Apply a player control
    ///
    /// Buttons that are currently disabled are ignored.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        let controls = self.surface.controls(&self.store);

        let enabled = match command {
            Command::TogglePlay => controls.play_pause.enabled,
            Command::Next => controls.next.enabled,
            Command::Previous => controls.previous.enabled,
            Command::ToggleShuffle => controls.shuffle.enabled,
            Command::ToggleLoop => controls.looping.enabled,
            Command::Seek(_) | Command::Status | Command::Quit => true,
        };
        if !enabled {
            debug!(?command, "Control disabled, ignoring");
            return Ok(());
        }

        match command {
            Command::TogglePlay => self.update(PlayerStore::toggle_play),
            Command::Next => self.update(PlayerStore::play_next),
            Command::Previous => self.update(PlayerStore::play_previous),
            Command::ToggleShuffle => self.update(PlayerStore::toggle_shuffle),
            Command::ToggleLoop => self.update(PlayerStore::toggle_loop),
            Command::Seek(seconds) => {
                self.surface.seek(&self.store, seconds)?;
                self.pump();
            }
            Command::Status => {}
            Command::Quit => self.update(PlayerStore::clear_player_state),
        }

        Ok(())
    }

    /// Parse and apply one line of user input
    ///
    /// Blank lines are ignored.
    pub fn handle_input(&mut self, line: &str) -> Result<()> {
        if line.trim().is_empty() {
            return Ok(());
        }
        self.apply(line.parse()?)
    }

    /// Current episode, progress and control state on one line
    pub fn status_line(&self) -> String {
        let title = self
            .store
            .current_episode()
            .map_or("Nothing playing", |e| e.title.as_str());

        format!(
            "{} [{} / {}] {}",
            title,
            self.surface.progress_label(),
            self.surface.duration_label(&self.store),
            render_controls(&self.surface.controls(&self.store))
        )
    }

    /// Advance media time and process everything it reports
    pub fn step(&mut self, elapsed: Duration) {
        self.surface.media_mut().advance(elapsed);
        self.pump();
    }

    /// Advance until the queue runs out or `max_steps` is reached
    ///
    /// Returns the number of steps taken.
    pub fn run_to_end(&mut self, tick: Duration, max_steps: usize) -> usize {
        let mut steps = 0;
        while self.is_active() && steps < max_steps {
            self.step(tick);
            steps += 1;
        }
        steps
    }

    /// Real-time loop: one tick of media per `interval`, with commands read
    /// from `input`, until the queue runs out, `q` or Ctrl-C
    ///
    /// The status line is printed after every accepted command. Playback
    /// continues when `input` reaches end of file.
    pub async fn run<R>(&mut self, input: R, interval: Duration, speed: f64)
    where
        R: AsyncBufRead + Unpin,
    {
        let media_tick = interval.mul_f64(speed.max(0.0));
        let mut ticker = tokio::time::interval(interval);
        let mut lines = input.lines();
        let mut input_open = true;

        while self.is_active() {
            tokio::select! {
                _ = ticker.tick() => self.step(media_tick),
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) => match self.handle_input(&line) {
                        Ok(()) => println!("{}", self.status_line()),
                        Err(e) => warn!(error = %e, "Ignoring input"),
                    },
                    Ok(None) => input_open = false,
                    Err(e) => {
                        warn!(error = %e, "Stopped reading player input");
                        input_open = false;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, stopping playback");
                    self.update(PlayerStore::clear_player_state);
                    break;
                }
            }
        }
    }

    fn pump(&mut self) {
        while let Some(event) = self.surface.media_mut().next_event() {
            self.surface.handle_media_event(&mut self.store, event);
        }

        for event in self.store.drain_events() {
            self.log_event(&event);
        }
    }

    // Events are drained after the store has moved on, so the queue may no
    // longer hold the episode an event refers to.
    fn log_event(&mut self, event: &PlayerEvent) {
        match event {
            PlayerEvent::EpisodeChanged { episode_id, index } => {
                self.played.push(EpisodeId::new(episode_id.clone()));

                let episode = self
                    .store
                    .queue()
                    .get(*index)
                    .filter(|e| e.id.as_str() == episode_id.as_str());
                match episode {
                    Some(episode) => info!(
                        index,
                        episode_id = %episode_id,
                        title = %episode.title,
                        duration = %episode.duration_as_string,
                        "Now playing"
                    ),
                    None => info!(index, episode_id = %episode_id, "Now playing"),
                }
            }
            PlayerEvent::PlayingChanged { is_playing } => {
                debug!(
                    is_playing,
                    progress = %format_duration(self.surface.progress()),
                    "Playback state changed"
                );
            }
            PlayerEvent::Cleared => info!("Queue finished"),
            other => debug!(event = ?other, "Player event"),
        }
    }
}
