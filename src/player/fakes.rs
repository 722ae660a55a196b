//! In-memory collaborators for controller tests.

use super::{
    AudioEngine, PlaybackState, ResourceHandle, ResourceResolver, Session, TimerHandle,
    TimerService, UiSurface,
};
use crate::{PlayerError, Result};
use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    path::PathBuf,
    rc::Rc,
    time::Duration,
};

/// What the fake engine and its one live session have been told to do.
#[derive(Default)]
pub struct EngineProbe {
    pub created: usize,
    pub released: usize,
    pub live: usize,
    pub max_live: usize,
    pub replays: usize,
    pub playing: bool,
    pub position: Duration,
    pub seeks: Vec<Duration>,
    pub broken: HashSet<String>,
    pub fail_start: bool,
    pub fail_pause: bool,
    pub fail_seek: bool,
    pub fail_replay: bool,
}

pub struct FakeEngine {
    durations: HashMap<String, Duration>,
    probe: Rc<RefCell<EngineProbe>>,
}

impl FakeEngine {
    pub fn with_durations<'a>(durations: impl IntoIterator<Item = (&'a str, Duration)>) -> Self {
        FakeEngine {
            durations: durations
                .into_iter()
                .map(|(name, d)| (name.to_string(), d))
                .collect(),
            probe: Rc::default(),
        }
    }

    pub fn probe(&self) -> Rc<RefCell<EngineProbe>> {
        Rc::clone(&self.probe)
    }
}

impl AudioEngine for FakeEngine {
    fn create(&mut self, resource: &ResourceHandle) -> Result<Box<dyn Session>> {
        let name = resource.path().to_string_lossy().to_string();
        let mut probe = self.probe.borrow_mut();

        if probe.broken.contains(&name) {
            return Err(PlayerError::engine(format!("cannot decode {name}")));
        }

        probe.created += 1;
        probe.live += 1;
        probe.max_live = probe.max_live.max(probe.live);
        probe.playing = false;
        probe.position = Duration::ZERO;

        Ok(Box::new(FakeSession {
            duration: self.durations.get(&name).copied().unwrap_or_default(),
            probe: Rc::clone(&self.probe),
            released: false,
        }))
    }
}

struct FakeSession {
    duration: Duration,
    probe: Rc<RefCell<EngineProbe>>,
    released: bool,
}

impl Session for FakeSession {
    fn start(&mut self) -> Result<()> {
        let mut probe = self.probe.borrow_mut();
        if probe.fail_start {
            return Err(PlayerError::engine("output device unavailable"));
        }
        probe.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut probe = self.probe.borrow_mut();
        if probe.fail_pause {
            return Err(PlayerError::engine("sink rejected pause"));
        }
        probe.playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.probe.borrow_mut().playing = false;
        Ok(())
    }

    fn prepare_for_replay(&mut self) -> Result<()> {
        let mut probe = self.probe.borrow_mut();
        if probe.fail_replay {
            return Err(PlayerError::engine("file vanished"));
        }
        probe.replays += 1;
        probe.position = Duration::ZERO;
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        let mut probe = self.probe.borrow_mut();
        if probe.fail_seek {
            return Err(PlayerError::engine("source is not seekable"));
        }
        probe.seeks.push(position);
        probe.position = position;
        Ok(())
    }

    fn current_position(&self) -> Duration {
        self.probe.borrow().position
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            let mut probe = self.probe.borrow_mut();
            probe.released += 1;
            probe.live -= 1;
            probe.playing = false;
        }
    }
}

/// Resolves known names to a handle whose path is the name itself.
pub struct FakeResolver {
    known: HashSet<String>,
}

impl FakeResolver {
    pub fn knowing<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        FakeResolver {
            known: names.into_iter().map(String::from).collect(),
        }
    }
}

impl ResourceResolver for FakeResolver {
    fn resolve(&self, track_name: &str) -> Result<ResourceHandle> {
        match self.known.contains(track_name) {
            true => Ok(ResourceHandle::new(PathBuf::from(track_name))),
            false => Err(PlayerError::ResourceNotFound(track_name.to_string())),
        }
    }
}

#[derive(Default)]
pub struct TimerProbe {
    pub next_id: u64,
    pub armed: HashSet<TimerHandle>,
    pub max_armed: usize,
    pub periods: Vec<Duration>,
}

#[derive(Default)]
pub struct FakeTimer {
    probe: Rc<RefCell<TimerProbe>>,
}

impl FakeTimer {
    pub fn probe(&self) -> Rc<RefCell<TimerProbe>> {
        Rc::clone(&self.probe)
    }
}

impl TimerService for FakeTimer {
    fn schedule(&mut self, period: Duration) -> TimerHandle {
        let mut probe = self.probe.borrow_mut();
        probe.next_id += 1;
        let handle = TimerHandle::new(probe.next_id);

        probe.armed.insert(handle);
        probe.max_armed = probe.max_armed.max(probe.armed.len());
        probe.periods.push(period);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.probe.borrow_mut().armed.remove(&handle);
    }
}

#[derive(Default)]
pub struct RecordingUi {
    pub seek_progress: u8,
    pub duration_text: String,
    pub list_visible: Option<bool>,
    pub playlist: Vec<String>,
    pub now_playing: Option<usize>,
    pub state: PlaybackState,
}

impl UiSurface for RecordingUi {
    fn set_seek_progress(&mut self, percent: u8) {
        self.seek_progress = percent;
    }

    fn set_duration_text(&mut self, text: &str) {
        self.duration_text = text.to_string();
    }

    fn set_list_visible(&mut self, visible: bool) {
        self.list_visible = Some(visible);
    }

    fn render_playlist(&mut self, names: &[String]) {
        self.playlist = names.to_vec();
    }

    fn set_now_playing(&mut self, index: Option<usize>) {
        self.now_playing = index;
    }

    fn set_playback_state(&mut self, state: PlaybackState) {
        self.state = state;
    }
}
