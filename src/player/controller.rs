use super::{
    AudioEngine, PlaybackState, ResourceResolver, Session, TimerHandle, TimerService, UiSurface,
};
use crate::{
    DEFAULT_TICK_INTERVAL, PlayerError, Result, clock_display,
    domain::{Playlist, Track},
    position_at_percent, progress_percent,
};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Owns the playlist position, the one live session and the refresh timer.
///
/// Every method is meant to be called from a single event loop. The timer
/// only reports handles back to that loop through [`Self::on_timer_fired`].
pub struct PlaybackController<U: UiSurface> {
    playlist: Playlist,
    engine: Box<dyn AudioEngine>,
    resolver: Box<dyn ResourceResolver>,
    timer: Box<dyn TimerService>,
    ui: U,
    tick_interval: Duration,

    current_index: usize,
    session: Option<Box<dyn Session>>,
    duration: Duration,
    refresh_timer: Option<TimerHandle>,
    state: PlaybackState,
    list_visible: bool,
}

impl<U: UiSurface> PlaybackController<U> {
    pub fn new(
        playlist: Playlist,
        engine: Box<dyn AudioEngine>,
        resolver: Box<dyn ResourceResolver>,
        timer: Box<dyn TimerService>,
        ui: U,
    ) -> Self {
        PlaybackController {
            playlist,
            engine,
            resolver,
            timer,
            ui,
            tick_interval: DEFAULT_TICK_INTERVAL,

            current_index: 0,
            session: None,
            duration: Duration::ZERO,
            refresh_timer: None,
            state: PlaybackState::Idle,
            list_visible: false,
        }
    }

    /// Sets the refresh period, raised to at least a millisecond.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(MIN_TICK_INTERVAL);
        self
    }

    /// Populates the screen and loads the first track without starting it.
    pub fn open(&mut self) -> Result<()> {
        self.ui.render_playlist(&self.playlist.names());
        self.list_visible = false;
        self.ui.set_list_visible(false);
        self.ui.set_playback_state(self.state);

        self.select_track(0)
    }
}

// =====================
//    TRANSPORT
// =====================
impl<U: UiSurface> PlaybackController<U> {
    /// Loads the track at `index`, replacing the current session.
    ///
    /// The name is resolved before anything is torn down, so an unknown
    /// track leaves the current session playing. Once resolved, the old
    /// session is released before the engine opens the new one.
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        let track = self
            .playlist
            .get(index)
            .ok_or(PlayerError::InvalidIndex {
                index,
                len: self.playlist.len(),
            })?
            .clone();

        let resource = self.resolver.resolve(track.name()).inspect_err(|e| {
            warn!(track = %track, "selection rejected: {e}");
        })?;

        self.disarm_timer();
        self.release_session();

        let session = match self.engine.create(&resource) {
            Ok(session) => session,
            Err(e) => {
                error!(track = %track, "engine could not open track: {e}");
                self.duration = Duration::ZERO;
                self.set_state(PlaybackState::Idle);
                self.ui.set_now_playing(None);
                self.ui.set_seek_progress(0);
                self.ui.set_duration_text(&clock_display(Duration::ZERO));
                return Err(e);
            }
        };

        self.duration = session.duration();
        self.session = Some(session);
        self.current_index = index;

        let duration_ms = self.duration.as_millis();
        info!(track = %track, index, duration_ms, "track loaded");

        self.set_state(PlaybackState::Stopped);
        self.ui.set_now_playing(Some(index));
        self.ui.set_seek_progress(0);
        self.ui.set_duration_text(&clock_display(self.duration));

        Ok(())
    }

    pub fn play(&mut self) -> Result<()> {
        let started = self.session_mut()?.start();
        if let Err(e) = started {
            return Err(self.abort(e));
        }

        self.arm_timer();
        self.set_state(PlaybackState::Playing);
        Ok(())
    }

    /// Suspends playback and the refresh timer, keeping the position.
    pub fn pause(&mut self) -> Result<()> {
        let paused = self.session_mut()?.pause();
        if let Err(e) = paused {
            return Err(self.abort(e));
        }

        self.disarm_timer();
        self.set_state(PlaybackState::Paused);
        self.tick();
        Ok(())
    }

    /// Halts playback and rewinds to the start of the track.
    pub fn stop(&mut self) -> Result<()> {
        let session = self.session_mut()?;
        let stopped = session.stop().and_then(|_| session.prepare_for_replay());
        if let Err(e) = stopped {
            return Err(self.abort(e));
        }

        self.disarm_timer();
        self.set_state(PlaybackState::Stopped);
        self.ui.set_seek_progress(0);
        self.ui.set_duration_text(&clock_display(self.duration));
        Ok(())
    }

    pub fn next(&mut self) -> Result<()> {
        let index = self.playlist.next_index(self.current_index);
        self.select_track(index)?;
        self.play()
    }

    pub fn previous(&mut self) -> Result<()> {
        let index = self.playlist.previous_index(self.current_index);
        self.select_track(index)?;
        self.play()
    }

    pub fn select_from_list(&mut self, index: usize) -> Result<()> {
        self.select_track(index)?;
        self.play()
    }

    pub fn toggle_list_visibility(&mut self) {
        self.list_visible = !self.list_visible;
        self.ui.set_list_visible(self.list_visible);
    }

    /// Releases the session and cancels the timer. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.disarm_timer();
        self.release_session();
        self.duration = Duration::ZERO;
        self.set_state(PlaybackState::Idle);
    }
}

// =====================
//    SEEK BAR
// =====================
impl<U: UiSurface> PlaybackController<U> {
    /// The user grabbed the seek bar.
    pub fn on_seek_start(&mut self) -> Result<()> {
        self.pause()
    }

    /// The user let go of the seek bar at `percent`.
    pub fn on_seek_commit(&mut self, percent: u8) -> Result<()> {
        if percent > 100 {
            return Err(PlayerError::InvalidPercent(percent));
        }

        let target = position_at_percent(percent, self.duration);
        let session = self.session_mut()?;
        let resumed = session.seek_to(target).and_then(|_| session.start());
        if let Err(e) = resumed {
            return Err(self.abort(e));
        }

        let target_ms = target.as_millis();
        debug!(percent, target_ms, "seek committed");

        self.rearm_timer();
        self.set_state(PlaybackState::Playing);
        self.ui.set_seek_progress(percent);
        self.ui
            .set_duration_text(&clock_display(self.duration.saturating_sub(target)));
        Ok(())
    }

    /// Pushes the current position to the seek bar and remaining-time text.
    pub fn tick(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        let position = session.current_position();
        let remaining = self.duration.saturating_sub(position);

        self.ui
            .set_seek_progress(progress_percent(position, self.duration));
        self.ui.set_duration_text(&clock_display(remaining));
    }

    /// Runs a tick if `handle` is the armed timer. Ticks that were queued
    /// before a cancel are dropped here.
    pub fn on_timer_fired(&mut self, handle: TimerHandle) {
        match self.refresh_timer == Some(handle) {
            true => self.tick(),
            false => trace!(timer = handle.id(), "dropping stale tick"),
        }
    }
}

// =====================
//    ACCESSORS
// =====================
impl<U: UiSurface> PlaybackController<U> {
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.session
            .as_ref()
            .and_then(|_| self.playlist.get(self.current_index))
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn position(&self) -> Duration {
        self.session
            .as_ref()
            .map(|s| s.current_position())
            .unwrap_or_default()
    }

    pub fn is_timer_armed(&self) -> bool {
        self.refresh_timer.is_some()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }
}

impl<U: UiSurface> PlaybackController<U> {
    fn session_mut(&mut self) -> Result<&mut Box<dyn Session>> {
        self.session.as_mut().ok_or(PlayerError::NoActiveSession)
    }

    fn arm_timer(&mut self) {
        if self.refresh_timer.is_none() {
            let handle = self.timer.schedule(self.tick_interval);
            debug!(timer = handle.id(), "refresh timer armed");
            self.refresh_timer = Some(handle);
        }
    }

    fn rearm_timer(&mut self) {
        self.disarm_timer();
        self.arm_timer();
    }

    fn disarm_timer(&mut self) {
        if let Some(handle) = self.refresh_timer.take() {
            self.timer.cancel(handle);
            debug!(timer = handle.id(), "refresh timer cancelled");
        }
    }

    fn release_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.release();
        }
    }

    /// Engine failure mid-operation: stop refreshing and hand the error back.
    fn abort(&mut self, err: PlayerError) -> PlayerError {
        error!("playback command failed: {err}");
        self.disarm_timer();
        if self.state == PlaybackState::Playing {
            self.set_state(PlaybackState::Paused);
        }
        err
    }

    fn set_state(&mut self, state: PlaybackState) {
        self.state = state;
        self.ui.set_playback_state(state);
    }
}

impl<U: UiSurface> Drop for PlaybackController<U> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::fakes::{EngineProbe, FakeEngine, FakeResolver, FakeTimer, RecordingUi};
    use std::{cell::RefCell, rc::Rc};

    struct Rig {
        player: PlaybackController<RecordingUi>,
        engine: Rc<RefCell<EngineProbe>>,
        timers: Rc<RefCell<crate::player::fakes::TimerProbe>>,
    }

    fn rig(tracks: &[(&str, u64)]) -> Rig {
        let playlist = Playlist::new(tracks.iter().map(|(name, _)| *name)).unwrap();
        let engine = FakeEngine::with_durations(
            tracks
                .iter()
                .map(|(name, ms)| (*name, Duration::from_millis(*ms))),
        );
        let engine_probe = engine.probe();
        let resolver = FakeResolver::knowing(tracks.iter().map(|(name, _)| *name));
        let timer = FakeTimer::default();
        let timer_probe = timer.probe();

        let player = PlaybackController::new(
            playlist,
            Box::new(engine),
            Box::new(resolver),
            Box::new(timer),
            RecordingUi::default(),
        );

        Rig {
            player,
            engine: engine_probe,
            timers: timer_probe,
        }
    }

    fn abc() -> Rig {
        rig(&[("A", 180_000), ("B", 200_000), ("C", 95_000)])
    }

    #[test]
    fn open_lists_tracks_hides_list_and_loads_first() {
        let mut r = abc();
        r.player.open().unwrap();

        let ui = r.player.ui();
        assert_eq!(ui.playlist, vec!["A", "B", "C"]);
        assert_eq!(ui.list_visible, Some(false));
        assert_eq!(ui.now_playing, Some(0));
        assert_eq!(ui.duration_text, "03:00");
        assert_eq!(r.player.state(), PlaybackState::Stopped);
        assert!(!r.player.is_timer_armed());
    }

    #[test]
    fn next_twice_then_wraps() {
        let mut r = abc();
        r.player.open().unwrap();

        r.player.next().unwrap();
        r.player.next().unwrap();
        assert_eq!(r.player.current_index(), 2);
        assert_eq!(r.player.current_track().unwrap().name(), "C");

        r.player.next().unwrap();
        assert_eq!(r.player.current_index(), 0);
        assert_eq!(r.player.state(), PlaybackState::Playing);
        assert_eq!(r.player.ui().state, PlaybackState::Playing);
    }

    #[test]
    fn timer_uses_configured_interval() {
        let mut r = abc();
        r.player = r.player.with_tick_interval(Duration::from_millis(250));
        r.player.open().unwrap();
        r.player.play().unwrap();

        assert_eq!(r.timers.borrow().periods, vec![Duration::from_millis(250)]);
    }

    #[test]
    fn previous_from_first_goes_to_last() {
        let mut r = abc();
        r.player.open().unwrap();

        r.player.previous().unwrap();
        assert_eq!(r.player.current_index(), 2);
    }

    #[test]
    fn selecting_resets_progress_and_reads_duration() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().position = Duration::from_secs(90);
        r.player.tick();
        assert_eq!(r.player.ui().seek_progress, 50);

        r.player.select_track(1).unwrap();

        assert_eq!(r.player.ui().seek_progress, 0);
        assert_eq!(r.player.duration(), Duration::from_millis(200_000));
        assert_eq!(r.player.ui().duration_text, "03:20");
        assert_eq!(r.player.state(), PlaybackState::Stopped);
    }

    #[test]
    fn only_one_session_is_ever_live() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.next().unwrap();
        r.player.select_from_list(0).unwrap();

        let engine = r.engine.borrow();
        assert_eq!(engine.created, 3);
        assert_eq!(engine.live, 1);
        assert_eq!(engine.max_live, 1);
    }

    #[test]
    fn seek_commit_at_half_of_200_seconds() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.select_track(1).unwrap();
        r.player.play().unwrap();

        r.player.on_seek_start().unwrap();
        assert!(!r.player.is_timer_armed());
        assert_eq!(r.player.state(), PlaybackState::Paused);

        r.player.on_seek_commit(50).unwrap();

        assert_eq!(
            r.engine.borrow().seeks,
            vec![Duration::from_millis(100_000)]
        );
        assert!(r.engine.borrow().playing);
        assert!(r.player.is_timer_armed());
        assert_eq!(r.player.ui().seek_progress, 50);
        assert_eq!(r.player.ui().duration_text, "01:40");
    }

    #[test]
    fn seek_commit_rejects_over_100() {
        let mut r = abc();
        r.player.open().unwrap();

        let err = r.player.on_seek_commit(101).unwrap_err();
        assert!(matches!(err, PlayerError::InvalidPercent(101)));
        assert!(r.engine.borrow().seeks.is_empty());
    }

    #[test]
    fn tick_with_zero_duration_reports_zero() {
        let mut r = rig(&[("Silence", 0)]);
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().position = Duration::from_secs(4);

        r.player.tick();

        assert_eq!(r.player.ui().seek_progress, 0);
        assert_eq!(r.player.ui().duration_text, "00:00");
    }

    #[test]
    fn tick_shows_remaining_time() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().position = Duration::from_secs(30);

        r.player.tick();

        assert_eq!(r.player.ui().seek_progress, 16);
        assert_eq!(r.player.ui().duration_text, "02:30");
    }

    #[test]
    fn pause_then_play_keeps_position() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().position = Duration::from_secs(42);

        r.player.pause().unwrap();
        assert!(!r.player.is_timer_armed());
        r.player.play().unwrap();

        assert_eq!(r.player.position(), Duration::from_secs(42));
        assert_eq!(r.player.state(), PlaybackState::Playing);
    }

    #[test]
    fn stop_rewinds_to_zero() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().position = Duration::from_secs(42);
        r.player.tick();

        r.player.stop().unwrap();

        assert_eq!(r.player.position(), Duration::ZERO);
        assert_eq!(r.player.ui().seek_progress, 0);
        assert_eq!(r.player.state(), PlaybackState::Stopped);
        assert!(!r.player.is_timer_armed());
        assert_eq!(r.engine.borrow().replays, 1);
    }

    #[test]
    fn teardown_twice_is_safe() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();

        r.player.teardown();
        r.player.teardown();

        assert_eq!(r.engine.borrow().live, 0);
        assert_eq!(r.engine.borrow().released, 1);
        assert!(r.timers.borrow().armed.is_empty());
        assert_eq!(r.player.state(), PlaybackState::Idle);
        assert!(matches!(r.player.play(), Err(PlayerError::NoActiveSession)));
    }

    #[test]
    fn unknown_track_keeps_current_session() {
        let playlist = Playlist::new(["A", "Missing"]).unwrap();
        let engine = FakeEngine::with_durations([("A", Duration::from_secs(60))]);
        let probe = engine.probe();
        let mut player = PlaybackController::new(
            playlist,
            Box::new(engine),
            Box::new(FakeResolver::knowing(["A"])),
            Box::new(FakeTimer::default()),
            RecordingUi::default(),
        );
        player.open().unwrap();
        player.play().unwrap();

        let err = player.next().unwrap_err();

        assert!(matches!(err, PlayerError::ResourceNotFound(ref name) if name == "Missing"));
        assert_eq!(player.current_index(), 0);
        assert_eq!(player.state(), PlaybackState::Playing);
        assert!(player.is_timer_armed());
        assert_eq!(probe.borrow().live, 1);
        assert!(probe.borrow().playing);
    }

    #[test]
    fn engine_failure_on_open_leaves_player_idle() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().broken.insert("B".into());

        let err = r.player.next().unwrap_err();

        assert!(matches!(err, PlayerError::PlaybackEngine(_)));
        assert_eq!(r.engine.borrow().live, 0);
        assert_eq!(r.player.state(), PlaybackState::Idle);
        assert_eq!(r.player.current_index(), 0);
        assert!(!r.player.is_timer_armed());
        assert!(r.player.current_track().is_none());
    }

    #[test]
    fn engine_failure_on_start_disarms_timer() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.player.pause().unwrap();
        r.engine.borrow_mut().fail_start = true;

        assert!(r.player.play().is_err());
        assert!(!r.player.is_timer_armed());
    }

    #[test]
    fn failed_seek_leaves_track_paused() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.player.on_seek_start().unwrap();
        r.engine.borrow_mut().fail_seek = true;

        let err = r.player.on_seek_commit(50).unwrap_err();

        assert!(matches!(err, PlayerError::PlaybackEngine(_)));
        assert_eq!(r.player.state(), PlaybackState::Paused);
        assert!(!r.player.is_timer_armed());
        assert!(!r.engine.borrow().playing);
        assert!(r.engine.borrow().seeks.is_empty());
    }

    #[test]
    fn failed_rewind_on_stop_pauses_instead() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().fail_replay = true;

        let err = r.player.stop().unwrap_err();

        assert!(matches!(err, PlayerError::PlaybackEngine(_)));
        assert_eq!(r.player.state(), PlaybackState::Paused);
        assert!(!r.player.is_timer_armed());
        assert!(r.timers.borrow().armed.is_empty());
    }

    #[test]
    fn failed_pause_disarms_timer() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().fail_pause = true;

        let err = r.player.pause().unwrap_err();

        assert!(matches!(err, PlayerError::PlaybackEngine(_)));
        assert_eq!(r.player.state(), PlaybackState::Paused);
        assert!(!r.player.is_timer_armed());
    }

    #[test]
    fn zero_tick_interval_is_raised_to_a_millisecond() {
        let mut r = abc();
        r.player = r.player.with_tick_interval(Duration::ZERO);
        r.player.open().unwrap();
        r.player.play().unwrap();

        assert_eq!(r.timers.borrow().periods, vec![Duration::from_millis(1)]);
    }

    #[test]
    fn at_most_one_timer_is_armed() {
        let mut r = abc();
        r.player.open().unwrap();

        r.player.play().unwrap();
        r.player.play().unwrap();
        r.player.on_seek_commit(10).unwrap();
        r.player.next().unwrap();

        let timers = r.timers.borrow();
        assert_eq!(timers.armed.len(), 1);
        assert_eq!(timers.max_armed, 1);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();
        let first = *r.timers.borrow().armed.iter().next().unwrap();

        r.player.pause().unwrap();
        r.player.play().unwrap();
        r.engine.borrow_mut().position = Duration::from_secs(90);
        r.player.on_timer_fired(first);
        assert_eq!(r.player.ui().seek_progress, 0);

        let current = *r.timers.borrow().armed.iter().next().unwrap();
        r.player.on_timer_fired(current);
        assert_eq!(r.player.ui().seek_progress, 50);
    }

    #[test]
    fn list_toggle_does_not_touch_playback() {
        let mut r = abc();
        r.player.open().unwrap();
        r.player.play().unwrap();

        r.player.toggle_list_visibility();
        assert_eq!(r.player.ui().list_visible, Some(true));
        r.player.toggle_list_visibility();
        assert_eq!(r.player.ui().list_visible, Some(false));

        assert_eq!(r.player.state(), PlaybackState::Playing);
        assert_eq!(r.engine.borrow().created, 1);
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        let mut r = abc();
        r.player.open().unwrap();

        let err = r.player.select_from_list(3).unwrap_err();
        assert!(matches!(err, PlayerError::InvalidIndex { index: 3, len: 3 }));
        assert_eq!(r.player.current_index(), 0);
    }

    fn numbered(n: usize) -> Rig {
        let names: Vec<String> = (0..n).map(|i| format!("T{i}")).collect();
        let tracks: Vec<(&str, u64)> = names.iter().map(|n| (n.as_str(), 60_000)).collect();
        rig(&tracks)
    }

    proptest::proptest! {
        #[test]
        fn navigation_wraps_for_any_length(n in 1usize..40) {
            let mut r = numbered(n);
            r.player.open().unwrap();

            r.player.previous().unwrap();
            proptest::prop_assert_eq!(r.player.current_index(), n - 1);

            r.player.next().unwrap();
            proptest::prop_assert_eq!(r.player.current_index(), 0);
        }
    }
}
