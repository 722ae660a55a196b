use crate::{
    PlayerError, Playlist, Settings,
    key_handler::{self, Action},
    player::{DirectoryResolver, PlaybackController, RodioEngine, TickerTimer, TimerHandle},
    tui,
    ui_state::UiState,
};
use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, Sender, select, unbounded};
use ratatui::crossterm::event::{Event, KeyEventKind};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};
use tracing::{error, info};

pub struct SongDeck {
    player: PlaybackController<UiState>,
    ticks: Receiver<TimerHandle>,
    input: Receiver<Event>,
    input_tx: Option<Sender<Event>>,
    shutdown: Arc<AtomicBool>,
}

impl SongDeck {
    pub fn new(settings: Settings) -> Result<Self> {
        let playlist = Playlist::new(settings.playlist.iter().cloned())?;
        let resolver = DirectoryResolver::index(&settings.music_dir);
        let files = resolver.len();

        let engine = RodioEngine::new()?;

        let (tick_tx, ticks) = unbounded();
        let (input_tx, input) = unbounded();

        let player = PlaybackController::new(
            playlist,
            Box::new(engine),
            Box::new(resolver),
            Box::new(TickerTimer::new(tick_tx)),
            UiState::new(settings.seek_step_percent),
        )
        .with_tick_interval(settings.tick_interval());

        info!(
            music_dir = %settings.music_dir.display(),
            files,
            tracks = player.playlist().len(),
            "starting songdeck"
        );

        Ok(SongDeck {
            player,
            ticks,
            input,
            input_tx: Some(input_tx),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;

        let reader = self.spawn_input_reader()?;

        if let Err(e) = self.player.open() {
            self.player.ui_mut().report(&e);
        }

        // MAIN ROUTINE
        let outcome = loop {
            if let Err(e) = terminal.draw(|f| tui::render(f, self.player.ui_mut())) {
                break Err(e.into());
            }

            if let Err(e) = self.wait_for_event() {
                break Err(e);
            }

            if self.player.ui().should_quit() {
                break Ok(());
            }
        };

        self.player.teardown();
        self.shutdown.store(true, Ordering::SeqCst);
        let _ = reader.join();

        ratatui::restore();
        info!("songdeck closed");

        outcome
    }

    /// Blocks until a key press or a refresh tick arrives, then handles it on
    /// this thread.
    fn wait_for_event(&mut self) -> Result<()> {
        select! {
            recv(self.input) -> event => match event? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(key, self.player.ui()) {
                        if let Err(e) = self.handle_action(action) {
                            error!("{e}");
                            self.show_error(e);
                        }
                    }
                }
                // Resizes only need the redraw that follows
                _ => (),
            },
            recv(self.ticks) -> handle => self.player.on_timer_fired(handle?),
        }
        Ok(())
    }

    fn show_error(&mut self, err: anyhow::Error) {
        let ui = self.player.ui_mut();
        match err.downcast_ref::<PlayerError>() {
            Some(player_err) => ui.report(player_err),
            None => ui.set_error(err),
        }
    }

    fn spawn_input_reader(&mut self) -> Result<JoinHandle<()>> {
        let tx = self
            .input_tx
            .take()
            .ok_or_else(|| anyhow!("Input reader already running"))?;
        let shutdown = Arc::clone(&self.shutdown);

        Ok(thread::spawn(move || {
            while !shutdown.load(Ordering::SeqCst) {
                match key_handler::next_event() {
                    Ok(Some(event)) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => (),
                    Err(e) => {
                        error!("terminal input failed: {e}");
                        break;
                    }
                }
            }
        }))
    }
}

impl SongDeck {
    #[rustfmt::skip]
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Transport
            Action::Play            => self.player.play()?,
            Action::Pause           => self.player.pause()?,
            Action::Stop            => self.player.stop()?,
            Action::PlayNext        => self.player.next()?,
            Action::PlayPrev        => self.player.previous()?,

            // Song list
            Action::ToggleList      => self.player.toggle_list_visibility(),
            Action::Scroll(d)       => self.player.ui_mut().scroll(d),
            Action::PlaySelected    => self.play_selected()?,

            // Seek bar
            Action::SeekNudge(step) => self.nudge_seek(step)?,
            Action::SeekCommit      => self.commit_seek()?,
            Action::SeekCancel      => self.cancel_seek()?,

            Action::DismissError    => self.player.ui_mut().clear_error(),
            Action::QUIT            => self.player.ui_mut().request_quit(),
        }
        Ok(())
    }

    fn play_selected(&mut self) -> Result<()> {
        if let Some(idx) = self.player.ui().selected_song() {
            self.player.select_from_list(idx)?;
        }
        Ok(())
    }

    /// The first nudge grabs the bar, which pauses playback.
    fn nudge_seek(&mut self, step: i16) -> Result<()> {
        if !self.player.ui().seek.is_active() {
            self.player.on_seek_start()?;
            let ui = self.player.ui_mut();
            let from = ui.seek_progress();
            ui.seek.begin(from);
        }

        self.player.ui_mut().seek.nudge(step);
        Ok(())
    }

    fn commit_seek(&mut self) -> Result<()> {
        match self.player.ui_mut().seek.finish() {
            Some(pct) => Ok(self.player.on_seek_commit(pct)?),
            None => Ok(()),
        }
    }

    /// Lets go of the bar where it was grabbed; playback picks up unmoved.
    fn cancel_seek(&mut self) -> Result<()> {
        self.player.ui_mut().seek.cancel();
        self.player.play()?;
        Ok(())
    }
}
