use super::{AudioEngine, ResourceHandle, Session};
use crate::{PlayerError, Result};
use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source, mixer::Mixer};
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

/// Audio engine driving the default output device through rodio.
pub struct RodioEngine {
    stream: OutputStream,
}

impl RodioEngine {
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream().map_err(PlayerError::engine)?;

        Ok(RodioEngine { stream })
    }
}

impl AudioEngine for RodioEngine {
    fn create(&mut self, resource: &ResourceHandle) -> Result<Box<dyn Session>> {
        let session = RodioSession::open(self.stream.mixer(), resource.path())?;
        Ok(Box::new(session))
    }
}

/// One sink on the shared output mixer, holding a single decoded track.
pub struct RodioSession {
    sink: Sink,
    path: PathBuf,
    duration: Duration,
}

impl RodioSession {
    fn open(mixer: &Mixer, path: &Path) -> Result<Self> {
        let source = decode(path)?;
        let duration = source
            .total_duration()
            .or_else(|| probe_duration(path))
            .unwrap_or_default();

        let sink = Sink::connect_new(mixer);
        sink.pause();
        sink.append(source);

        debug!(path = %path.display(), "sink prepared");

        Ok(RodioSession {
            sink,
            path: path.to_path_buf(),
            duration,
        })
    }
}

impl Session for RodioSession {
    fn start(&mut self) -> Result<()> {
        // Finished tracks start over, the way a completed player restarts
        if self.sink.empty() {
            self.prepare_for_replay()?;
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.sink.pause();
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        // Drops the queued source and leaves the sink paused
        self.sink.clear();
        Ok(())
    }

    fn prepare_for_replay(&mut self) -> Result<()> {
        let source = decode(&self.path)?;
        self.sink.clear();
        self.sink.append(source);
        Ok(())
    }

    fn seek_to(&mut self, position: Duration) -> Result<()> {
        self.sink.try_seek(position).map_err(PlayerError::engine)
    }

    fn current_position(&self) -> Duration {
        match self.sink.empty() {
            true => self.duration,
            false => self.sink.get_pos(),
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn release(&mut self) {
        self.sink.stop();
    }
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path).map_err(PlayerError::engine)?;
    Decoder::try_from(file).map_err(PlayerError::engine)
}

// Some containers (VBR mp3 in particular) don't report a length to the decoder
fn probe_duration(path: &Path) -> Option<Duration> {
    let tagged = lofty::read_from_path(path).ok()?;
    Some(tagged.properties().duration())
}
