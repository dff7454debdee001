#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};

use optimizer_viz::{Backend, Capability, Figure, PlotlyVersion};

/// Install a test-writer subscriber so warnings show up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("optimizer_viz=debug")
        .try_init();
}

/// Run `f` with a subscriber that records warnings, and return them.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, buffer.contents())
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Backend double that records every figure it is asked to show.
pub struct RecordingBackend {
    capability: Capability,
    pub shown: Mutex<Vec<Figure>>,
}

impl RecordingBackend {
    pub fn available() -> Self {
        Self::with_capability(Capability::Available(PlotlyVersion::new(2, 35, 2)))
    }

    pub fn with_capability(capability: Capability) -> Self {
        Self {
            capability,
            shown: Mutex::new(Vec::new()),
        }
    }

    pub fn shown_count(&self) -> usize {
        self.shown.lock().unwrap().len()
    }
}

impl Backend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    fn capability(&self) -> Capability {
        self.capability.clone()
    }

    fn show(&self, figure: &Figure) -> optimizer_viz::Result<()> {
        self.shown.lock().unwrap().push(figure.clone());
        Ok(())
    }
}
