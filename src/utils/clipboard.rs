// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! System clipboard owned by one long-lived thread.
//!
//! On X11 and Wayland the copying process serves the selection itself, so the
//! clipboard handle has to outlive the copy. A dedicated thread keeps it for the
//! whole session and command workers talk to it over a channel.

use std::sync::OnceLock;
use std::time::Duration;

use crossbeam_channel::{Sender, bounded, unbounded};

/// How long a command worker waits for the clipboard thread.
const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Something that can take text for pasting elsewhere.
pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

impl ClipboardBackend for arboard::Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String> {
        arboard::Clipboard::set_text(self, text).map_err(|err| err.to_string())
    }
}

struct CopyRequest {
    text: String,
    reply: Sender<Result<(), String>>,
}

/// Handle to the clipboard thread. Cheap to share between workers.
pub struct ClipboardHandle {
    tx: Sender<CopyRequest>,
}

impl ClipboardHandle {
    /// Start the owning thread. `open` runs on that thread, lazily, and again after a failure.
    pub fn spawn<B, F>(mut open: F) -> Self
    where
        B: ClipboardBackend + 'static,
        F: FnMut() -> Result<B, String> + Send + 'static,
    {
        let (tx, rx) = unbounded::<CopyRequest>();
        let spawned = std::thread::Builder::new()
            .name("clipboard".into())
            .spawn(move || {
                let mut backend: Option<B> = None;
                for request in rx.iter() {
                    if backend.is_none() {
                        match open() {
                            Ok(opened) => backend = Some(opened),
                            Err(err) => {
                                let _ = request.reply.send(Err(err));
                                continue;
                            }
                        }
                    }
                    let result = match backend.as_mut() {
                        Some(backend) => backend.set_text(&request.text),
                        None => Err("clipboard unavailable".to_string()),
                    };
                    let _ = request.reply.send(result);
                }
            });
        if let Err(err) = spawned {
            log::warn!("clipboard thread could not start: {err}");
        }
        Self { tx }
    }

    /// Put `text` on the clipboard, or explain why it could not be done.
    pub fn copy(&self, text: &str) -> Result<(), String> {
        let (reply_tx, reply_rx) = bounded(1);
        self.tx
            .send(CopyRequest {
                text: text.to_string(),
                reply: reply_tx,
            })
            .map_err(|_| "clipboard thread is not running".to_string())?;
        reply_rx
            .recv_timeout(REPLY_TIMEOUT)
            .map_err(|_| "clipboard did not respond".to_string())?
    }
}

/// The process-wide system clipboard.
pub fn system() -> &'static ClipboardHandle {
    static SYSTEM: OnceLock<ClipboardHandle> = OnceLock::new();
    SYSTEM.get_or_init(|| {
        ClipboardHandle::spawn(|| arboard::Clipboard::new().map_err(|err| err.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Default)]
    struct Counters {
        opened: AtomicUsize,
        dropped: AtomicUsize,
        texts: Mutex<Vec<String>>,
    }

    struct Recording(Arc<Counters>);

    impl ClipboardBackend for Recording {
        fn set_text(&mut self, text: &str) -> Result<(), String> {
            self.0.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    impl Drop for Recording {
        fn drop(&mut self) {
            self.0.dropped.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn one_backend_serves_every_copy_and_stays_alive() {
        let counters = Arc::new(Counters::default());
        let shared = Arc::clone(&counters);
        let handle = ClipboardHandle::spawn(move || {
            shared.opened.fetch_add(1, Ordering::SeqCst);
            Ok(Recording(Arc::clone(&shared)))
        });

        handle.copy("http://h/view/a").unwrap();
        handle.copy("http://h/view/b").unwrap();

        assert_eq!(counters.opened.load(Ordering::SeqCst), 1);
        assert_eq!(counters.dropped.load(Ordering::SeqCst), 0);
        assert_eq!(
            *counters.texts.lock().unwrap(),
            vec!["http://h/view/a".to_string(), "http://h/view/b".to_string()]
        );
    }

    #[test]
    fn open_failure_is_reported_and_retried() {
        let counters = Arc::new(Counters::default());
        let shared = Arc::clone(&counters);
        let handle = ClipboardHandle::spawn(move || {
            if shared.opened.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("no display".to_string())
            } else {
                Ok(Recording(Arc::clone(&shared)))
            }
        });

        assert_eq!(handle.copy("x"), Err("no display".to_string()));
        assert_eq!(handle.copy("y"), Ok(()));
        assert_eq!(*counters.texts.lock().unwrap(), vec!["y".to_string()]);
    }
}
