//! Clipboard boundary
//!
//! The color state only needs "write this string; succeed or fail". Each
//! backend maps its own failure into [`Error::ClipboardUnavailable`].

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "system-clipboard")]
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
#[cfg(all(feature = "system-clipboard", target_os = "linux"))]
use tracing::info;

use crate::error::{Error, Result};

/// Write-only access to a clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;

    /// Keep the last write available once this process stops serving it.
    ///
    /// Returns when the contents no longer depend on this process. Backends
    /// whose contents outlive the writer return immediately.
    async fn hold(&self) -> Result<()> {
        Ok(())
    }

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Which clipboard backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardBackend {
    /// Host clipboard
    #[default]
    System,
    /// In-process buffer
    Memory,
    /// Every write fails
    Disabled,
}

impl std::fmt::Display for ClipboardBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardBackend::System => write!(f, "system"),
            ClipboardBackend::Memory => write!(f, "memory"),
            ClipboardBackend::Disabled => write!(f, "disabled"),
        }
    }
}

impl ClipboardBackend {
    /// Build the backend.
    ///
    /// `System` falls back to `Disabled` when the crate is built without the
    /// `system-clipboard` feature.
    pub fn build(&self) -> Arc<dyn Clipboard> {
        match self {
            #[cfg(feature = "system-clipboard")]
            ClipboardBackend::System => Arc::new(SystemClipboard::new()),
            #[cfg(not(feature = "system-clipboard"))]
            ClipboardBackend::System => Arc::new(DeniedClipboard::new(
                "built without the system-clipboard feature",
            )),
            ClipboardBackend::Memory => Arc::new(MemoryClipboard::new()),
            ClipboardBackend::Disabled => Arc::new(DeniedClipboard::new("clipboard disabled")),
        }
    }
}

/// In-process clipboard that remembers the last write.
///
/// Cloning shares the buffer, so a test can keep a handle while the
/// [`crate::state::ColorState`] owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    contents: Option<String>,
    denied: bool,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that refuses writes until [`MemoryClipboard::set_denied`] clears it
    pub fn denied() -> Self {
        let clipboard = Self::new();
        clipboard.set_denied(true);
        clipboard
    }

    pub fn set_denied(&self, denied: bool) {
        self.inner.lock().denied = denied;
    }

    pub fn contents(&self) -> Option<String> {
        self.inner.lock().contents.clone()
    }

    /// Number of successful writes
    pub fn writes(&self) -> usize {
        self.inner.lock().writes
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.denied {
            debug!("Memory clipboard refused write");
            return Err(Error::ClipboardUnavailable(
                "clipboard access denied".to_string(),
            ));
        }
        inner.contents = Some(text.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Clipboard for hosts without clipboard access
#[derive(Debug, Clone)]
pub struct DeniedClipboard {
    reason: String,
}

impl DeniedClipboard {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Clipboard for DeniedClipboard {
    async fn write_text(&self, _text: &str) -> Result<()> {
        Err(Error::ClipboardUnavailable(self.reason.clone()))
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

/// Host clipboard through arboard.
///
/// On X11 and Wayland the copied text is served by whoever owns the
/// selection, and arboard's handle is that owner. A dedicated thread opens
/// one handle on first use and keeps it until the last `SystemClipboard`
/// clone is dropped. Clones share the owner.
#[cfg(feature = "system-clipboard")]
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    requests: mpsc::UnboundedSender<OwnerRequest>,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Self {
        Self::spawn::<ArboardSelection>()
    }

    fn spawn<S: Selection>() -> Self {
        let (requests, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || run_owner::<S>(rx));
        Self { requests }
    }

    async fn request(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<()>>) -> OwnerRequest,
    ) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(make(reply))
            .map_err(|_| owner_stopped())?;
        response.await.map_err(|_| owner_stopped())?
    }
}

#[cfg(feature = "system-clipboard")]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "system-clipboard")]
#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        self.request(|reply| OwnerRequest::Write { text, reply })
            .await
            .map_err(|e| {
                debug!("System clipboard write failed: {}", e);
                e
            })
    }

    async fn hold(&self) -> Result<()> {
        self.request(|reply| OwnerRequest::Hold { reply }).await
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

#[cfg(feature = "system-clipboard")]
#[derive(Debug)]
enum OwnerRequest {
    Write {
        text: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Hold {
        reply: oneshot::Sender<Result<()>>,
    },
}

#[cfg(feature = "system-clipboard")]
fn owner_stopped() -> Error {
    Error::ClipboardUnavailable("clipboard owner thread stopped".to_string())
}

/// A platform clipboard handle, used only on the owner thread
#[cfg(feature = "system-clipboard")]
trait Selection: Sized + 'static {
    fn open() -> Result<Self>;

    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Re-assert `text` and block until another program replaces it
    fn hold(&mut self, text: &str) -> Result<()>;
}

#[cfg(feature = "system-clipboard")]
fn run_owner<S: Selection>(mut requests: mpsc::UnboundedReceiver<OwnerRequest>) {
    let mut selection: Option<S> = None;
    let mut last: Option<String> = None;

    while let Some(request) = requests.blocking_recv() {
        match request {
            OwnerRequest::Write { text, reply } => {
                let result = write_with(&mut selection, &text);
                if result.is_ok() {
                    last = Some(text);
                }
                let _ = reply.send(result);
            }
            OwnerRequest::Hold { reply } => {
                let result = match (selection.as_mut(), last.as_deref()) {
                    (Some(selection), Some(text)) => selection.hold(text),
                    _ => Ok(()),
                };
                let _ = reply.send(result);
            }
        }
    }

    debug!("Clipboard owner thread exiting");
}

#[cfg(feature = "system-clipboard")]
fn write_with<S: Selection>(slot: &mut Option<S>, text: &str) -> Result<()> {
    let mut selection = match slot.take() {
        Some(selection) => selection,
        None => S::open()?,
    };
    let result = selection.set_text(text);
    *slot = Some(selection);
    result
}

#[cfg(feature = "system-clipboard")]
struct ArboardSelection(arboard::Clipboard);

#[cfg(feature = "system-clipboard")]
impl Selection for ArboardSelection {
    fn open() -> Result<Self> {
        arboard::Clipboard::new().map(Self).map_err(unavailable)
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.0.set_text(text).map_err(unavailable)
    }

    #[cfg(target_os = "linux")]
    fn hold(&mut self, text: &str) -> Result<()> {
        use arboard::SetExtLinux;

        info!("Holding clipboard contents until another program replaces them");
        self.0.set().wait().text(text).map_err(unavailable)
    }

    #[cfg(not(target_os = "linux"))]
    fn hold(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }
}

#[cfg(feature = "system-clipboard")]
fn unavailable(e: arboard::Error) -> Error {
    Error::ClipboardUnavailable(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_clipboard_records_writes() {
        let clipboard = MemoryClipboard::new();
        let handle = clipboard.clone();

        clipboard.write_text("#FF5733").await.unwrap();
        clipboard.write_text("rgb(255, 87, 51)").await.unwrap();

        assert_eq!(handle.contents().as_deref(), Some("rgb(255, 87, 51)"));
        assert_eq!(handle.writes(), 2);
    }

    #[tokio::test]
    async fn test_memory_clipboard_denied() {
        let clipboard = MemoryClipboard::denied();
        let err = clipboard.write_text("#FF5733").await.unwrap_err();
        assert!(matches!(err, Error::ClipboardUnavailable(_)));
        assert_eq!(clipboard.contents(), None);

        clipboard.set_denied(false);
        clipboard.write_text("#FF5733").await.unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("#FF5733"));
    }

    #[tokio::test]
    async fn test_disabled_backend() {
        let clipboard = ClipboardBackend::Disabled.build();
        assert_eq!(clipboard.name(), "disabled");
        assert!(matches!(
            clipboard.write_text("x").await,
            Err(Error::ClipboardUnavailable(_))
        ));
    }

    #[cfg(feature = "system-clipboard")]
    mod owner {
        use super::*;
        use std::sync::atomic::{AtomicUsize, Ordering};

        static OPENED: AtomicUsize = AtomicUsize::new(0);
        static DROPPED: AtomicUsize = AtomicUsize::new(0);
        static HELD: parking_lot::Mutex<Option<String>> = parking_lot::const_mutex(None);

        /// Stand-in for a selection owner that tracks its own lifetime
        struct TrackedSelection;

        impl Selection for TrackedSelection {
            fn open() -> Result<Self> {
                OPENED.fetch_add(1, Ordering::SeqCst);
                Ok(TrackedSelection)
            }

            fn set_text(&mut self, _text: &str) -> Result<()> {
                Ok(())
            }

            fn hold(&mut self, text: &str) -> Result<()> {
                *HELD.lock() = Some(text.to_string());
                Ok(())
            }
        }

        impl Drop for TrackedSelection {
            fn drop(&mut self) {
                DROPPED.fetch_add(1, Ordering::SeqCst);
            }
        }

        struct NoDisplay;

        impl Selection for NoDisplay {
            fn open() -> Result<Self> {
                Err(Error::ClipboardUnavailable("no display".to_string()))
            }

            fn set_text(&mut self, _text: &str) -> Result<()> {
                Ok(())
            }

            fn hold(&mut self, _text: &str) -> Result<()> {
                Ok(())
            }
        }

        #[tokio::test]
        async fn test_handle_outlives_writes() {
            let clipboard = SystemClipboard::spawn::<TrackedSelection>();

            clipboard.write_text("#FF5733").await.unwrap();
            clipboard.write_text("rgb(255, 87, 51)").await.unwrap();

            // One handle, still alive after both writes returned
            assert_eq!(OPENED.load(Ordering::SeqCst), 1);
            assert_eq!(DROPPED.load(Ordering::SeqCst), 0);

            clipboard.hold().await.unwrap();
            assert_eq!(HELD.lock().as_deref(), Some("rgb(255, 87, 51)"));
            assert_eq!(DROPPED.load(Ordering::SeqCst), 0);
        }

        #[tokio::test]
        async fn test_open_failure_is_unavailable() {
            let clipboard = SystemClipboard::spawn::<NoDisplay>();
            let err = clipboard.write_text("#000000").await.unwrap_err();
            assert!(matches!(err, Error::ClipboardUnavailable(_)));

            // Nothing was written, so there is nothing to hold
            clipboard.hold().await.unwrap();
        }
    }
}
