//! Image loader engine
//!
//! Turns file selections into settled holder states:
//!
//! ```text
//! FileSelection --> read first source --> size check --> format sniff
//!        |                                                   |
//!        v                                                   v
//!   (empty: no-op)                        ImageCell (Loaded | Failed) + events
//! ```
//!
//! Loads run on spawned tasks so a slow disk never blocks the caller.
//! Nothing is cancelled: when selections overlap, every accepted load runs
//! to completion and the holder keeps whichever settled last.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use uuid::Uuid;

use crate::config::LoaderConfig;
use crate::dataurl;
use crate::loader::cell::{ImageCell, LoadFailure, LoadId, LoadedImage};
use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::source::{FileSelection, ImageSource};

/// Callback invoked once with the data URL after a successful load
pub type OnLoaded = Box<dyn FnOnce(String) + Send + 'static>;

/// Asynchronous image loader writing into a shared [`ImageCell`]
pub struct ImageLoader {
    config: LoaderConfig,
    cell: Arc<ImageCell>,
}

impl ImageLoader {
    pub fn new(config: LoaderConfig) -> Self {
        let cell = Arc::new(ImageCell::new(config.event_capacity));
        Self { config, cell }
    }

    pub fn with_defaults() -> Self {
        Self::new(LoaderConfig::default())
    }

    /// The holder this loader writes into
    pub fn cell(&self) -> Arc<ImageCell> {
        Arc::clone(&self.cell)
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Handle a file-selection event.
    ///
    /// An empty selection (cancelled dialog) is a no-op: the holder keeps
    /// its current value and no events fire. Otherwise only the first file
    /// is read; the load runs on a background task and settles the holder
    /// with either the encoded data URL or the failure. `on_loaded` fires
    /// exactly once, after the holder update, and only on success.
    ///
    /// Returns the id of the accepted load attempt, `None` for the no-op.
    pub fn handle_selection(
        &self,
        selection: FileSelection,
        on_loaded: Option<OnLoaded>,
    ) -> Option<LoadId> {
        let ignored = selection.len().saturating_sub(1);
        let source = match selection.into_first() {
            Some(source) => source,
            None => {
                tracing::debug!("Empty file selection, nothing to load");
                return None;
            }
        };
        if ignored > 0 {
            tracing::debug!(ignored, "Multi-file selection, loading first file only");
        }

        let load_id = Uuid::new_v4();
        let source_name = source.name();
        tracing::debug!(load_id = %load_id, source = ?source_name, "Load accepted");
        self.cell.notify_started(load_id, source_name.clone());

        let cell = Arc::clone(&self.cell);
        let config = self.config.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            match load_source(&config, source.as_ref()).await {
                Ok(image) => {
                    tracing::info!(
                        load_id = %load_id,
                        mime = %image.mime,
                        bytes = image.byte_len,
                        duration_ms = started.elapsed().as_millis() as u64,
                        "Image loaded"
                    );
                    let data_url = image.data_url.clone();
                    cell.set_loaded(load_id, image).await;
                    if let Some(callback) = on_loaded {
                        callback(data_url);
                    }
                }
                Err(err) => {
                    tracing::warn!(load_id = %load_id, error = %err, "Image load failed");
                    let failure = LoadFailure {
                        kind: err.kind(),
                        message: err.to_string(),
                        source_name,
                        failed_at: Utc::now().timestamp_millis(),
                    };
                    cell.set_failed(load_id, failure).await;
                }
            }
        });

        Some(load_id)
    }

    /// Read and encode a single source without touching the holder.
    ///
    /// Useful for one-off conversions (CLI, scripts) where the reactive
    /// plumbing is not wanted.
    pub async fn load(&self, source: &dyn ImageSource) -> LoaderResult<LoadedImage> {
        load_source(&self.config, source).await
    }
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Read, validate and encode one source
async fn load_source(
    config: &LoaderConfig,
    source: &dyn ImageSource,
) -> LoaderResult<LoadedImage> {
    let bytes = source.read().await?;
    if bytes.len() > config.max_bytes {
        return Err(LoaderError::TooLarge {
            len: bytes.len(),
            max: config.max_bytes,
        });
    }

    let mime = dataurl::sniff_mime(&bytes).ok_or(LoaderError::UnrecognizedFormat)?;
    if config.strict_decode {
        // Full decode catches truncated or corrupt files the magic-byte
        // sniff waves through
        image::load_from_memory(&bytes)?;
    }

    Ok(LoadedImage {
        data_url: dataurl::encode(mime, &bytes),
        mime: mime.to_string(),
        byte_len: bytes.len(),
        source_name: source.name(),
        loaded_at: Utc::now().timestamp_millis(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::cell::{LoadEvent, LoadState};
    use crate::loader::error::LoadErrorKind;
    use crate::loader::source::{BytesSource, PathSource};
    use tokio::sync::{broadcast, mpsc};
    use tokio::time::{timeout, Duration};

    fn png_bytes(shade: u8) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([shade, 64, 128, 255]));
        let mut cursor = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, image::ImageFormat::Png)
            .unwrap();
        cursor.into_inner()
    }

    fn test_loader() -> ImageLoader {
        ImageLoader::new(LoaderConfig {
            max_bytes: 1024 * 1024,
            strict_decode: false,
            event_capacity: 16,
        })
    }

    /// Wait for the next terminal (Loaded/Failed) event, skipping Started
    async fn terminal_event(rx: &mut broadcast::Receiver<LoadEvent>) -> LoadEvent {
        loop {
            let event = timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("timed out waiting for load event")
                .expect("event channel closed");
            if !matches!(event, LoadEvent::Started { .. }) {
                return event;
            }
        }
    }

    #[tokio::test]
    async fn test_empty_selection_is_a_no_op() {
        let loader = test_loader();
        let cell = loader.cell();
        let mut rx = cell.subscribe();

        let load_id = loader.handle_selection(FileSelection::empty(), None);

        assert!(load_id.is_none());
        assert_eq!(cell.generation(), 0);
        assert!(cell.state().await.is_empty());
        assert!(timeout(Duration::from_millis(50), rx.recv()).await.is_err());
    }

    #[tokio::test]
    async fn test_file_selection_settles_holder_with_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pick.png");
        std::fs::write(&path, png_bytes(10)).unwrap();

        let loader = test_loader();
        let cell = loader.cell();
        let mut rx = cell.subscribe();
        let (cb_tx, mut cb_rx) = mpsc::unbounded_channel();

        let load_id = loader
            .handle_selection(
                FileSelection::single(PathSource::new(&path)),
                Some(Box::new(move |url| {
                    let _ = cb_tx.send(url);
                })),
            )
            .expect("non-empty selection must be accepted");

        let event = terminal_event(&mut rx).await;
        let image = match event {
            LoadEvent::Loaded { load_id: id, image } => {
                assert_eq!(id, load_id);
                image
            }
            other => panic!("expected Loaded, got {:?}", other),
        };
        assert!(image.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(image.mime, "image/png");
        assert_eq!(image.byte_len, png_bytes(10).len());
        assert_eq!(image.source_name.as_deref(), Some("pick.png"));

        // Holder, event and callback all carry the same string
        assert_eq!(cell.data_url().await.as_deref(), Some(image.data_url.as_str()));
        assert_eq!(cell.generation(), 1);

        let delivered = timeout(Duration::from_secs(2), cb_rx.recv())
            .await
            .expect("timed out waiting for callback")
            .expect("callback channel closed");
        assert_eq!(delivered, image.data_url);
        assert!(cb_rx.try_recv().is_err(), "callback must fire exactly once");
    }

    #[tokio::test]
    async fn test_loaded_data_url_round_trips() {
        let bytes = png_bytes(42);
        let loader = test_loader();

        let image = loader
            .load(&BytesSource::named("mem.png", bytes.clone()))
            .await
            .unwrap();

        let decoded = dataurl::decode(&image.data_url).unwrap();
        assert_eq!(decoded.mime, "image/png");
        assert_eq!(decoded.bytes, bytes);
    }

    #[tokio::test]
    async fn test_unreadable_path_records_io_failure() {
        let loader = test_loader();
        let cell = loader.cell();
        let mut rx = cell.subscribe();
        let (cb_tx, mut cb_rx) = mpsc::unbounded_channel::<String>();

        loader.handle_selection(
            FileSelection::single(PathSource::new("/no/such/dir/picked.png")),
            Some(Box::new(move |url| {
                let _ = cb_tx.send(url);
            })),
        );

        let event = terminal_event(&mut rx).await;
        assert!(matches!(event, LoadEvent::Failed { .. }));
        match cell.state().await {
            LoadState::Failed(failure) => {
                assert_eq!(failure.kind, LoadErrorKind::Io);
                assert_eq!(failure.source_name.as_deref(), Some("picked.png"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
        assert!(cb_rx.try_recv().is_err(), "callback must not fire on failure");
    }

    #[tokio::test]
    async fn test_unrecognized_bytes_are_surfaced_not_swallowed() {
        let loader = test_loader();
        let cell = loader.cell();
        let mut rx = cell.subscribe();

        loader.handle_selection(
            FileSelection::single(BytesSource::named("junk.bin", b"definitely not an image".to_vec())),
            None,
        );

        let event = terminal_event(&mut rx).await;
        match event {
            LoadEvent::Failed { failure, .. } => {
                assert_eq!(failure.kind, LoadErrorKind::UnrecognizedFormat);
                assert!(!failure.message.is_empty());
            }
            other => panic!("expected Failed, got {:?}", other),
        }

        // Distinguishable from a holder that never loaded anything
        let state = cell.state().await;
        assert!(state.is_failed());
        assert!(!state.is_empty());
        assert_eq!(cell.generation(), 1);
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected_without_touching_holder() {
        let loader = ImageLoader::new(LoaderConfig {
            max_bytes: 16,
            strict_decode: false,
            event_capacity: 16,
        });
        let cell = loader.cell();

        let err = loader
            .load(&BytesSource::new(png_bytes(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, LoaderError::TooLarge { max: 16, .. }));

        // Direct loads bypass the holder entirely
        assert!(cell.state().await.is_empty());
        assert_eq!(cell.generation(), 0);
    }

    #[tokio::test]
    async fn test_strict_decode_rejects_truncated_png() {
        let mut truncated = png_bytes(10);
        truncated.truncate(20);

        let strict = ImageLoader::new(LoaderConfig {
            max_bytes: 1024 * 1024,
            strict_decode: true,
            event_capacity: 16,
        });
        let err = strict
            .load(&BytesSource::new(truncated.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), LoadErrorKind::Decode);

        // The magic-byte sniff alone waves the same bytes through
        let lax = test_loader();
        assert!(lax.load(&BytesSource::new(truncated)).await.is_ok());
    }

    #[tokio::test]
    async fn test_only_first_file_of_selection_is_loaded() {
        let first = png_bytes(1);
        let second = png_bytes(2);
        assert_ne!(first, second);

        let loader = test_loader();
        let cell = loader.cell();
        let mut rx = cell.subscribe();

        let mut selection = FileSelection::empty();
        selection.push(BytesSource::named("first.png", first.clone()));
        selection.push(BytesSource::named("second.png", second));
        loader.handle_selection(selection, None);

        let event = terminal_event(&mut rx).await;
        match event {
            LoadEvent::Loaded { image, .. } => {
                assert_eq!(image.source_name.as_deref(), Some("first.png"));
                assert_eq!(image.data_url, dataurl::encode("image/png", &first));
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
        // Exactly one load ran
        assert!(rx.try_recv().is_err());
        assert_eq!(cell.generation(), 1);
    }

    #[tokio::test]
    async fn test_overlapping_loads_last_completion_wins() {
        let loader = test_loader();
        let cell = loader.cell();
        let mut rx = cell.subscribe();

        loader.handle_selection(
            FileSelection::single(BytesSource::named("a.png", png_bytes(1))),
            None,
        );
        loader.handle_selection(
            FileSelection::single(BytesSource::named("b.png", png_bytes(2))),
            None,
        );

        // Both loads run to completion, in whichever order the scheduler
        // picks. The holder must agree with the last terminal event.
        let first_settled = terminal_event(&mut rx).await;
        let last_settled = terminal_event(&mut rx).await;
        assert!(matches!(first_settled, LoadEvent::Loaded { .. }));
        let last_image = match last_settled {
            LoadEvent::Loaded { image, .. } => image,
            other => panic!("expected Loaded, got {:?}", other),
        };

        assert_eq!(cell.data_url().await, Some(last_image.data_url));
        assert_eq!(cell.generation(), 2);
    }
}
