//! Background image decoding off the frame thread.
//!
//! The starfield image can be large, so it is decoded on a worker thread
//! and handed back over a channel. The frame loop polls with
//! [`BackgroundLoader::poll`], which never blocks.

use std::path::PathBuf;

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use galaxy_render::{DecodedImage, TextureError, decode_rgba8};
use tracing::{debug, warn};

/// Outcome of one decode.
pub type LoadResult = Result<DecodedImage, TextureError>;

/// A one-shot image decode running on its own thread.
pub struct BackgroundLoader {
    path: PathBuf,
    receiver: Option<Receiver<LoadResult>>,
}

impl BackgroundLoader {
    /// Start decoding `path`, downscaling to fit `max_dimension`.
    ///
    /// If the worker thread cannot be spawned the loader is created already
    /// finished and [`poll`](Self::poll) never yields.
    pub fn spawn(path: PathBuf, max_dimension: u32) -> Self {
        let (sender, receiver) = bounded::<LoadResult>(1);
        let worker_path = path.clone();

        let spawned = std::thread::Builder::new()
            .name("background-loader".into())
            .spawn(move || {
                let result = decode_rgba8(&worker_path, max_dimension);
                let _ = sender.send(result);
            });

        match spawned {
            Ok(_) => {
                debug!("Decoding background image {}", path.display());
                Self {
                    path,
                    receiver: Some(receiver),
                }
            }
            Err(e) => {
                warn!("Failed to spawn background loader thread: {e}");
                Self {
                    path,
                    receiver: None,
                }
            }
        }
    }

    /// The image being decoded.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Whether a result is still outstanding.
    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Take the decode result if it has arrived. Yields at most once.
    pub fn poll(&mut self) -> Option<LoadResult> {
        let receiver = self.receiver.as_ref()?;
        match receiver.try_recv() {
            Ok(result) => {
                self.receiver = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                warn!(
                    "Background loader for {} exited without a result",
                    self.path.display()
                );
                self.receiver = None;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(loader: &mut BackgroundLoader) -> Option<LoadResult> {
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            if let Some(result) = loader.poll() {
                return Some(result);
            }
            if !loader.is_pending() {
                return None;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_decodes_png_on_worker_thread() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("stars.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let mut loader = BackgroundLoader::spawn(path, 4096);
        let image = wait_for(&mut loader).expect("no result").unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(&image.pixels[..4], &[10, 20, 30, 255]);
        assert!(!loader.is_pending());
        assert!(loader.poll().is_none());
    }

    #[test]
    fn test_missing_file_reports_error() {
        let tmp = tempfile::tempdir().unwrap();
        let mut loader = BackgroundLoader::spawn(tmp.path().join("missing.jpg"), 4096);
        let result = wait_for(&mut loader).expect("no result");
        assert!(matches!(result, Err(TextureError::Decode { .. })));
    }
}
