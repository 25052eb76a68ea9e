use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::types::ImageDescriptor;

/// Surface the slider draws onto (an `<img>` in the page, a terminal line in the CLI).
pub trait SlideDisplay: Send {
    fn render(&mut self, src: &str);
}

/// Ordered images plus a cursor that wraps modulo the length.
#[derive(Debug, Clone, Default)]
pub struct ImageSequence {
    items: Vec<ImageDescriptor>,
    index: usize,
}

impl ImageSequence {
    pub fn new(items: Vec<ImageDescriptor>) -> Self { Self { items, index: 0 } }

    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn index(&self) -> usize { self.index }
    pub fn items(&self) -> &[ImageDescriptor] { &self.items }

    pub fn current(&self) -> Option<&ImageDescriptor> {
        if self.items.is_empty() { return None; }
        self.items.get(self.index % self.items.len())
    }

    fn advance(&mut self) -> bool {
        let len = self.items.len();
        if len == 0 { return false; }
        self.index = (self.index % len + 1) % len;
        true
    }

    fn retreat(&mut self) -> bool {
        let len = self.items.len();
        if len == 0 { return false; }
        self.index = (self.index % len + len - 1) % len;
        true
    }

    fn clamp(&mut self) {
        self.index = match self.items.len() {
            0 => 0,
            len => self.index % len,
        };
    }
}

pub struct Slider<D: SlideDisplay> {
    images: ImageSequence,
    display: D,
    placeholder: String,
}

impl<D: SlideDisplay> Slider<D> {
    pub fn new(display: D, placeholder: impl Into<String>) -> Self {
        Self { images: ImageSequence::default(), display, placeholder: placeholder.into() }
    }

    pub fn images(&self) -> &ImageSequence { &self.images }
    pub fn len(&self) -> usize { self.images.len() }
    pub fn is_empty(&self) -> bool { self.images.is_empty() }
    pub fn index(&self) -> usize { self.images.index() }
    pub fn display(&self) -> &D { &self.display }

    /// Render the current image. No-op on an empty sequence.
    pub fn show(&mut self) {
        if let Some(img) = self.images.current() {
            let src = img.location().to_string();
            self.display.render(&src);
        }
    }

    pub fn next(&mut self) {
        if self.images.advance() { self.show(); }
    }

    pub fn prev(&mut self) {
        if self.images.retreat() { self.show(); }
    }

    /// Swap in a freshly loaded sequence: index back to 0, then show the first image
    /// or the placeholder when there is none.
    pub fn load(&mut self, images: Vec<ImageDescriptor>) {
        self.images = ImageSequence::new(images);
        if self.images.is_empty() {
            let placeholder = self.placeholder.clone();
            self.display.render(&placeholder);
        } else {
            self.show();
        }
    }

    /// Replace the images but keep the position, wrapped into the new length.
    pub fn update(&mut self, images: Vec<ImageDescriptor>) {
        let index = self.images.index;
        self.images = ImageSequence { items: images, index };
        self.images.clamp();
    }

    /// One auto-advance tick; only moves when there is something to move to.
    pub fn tick(&mut self) -> bool {
        if self.images.len() > 1 {
            self.next();
            true
        } else {
            false
        }
    }
}

/// Drive `tick` every `period` until the handle is aborted. The first tick lands one full
/// period after start, and the sequence length is read under the lock on every tick.
pub fn spawn_autoplay<D>(slider: Arc<Mutex<Slider<D>>>, period: Duration) -> JoinHandle<()>
where
    D: SlideDisplay + 'static,
{
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match slider.lock() {
                Ok(mut s) => {
                    if s.tick() { debug!(index = s.index(), "auto-advanced slide"); }
                }
                Err(_) => {
                    warn!("slider lock poisoned; stopping autoplay");
                    break;
                }
            }
        }
    })
}
