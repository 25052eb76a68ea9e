pub mod api;
pub mod booking;
pub mod config;
pub mod gallery;
pub mod nav;
pub mod slider;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::api::{ApiError, EventApi, HttpApi};
    pub use crate::booking::{BookingError, BookingView, Confirmation, SubmitControl, SubmitPhase};
    pub use crate::config::{Config, GallerySource};
    pub use crate::slider::{SlideDisplay, Slider};
    pub use crate::types::{BookingForm, BookingId, BookingRequest, BookingResult, GalleryImage, ImageDescriptor};
    pub use crate::Landing;
}

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{EventApi, HttpApi};
use crate::booking::{BookingError, BookingSubmitter, BookingView, Confirmation};
use crate::config::Config;
use crate::gallery::GalleryLoader;
use crate::nav::{NavMenu, RevealTracker};
use crate::slider::{spawn_autoplay, SlideDisplay, Slider};
use crate::types::BookingForm;

/// One landing page session. Owns the slider, the gallery loader and the booking form.
pub struct Landing<D: SlideDisplay, A: EventApi = HttpApi> {
    config: Config,
    api_base: String,
    slider: Arc<Mutex<Slider<D>>>,
    gallery: GalleryLoader<A>,
    booking: BookingSubmitter<A>,
    menu: NavMenu,
    reveal: RevealTracker,
}

impl<D: SlideDisplay + 'static> Landing<D, HttpApi> {
    /// Build against the real backend at the configured API_BASE.
    pub fn connect(config: Config, display: D) -> Result<Self> {
        let base = config.api_base().context("resolving API base")?;
        info!(api_base = %base, "using backend");
        let api = Arc::new(HttpApi::new(base));
        Self::with_api(config, api, display)
    }
}

impl<D: SlideDisplay + 'static, A: EventApi> Landing<D, A> {
    pub fn with_api(config: Config, api: Arc<A>, display: D) -> Result<Self> {
        let api_base = config.api_base().context("resolving API base")?;
        let slider = Arc::new(Mutex::new(Slider::new(display, config.default_image.clone())));
        let gallery = GalleryLoader::from_config(api.clone(), &config);
        let booking = BookingSubmitter::new(api, config.confirmation_page.clone(), api_base.clone());
        Ok(Self {
            config,
            api_base,
            slider,
            gallery,
            booking,
            menu: NavMenu::default(),
            reveal: RevealTracker::default(),
        })
    }

    pub fn config(&self) -> &Config { &self.config }
    pub fn api_base(&self) -> &str { &self.api_base }
    pub fn slider(&self) -> Arc<Mutex<Slider<D>>> { self.slider.clone() }
    pub fn menu(&mut self) -> &mut NavMenu { &mut self.menu }
    pub fn booking_phase(&self) -> booking::SubmitPhase { self.booking.phase() }

    /// Register `count` scroll-reveal elements.
    pub fn track_reveals(&mut self, count: usize) { self.reveal = RevealTracker::new(count); }
    pub fn reveal(&mut self) -> &mut RevealTracker { &mut self.reveal }

    /// Page load: the timer starts first so it never waits on the gallery request.
    pub async fn start(&self) -> JoinHandle<()> {
        let handle = spawn_autoplay(self.slider.clone(), self.config.slide_interval());
        self.gallery.populate(&self.slider).await;
        handle
    }

    /// Submit the form and present the outcome: navigate on success, one notification
    /// on failure.
    pub async fn submit_booking(&mut self, form: &BookingForm, view: &mut dyn BookingView) -> Result<Confirmation, BookingError> {
        let outcome = self.booking.submit(form, view).await;
        match &outcome {
            Ok(c) => view.navigate(&c.location()),
            Err(e) => view.notify(e.user_message()),
        }
        outcome
    }
}
