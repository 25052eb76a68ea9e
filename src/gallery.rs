use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::api::EventApi;
use crate::config::{Config, GallerySource};
use crate::slider::{SlideDisplay, Slider};
use crate::types::ImageDescriptor;

/// Fills the slider once per page load, either from `/api/gallery/` or from the
/// seed list the page was configured with.
pub struct GalleryLoader<A: EventApi> {
    api: Arc<A>,
    source: GallerySource,
    seed: Option<Vec<String>>,
}

impl<A: EventApi> GalleryLoader<A> {
    pub fn new(api: Arc<A>, source: GallerySource, seed: Option<Vec<String>>) -> Self {
        Self { api, source, seed }
    }

    pub fn from_config(api: Arc<A>, cfg: &Config) -> Self {
        Self::new(api, cfg.gallery, cfg.gallery_images.clone())
    }

    /// Fetch the descriptors. Any failure is logged and yields an empty list.
    pub async fn fetch(&self) -> Vec<ImageDescriptor> {
        match self.source {
            GallerySource::Seeded => self
                .seed
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|s| ImageDescriptor::Bare(s.clone()))
                .collect(),
            GallerySource::Remote => match self.api.fetch_gallery().await {
                Ok(list) => {
                    info!(count = list.len(), "gallery loaded");
                    list
                }
                Err(e) => {
                    warn!("gallery load failed, using placeholder: {}", e);
                    Vec::new()
                }
            },
        }
    }

    /// Fetch, then hand the result to the slider. The lock is only taken after the
    /// request has finished.
    pub async fn populate<D: SlideDisplay>(&self, slider: &Mutex<Slider<D>>) -> usize {
        let images = self.fetch().await;
        let count = images.len();
        match slider.lock() {
            Ok(mut s) => s.load(images),
            Err(_) => warn!("slider lock poisoned; gallery dropped"),
        }
        count
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::slider::tests::Recorder;
    use crate::types::{BookingRequest, BookingResult, GalleryImage};
    use async_trait::async_trait;

    /// Scripted backend: canned gallery and booking answers, counts calls.
    #[derive(Debug, Default)]
    pub(crate) struct FakeApi {
        pub gallery: Option<Result<Vec<ImageDescriptor>, ApiError>>,
        pub booking: Option<Result<BookingResult, ApiError>>,
        pub sent: Mutex<Vec<BookingRequest>>,
        pub gallery_calls: Mutex<usize>,
    }

    #[async_trait]
    impl EventApi for FakeApi {
        async fn fetch_gallery(&self) -> Result<Vec<ImageDescriptor>, ApiError> {
            *self.gallery_calls.lock().unwrap() += 1;
            self.gallery.clone().unwrap_or_else(|| Err(ApiError::Transport("no gallery scripted".into())))
        }

        async fn submit_booking(&self, req: &BookingRequest) -> Result<BookingResult, ApiError> {
            self.sent.lock().unwrap().push(req.clone());
            self.booking.clone().unwrap_or_else(|| Err(ApiError::Transport("no booking scripted".into())))
        }
    }

    pub(crate) fn records(names: &[&str]) -> Vec<ImageDescriptor> {
        names.iter().map(|n| GalleryImage { image: n.to_string(), title: None }.into()).collect()
    }

    fn slider() -> (Mutex<Slider<Recorder>>, Recorder) {
        let rec = Recorder::default();
        (Mutex::new(Slider::new(rec.clone(), "default.jpg")), rec)
    }

    #[tokio::test]
    async fn remote_gallery_feeds_slider() {
        let api = Arc::new(FakeApi { gallery: Some(Ok(records(&["a.jpg", "b.jpg"]))), ..Default::default() });
        let loader = GalleryLoader::new(api.clone(), GallerySource::Remote, None);
        let (s, rec) = slider();
        assert_eq!(loader.populate(&s).await, 2);
        assert_eq!(rec.shown(), ["a.jpg"]);
        s.lock().unwrap().next();
        assert_eq!(rec.shown(), ["a.jpg", "b.jpg"]);
        assert_eq!(*api.gallery_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_gallery_falls_back_to_placeholder() {
        for err in [ApiError::Status(404), ApiError::Transport("refused".into()), ApiError::Malformed("eof".into())] {
            let api = Arc::new(FakeApi { gallery: Some(Err(err)), ..Default::default() });
            let loader = GalleryLoader::new(api, GallerySource::Remote, None);
            let (s, rec) = slider();
            assert_eq!(loader.populate(&s).await, 0);
            assert_eq!(rec.shown(), ["default.jpg"]);
            assert_eq!(s.lock().unwrap().len(), 0);
        }
    }

    #[tokio::test]
    async fn empty_remote_gallery_shows_placeholder() {
        let api = Arc::new(FakeApi { gallery: Some(Ok(Vec::new())), ..Default::default() });
        let loader = GalleryLoader::new(api, GallerySource::Remote, None);
        let (s, rec) = slider();
        loader.populate(&s).await;
        assert_eq!(rec.shown(), ["default.jpg"]);
    }

    #[tokio::test]
    async fn seeded_gallery_skips_the_network() {
        let api = Arc::new(FakeApi::default());
        let seed = Some(vec!["x.jpg".to_string(), "y.jpg".to_string()]);
        let loader = GalleryLoader::new(api.clone(), GallerySource::Seeded, seed);
        let (s, rec) = slider();
        assert_eq!(loader.populate(&s).await, 2);
        assert_eq!(rec.shown(), ["x.jpg"]);
        assert_eq!(*api.gallery_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_seed_behaves_like_failure() {
        let api = Arc::new(FakeApi::default());
        let loader = GalleryLoader::new(api, GallerySource::Seeded, None);
        let (s, rec) = slider();
        assert_eq!(loader.populate(&s).await, 0);
        assert_eq!(rec.shown(), ["default.jpg"]);
    }
}
