use super::dom::query_all;
use super::observer::VisibilityObserver;
use crate::error::Result;
use crate::reveal::ObserverOptions;

const DEFERRED_SRC: &str = "data-src";

pub struct LazyImageLoader {
    _observer: VisibilityObserver,
}

impl LazyImageLoader {
    pub fn new() -> Result<Self> {
        let observer = VisibilityObserver::new(&ObserverOptions::lazy_image())?;

        for image in query_all("img[data-src]") {
            observer.observe(&image, |image| {
                let Some(src) = image.get_attribute(DEFERRED_SRC) else {
                    return;
                };
                if let Err(err) = image.set_attribute("src", &src) {
                    log::warn!("lazy image {src} not swapped: {err:?}");
                    return;
                }
                let _ = image.remove_attribute(DEFERRED_SRC);
                let _ = image.class_list().add_1("loaded");
            });
        }

        log::debug!("{} images deferred", observer.pending());
        Ok(Self {
            _observer: observer,
        })
    }
}
