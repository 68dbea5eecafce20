use std::{
    collections::HashMap,
    io::Read,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use lru::LruCache;
use parking_lot::Mutex;
use threadpool::ThreadPool;
use ureq::Agent;
use url::Url;

use crate::{
    catalog::City,
    error::Error,
    nav::InstanceId,
    photo::{self, CityImage},
};

pub trait FetchImage: Send + Sync + 'static {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, Error>;
}

/// Plain HTTP GET, one attempt per call.
pub struct HttpFetcher {
    agent: Agent,
}

impl HttpFetcher {
    pub fn new(proxy_url: Option<&str>, timeout: Option<Duration>) -> Self {
        let mut agent = Agent::config_builder().timeout_global(timeout);
        if let Some(proxy_url) = proxy_url {
            let proxy = ureq::Proxy::new(proxy_url).ok();
            agent = agent.proxy(proxy);
        }
        Self {
            agent: agent.build().into(),
        }
    }
}

impl FetchImage for HttpFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, Error> {
        log::debug!("fetching image: {url}");
        let response = self.agent.get(url.as_str()).call()?;
        let mut body = Vec::new();
        response.into_body().into_reader().read_to_end(&mut body)?;
        Ok(body)
    }
}

/// Picture wanted by a mounted detail screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRequest {
    pub city: City,
    pub instance: InstanceId,
    pub url: Url,
}

impl ImageRequest {
    fn key(&self) -> TaskKey {
        (self.city.clone(), self.instance)
    }
}

type TaskKey = (City, InstanceId);

#[derive(Clone, Debug)]
pub struct FetchHandle {
    cancelled: Arc<AtomicBool>,
}

impl FetchHandle {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Stops the result from being delivered. The request itself is not
    /// aborted.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn same(&self, other: &FetchHandle) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

pub struct ImageLoader {
    fetcher: Arc<dyn FetchImage>,
    pool: ThreadPool,
    cache: Arc<Mutex<LruCache<Url, CityImage>>>,
    tasks: Arc<Mutex<HashMap<TaskKey, FetchHandle>>>,
}

impl ImageLoader {
    pub fn new(fetcher: impl FetchImage) -> Self {
        const MAX_IMAGE_THREADS: usize = 32;
        const IMAGE_CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(64) {
            Some(size) => size,
            None => unreachable!(),
        };

        Self {
            fetcher: Arc::new(fetcher),
            pool: ThreadPool::with_name("image_loading".into(), MAX_IMAGE_THREADS),
            cache: Arc::new(Mutex::new(LruCache::new(IMAGE_CACHE_SIZE))),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn get_cached(&self, url: &Url) -> Option<CityImage> {
        self.cache.lock().get(url).cloned()
    }

    /// Loads the picture for `request` and hands it to `on_ready`, unless the
    /// returned handle (or the request's screen instance) gets cancelled first.
    /// Cached pictures are delivered before this returns. Failures are logged
    /// and never reach `on_ready`.
    pub fn load(
        &self,
        request: ImageRequest,
        on_ready: impl FnOnce(ImageRequest, CityImage) + Send + 'static,
    ) -> FetchHandle {
        let handle = FetchHandle::new();

        if let Some(image) = self.get_cached(&request.url) {
            on_ready(request, image);
            return handle;
        }

        let key = request.key();
        if let Some(previous) = self.tasks.lock().insert(key.clone(), handle.clone()) {
            previous.cancel();
        }

        let fetcher = self.fetcher.clone();
        let cache = self.cache.clone();
        let tasks = self.tasks.clone();
        let task = handle.clone();
        self.pool.execute(move || {
            let result = if task.is_cancelled() {
                None
            } else {
                Some(
                    fetcher
                        .fetch(&request.url)
                        .and_then(|bytes| photo::decode(&bytes)),
                )
            };

            {
                let mut tasks = tasks.lock();
                if tasks.get(&key).is_some_and(|current| current.same(&task)) {
                    tasks.remove(&key);
                }
            }

            match result {
                Some(Ok(image)) => {
                    cache.lock().put(request.url.clone(), image.clone());
                    if task.is_cancelled() {
                        log::debug!("discarding image for {}: {}", request.instance, request.url);
                    } else {
                        on_ready(request, image);
                    }
                }
                Some(Err(err)) => {
                    log::warn!("failed to load image {}: {err}", request.url);
                }
                None => {
                    log::debug!("skipping cancelled image: {}", request.url);
                }
            }
        });

        handle
    }

    /// Cancels everything requested on behalf of `instance`.
    pub fn cancel(&self, instance: InstanceId) {
        self.tasks.lock().retain(|(_, owner), handle| {
            if *owner == instance {
                handle.cancel();
                false
            } else {
                true
            }
        });
    }

    pub fn cancel_all(&self) {
        for (_, handle) in self.tasks.lock().drain() {
            handle.cancel();
        }
    }

    pub fn in_flight(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Blocks until all queued fetches finished.
    pub fn join(&self) {
        self.pool.join();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crossbeam_channel::{unbounded, Receiver, Sender};
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;
    use crate::{nav::Navigator, photo::ImageSource, screen::ScreenId};

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([9, 9, 9, 255])));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    struct StaticFetcher(Vec<u8>);

    impl FetchImage for StaticFetcher {
        fn fetch(&self, _url: &Url) -> Result<Vec<u8>, Error> {
            Ok(self.0.clone())
        }
    }

    /// Holds every fetch until the test lets it through.
    struct GatedFetcher {
        gate: Receiver<()>,
        bytes: Vec<u8>,
    }

    impl FetchImage for GatedFetcher {
        fn fetch(&self, _url: &Url) -> Result<Vec<u8>, Error> {
            self.gate.recv().expect("gate closed");
            Ok(self.bytes.clone())
        }
    }

    struct FailingFetcher;

    impl FetchImage for FailingFetcher {
        fn fetch(&self, url: &Url) -> Result<Vec<u8>, Error> {
            Err(Error::InvalidUrl(url.to_string()))
        }
    }

    fn request(nav: &mut Navigator, city: &str) -> ImageRequest {
        let city = City::new(city).unwrap();
        let instance = nav.navigate(ScreenId::Detail(city.clone()));
        ImageRequest {
            url: ImageSource::default().url_for(&city),
            city,
            instance,
        }
    }

    fn deliver_to(
        tx: Sender<(ImageRequest, CityImage)>,
    ) -> impl FnOnce(ImageRequest, CityImage) + Send {
        move |request, image| {
            tx.send((request, image)).unwrap();
        }
    }

    #[test]
    fn delivers_cropped_image_once() {
        let loader = ImageLoader::new(StaticFetcher(png(30, 10)));
        let mut nav = Navigator::new();
        let req = request(&mut nav, "Prague");
        let (tx, rx) = unbounded();

        loader.load(req.clone(), deliver_to(tx));
        loader.join();

        let (delivered, image) = rx.try_recv().unwrap();
        assert_eq!(delivered, req);
        assert_eq!((image.width, image.height), (10, 10));
        assert!(rx.try_recv().is_err());
        assert_eq!(loader.in_flight(), 0);
        assert_eq!(loader.get_cached(&req.url), Some(image));
    }

    #[test]
    fn cached_image_is_delivered_synchronously() {
        let loader = ImageLoader::new(StaticFetcher(png(4, 4)));
        let mut nav = Navigator::new();
        let (tx, rx) = unbounded();

        loader.load(request(&mut nav, "Yerevan"), deliver_to(tx.clone()));
        loader.join();
        rx.try_recv().unwrap();

        let again = request(&mut nav, "Yerevan");
        loader.load(again.clone(), deliver_to(tx));
        let (delivered, _) = rx.try_recv().unwrap();
        assert_eq!(delivered.instance, again.instance);
    }

    #[test]
    fn cancelled_handle_discards_result() {
        let (open, gate) = unbounded();
        let loader = ImageLoader::new(GatedFetcher {
            gate,
            bytes: png(4, 4),
        });
        let mut nav = Navigator::new();
        let req = request(&mut nav, "Barcelona");
        let (tx, rx) = unbounded();

        let handle = loader.load(req.clone(), deliver_to(tx));
        handle.cancel();
        assert!(handle.is_cancelled());
        open.send(()).unwrap();
        loader.join();

        assert!(rx.try_recv().is_err());
        assert_eq!(loader.in_flight(), 0);
    }

    #[test]
    fn cancel_only_affects_torn_down_instance() {
        let (open, gate) = unbounded();
        let loader = ImageLoader::new(GatedFetcher {
            gate,
            bytes: png(4, 4),
        });
        let mut nav = Navigator::new();
        let stale = request(&mut nav, "Prague");
        let fresh = request(&mut nav, "Prague");
        let (tx, rx) = unbounded();

        loader.load(stale.clone(), deliver_to(tx.clone()));
        loader.load(fresh.clone(), deliver_to(tx));
        assert_eq!(loader.in_flight(), 2);

        loader.cancel(stale.instance);
        assert_eq!(loader.in_flight(), 1);
        open.send(()).unwrap();
        open.send(()).unwrap();
        loader.join();

        let delivered: Vec<_> = rx.try_iter().map(|(request, _)| request).collect();
        assert_eq!(delivered, [fresh]);
    }

    #[test]
    fn cancel_all_discards_everything() {
        let (open, gate) = unbounded();
        let loader = ImageLoader::new(GatedFetcher {
            gate,
            bytes: png(4, 4),
        });
        let mut nav = Navigator::new();
        let (tx, rx) = unbounded();

        loader.load(request(&mut nav, "Prague"), deliver_to(tx.clone()));
        loader.load(request(&mut nav, "Yerevan"), deliver_to(tx));
        loader.cancel_all();
        assert_eq!(loader.in_flight(), 0);
        open.send(()).unwrap();
        open.send(()).unwrap();
        loader.join();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn failed_fetch_is_swallowed() {
        let loader = ImageLoader::new(FailingFetcher);
        let mut nav = Navigator::new();
        let req = request(&mut nav, "Prague");
        let (tx, rx) = unbounded();

        loader.load(req.clone(), deliver_to(tx));
        loader.join();

        assert!(rx.try_recv().is_err());
        assert_eq!(loader.in_flight(), 0);
        assert_eq!(loader.get_cached(&req.url), None);
    }
}
