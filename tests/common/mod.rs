#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use asset_probe::{
    DecodingSurface, HttpClient, HttpResponse, MediaKind, RequestConfig, Signal,
    SurfaceAttributes, SurfaceFactory,
};
use futures::future::BoxFuture;
use parking_lot::Mutex;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
pub struct Refused;

/// Client that answers every request with the same response
/// and remembers what was asked.
/// No response means the connection is refused.
#[derive(Clone, Default)]
pub struct FakeClient {
    pub calls: Arc<Mutex<Vec<(String, RequestConfig)>>>,
    response: Option<HttpResponse>,
}

impl FakeClient {
    pub fn responding(response: HttpResponse) -> Self {
        FakeClient {
            calls: Arc::default(),
            response: Some(response),
        }
    }

    pub fn refusing() -> Self {
        FakeClient::default()
    }

    pub fn calls(&self) -> Vec<(String, RequestConfig)> {
        self.calls.lock().clone()
    }
}

impl HttpClient for FakeClient {
    type Error = Refused;

    fn get<'a>(
        &'a self,
        url: &'a str,
        config: RequestConfig,
    ) -> BoxFuture<'a, Result<HttpResponse, Refused>> {
        self.calls.lock().push((url.to_owned(), config));
        let response = self.response.clone();
        Box::pin(async move { response.ok_or(Refused) })
    }
}

/// How fake surfaces finish loading.
#[derive(Clone, Copy, Debug)]
pub enum Outcome {
    /// Signal readiness on the next scheduler tick with these attributes.
    Ready(SurfaceAttributes),
    /// Signal an error on the next scheduler tick.
    Error,
    /// Drop the signal without firing it.
    Silent,
    /// Keep the signal and never fire it.
    Hang,
}

#[derive(Clone)]
pub struct FakeSurfaces {
    outcome: Outcome,
    pub created: Arc<AtomicUsize>,
    pub released: Arc<AtomicUsize>,
    pub sources: Arc<Mutex<Vec<(MediaKind, String)>>>,
}

impl FakeSurfaces {
    pub fn new(outcome: Outcome) -> Self {
        FakeSurfaces {
            outcome,
            created: Arc::default(),
            released: Arc::default(),
            sources: Arc::default(),
        }
    }

    pub fn ready(width: u32, height: u32, duration: Option<f64>) -> Self {
        FakeSurfaces::new(Outcome::Ready(SurfaceAttributes {
            width,
            height,
            duration,
        }))
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl SurfaceFactory for FakeSurfaces {
    fn create(&self, kind: MediaKind) -> Box<dyn DecodingSurface> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Box::new(FakeSurface {
            kind,
            outcome: self.outcome,
            attributes: SurfaceAttributes::default(),
            held: None,
            released: self.released.clone(),
            sources: self.sources.clone(),
        })
    }
}

struct FakeSurface {
    kind: MediaKind,
    outcome: Outcome,
    attributes: SurfaceAttributes,
    held: Option<Signal>,
    released: Arc<AtomicUsize>,
    sources: Arc<Mutex<Vec<(MediaKind, String)>>>,
}

impl DecodingSurface for FakeSurface {
    fn attach(&mut self, source: &str, signal: Signal) {
        self.sources.lock().push((self.kind, source.to_owned()));

        match self.outcome {
            Outcome::Ready(attributes) => {
                self.attributes = attributes;
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    signal.ready();
                });
            }
            Outcome::Error => {
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    signal.error("decode error");
                });
            }
            Outcome::Silent => drop(signal),
            Outcome::Hang => self.held = Some(signal),
        }
    }

    fn attributes(&self) -> SurfaceAttributes {
        self.attributes
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}
