//! In-process fakes for the resolver ports.

use crate::domain::{CachedRecord, Coordinate};
use crate::ports::{CacheStore, Clock, GeocodeProvider};
use async_trait::async_trait;
use shared::{Error, Result, TtlSecs};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

#[derive(Debug)]
pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self(AtomicI64::new(now))
    }

    pub fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<HashMap<String, CachedRecord>>,
    clock: Option<Arc<FixedClock>>,
    pub get_calls: AtomicUsize,
    pub put_calls: AtomicUsize,
    pub fail_get: AtomicBool,
    pub fail_put: AtomicBool,
}

impl FakeStore {
    pub fn with_clock(clock: Arc<FixedClock>) -> Self {
        Self {
            clock: Some(clock),
            ..Default::default()
        }
    }

    pub fn insert_raw(&self, address: &str, response_json: &str, expires_at: i64) {
        self.records.lock().unwrap().insert(
            address.to_string(),
            CachedRecord {
                address: address.to_string(),
                response_json: response_json.to_string(),
                expires_at,
            },
        );
    }

    pub fn record(&self, address: &str) -> Option<CachedRecord> {
        self.records.lock().unwrap().get(address).cloned()
    }

    pub fn gets(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for FakeStore {
    async fn get(&self, address: &str) -> Result<Option<CachedRecord>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable("fake store offline".into()));
        }
        Ok(self.record(address))
    }

    async fn put(
        &self,
        address: &str,
        response_json: String,
        ttl: TtlSecs,
    ) -> Result<CachedRecord> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(Error::StoreUnavailable("fake store offline".into()));
        }
        let now = self.clock.as_ref().map(|c| c.now_unix()).unwrap_or(0);
        let record = CachedRecord::new(address, response_json, now, ttl);
        self.records
            .lock()
            .unwrap()
            .insert(address.to_string(), record.clone());
        Ok(record)
    }
}

pub enum ProviderReply {
    Found(Coordinate),
    NoResults,
    Unavailable,
}

pub struct FakeProvider {
    reply: Mutex<ProviderReply>,
    barrier: Option<Barrier>,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(reply: ProviderReply) -> Self {
        Self {
            reply: Mutex::new(reply),
            barrier: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn found(lat: f64, lng: f64) -> Self {
        Self::new(ProviderReply::Found(Coordinate::new(lat, lng)))
    }

    /// Every call waits until `n` calls are in flight.
    pub fn rendezvous(mut self, n: usize) -> Self {
        self.barrier = Some(Barrier::new(n));
        self
    }

    pub fn set_reply(&self, reply: ProviderReply) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodeProvider for FakeProvider {
    async fn resolve(&self, address: &str) -> Result<Coordinate> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        match &*self.reply.lock().unwrap() {
            ProviderReply::Found(c) => Ok(*c),
            ProviderReply::NoResults => Err(Error::NoResultsFound(address.to_string())),
            ProviderReply::Unavailable => {
                Err(Error::ProviderUnavailable("fake provider offline".into()))
            }
        }
    }
}
