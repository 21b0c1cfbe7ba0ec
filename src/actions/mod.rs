//! Request actions
//!
//! Each action drives one request through its lifecycle: begin on the owning
//! slice, call the API with the store unlocked, then fulfil or reject. Failed
//! requests push an error toast; acknowledged mutations push a success toast
//! with the server's message, or a default text when it sent none.
//!
//! Actions return the payload (or the error) as well, so controllers can
//! react without re-reading the store.

mod billing;
mod contest;
mod inquiry;
mod work;

use std::future::Future;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::store::{AppStore, BillingSlice, ContestSlice, Lifecycle, RequestKey, Store, Ticket, WorkSlice};
use museume_types::{ClassSignupResponse, MessageResponse, VideoUrlResponse, WorkUpdateResponse};

/// Responses that may carry a human-readable acknowledgement.
pub trait Acknowledged {
    fn server_message(&self) -> Option<&str>;
}

macro_rules! acknowledged {
    ($($ty:ty),* $(,)?) => {
        $(impl Acknowledged for $ty {
            fn server_message(&self) -> Option<&str> {
                self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
            }
        })*
    };
}

acknowledged!(
    MessageResponse,
    WorkUpdateResponse,
    ClassSignupResponse,
    VideoUrlResponse
);

type SliceFn<S> = fn(&mut AppStore) -> &mut S;

fn work_slice(store: &mut AppStore) -> &mut WorkSlice {
    &mut store.work
}

fn contest_slice(store: &mut AppStore) -> &mut ContestSlice {
    &mut store.contest
}

fn billing_slice(store: &mut AppStore) -> &mut BillingSlice {
    &mut store.billing
}

/// Which request, on which slice, and whether it raises the loading flag.
struct Request<S> {
    key: RequestKey,
    slice: SliceFn<S>,
    silent: bool,
    /// Confirmed server changes apply even when overlapped
    mutation: bool,
}

impl<S> Request<S> {
    fn new(key: RequestKey, slice: SliceFn<S>) -> Self {
        Self {
            key,
            slice,
            silent: false,
            mutation: false,
        }
    }

    fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    fn mutation(mut self) -> Self {
        self.mutation = true;
        self
    }
}

/// Entry point for every user-triggered request.
#[derive(Clone)]
pub struct Dispatcher {
    api: ApiClient,
    store: Store,
}

impl Dispatcher {
    pub fn new(api: ApiClient, store: Store) -> Self {
        Self { api, store }
    }

    /// Client from environment configuration plus an empty store.
    pub fn from_env() -> Result<Self> {
        let api = ApiClient::new(ClientConfig::from_env()?)?;
        Ok(Self::new(api, Store::new()))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Lifecycle for reads: toasts only on failure.
    async fn fetch<S, T, Fut, F>(&self, req: Request<S>, call: Fut, fulfil: F) -> Result<T>
    where
        S: Lifecycle,
        T: Clone,
        Fut: Future<Output = Result<T>>,
        F: FnOnce(&mut S, Ticket, T),
    {
        self.run(req, call, fulfil, |_| None).await
    }

    /// Lifecycle for mutations: toasts on both outcomes.
    async fn mutate<S, T, Fut, F>(
        &self,
        req: Request<S>,
        call: Fut,
        fulfil: F,
        default_message: &'static str,
    ) -> Result<T>
    where
        S: Lifecycle,
        T: Clone + Acknowledged,
        Fut: Future<Output = Result<T>>,
        F: FnOnce(&mut S, Ticket, T),
    {
        self.run(req.mutation(), call, fulfil, |payload: &T| {
            Some(
                payload
                    .server_message()
                    .unwrap_or(default_message)
                    .to_string(),
            )
        })
        .await
    }

    async fn run<S, T, Fut, F, M>(&self, req: Request<S>, call: Fut, fulfil: F, success: M) -> Result<T>
    where
        S: Lifecycle,
        T: Clone,
        Fut: Future<Output = Result<T>>,
        F: FnOnce(&mut S, Ticket, T),
        M: FnOnce(&T) -> Option<String>,
    {
        let slice = req.slice;
        let ticket = self.store.update(|s| {
            if req.mutation {
                slice(s).begin_mutation(req.key, req.silent)
            } else {
                slice(s).begin(req.key, req.silent)
            }
        });

        // Toasts only accompany transitions that were applied.
        match call.await {
            Ok(payload) => {
                let toast = success(&payload);
                self.store.update(|s| {
                    let target = slice(s);
                    let applied = target.core_mut().accepts(ticket);
                    fulfil(target, ticket, payload.clone());
                    if let (true, Some(message)) = (applied, toast) {
                        s.toasts.success(message);
                    }
                });
                Ok(payload)
            }
            Err(err) => {
                let message = err.message();
                tracing::warn!(key = req.key, error = %err, "request failed");
                self.store.update(|s| {
                    if slice(s).reject(ticket, message.clone()) {
                        s.toasts.error(message);
                    }
                });
                Err(err)
            }
        }
    }
}
