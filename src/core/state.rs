//! Application state management for Tauri.

use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info, warn};

use crate::core::session::{Operation, Settlement, Ticket};
use crate::core::{DepthSettings, ImageAsset, LightSettings, Session, SessionSnapshot};
use crate::generation::{GeminiClient, ImageGenerator};
use crate::utils::{EditorResult, GenerationResult};

/// Application state managed by Tauri.
///
/// Owns the single editing session and the generation client. The session
/// lock is never held across an `.await`, so settings stay adjustable while a
/// request is outstanding.
pub struct AppState<G = GeminiClient> {
    session: Arc<Mutex<Session>>,
    generator: Arc<G>,
}

impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            generator: Arc::clone(&self.generator),
        }
    }
}

/// Settles an in-flight operation exactly once.
///
/// Dropping the guard without calling [`OperationGuard::settle`] (the request
/// future was cancelled or panicked) still clears the busy indicator.
struct OperationGuard {
    session: Arc<Mutex<Session>>,
    operation: Operation,
    ticket: Ticket,
    settled: bool,
}

impl OperationGuard {
    fn settle(mut self, result: GenerationResult<ImageAsset>) -> Settlement {
        self.settled = true;
        if let Err(e) = &result {
            error!("{:?} failed: {}", self.operation, e);
        }
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        session.settle(self.ticket, result)
    }
}

impl Drop for OperationGuard {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if session.abandon(self.ticket) {
            warn!("{:?} ended without a result", self.operation);
        }
    }
}

impl<G: ImageGenerator> AppState<G> {
    pub fn new(generator: G) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            generator: Arc::new(generator),
        }
    }

    pub fn snapshot(&self) -> EditorResult<SessionSnapshot> {
        let session = self.session.lock()?;
        Ok(SessionSnapshot::from(&*session))
    }

    /// Runs `f` against the session and returns the resulting snapshot.
    fn update<F>(&self, f: F) -> EditorResult<SessionSnapshot>
    where
        F: FnOnce(&mut Session),
    {
        let mut session = self.session.lock()?;
        f(&mut session);
        Ok(SessionSnapshot::from(&*session))
    }

    pub fn upload(&self, image: ImageAsset) -> EditorResult<SessionSnapshot> {
        info!("New original image ({})", image.mime_type());
        self.update(|session| session.upload(image))
    }

    pub fn reset(&self) -> EditorResult<SessionSnapshot> {
        info!("Resetting session");
        self.update(Session::reset)
    }

    pub fn set_depth_settings(&self, settings: DepthSettings) -> EditorResult<SessionSnapshot> {
        self.update(|session| session.set_depth_settings(settings))
    }

    pub fn set_light_settings(&self, settings: LightSettings) -> EditorResult<SessionSnapshot> {
        self.update(|session| session.set_light_settings(settings))
    }

    pub async fn request_depth(&self) -> EditorResult<SessionSnapshot> {
        self.request(Operation::GeneratingDepth, |_| {}).await
    }

    pub async fn request_light(&self) -> EditorResult<SessionSnapshot> {
        self.request(Operation::ApplyingLight, |_| {}).await
    }

    /// Runs one generation operation end to end.
    ///
    /// `on_started` receives the busy snapshot before the service call is
    /// awaited. When the preconditions fail (no original, or something already
    /// in flight) nothing happens and the current snapshot is returned.
    pub async fn request<F>(&self, operation: Operation, on_started: F) -> EditorResult<SessionSnapshot>
    where
        F: FnOnce(&SessionSnapshot),
    {
        let (guard, request, started) = {
            let mut session = self.session.lock()?;
            let Some(pending) = session.begin_operation(operation) else {
                debug!("{:?} not started", operation);
                return Ok(SessionSnapshot::from(&*session));
            };
            let guard = OperationGuard {
                session: Arc::clone(&self.session),
                operation,
                ticket: pending.ticket,
                settled: false,
            };
            (guard, pending.request, SessionSnapshot::from(&*session))
        };

        on_started(&started);

        let result = self.generator.generate(&request).await;
        match guard.settle(result) {
            Settlement::Applied => info!("{:?} completed", operation),
            Settlement::Failed => {}
            Settlement::Stale => debug!("{:?} result superseded", operation),
        }

        self.snapshot()
    }
}
