//! Editing session state and its transitions.
//!
//! `Session` is plain data plus synchronous transitions. It never awaits:
//! the async controller in [`crate::core::AppState`] begins an operation here,
//! runs the generation call with the lock released, and settles the outcome
//! back here under its ticket.

use tracing::{debug, warn};

use crate::core::{DepthSettings, ImageAsset, LightSettings};
use crate::generation::{GenerationRequest, build_depth_request, build_light_request};

pub const DEPTH_STATUS: &str = "Generating 3D depth map...";
pub const LIGHT_STATUS: &str = "Applying custom lighting...";
pub const DEPTH_FAILURE: &str = "Failed to generate depth map. Please try again.";
pub const LIGHT_FAILURE: &str = "Failed to apply lighting. Please try again.";

/// A generation operation that can be in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GeneratingDepth,
    ApplyingLight,
}

impl Operation {
    pub fn status_message(&self) -> &'static str {
        match self {
            Self::GeneratingDepth => DEPTH_STATUS,
            Self::ApplyingLight => LIGHT_STATUS,
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::GeneratingDepth => DEPTH_FAILURE,
            Self::ApplyingLight => LIGHT_FAILURE,
        }
    }
}

/// Identifies one started operation. Tickets are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// The single in-flight operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BusyState {
    operation: Operation,
    ticket: Ticket,
}

/// Derived state-machine position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Ready,
    Busy(Operation),
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Ready => "ready",
            Self::Busy(_) => "busy",
            Self::Error => "error",
        }
    }
}

/// Work captured at operation start. Later settings changes do not affect it.
#[derive(Debug, Clone)]
pub struct PendingOperation {
    pub operation: Operation,
    pub ticket: Ticket,
    pub request: GenerationRequest,
}

/// How a settle call was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Result stored
    Applied,
    /// Failure message surfaced
    Failed,
    /// Ticket no longer current; nothing changed
    Stale,
}

#[derive(Debug, Default)]
pub struct Session {
    original: Option<ImageAsset>,
    depth_map: Option<ImageAsset>,
    final_image: Option<ImageAsset>,
    depth_settings: DepthSettings,
    light_settings: LightSettings,
    busy: Option<BusyState>,
    error: Option<String>,
    next_ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original(&self) -> Option<&ImageAsset> {
        self.original.as_ref()
    }

    pub fn depth_map(&self) -> Option<&ImageAsset> {
        self.depth_map.as_ref()
    }

    pub fn final_image(&self) -> Option<&ImageAsset> {
        self.final_image.as_ref()
    }

    pub fn depth_settings(&self) -> &DepthSettings {
        &self.depth_settings
    }

    pub fn light_settings(&self) -> &LightSettings {
        &self.light_settings
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    pub fn status_message(&self) -> Option<&'static str> {
        self.busy.map(|busy| busy.operation.status_message())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> SessionStatus {
        if let Some(busy) = self.busy {
            SessionStatus::Busy(busy.operation)
        } else if self.error.is_some() {
            SessionStatus::Error
        } else if self.original.is_some() {
            SessionStatus::Ready
        } else {
            SessionStatus::Idle
        }
    }

    /// Whether a new generation may start right now.
    pub fn can_start(&self) -> bool {
        self.original.is_some() && self.busy.is_none()
    }

    /// Replaces the original image. Valid from any state; any in-flight
    /// operation becomes stale.
    pub fn upload(&mut self, image: ImageAsset) {
        if let Some(busy) = self.busy.take() {
            debug!("Upload supersedes in-flight {:?}", busy.operation);
        }
        debug!("Original image set ({}, {} bytes)", image.mime_type(), image.bytes().len());
        self.original = Some(image);
        self.depth_map = None;
        self.final_image = None;
        self.error = None;
    }

    pub fn set_depth_settings(&mut self, settings: DepthSettings) {
        self.depth_settings = settings.clamped();
    }

    pub fn set_light_settings(&mut self, settings: LightSettings) {
        self.light_settings = settings.clamped();
    }

    /// Starts depth generation, or returns `None` (no-op) when there is no
    /// original or another operation is in flight.
    pub fn begin_depth(&mut self) -> Option<PendingOperation> {
        self.begin_operation(Operation::GeneratingDepth)
    }

    /// Starts re-lighting with the current depth map if one exists.
    /// Same preconditions as [`Session::begin_depth`].
    pub fn begin_light(&mut self) -> Option<PendingOperation> {
        self.begin_operation(Operation::ApplyingLight)
    }

    pub fn begin_operation(&mut self, operation: Operation) -> Option<PendingOperation> {
        if let Some(busy) = self.busy {
            warn!("Ignoring {:?} while {:?} is in flight", operation, busy.operation);
            return None;
        }

        let original = self.original.as_ref()?;
        let request = match operation {
            Operation::GeneratingDepth => build_depth_request(original, &self.depth_settings),
            Operation::ApplyingLight => {
                build_light_request(original, &self.light_settings, self.depth_map.as_ref())
            }
        };

        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.busy = Some(BusyState { operation, ticket });
        self.error = None;
        if operation == Operation::GeneratingDepth {
            self.final_image = None;
        }
        debug!("Started {:?} ({:?})", operation, ticket);

        Some(PendingOperation {
            operation,
            ticket,
            request,
        })
    }

    fn take_busy(&mut self, ticket: Ticket) -> Option<Operation> {
        match self.busy {
            Some(busy) if busy.ticket == ticket => {
                self.busy = None;
                Some(busy.operation)
            }
            _ => None,
        }
    }

    /// Settles an operation. Results for a ticket that is no longer current
    /// (after an upload or reset) are discarded.
    pub fn settle<E>(&mut self, ticket: Ticket, result: Result<ImageAsset, E>) -> Settlement {
        let Some(operation) = self.take_busy(ticket) else {
            warn!("Discarding stale result for {:?}", ticket);
            return Settlement::Stale;
        };

        match (operation, result) {
            (Operation::GeneratingDepth, Ok(image)) => {
                self.depth_map = Some(image);
                Settlement::Applied
            }
            (Operation::ApplyingLight, Ok(image)) => {
                self.final_image = Some(image);
                Settlement::Applied
            }
            (operation, Err(_)) => {
                self.error = Some(operation.failure_message().to_string());
                Settlement::Failed
            }
        }
    }

    /// Ends an operation that finished without an outcome (its future was
    /// dropped). Surfaces the failure message if the ticket is still current.
    pub fn abandon(&mut self, ticket: Ticket) -> bool {
        match self.take_busy(ticket) {
            Some(operation) => {
                self.error = Some(operation.failure_message().to_string());
                true
            }
            None => false,
        }
    }

    /// Back to `Idle` with default settings. Any in-flight operation becomes stale.
    pub fn reset(&mut self) {
        let next_ticket = self.next_ticket;
        *self = Self {
            next_ticket,
            ..Self::default()
        };
        debug!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::GenerationError;

    fn jpeg() -> ImageAsset {
        ImageAsset::new("image/jpeg", vec![0xff, 0xd8, 0xff])
    }

    fn png(byte: u8) -> ImageAsset {
        ImageAsset::new("image/png", vec![byte])
    }

    fn failed() -> Result<ImageAsset, GenerationError> {
        Err(GenerationError::NoImage)
    }

    fn ready() -> Session {
        let mut session = Session::new();
        session.upload(jpeg());
        session
    }

    #[test]
    fn fresh_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.can_start());
    }

    #[test]
    fn upload_clears_derived_images_and_error() {
        let mut session = ready();
        let op = session.begin_depth().unwrap();
        session.settle(op.ticket, Ok::<_, GenerationError>(png(1)));
        let op = session.begin_light().unwrap();
        session.settle(op.ticket, failed());
        assert!(session.depth_map().is_some());
        assert!(session.error().is_some());

        session.upload(png(7));

        assert_eq!(session.original(), Some(&png(7)));
        assert!(session.depth_map().is_none());
        assert!(session.final_image().is_none());
        assert!(session.error().is_none());
        assert_eq!(session.status(), SessionStatus::Ready);
    }

    #[test]
    fn requests_without_original_are_no_ops() {
        let mut session = Session::new();
        assert!(session.begin_depth().is_none());
        assert!(session.begin_light().is_none());
        assert!(!session.is_busy());
        assert_eq!(session.status(), SessionStatus::Idle);
    }

    #[test]
    fn second_request_while_busy_is_rejected() {
        let mut session = ready();
        let first = session.begin_depth().unwrap();

        assert!(session.begin_light().is_none());
        assert!(session.begin_depth().is_none());
        assert_eq!(session.status(), SessionStatus::Busy(Operation::GeneratingDepth));
        assert_eq!(session.status_message(), Some(DEPTH_STATUS));
    }

    #[test]
    fn rejected_request_consumes_no_ticket() {
        let mut session = ready();
        let first = session.begin_depth().unwrap();
        assert!(session.begin_light().is_none());
        assert!(session.begin_light().is_none());
        session.settle(first.ticket, Ok::<_, GenerationError>(png(1)));

        let second = session.begin_light().unwrap();
        assert_eq!(second.ticket.0, first.ticket.0 + 1);
        assert_eq!(second.request.images, vec![jpeg(), png(1)]);
    }

    #[test]
    fn depth_start_clears_final_image_but_light_start_keeps_it() {
        let mut session = ready();
        let op = session.begin_light().unwrap();
        session.settle(op.ticket, Ok::<_, GenerationError>(png(2)));

        let op = session.begin_light().unwrap();
        assert_eq!(session.final_image(), Some(&png(2)));
        assert_eq!(session.status_message(), Some(LIGHT_STATUS));
        session.settle(op.ticket, Ok::<_, GenerationError>(png(3)));

        session.begin_depth().unwrap();
        assert!(session.final_image().is_none());
        assert_eq!(session.status_message(), Some(DEPTH_STATUS));
    }

    #[test]
    fn depth_failure_sets_fixed_message() {
        let mut session = ready();
        let op = session.begin_depth().unwrap();

        assert_eq!(session.settle(op.ticket, failed()), Settlement::Failed);
        assert_eq!(session.error(), Some(DEPTH_FAILURE));
        assert!(session.depth_map().is_none());
        assert!(!session.is_busy());
        assert_eq!(session.status(), SessionStatus::Error);
    }

    #[test]
    fn light_failure_keeps_previous_final_image() {
        let mut session = ready();
        let op = session.begin_light().unwrap();
        session.settle(op.ticket, Ok::<_, GenerationError>(png(4)));

        let op = session.begin_light().unwrap();
        session.settle(op.ticket, failed());

        assert_eq!(session.error(), Some(LIGHT_FAILURE));
        assert_eq!(session.final_image(), Some(&png(4)));
    }

    #[test]
    fn new_request_clears_previous_error() {
        let mut session = ready();
        let op = session.begin_depth().unwrap();
        session.settle(op.ticket, failed());

        session.begin_light().unwrap();
        assert!(session.error().is_none());
    }

    #[test]
    fn light_request_carries_depth_map_when_present() {
        let mut session = ready();
        assert_eq!(session.begin_light().unwrap().request.images.len(), 1);
        session.reset();
        session.upload(jpeg());

        let op = session.begin_depth().unwrap();
        session.settle(op.ticket, Ok::<_, GenerationError>(png(5)));
        let op = session.begin_light().unwrap();
        assert_eq!(op.request.images, vec![jpeg(), png(5)]);
    }

    #[test]
    fn settings_are_captured_at_start() {
        let mut session = ready();
        session.set_depth_settings(DepthSettings { offset: 10 });
        let op = session.begin_depth().unwrap();
        session.set_depth_settings(DepthSettings { offset: 90 });

        assert!(op.request.instruction.contains("offset: 10 ("));
        assert_eq!(session.depth_settings().offset, 90);
    }

    #[test]
    fn reset_restores_defaults_and_drops_in_flight_result() {
        let mut session = ready();
        session.set_light_settings(LightSettings {
            x: 90,
            ..LightSettings::default()
        });
        let op = session.begin_depth().unwrap();

        session.reset();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(*session.light_settings(), LightSettings::default());

        assert_eq!(session.settle(op.ticket, Ok::<_, GenerationError>(png(6))), Settlement::Stale);
        assert!(session.depth_map().is_none());
        assert!(!session.is_busy());
    }

    #[test]
    fn stale_result_does_not_touch_newer_operation() {
        let mut session = ready();
        let old = session.begin_depth().unwrap();
        session.upload(jpeg());
        let new = session.begin_depth().unwrap();
        assert_ne!(old.ticket, new.ticket);

        assert_eq!(session.settle(old.ticket, failed()), Settlement::Stale);
        assert!(session.is_busy());
        assert!(session.error().is_none());

        assert_eq!(session.settle(new.ticket, Ok::<_, GenerationError>(png(8))), Settlement::Applied);
        assert_eq!(session.depth_map(), Some(&png(8)));
    }

    #[test]
    fn settle_happens_once_per_ticket() {
        let mut session = ready();
        let op = session.begin_depth().unwrap();
        assert_eq!(session.settle(op.ticket, Ok::<_, GenerationError>(png(1))), Settlement::Applied);
        assert_eq!(session.settle(op.ticket, failed()), Settlement::Stale);
        assert!(session.error().is_none());
        assert!(!session.abandon(op.ticket));
    }

    #[test]
    fn abandon_surfaces_failure() {
        let mut session = ready();
        let op = session.begin_light().unwrap();
        assert!(session.abandon(op.ticket));
        assert_eq!(session.error(), Some(LIGHT_FAILURE));
        assert!(!session.is_busy());
    }
}
