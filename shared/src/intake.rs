//! Upload intake state machine and the controller that owns the live result.
//!
//! `F` is the platform file handle (a browser `File` in the frontend, plain
//! bytes in tests). Every state change goes through a method on [`Intake`].

use crate::validation::{validate_image_file, FileMeta, InvalidFileError};
use crate::{ClassificationResult, ClassifyResponse, ErrorResponse};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakePhase {
    Idle,
    ImageSelected,
    Submitting,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntakeError {
    #[error(transparent)]
    InvalidFile(#[from] InvalidFileError),
    #[error("A classification is already in progress.")]
    Busy,
    #[error("Could not preview {file_name}: {reason}")]
    Preview { file_name: String, reason: String },
    #[error("Classification failed: {message}")]
    Classification { message: String, retryable: bool },
}

impl IntakeError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, IntakeError::Classification { retryable: true, .. })
    }
}

impl From<ErrorResponse> for IntakeError {
    fn from(response: ErrorResponse) -> Self {
        IntakeError::Classification {
            message: response.error,
            retryable: response.retryable,
        }
    }
}

#[derive(Debug, Clone)]
struct SelectedImage<F> {
    id: u64,
    file: F,
    meta: FileMeta,
    preview: Option<String>,
    preview_failed: bool,
}

/// Handed out by [`Intake::begin_submit`]; the id ties the eventual outcome
/// back to the selection it was made for.
#[derive(Debug, Clone)]
pub struct Submission<F> {
    pub id: u64,
    pub file: F,
    pub meta: FileMeta,
}

/// Emitted once per successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub result: ClassificationResult,
    pub model_version: String,
    pub processing_ms: u64,
    pub preview: Option<String>,
}

/// Everything a user can observe about the intake form.
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeSnapshot {
    pub phase: IntakePhase,
    pub file_name: Option<String>,
    pub preview: Option<String>,
    pub preview_unavailable: bool,
    pub submit_visible: bool,
    pub submit_enabled: bool,
    pub drag_active: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct Intake<F> {
    selected: Option<SelectedImage<F>>,
    submitting: bool,
    drag_active: bool,
    error: Option<IntakeError>,
    next_id: u64,
}

impl<F> Default for Intake<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Intake<F> {
    pub fn new() -> Self {
        Self {
            selected: None,
            submitting: false,
            drag_active: false,
            error: None,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> IntakePhase {
        match (&self.selected, self.submitting, &self.error) {
            (None, _, _) => IntakePhase::Idle,
            (Some(_), true, _) => IntakePhase::Submitting,
            (Some(_), false, Some(IntakeError::Classification { .. })) => IntakePhase::Failed,
            (Some(_), false, _) => IntakePhase::ImageSelected,
        }
    }

    /// Validates and selects a file, replacing any previous selection.
    ///
    /// Returns the selection id the asynchronous preview must be attached
    /// under. A rejected file leaves the current selection untouched.
    pub fn select(&mut self, file: F, meta: FileMeta) -> Result<u64, IntakeError> {
        if self.submitting {
            self.error = Some(IntakeError::Busy);
            return Err(IntakeError::Busy);
        }
        if let Err(invalid) = validate_image_file(&meta) {
            let error = IntakeError::from(invalid);
            self.error = Some(error.clone());
            return Err(error);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.selected = Some(SelectedImage {
            id,
            file,
            meta,
            preview: None,
            preview_failed: false,
        });
        self.error = None;
        Ok(id)
    }

    /// Returns false when the selection the preview was derived for is gone.
    pub fn attach_preview(&mut self, id: u64, preview: String) -> bool {
        match self.selected.as_mut() {
            Some(selected) if selected.id == id => {
                selected.preview = Some(preview);
                true
            }
            _ => false,
        }
    }

    /// Records that the preview for selection `id` could not be derived. The
    /// file stays selected and can still be submitted.
    pub fn preview_failed(&mut self, id: u64, reason: String) -> bool {
        match self.selected.as_mut() {
            Some(selected) if selected.id == id => {
                selected.preview_failed = true;
                self.error = Some(IntakeError::Preview {
                    file_name: selected.meta.name.clone(),
                    reason,
                });
                true
            }
            _ => false,
        }
    }

    pub fn begin_submit(&mut self) -> Option<Submission<F>>
    where
        F: Clone,
    {
        if self.submitting {
            return None;
        }
        let selected = self.selected.as_ref()?;
        self.submitting = true;
        self.error = None;
        Some(Submission {
            id: selected.id,
            file: selected.file.clone(),
            meta: selected.meta.clone(),
        })
    }

    /// Finishes the submission `id`. Late outcomes for abandoned submissions
    /// yield `None`.
    pub fn complete(&mut self, id: u64, response: ClassifyResponse) -> Option<Completion> {
        let selected = self.in_flight(id)?;
        let preview = selected.preview.clone();
        self.submitting = false;
        self.error = None;
        Some(Completion {
            result: response.result,
            model_version: response.model_version,
            processing_ms: response.processing_ms,
            preview,
        })
    }

    pub fn fail(&mut self, id: u64, error: IntakeError) -> bool {
        if self.in_flight(id).is_none() {
            return false;
        }
        self.submitting = false;
        self.error = Some(error);
        true
    }

    fn in_flight(&self, id: u64) -> Option<&SelectedImage<F>> {
        if !self.submitting {
            return None;
        }
        self.selected.as_ref().filter(|selected| selected.id == id)
    }

    /// Drops the selection, its preview and any error. Abandons an in-flight
    /// submission.
    pub fn clear(&mut self) {
        self.selected = None;
        self.submitting = false;
        self.drag_active = false;
        self.error = None;
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn preview(&self) -> Option<&str> {
        self.selected.as_ref()?.preview.as_deref()
    }

    pub fn preview_unavailable(&self) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|selected| selected.preview_failed)
    }

    pub fn file_meta(&self) -> Option<&FileMeta> {
        self.selected.as_ref().map(|selected| &selected.meta)
    }

    pub fn error(&self) -> Option<&IntakeError> {
        self.error.as_ref()
    }

    pub fn submit_visible(&self) -> bool {
        self.selected.is_some()
    }

    pub fn submit_enabled(&self) -> bool {
        self.selected.is_some() && !self.submitting
    }

    pub fn snapshot(&self) -> IntakeSnapshot {
        IntakeSnapshot {
            phase: self.phase(),
            file_name: self.file_meta().map(|meta| meta.name.clone()),
            preview: self.preview().map(str::to_string),
            preview_unavailable: self.preview_unavailable(),
            submit_visible: self.submit_visible(),
            submit_enabled: self.submit_enabled(),
            drag_active: self.drag_active,
            error: self.error.as_ref().map(ToString::to_string),
        }
    }
}

/// Owns the intake form and the single live result.
#[derive(Debug)]
pub struct WorkflowController<F> {
    intake: Intake<F>,
    live: Option<Completion>,
}

impl<F> Default for WorkflowController<F> {
    fn default() -> Self {
        Self {
            intake: Intake::new(),
            live: None,
        }
    }
}

impl<F> WorkflowController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intake(&self) -> &Intake<F> {
        &self.intake
    }

    pub fn intake_mut(&mut self) -> &mut Intake<F> {
        &mut self.intake
    }

    pub fn live_result(&self) -> Option<&Completion> {
        self.live.as_ref()
    }

    pub fn shows_result(&self) -> bool {
        self.live.is_some()
    }

    /// Routes a Gateway success through the intake; a fresh completion
    /// replaces the live result.
    pub fn on_classified(&mut self, id: u64, response: ClassifyResponse) -> bool {
        match self.intake.complete(id, response) {
            Some(completion) => {
                self.live = Some(completion);
                true
            }
            None => false,
        }
    }

    pub fn on_failed(&mut self, id: u64, error: IntakeError) -> bool {
        self.intake.fail(id, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Confidence, ErrorKind};

    type Bytes = Vec<u8>;

    fn jpeg(name: &str) -> (Bytes, FileMeta) {
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let meta = FileMeta {
            name: name.into(),
            mime_type: "image/jpeg".into(),
            size: bytes.len() as u64,
        };
        (bytes, meta)
    }

    fn text_file() -> (Bytes, FileMeta) {
        let bytes = b"not an image".to_vec();
        let meta = FileMeta {
            name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            size: bytes.len() as u64,
        };
        (bytes, meta)
    }

    fn response(label: &str, confidence: u8) -> ClassifyResponse {
        ClassifyResponse {
            result: ClassificationResult {
                label: label.into(),
                confidence: Confidence::new(confidence).unwrap(),
            },
            model_version: "stub-1".into(),
            processing_ms: 1500,
            image_hash: None,
        }
    }

    #[test]
    fn rejected_files_never_select_or_preview() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = text_file();

        let err = intake.select(bytes, meta).unwrap_err();
        assert!(matches!(err, IntakeError::InvalidFile(InvalidFileError::UnsupportedType { .. })));
        assert_eq!(intake.phase(), IntakePhase::Idle);
        assert!(intake.preview().is_none());
        assert!(!intake.submit_visible());
        assert!(intake.begin_submit().is_none());
        assert!(intake.snapshot().error.unwrap().contains("notes.txt"));
    }

    #[test]
    fn rejected_file_keeps_previous_selection() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        let id = intake.select(bytes, meta).unwrap();
        assert!(intake.attach_preview(id, "data:image/jpeg;base64,AAAA".into()));

        let (bytes, meta) = text_file();
        assert!(intake.select(bytes, meta).is_err());
        assert_eq!(intake.phase(), IntakePhase::ImageSelected);
        assert_eq!(intake.file_meta().unwrap().name, "a.jpg");
        assert!(intake.preview().is_some());
    }

    #[test]
    fn select_then_clear_restores_initial_state() {
        let initial = Intake::<Bytes>::new().snapshot();
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        let id = intake.select(bytes, meta).unwrap();
        intake.attach_preview(id, "data:image/jpeg;base64,AAAA".into());
        intake.set_drag_active(true);

        intake.clear();
        assert_eq!(intake.snapshot(), initial);

        intake.clear();
        assert_eq!(intake.snapshot(), initial);
    }

    #[test]
    fn stale_preview_is_ignored() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        let first = intake.select(bytes, meta).unwrap();
        let (bytes, meta) = jpeg("b.jpg");
        let second = intake.select(bytes, meta).unwrap();

        assert!(!intake.attach_preview(first, "old".into()));
        assert!(intake.preview().is_none());
        assert!(intake.attach_preview(second, "new".into()));
        assert_eq!(intake.preview(), Some("new"));

        intake.clear();
        assert!(!intake.attach_preview(second, "late".into()));
    }

    #[test]
    fn preview_failure_is_visible_and_keeps_the_file() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        let id = intake.select(bytes, meta).unwrap();

        assert!(intake.preview_failed(id, "NotReadableError".into()));
        let snapshot = intake.snapshot();
        assert_eq!(snapshot.phase, IntakePhase::ImageSelected);
        assert!(snapshot.preview.is_none());
        assert!(snapshot.preview_unavailable);
        let error = snapshot.error.unwrap();
        assert!(error.contains("a.jpg") && error.contains("NotReadableError"));
        assert!(!intake.error().unwrap().is_retryable());
        assert!(intake.submit_enabled());

        let (bytes, meta) = jpeg("b.jpg");
        let second = intake.select(bytes, meta).unwrap();
        assert!(!intake.preview_failed(id, "late".into()));
        assert!(!intake.preview_unavailable());
        assert!(intake.error().is_none());

        intake.clear();
        assert!(!intake.preview_failed(second, "gone".into()));
        assert!(intake.error().is_none());
    }

    #[test]
    fn submission_is_serialized() {
        let mut intake = Intake::<Bytes>::new();
        assert!(intake.begin_submit().is_none());

        let (bytes, meta) = jpeg("a.jpg");
        intake.select(bytes, meta).unwrap();
        let submission = intake.begin_submit().unwrap();
        assert_eq!(intake.phase(), IntakePhase::Submitting);
        assert!(!intake.submit_enabled());
        assert!(intake.submit_visible());
        assert!(intake.begin_submit().is_none());

        let (bytes, meta) = jpeg("b.jpg");
        assert_eq!(intake.select(bytes, meta), Err(IntakeError::Busy));
        assert_eq!(intake.file_meta().unwrap().name, "a.jpg");
        assert_eq!(submission.meta.name, "a.jpg");
    }

    #[test]
    fn busy_selection_is_shown_until_the_submission_settles() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        intake.select(bytes, meta).unwrap();
        let submission = intake.begin_submit().unwrap();

        let (bytes, meta) = jpeg("b.jpg");
        assert!(intake.select(bytes, meta).is_err());
        assert_eq!(intake.error(), Some(&IntakeError::Busy));
        assert_eq!(intake.phase(), IntakePhase::Submitting);

        assert!(intake.complete(submission.id, response("Basmati", 88)).is_some());
        assert!(intake.error().is_none());
        assert_eq!(intake.phase(), IntakePhase::ImageSelected);
    }

    #[test]
    fn success_emits_completion_with_preview() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        let id = intake.select(bytes, meta).unwrap();
        intake.attach_preview(id, "data:preview".into());
        let submission = intake.begin_submit().unwrap();

        let completion = intake.complete(submission.id, response("Jasmine", 91)).unwrap();
        assert_eq!(completion.result.label, "Jasmine");
        assert_eq!(completion.preview.as_deref(), Some("data:preview"));
        assert_eq!(intake.phase(), IntakePhase::ImageSelected);
        assert!(intake.complete(submission.id, response("Jasmine", 91)).is_none());
    }

    #[test]
    fn failure_is_visible_and_retryable() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        intake.select(bytes, meta).unwrap();
        let submission = intake.begin_submit().unwrap();

        let error = IntakeError::from(ErrorResponse::new(
            ErrorKind::ClassificationFailure,
            "inference service unavailable",
        ));
        assert!(intake.fail(submission.id, error));
        assert_eq!(intake.phase(), IntakePhase::Failed);
        assert!(intake.error().unwrap().is_retryable());
        assert!(intake.submit_enabled());

        let retry = intake.begin_submit().unwrap();
        assert_eq!(retry.id, submission.id);
        assert!(intake.error().is_none());
        assert_eq!(intake.phase(), IntakePhase::Submitting);
    }

    #[test]
    fn clear_abandons_in_flight_submission() {
        let mut intake = Intake::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        intake.select(bytes, meta).unwrap();
        let submission = intake.begin_submit().unwrap();

        intake.clear();
        assert_eq!(intake.phase(), IntakePhase::Idle);
        assert!(intake.complete(submission.id, response("Arborio", 80)).is_none());
        assert!(!intake.fail(submission.id, IntakeError::Busy));
        assert!(intake.error().is_none());
    }

    #[test]
    fn controller_keeps_exactly_one_live_result() {
        let mut controller = WorkflowController::<Bytes>::new();
        assert!(!controller.shows_result());

        let (bytes, meta) = jpeg("a.jpg");
        controller.intake_mut().select(bytes, meta).unwrap();
        let first = controller.intake_mut().begin_submit().unwrap();
        assert!(controller.on_classified(first.id, response("Arborio", 80)));

        let second = controller.intake_mut().begin_submit().unwrap();
        assert_eq!(controller.live_result().unwrap().result.label, "Arborio");
        assert!(controller.on_classified(second.id, response("Ipsala", 97)));
        assert_eq!(controller.live_result().unwrap().result.label, "Ipsala");

        controller.intake_mut().clear();
        assert!(controller.shows_result());
        assert_eq!(controller.intake().phase(), IntakePhase::Idle);
    }

    #[test]
    fn failed_submission_keeps_previous_result() {
        let mut controller = WorkflowController::<Bytes>::new();
        let (bytes, meta) = jpeg("a.jpg");
        controller.intake_mut().select(bytes, meta).unwrap();
        let first = controller.intake_mut().begin_submit().unwrap();
        controller.on_classified(first.id, response("Basmati", 88));

        let second = controller.intake_mut().begin_submit().unwrap();
        let error = IntakeError::Classification {
            message: "timed out".into(),
            retryable: true,
        };
        assert!(controller.on_failed(second.id, error));
        assert_eq!(controller.live_result().unwrap().result.label, "Basmati");
    }
}
