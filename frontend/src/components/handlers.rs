use super::super::{Model, Msg};
use super::utils::{first_image_candidate, reset_file_input};
use crate::api::classify_image;
use gloo_file::File as GlooFile;
use gloo_file::callbacks::read_as_data_url;
use shared::{ClassifyResponse, FileMeta, IntakeError};
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

fn file_meta(file: &GlooFile) -> FileMeta {
    FileMeta {
        name: file.name(),
        mime_type: file.raw_mime_type(),
        size: file.size(),
    }
}

pub fn handle_file_chosen(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let meta = file_meta(&file);
    match model.controller.intake_mut().select(file.clone(), meta) {
        Ok(selection_id) => {
            let link = ctx.link().clone();
            let reader = read_as_data_url(&file, move |result| match result {
                Ok(data_url) => link.send_message(Msg::PreviewReady(selection_id, data_url)),
                Err(e) => link.send_message(Msg::PreviewFailed(selection_id, e.to_string())),
            });
            model.preview_reader = Some(reader);
        }
        Err(IntakeError::Busy) => {
            log::warn!("Ignoring {} while a classification is running", file.name());
            reset_file_input();
        }
        Err(e) => {
            log::warn!("Rejected file: {}", e);
            // Same file must fire `onchange` again once the banner is dismissed.
            reset_file_input();
        }
    }
    true
}

pub fn handle_preview_ready(model: &mut Model, id: u64, data_url: String) -> bool {
    model.preview_reader = None;
    model.controller.intake_mut().attach_preview(id, data_url)
}

pub fn handle_preview_failed(model: &mut Model, id: u64, reason: String) -> bool {
    model.preview_reader = None;
    log::error!("Could not read preview for selection {}: {}", id, reason);
    model.controller.intake_mut().preview_failed(id, reason)
}

pub fn handle_clear_image(model: &mut Model) -> bool {
    model.preview_reader = None;
    model.controller.intake_mut().clear();
    reset_file_input();
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    event.stop_propagation();
    model.controller.intake_mut().set_drag_active(false);

    let dropped = event
        .data_transfer()
        .and_then(|data_transfer| data_transfer.files())
        .and_then(|file_list| first_image_candidate(&file_list));

    match dropped {
        Some(file) => handle_file_chosen(model, ctx, file),
        None => true,
    }
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(submission) = model.controller.intake_mut().begin_submit() else {
        return false;
    };

    let link = ctx.link().clone();
    spawn_local(async move {
        match classify_image(&submission.file).await {
            Ok(response) => link.send_message(Msg::Classified(submission.id, response)),
            Err(error) => link.send_message(Msg::ClassificationFailed(submission.id, error)),
        }
    });
    true
}

pub fn handle_classified(model: &mut Model, id: u64, response: ClassifyResponse) -> bool {
    log::info!(
        "Classified as {} with {} confidence",
        response.result.label,
        response.result.confidence
    );
    model.controller.on_classified(id, response)
}

pub fn handle_classification_failed(model: &mut Model, id: u64, error: IntakeError) -> bool {
    log::error!("Classification error: {}", error);
    model.controller.on_failed(id, error)
}
