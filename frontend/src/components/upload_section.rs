use super::super::{Model, Msg};
use super::utils::{debounce, first_image_candidate, open_file_picker, FILE_INPUT_ID};
use shared::validation::ACCEPTED_MIME_TYPES;
use shared::{IntakePhase, IntakeSnapshot};
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_upload_section(model: &Model, ctx: &Context<Model>) -> Html {
    let snapshot = model.controller.intake().snapshot();
    html! {
        <div class="upload-section">
            { render_file_input_area(&snapshot, ctx) }
            {
                if snapshot.submit_visible {
                    render_submit_button(&snapshot, ctx)
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn render_clear_button(ctx: &Context<Model>) -> Html {
    html! {
        <button
            type="button"
            class="remove-btn"
            title="Remove this image"
            onclick={ctx.link().callback(|e: MouseEvent| {
                e.stop_propagation();
                Msg::ClearImage
            })}
        >
            <i class="fa-solid fa-times"></i>
        </button>
    }
}

fn render_file_input_area(snapshot: &IntakeSnapshot, ctx: &Context<Model>) -> Html {
    let busy = snapshot.phase == IntakePhase::Submitting;
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input
            .files()
            .as_ref()
            .and_then(first_image_candidate)
            .map(Msg::FileChosen)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);

    html! {
        <>
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept={ACCEPTED_MIME_TYPES.join(",")}
                style="display: none;"
                disabled={busy}
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", snapshot.drag_active.then_some("drag-over"))}
                ondragenter={handle_drag_over.clone()}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
            >
                {
                    if let Some(preview) = &snapshot.preview {
                        html! {
                            <div class="preview-wrapper">
                                <img id="image-preview" src={preview.clone()} alt="Preview" />
                                { render_clear_button(ctx) }
                            </div>
                        }
                    } else if let Some(file_name) = &snapshot.file_name {
                        html! {
                            <div class="preview-placeholder">
                                {
                                    if snapshot.preview_unavailable {
                                        html! {
                                            <>
                                                <i class="fa-solid fa-file-image"></i>
                                                <p>{ format!("Preview unavailable for {}", file_name) }</p>
                                            </>
                                        }
                                    } else {
                                        html! {
                                            <>
                                                <i class="fa-solid fa-spinner fa-spin"></i>
                                                <p>{ format!("Loading preview of {}...", file_name) }</p>
                                            </>
                                        }
                                    }
                                }
                                { render_clear_button(ctx) }
                            </div>
                        }
                    } else {
                        html! {
                            <div
                                class="upload-placeholder"
                                onclick={debounce(300, open_file_picker)}
                            >
                                <i class="fa-solid fa-cloud-arrow-up"></i>
                                <p class="upload-title">{"Upload Rice Image"}</p>
                                <p>{"Drag and drop your image here, or click to browse"}</p>
                                <p class="file-types">{"Supports JPG, PNG, GIF, WEBP up to 10MB"}</p>
                            </div>
                        }
                    }
                }
            </div>
        </>
    }
}

fn render_submit_button(snapshot: &IntakeSnapshot, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <button
            id="classify-btn"
            class="analyze-btn"
            disabled={!snapshot.submit_enabled}
            onclick={debounce(300, move || link.send_message(Msg::Submit))}
        >
            {
                if snapshot.phase == IntakePhase::Submitting {
                    html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Classifying Rice..."}</> }
                } else {
                    html! { <><i class="fa-solid fa-camera"></i>{" Classify Rice Type"}</> }
                }
            }
        </button>
    }
}
