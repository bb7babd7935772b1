mod api;
mod components;

use components::handlers;
use components::header::render_header;
use components::results::render_results;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_file::File as GlooFile;
use gloo_file::callbacks::FileReader;
use shared::{ClassifyResponse, IntakeError, WorkflowController};
use web_sys::DragEvent;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // Intake
    FileChosen(GlooFile),
    PreviewReady(u64, String),
    PreviewFailed(u64, String),
    ClearImage,

    // Classification
    Submit,
    Classified(u64, ClassifyResponse),
    ClassificationFailed(u64, IntakeError),

    // UI states
    SetDragging(bool),
    DismissError,

    // Input events
    HandleDrop(DragEvent),
}

// Main component
pub struct Model {
    pub controller: WorkflowController<GlooFile>,
    pub preview_reader: Option<FileReader>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            controller: WorkflowController::new(),
            preview_reader: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, ctx, file),
            Msg::PreviewReady(id, url) => handlers::handle_preview_ready(self, id, url),
            Msg::PreviewFailed(id, reason) => handlers::handle_preview_failed(self, id, reason),
            Msg::ClearImage => handlers::handle_clear_image(self),

            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::Classified(id, response) => handlers::handle_classified(self, id, response),
            Msg::ClassificationFailed(id, error) => {
                handlers::handle_classification_failed(self, id, error)
            }

            Msg::SetDragging(active) => {
                self.controller.intake_mut().set_drag_active(active);
                true
            }
            Msg::DismissError => {
                self.controller.intake_mut().dismiss_error();
                true
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_error_message(self, ctx) }
                    { render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Rice Type Classifier | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
