use super::super::{Model, Msg};
use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{FileList, HtmlInputElement};
use yew::prelude::*;

pub const FILE_INPUT_ID: &str = "file-input";

// Debounce function to limit button events
pub fn debounce<F>(duration: i32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));
    let timeout_clone = Rc::clone(&timeout);

    Callback::from(move |_| {
        let mut timeout_ref = timeout_clone.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        let new_timeout = Timeout::new(duration as u32, move || {
            inner_callback();
        });

        *timeout_ref = Some(new_timeout);
    })
}

/// Only the first file counts; validation happens in the intake.
pub fn first_image_candidate(file_list: &FileList) -> Option<GlooFile> {
    file_list.item(0).map(GlooFile::from)
}

fn file_input() -> Option<HtmlInputElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(FILE_INPUT_ID)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

pub fn open_file_picker() {
    if let Some(input) = file_input() {
        input.click();
    }
}

pub fn reset_file_input() {
    if let Some(input) = file_input() {
        input.set_value("");
    }
}

pub fn render_error_message(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(error) = model.controller.intake().error() else {
        return html! {};
    };
    let link = ctx.link();

    html! {
        <div class="error-message">
            <i class="fa-solid fa-circle-exclamation"></i>
            <p>{ error.to_string() }</p>
            {
                if error.is_retryable() {
                    html! {
                        <button class="retry-btn" onclick={link.callback(|_| Msg::Submit)}>
                            <i class="fa-solid fa-rotate-right"></i>{" Try again"}
                        </button>
                    }
                } else {
                    html! {}
                }
            }
            <button class="dismiss-btn" title="Dismiss" onclick={link.callback(|_| Msg::DismissError)}>
                <i class="fa-solid fa-times"></i>
            </button>
        </div>
    }
}
