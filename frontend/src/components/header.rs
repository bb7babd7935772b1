use yew::prelude::*;

/// Renders the application header
pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-microchip"></i> {" Rice Type Classifier"}</h1>
            <p class="subtitle">{"Upload an image of rice to identify its variety"}</p>
        </header>
    }
}
