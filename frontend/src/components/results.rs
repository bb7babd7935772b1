use super::super::Model;
use shared::ResultView;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Some(completion) = model.controller.live_result() else {
        return html! {};
    };
    let view = ResultView::from_completion(completion);
    let colors = view.info.colors;

    let variety_style = format!(
        "background: linear-gradient(to right, {}, {});",
        colors.background_from, colors.background_to
    );
    let label_style = format!(
        "background: linear-gradient(to right, {}, {}); -webkit-background-clip: text; color: transparent;",
        colors.accent_from, colors.accent_to
    );

    html! {
        <div class="results-container">
            <div class="result-header">
                <i class="fa-solid fa-circle-check"></i>
                <h2>{"Classification Complete!"}</h2>
                <p>{"Your rice has been successfully identified"}</p>
            </div>

            <div class="result-grid">
                <div class="result-image">
                    <h3><i class="fa-solid fa-image"></i>{" Uploaded Image"}</h3>
                    {
                        match &view.preview_url {
                            Some(url) => html! { <img src={url.clone()} alt="Uploaded rice" /> },
                            None => html! { <div class="unavailable-preview"><p>{"Preview unavailable"}</p></div> },
                        }
                    }
                </div>

                <div class="result-details">
                    <div class="variety-card" style={variety_style}>
                        <span class="card-title"><i class="fa-solid fa-award"></i>{" Rice Type"}</span>
                        <h3 class="variety-name" style={label_style}>{ view.label.clone() }</h3>
                        <p class="variety-description">{ view.description() }</p>
                    </div>

                    <div class="confidence-meter">
                        <div class="meter-label">{"Confidence Score"}</div>
                        <div class={classes!("meter-value", view.tier.css_class())}>
                            { view.confidence.to_string() }
                        </div>
                        <div class="meter">
                            <div
                                class={classes!("meter-fill", view.tier.css_class())}
                                style={format!("width: {}", view.meter_width())}
                            ></div>
                        </div>
                        <div class="meter-footer">
                            <span>{"Accuracy Level"}</span>
                            <span class={classes!("band-label", view.tier.css_class())}>
                                { view.band.to_string() }
                            </span>
                        </div>
                    </div>
                </div>
            </div>

            <div class="classification-details">
                <h4>{"Classification Details"}</h4>
                <div class="detail-row">
                    <span class="detail-name">{"Processing Time:"}</span>
                    <span>{ format!(" {:.1} seconds", completion.processing_ms as f64 / 1000.0) }</span>
                </div>
                <div class="detail-row">
                    <span class="detail-name">{"Model Version:"}</span>
                    <span>{ format!(" {}", completion.model_version) }</span>
                </div>
            </div>
        </div>
    }
}
