use wasm_bindgen::JsValue;
use web_sys::{Document, Element, FormData};

use convo_types::{ModelKind, ModelStatus, DEFAULT_LOAD_MESSAGE, DEFAULT_UPLOAD_MESSAGE};

use crate::dom;
use crate::http;

pub struct ModelDashboard {
    document: Document,
}

impl ModelDashboard {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            document: crate::document()?,
        })
    }

    pub async fn start(self) -> Result<(), JsValue> {
        self.setup_refresh_button()?;
        self.setup_upload_form()?;
        self.setup_load_button()?;

        let status_div = dom::get_element_by_id(&self.document, "status-result")?;
        fetch_status(self.document.clone(), status_div).await;
        Ok(())
    }

    fn setup_refresh_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "refresh-status")?;
        let status_div = dom::get_element_by_id(&self.document, "status-result")?;
        let document = self.document.clone();

        dom::add_click_listener(&button, move || {
            wasm_bindgen_futures::spawn_local(fetch_status(document.clone(), status_div.clone()));
        })
    }

    fn setup_upload_form(&self) -> Result<(), JsValue> {
        let form = dom::get_element_by_id(&self.document, "upload-form")?;
        let kind_select = dom::get_select_by_id(&self.document, "model-type")?;
        let file_input = dom::get_input_by_id(&self.document, "file")?;
        let result = dom::get_element_by_id(&self.document, "upload-result")?;

        dom::add_submit_listener(&form, move || {
            let kind = kind_select.value().parse::<ModelKind>().ok();
            let file = file_input.files().and_then(|files| files.get(0));
            let (Some(kind), Some(file)) = (kind, file) else {
                dom::alert("Select a model type and a file first.");
                return;
            };

            let form_data = match build_upload_form(kind, &file) {
                Ok(form_data) => form_data,
                Err(e) => {
                    log::error!("Failed to build upload form: {:?}", e);
                    return;
                }
            };

            result.set_text_content(Some("Uploading file..."));
            let result = result.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = match http::upload_model(form_data).await {
                    Ok(body) => format!("✅ {}", body.message_or(DEFAULT_UPLOAD_MESSAGE)),
                    Err(e) => format!("❌ {}", describe(&e)),
                };
                result.set_text_content(Some(&text));
            });
        })
    }

    fn setup_load_button(&self) -> Result<(), JsValue> {
        let button = dom::get_element_by_id(&self.document, "btn-load")?;
        let kind_select = dom::get_select_by_id(&self.document, "load-type")?;
        let result = dom::get_element_by_id(&self.document, "load-result")?;

        dom::add_click_listener(&button, move || {
            let Ok(kind) = kind_select.value().parse::<ModelKind>() else {
                dom::alert("Select a model type to load.");
                return;
            };

            result.set_text_content(Some(&format!("Loading model \"{}\"...", kind)));
            let result = result.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let text = match http::load_model(kind).await {
                    Ok(body) => format!("✅ {}", body.message_or(DEFAULT_LOAD_MESSAGE)),
                    Err(e) => format!("❌ {}", describe(&e)),
                };
                result.set_text_content(Some(&text));
            });
        })
    }
}

fn build_upload_form(kind: ModelKind, file: &web_sys::File) -> Result<FormData, JsValue> {
    let form_data = FormData::new()?;
    form_data.append_with_str("tipo", kind.as_str())?;
    form_data.append_with_blob_and_filename("file", file, &file.name())?;
    Ok(form_data)
}

fn describe(error: &JsValue) -> String {
    error
        .as_string()
        .unwrap_or_else(|| format!("{:?}", error))
}

async fn fetch_status(document: Document, status_div: Element) {
    status_div.set_text_content(Some("Checking status..."));

    let rendered = match http::model_status().await {
        Ok(status) => render_status(&document, &status_div, &status),
        Err(e) => {
            log::error!("Failed to fetch model status: {:?}", e);
            status_div.set_text_content(Some("❌ Could not fetch the model status."));
            Ok(())
        }
    };

    if let Err(e) = rendered {
        log::error!("Failed to render model status: {:?}", e);
    }
}

fn render_status(document: &Document, container: &Element, status: &ModelStatus) -> Result<(), JsValue> {
    dom::clear_element(container);
    let list = document.create_element("ul")?;

    for (label, loaded) in status.entries() {
        let item = document.create_element("li")?;
        item.append_child(&document.create_text_node(&format!("{}: ", label)))?;
        let state = if loaded { "✅ Loaded" } else { "❌ Not loaded" };
        item.append_child(&dom::create_text_element(document, "strong", "", state)?.into())?;
        list.append_child(&item)?;
    }

    container.append_child(&list)?;
    Ok(())
}
