//! Browser host: LocalStorage and Blob downloads

use anyhow::{Context, anyhow};
use chrono::{DateTime, Local};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use super::{Host, with_release};

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

#[derive(Debug, Default)]
pub struct BrowserHost;

impl Host for BrowserHost {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn store(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        let storage = web_sys::window()
            .context("no window")?
            .local_storage()
            .map_err(js_err)?
            .context("LocalStorage unavailable")?;
        storage.set_item(key, value).map_err(js_err)
    }

    fn download(&mut self, filename: &str, mime: &str, contents: &str) -> anyhow::Result<()> {
        let document = web_sys::window()
            .context("no window")?
            .document()
            .context("no document")?;
        let body = document.body().context("no body")?;

        let parts = js_sys::Array::of1(&JsValue::from_str(contents));
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        // Revoke the object URL even when the anchor click fails
        with_release(
            || {
                let anchor: HtmlAnchorElement = document
                    .create_element("a")
                    .map_err(js_err)?
                    .dyn_into()
                    .map_err(|_| anyhow!("created element is not an anchor"))?;
                anchor.set_href(&url);
                anchor.set_download(filename);

                body.append_child(&anchor).map_err(js_err)?;
                anchor.click();
                body.remove_child(&anchor).map_err(js_err)?;
                Ok(())
            },
            || Url::revoke_object_url(&url).map_err(js_err),
        )?;

        log::info!("Downloaded {}", filename);
        Ok(())
    }
}
