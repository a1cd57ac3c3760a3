//! Browser download via a synthesized anchor element

use painting::{DownloadSink, ExportError};
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlAnchorElement};

/// Triggers a file download by clicking a temporary `<a download>` element
pub struct AnchorDownload {
    document: Document,
}

impl AnchorDownload {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn click(&self, filename: &str, data_url: &str) -> Result<(), JsValue> {
        let anchor = self
            .document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()?;
        anchor.set_href(data_url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none")?;

        let body = self
            .document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
        Ok(())
    }
}

impl DownloadSink for AnchorDownload {
    fn deliver(&mut self, filename: &str, data_url: &str) -> Result<(), ExportError> {
        self.click(filename, data_url)
            .map_err(|e| ExportError::Download(format!("{:?}", e)))
    }
}
