use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Required element #{id} not found")]
    MissingElement { id: String },
    #[error("Platform does not support {0}")]
    Unsupported(&'static str),
    #[error("Browser call failed: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for PageError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        PageError::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PageError> for wasm_bindgen::JsValue {
    fn from(err: PageError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
