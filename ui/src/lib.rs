//! Browser glue for the check table page.
//!
//! The page markup lives in `public/index.html`; this crate finds its
//! elements, draws the view kept by [`checktable_business::TableSession`] and
//! routes DOM events back into it. Build with
//! `wasm-pack build ui --target web --out-dir ../public/pkg`.

use checktable_business::Status;

#[cfg(target_arch = "wasm32")]
mod logger;
#[cfg(target_arch = "wasm32")]
mod web;

/// Base class of the status element.
pub const STATUS_CLASS: &str = "status";

/// Full `class` attribute of the status element for `status`.
pub fn status_class_name(status: &Status) -> String {
    match status.css_class() {
        Some(modifier) => format!("{STATUS_CLASS} {modifier}"),
        None => STATUS_CLASS.to_owned(),
    }
}
