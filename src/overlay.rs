use web_sys as web;

const OVERLAY_ID: &str = "portfolio-overlay";

/// Make the portfolio overlay visible and interactive.
#[inline]
pub fn reveal(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without the CSS class
        _ = el.set_attribute("style", "");
        _ = el.set_attribute("aria-hidden", "false");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
        _ = el.set_attribute("aria-hidden", "true");
    }
}
