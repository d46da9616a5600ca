// MiniBrowser Dark Mode Injection
// Forces a dark rendering of arbitrary pages by injecting an invert-filter
// stylesheet. Both scripts are idempotent: enabling checks for the marker
// element before inserting, disabling removes it only if present, so
// re-applying on every load finish is safe.

use crate::engine::RenderEngine;

/// Id of the injected style element; doubles as the idempotence marker.
pub const DARK_MODE_MARKER: &str = "__minibrowser_dark__";

pub const ENABLE_SCRIPT: &str = r#"(function () {
    if (document.getElementById('__minibrowser_dark__')) { return; }
    var style = document.createElement('style');
    style.id = '__minibrowser_dark__';
    style.textContent = 'html { filter: invert(1) hue-rotate(180deg); background: #121212; } ' +
        'img, picture, video, canvas, iframe { filter: invert(1) hue-rotate(180deg); }';
    document.documentElement.appendChild(style);
})();"#;

pub const DISABLE_SCRIPT: &str = r#"(function () {
    var style = document.getElementById('__minibrowser_dark__');
    if (style) { style.remove(); }
})();"#;

/// Applies or removes the dark-mode stylesheet on the given engine.
///
/// The flag is passed in at call time rather than read from ambient state,
/// so the same injection path runs identically with or without a live UI.
pub fn apply(engine: &mut dyn RenderEngine, enabled: bool) {
    if enabled {
        engine.run_script(ENABLE_SCRIPT);
    } else {
        engine.run_script(DISABLE_SCRIPT);
    }
}
