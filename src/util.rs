// Logging setup and small display helpers.
use crate::model::DeltaRecord;

/// Routes `log` records to the browser console and panics to `console.error`.
/// Native builds (tests) have no logger installed.
pub fn init_logging() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        }));
    }
}

pub fn format_px(v: f64) -> String {
    let r = (v * 10.0).round() / 10.0;
    if r == 0.0 {
        // avoid "-0px"
        "0px".to_string()
    } else {
        format!("{}px", r)
    }
}

pub fn format_delta(d: &DeltaRecord) -> String {
    let zoom = match d.scale_percentage {
        100 => String::new(),
        p => format!(" ×{}%", p),
    };
    format!("Δ {}, {}{}", format_px(d.x), format_px(d.y), zoom)
}
