//! Text UI adapter: renders the HUD projection as a terminal line.

use apartman_core::hud::{HudMeter, HudProjection};

const BAR_WIDTH: usize = 10;

/// "1. Gün - Sabah | İtibar [██████────] 60%"
pub fn render(hud: &HudProjection) -> String {
    let mut line = hud.clock_label.clone();
    for meter in &hud.meters {
        line.push_str(" | ");
        line.push_str(&render_meter(meter));
    }
    line
}

fn render_meter(meter: &HudMeter) -> String {
    let filled = (usize::from(meter.percent) * BAR_WIDTH + 50) / 100;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "{} [{}{}] {}%",
        meter.label,
        "█".repeat(filled),
        "─".repeat(BAR_WIDTH - filled),
        meter.percent
    )
}
