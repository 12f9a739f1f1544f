use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::probes::{Probe, ProbeValue};
use crate::ui::{centered_x, clip, Canvas, Styles};

use super::super::state::App;
use super::status::chord_label;

const LOGO: [&str; 6] = [
    "███████╗██████╗ ███████╗ ██████╗████████╗██████╗ ███████╗",
    "██╔════╝██╔══██╗██╔════╝██╔════╝╚══██╔══╝██╔══██╗██╔════╝",
    "███████╗██████╔╝█████╗  ██║        ██║   ██████╔╝█████╗  ",
    "╚════██║██╔═══╝ ██╔══╝  ██║        ██║   ██╔══██╗██╔══╝  ",
    "███████║██║     ███████╗╚██████╗   ██║   ██║  ██║███████╗",
    "╚══════╝╚═╝     ╚══════╝ ╚═════╝   ╚═╝   ╚═╝  ╚═╝╚══════╝",
];

const DISK_ALERT: u8 = 90;
const CORE_WARN: u8 = 70;
const CORE_ALERT: u8 = 90;
const LABEL_COL: i32 = 2;
const VALUE_COL: i32 = 7;

pub(super) fn render_logo(app: &App, canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    canvas.draw_box(rect, "SPECTRE", styles.primary);
    let (x, y, w, h) = bounds(rect);
    for (i, line) in LOGO.iter().enumerate() {
        let row = y + 2 + i as i32;
        let lx = centered_x(rect, line);
        // The logo is all or nothing; a clipped one is unreadable.
        if lx > x && row < y + h - 1 {
            canvas.put(lx, row, &clip(line, (w - 2).max(0) as usize), styles.primary);
        }
    }

    let label = format!("Theme [{}]:", chord_label(&app.keymap.cycle_theme));
    let label_width = label.chars().count() as i32;
    canvas.put(x + LABEL_COL, y + h - 3, &label, styles.dim);
    canvas.put(
        x + LABEL_COL + label_width + 1,
        y + h - 3,
        &app.theme.name().to_uppercase(),
        styles.secondary,
    );
}

pub(super) fn render_stats(app: &mut App, canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    canvas.draw_box(rect, "SYSTEM", styles.primary);
    let thresholds = app.config.thresholds;

    let cpu = app.stats.get(Probe::CpuPercent, &mut app.events);
    let memory = app.stats.get(Probe::Memory, &mut app.events);
    let disk = app.stats.get(Probe::Disk, &mut app.events);
    let load = app.stats.get(Probe::LoadAverage, &mut app.events);
    let identity = app.stats.get(Probe::NetworkIdentity, &mut app.events);
    let throughput = app.stats.get(Probe::Throughput, &mut app.events);
    let ping = app.stats.get(Probe::Ping, &mut app.events);

    let level = |value: &ProbeValue, limit: u8| match value.percent() {
        Some(pct) if pct > limit => styles.alert,
        Some(_) => styles.primary,
        None => styles.dim,
    };
    let (ssid, ip) = match &identity {
        ProbeValue::Network { ssid, ip } => (ssid.clone(), ip.clone()),
        _ => ("N/A".to_string(), "N/A".to_string()),
    };
    let (down, up) = match &throughput {
        ProbeValue::Throughput { down, up } => (down.clone(), up.clone()),
        _ => ("N/A".to_string(), "N/A".to_string()),
    };
    let ping_style = match &ping {
        ProbeValue::Text(text) if text.ends_with("ms") => styles.primary,
        _ => styles.alert,
    };

    let rows: [(&str, String, Style); 11] = [
        ("USER", app.shell.user().to_string(), styles.secondary),
        ("HOST", app.shell.host().to_string(), styles.secondary),
        ("CPU", cpu.to_string(), level(&cpu, thresholds.cpu)),
        ("MEM", memory.to_string(), level(&memory, thresholds.memory)),
        ("DISK", disk.to_string(), level(&disk, DISK_ALERT)),
        ("LOAD", load.to_string(), styles.warn),
        ("SSID", ssid, styles.accent),
        ("IP", ip, styles.accent),
        ("DOWN", down, styles.secondary),
        ("UP", up, styles.secondary),
        ("PING", ping.to_string(), ping_style),
    ];
    let (x, y, w, h) = bounds(rect);
    for (i, (label, value, style)) in rows.iter().enumerate() {
        let row = y + 1 + i as i32;
        if row >= y + h - 1 {
            break;
        }
        draw_field(canvas, styles, x, row, w, label, value, *style);
    }
}

pub(super) fn render_monitor(app: &mut App, canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    canvas.draw_box(rect, "MONITOR", styles.primary);
    let mut read = |probe| app.stats.get(probe, &mut app.events);

    let ports = match read(Probe::OpenPorts) {
        ProbeValue::List(ports) => ports.into_iter().take(3).collect::<Vec<_>>().join(","),
        other => other.to_string(),
    };
    let rows = [
        ("TEMP", read(Probe::CpuTemperature).to_string()),
        ("GPU", read(Probe::Gpu).to_string()),
        ("BAT", read(Probe::Battery).to_string()),
        ("CONN", read(Probe::Connections).to_string()),
        ("PORT", ports),
        ("I/O", read(Probe::DiskIo).to_string()),
    ];
    let cores = match read(Probe::PerCoreCpu) {
        ProbeValue::Cores(cores) => cores,
        _ => Vec::new(),
    };

    let (x, y, w, h) = bounds(rect);
    let mut row = y + 1;
    for (label, value) in &rows {
        if row >= y + h - 1 {
            return;
        }
        draw_field(canvas, styles, x, row, w, label, value, styles.secondary);
        row += 1;
    }
    if row >= y + h - 1 {
        return;
    }
    canvas.put(x + LABEL_COL, row, "CORE:", styles.dim);
    row += 1;

    let bar_width = (w - 8).max(0) as usize;
    for (i, usage) in cores.iter().enumerate() {
        if row >= y + h - 1 {
            break;
        }
        let filled = usize::from(*usage).min(100) * bar_width / 100;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(bar_width - filled));
        let style = if *usage < CORE_WARN {
            styles.primary
        } else if *usage < CORE_ALERT {
            styles.warn
        } else {
            styles.alert
        };
        canvas.put(x + 3, row, &format!("{i}:"), styles.dim);
        canvas.put(x + 5, row, &bar, style);
        row += 1;
    }
}

pub(super) fn render_clock(canvas: &mut Canvas, styles: &Styles, rect: Rect) {
    canvas.draw_box(rect, "TIME", styles.primary);
    let now = Local::now();
    let (_, y, _, h) = bounds(rect);
    let row = y + h / 2 - 1;
    let lines = [
        (now.format("%H:%M:%S").to_string(), styles.primary),
        (now.format("%Y-%m-%d").to_string(), styles.secondary),
        (now.format("%A").to_string(), styles.dim),
    ];
    for (i, (text, style)) in lines.iter().enumerate() {
        canvas.put(centered_x(rect, text), row + i as i32, text, *style);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_field(
    canvas: &mut Canvas,
    styles: &Styles,
    x: i32,
    row: i32,
    w: i32,
    label: &str,
    value: &str,
    style: Style,
) {
    canvas.put(x + LABEL_COL, row, &format!("{label}:"), styles.dim);
    canvas.put(x + VALUE_COL, row, &clip(value, (w - 9).max(0) as usize), style);
}

pub(super) fn bounds(rect: Rect) -> (i32, i32, i32, i32) {
    (
        i32::from(rect.x),
        i32::from(rect.y),
        i32::from(rect.width),
        i32::from(rect.height),
    )
}
