use std::path::Path;

use ratatui::layout::Rect;

use crate::config::Config;
use crate::probes::{Probe, ProbeSource, ProbeValue};
use crate::shell::{DisplaySurface, ShellSession};
use crate::state::PersistedState;

use super::state::App;

/// Fixed readings so frames are deterministic.
pub(super) struct StaticProbes;

impl ProbeSource for StaticProbes {
    fn read(&mut self, probe: Probe) -> ProbeValue {
        match probe {
            Probe::CpuPercent => ProbeValue::Percent(12),
            Probe::Memory => ProbeValue::Usage {
                summary: "3.1G/15.5G".to_string(),
                percent: 20,
            },
            Probe::NetworkIdentity => ProbeValue::Network {
                ssid: "lab".to_string(),
                ip: "10.0.0.7".to_string(),
            },
            Probe::Ping => ProbeValue::Text("13.4ms".to_string()),
            Probe::OpenPorts => ProbeValue::List(vec![
                "22".to_string(),
                "80".to_string(),
                "443".to_string(),
                "8080".to_string(),
            ]),
            Probe::PerCoreCpu => ProbeValue::Cores(vec![10, 75, 95]),
            _ => ProbeValue::Unavailable,
        }
    }
}

#[derive(Default)]
pub(super) struct NullSurface {
    pub(super) released: usize,
}

impl DisplaySurface for NullSurface {
    fn release(&mut self) -> std::io::Result<()> {
        self.released += 1;
        Ok(())
    }

    fn reacquire(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub(super) fn app_in(dir: &Path, area: Rect) -> App {
    let config = Config::default();
    let shell = ShellSession::with_identity(
        config.shell.clone(),
        dir.to_path_buf(),
        dir.to_path_buf(),
        "ghost".to_string(),
        "box".to_string(),
    );
    let persisted = PersistedState {
        theme: 0,
        path: dir.to_path_buf(),
    };
    App::from_parts(config, persisted, shell, Box::new(StaticProbes), area)
}
