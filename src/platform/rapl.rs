//! CPU package power from the Linux RAPL powercap counters.
//!
//! `energy_uj` is a cumulative microjoule counter; power is the delta between
//! two refreshes over the elapsed time. Reading it may need extra permissions,
//! in which case the meter simply reports nothing.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Package counters, in preference order
#[cfg(target_os = "linux")]
const PACKAGE_ENERGY_PATHS: &[&str] = &[
    "/sys/class/powercap/intel-rapl/intel-rapl:0/energy_uj",
    "/sys/class/powercap/intel-rapl:0/energy_uj",
];

/// Deltas over longer gaps are stale
const MAX_SAMPLE_GAP_SECS: f64 = 10.0;
const MAX_PLAUSIBLE_WATTS: f64 = 500.0;

#[derive(Debug, Default)]
pub struct RaplMeter {
    path: Option<PathBuf>,
    previous: Option<(f64, Instant)>,
    watts: Option<f32>,
}

impl RaplMeter {
    /// Meter on the first readable package counter, or an inert one.
    pub fn detect() -> Self {
        #[cfg(target_os = "linux")]
        {
            let path = PACKAGE_ENERGY_PATHS
                .iter()
                .map(Path::new)
                .find(|p| fs::read_to_string(p).is_ok())
                .map(Path::to_path_buf);
            if let Some(path) = &path {
                log::debug!("Reading CPU package power from {:?}", path);
            }
            Self::with_path(path)
        }
        #[cfg(not(target_os = "linux"))]
        {
            Self::with_path(None)
        }
    }

    pub fn with_path(path: Option<PathBuf>) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn is_available(&self) -> bool {
        self.path.is_some()
    }

    pub fn refresh(&mut self) {
        let Some(path) = &self.path else {
            return;
        };
        match read_energy(path) {
            Some(energy_uj) => {
                self.sample_at(energy_uj, Instant::now());
            }
            None => self.watts = None,
        }
    }

    /// Feed one counter reading. Returns the power over the interval since
    /// the previous reading, if that interval is usable.
    pub fn sample_at(&mut self, energy_uj: f64, now: Instant) -> Option<f32> {
        let watts = self.previous.and_then(|(prev_energy, prev_time)| {
            let secs = now.checked_duration_since(prev_time)?.as_secs_f64();
            // A shrinking counter has wrapped; skip that interval
            if secs <= 0.0 || secs > MAX_SAMPLE_GAP_SECS || energy_uj < prev_energy {
                return None;
            }
            let watts = (energy_uj - prev_energy) / secs / 1_000_000.0;
            (watts <= MAX_PLAUSIBLE_WATTS).then_some(watts as f32)
        });

        self.previous = Some((energy_uj, now));
        // Keep the last good value across a skipped interval
        if watts.is_some() {
            self.watts = watts;
        }
        watts
    }

    pub fn watts(&self) -> Option<f32> {
        self.watts
    }
}

fn read_energy(path: &Path) -> Option<f64> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}
