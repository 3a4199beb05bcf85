use std::collections::VecDeque;

use serde::Serialize;

use crate::core::usage::clamp_usage;

pub const DEFAULT_HISTORY_SIZE: usize = 60;

/// One periodic reading of a utilization percentage
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageSample {
    /// Clamped to 0-100
    pub value: u8,
    pub temperature_celsius: Option<f32>,
    pub power_watts: Option<f32>,
    pub timestamp: i64,
}

impl UsageSample {
    pub fn new(usage: f32) -> Self {
        Self {
            value: clamp_usage(usage) as u8,
            temperature_celsius: None,
            power_watts: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn with_temperature(mut self, celsius: Option<f32>) -> Self {
        self.temperature_celsius = celsius;
        self
    }

    /// Zero means "unknown" for power sensors, so it is stored as `None`.
    pub fn with_power(mut self, watts: f32) -> Self {
        self.power_watts = (watts != 0.0).then_some(watts);
        self
    }
}

/// Circular buffer of usage samples (for the report chart)
#[derive(Debug, Clone)]
pub struct UsageHistory {
    capacity: usize,
    samples: VecDeque<UsageSample>,
}

impl UsageHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, sample: UsageSample) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn push_usage(&mut self, usage: f32) {
        self.push(UsageSample::new(usage));
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&UsageSample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UsageSample> {
        self.samples.iter()
    }

    /// Values as u64 for sparkline-style widgets
    pub fn values_as_u64(&self) -> Vec<u64> {
        self.samples.iter().map(|s| s.value as u64).collect()
    }

    /// (x, y) points right-aligned to the capacity, so a partially filled
    /// history grows in from the right edge of the chart.
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        let offset = self.capacity - self.samples.len();
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| ((offset + i) as f64, s.value as f64))
            .collect()
    }
}

impl Default for UsageHistory {
    fn default() -> Self {
        Self::new()
    }
}
