// Scripted sensor provider shared by the integration tests

use std::sync::Arc;

use parking_lot::Mutex;
use usagepin::core::system_monitor::HardwareMonitor;

#[derive(Debug, Clone)]
pub struct FakeState {
    pub cpu_usage: f32,
    pub gpu_names: Vec<String>,
    /// One reading per adapter
    pub gpu_usages: Vec<f32>,
    pub selected_gpu: usize,
    pub battery: Option<(f32, f32)>,
    pub battery_health: Option<f32>,
    pub updates: u32,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            cpu_usage: 0.0,
            gpu_names: vec!["Fake GPU 0".to_string()],
            gpu_usages: vec![0.0],
            selected_gpu: 0,
            battery: None,
            battery_health: None,
            updates: 0,
        }
    }
}

/// Monitor whose readings the test controls through `state`.
#[derive(Clone, Default)]
pub struct FakeMonitor {
    pub state: Arc<Mutex<FakeState>>,
}

impl FakeMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gpus(names: &[&str], usages: &[f32]) -> Self {
        let monitor = Self::new();
        {
            let mut state = monitor.state.lock();
            state.gpu_names = names.iter().map(|n| n.to_string()).collect();
            state.gpu_usages = usages.to_vec();
        }
        monitor
    }

    pub fn set_cpu(&self, usage: f32) {
        self.state.lock().cpu_usage = usage;
    }

    pub fn boxed(&self) -> Box<dyn HardwareMonitor> {
        Box::new(self.clone())
    }
}

impl HardwareMonitor for FakeMonitor {
    fn update_cpu(&mut self) {
        self.state.lock().updates += 1;
    }
    fn update_memory(&mut self) {}
    fn update_network(&mut self) {}
    fn update_battery(&mut self) {}
    fn update_current_gpu(&mut self) {}

    fn cpu_name(&self) -> String {
        "Fake CPU".to_string()
    }
    fn average_cpu_usage(&self) -> f32 {
        self.state.lock().cpu_usage
    }
    fn average_cpu_temperature(&self) -> Option<f32> {
        Some(45.0)
    }
    fn total_cpu_package_power(&self) -> f32 {
        0.0
    }

    fn current_gpu_usage(&self) -> f32 {
        let state = self.state.lock();
        state.gpu_usages.get(state.selected_gpu).copied().unwrap_or(0.0)
    }
    fn current_gpu_temperature(&self) -> Option<f32> {
        None
    }
    fn current_gpu_power(&self) -> f32 {
        0.0
    }
    fn current_gpu_name(&self) -> String {
        let state = self.state.lock();
        state
            .gpu_names
            .get(state.selected_gpu)
            .cloned()
            .unwrap_or_default()
    }
    fn gpu_names(&self) -> Vec<String> {
        self.state.lock().gpu_names.clone()
    }
    fn select_gpu(&mut self, index: usize) {
        let mut state = self.state.lock();
        if index < state.gpu_names.len() {
            state.selected_gpu = index;
        }
    }

    fn memory_information_text(&self) -> String {
        "8 GB / 16 GB".to_string()
    }
    fn network_upload_bytes_per_sec(&self) -> u64 {
        1024
    }
    fn network_download_bytes_per_sec(&self) -> u64 {
        4096
    }

    fn has_battery(&self) -> bool {
        self.state.lock().battery.is_some()
    }
    fn total_battery_percent(&self) -> Option<f32> {
        self.state.lock().battery.map(|(percent, _)| percent)
    }
    fn total_battery_charge_rate(&self) -> Option<f32> {
        self.state.lock().battery.map(|(_, rate)| rate)
    }
    fn average_battery_health_percent(&self) -> Option<f32> {
        self.state.lock().battery_health
    }
}
