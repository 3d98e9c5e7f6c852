use anyhow::Result;
use serde::Serialize;

use vlist_core::{
    AppConfig, ClientSize, Metrics, MoreInfo, ScrollBounds, Threshold, Window, WindowManager,
};

/// Layout snapshot of a freshly mounted list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    pub data_size: usize,
    pub metrics: Metrics,
    pub threshold: Threshold,
    pub bounds: ScrollBounds,
    pub window: Window,
    pub more_info: MoreInfo,
}

impl MetricsReport {
    pub fn new(config: &AppConfig, data_size: Option<i64>, measured: ClientSize) -> Self {
        let mut list = config.list.clone();
        if let Some(size) = data_size {
            list.data_size = size;
        }
        let wm = WindowManager::new(&list, measured);
        Self {
            data_size: wm.data_size(),
            metrics: *wm.metrics(),
            threshold: *wm.threshold(),
            bounds: wm.scroll_bounds(),
            window: wm.window(),
            more_info: wm.more_info(),
        }
    }
}

pub fn run(config: &AppConfig, data_size: Option<i64>, width: f64, height: f64) -> Result<()> {
    let report = MetricsReport::new(config, data_size, ClientSize::new(width, height));
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
