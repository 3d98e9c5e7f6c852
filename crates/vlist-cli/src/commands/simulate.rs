use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

use vlist_core::{AppConfig, ClientSize, Error, ListConfig, MoreInfo, ScrollConfig, Window};
use vlist_tui::scroll::{FrameQueue, ScrollConfigExt, ScrollEvent, ScrollToOptions, WheelInput};
use vlist_tui::{NavKey, VirtualList};

/// Upper bound on frames delivered while waiting for a scroll to settle
const MAX_SETTLE_FRAMES: usize = 100_000;

/// Scripted input session
///
/// ```toml
/// client_width = 800
/// client_height = 500
///
/// [list]
/// data_size = 100
/// item_size = 50
///
/// [[step]]
/// action = "wheel"
/// delta_y = 40
///
/// [[step]]
/// action = "advance"
/// ms = 1200
/// ```
#[derive(Debug, Deserialize)]
pub struct Script {
    /// Replaces the configured list options when present
    #[serde(default)]
    pub list: Option<ListConfig>,
    /// Replaces the configured scroll options when present
    #[serde(default)]
    pub scroll: Option<ScrollConfig>,
    #[serde(default = "default_client_width")]
    pub client_width: f64,
    #[serde(default = "default_client_height")]
    pub client_height: f64,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_client_width() -> f64 {
    1920.0
}

fn default_client_height() -> f64 {
    1080.0
}

impl Script {
    pub fn from_toml(content: &str) -> vlist_core::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// One scripted input, applied at the script clock
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    DragStart { x: f64, y: f64 },
    DragMove { x: f64, y: f64 },
    DragEnd,
    Wheel(WheelInput),
    Key { key: NavKey },
    Focus { index: usize },
    ScrollTo(ScrollToOptions),
    Stop,
    Resize { width: f64, height: f64 },
    DataSize { size: usize },
    /// Move the clock forward, delivering frames at the configured rate
    Advance { ms: f64 },
}

/// Scroll state after the last step
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalState {
    pub time: f64,
    pub scroll_left: f64,
    pub scroll_top: f64,
    pub window: Window,
    pub more_info: MoreInfo,
}

#[derive(Debug)]
pub struct Outcome {
    pub events: Vec<ScrollEvent>,
    pub final_state: FinalState,
}

/// Virtual list driven by a script clock
struct Simulation {
    list: VirtualList<FrameQueue>,
    events: mpsc::UnboundedReceiver<ScrollEvent>,
    now: f64,
    frame_interval: f64,
}

impl Simulation {
    fn new(config: &AppConfig, script: &Script) -> Self {
        let list_config = script.list.clone().unwrap_or_else(|| config.list.clone());
        let scroll_config = script.scroll.clone().unwrap_or_else(|| config.scroll.clone());
        let frame_interval = scroll_config.frame_interval();
        let (tx, events) = mpsc::unbounded_channel();
        let list = VirtualList::new(
            list_config,
            scroll_config,
            ClientSize::new(script.client_width, script.client_height),
            FrameQueue::new(),
        )
        .with_event_sender(tx);

        Self {
            list,
            events,
            now: 0.0,
            frame_interval,
        }
    }

    fn apply(&mut self, number: usize, step: &Step) -> vlist_core::Result<()> {
        debug!(step = number, now = self.now, ?step, "Applying step");
        let now = self.now;
        match *step {
            Step::DragStart { x, y } => self.list.coordinator_mut().drag_start(x, y, now),
            Step::DragMove { x, y } => self.list.coordinator_mut().drag_move(x, y, now),
            Step::DragEnd => self.list.coordinator_mut().drag_end(now),
            Step::Wheel(input) => {
                self.list.coordinator_mut().wheel(input, now);
            }
            Step::Key { key } => {
                self.list.on_key_down(key, now);
            }
            Step::Focus { index } => {
                let data_size = self.list.window_manager().data_size();
                if index >= data_size {
                    return Err(Error::Script(format!(
                        "step {number}: focus index {index} out of range ({data_size} items)"
                    )));
                }
                self.list.on_item_focus(index, now);
            }
            Step::ScrollTo(options) => {
                self.list.scroll_to(options, now);
            }
            Step::Stop => self.list.stop(),
            Step::Resize { width, height } => self.list.resize(ClientSize::new(width, height), now),
            Step::DataSize { size } => self.list.set_data_size(size, now),
            Step::Advance { ms } => {
                if !ms.is_finite() || ms < 0.0 {
                    return Err(Error::Script(format!("step {number}: invalid advance of {ms} ms")));
                }
                self.advance(ms);
            }
        }
        Ok(())
    }

    fn advance(&mut self, ms: f64) {
        let end = self.now + ms;
        while self.now + self.frame_interval <= end {
            self.now += self.frame_interval;
            self.list.run_frame(self.now);
        }
        self.now = end;
    }

    /// Deliver frames until no scroll is running
    fn settle(&mut self) {
        let mut frames = 0;
        while self.list.coordinator().needs_frame() && frames < MAX_SETTLE_FRAMES {
            self.now += self.frame_interval;
            self.list.run_frame(self.now);
            frames += 1;
        }
    }

    fn drain(&mut self, out: &mut Vec<ScrollEvent>) {
        while let Ok(event) = self.events.try_recv() {
            out.push(event);
        }
    }

    fn final_state(&self) -> FinalState {
        let position = self.list.coordinator().position();
        let wm = self.list.window_manager();
        FinalState {
            time: self.now,
            scroll_left: position.left,
            scroll_top: position.top,
            window: wm.window(),
            more_info: wm.more_info(),
        }
    }
}

/// Run every step, then let any running scroll finish
pub fn simulate(config: &AppConfig, script: &Script) -> vlist_core::Result<Outcome> {
    let mut sim = Simulation::new(config, script);
    let mut events = Vec::new();
    for (number, step) in script.steps.iter().enumerate() {
        sim.apply(number + 1, step)?;
        sim.drain(&mut events);
    }
    sim.settle();
    sim.drain(&mut events);

    Ok(Outcome {
        events,
        final_state: sim.final_state(),
    })
}

pub fn run(config: &AppConfig, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    let script = Script::from_toml(&content)?;
    info!(steps = script.steps.len(), "Running script");

    let outcome = simulate(config, &script)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for event in &outcome.events {
        writeln!(out, "{}", serde_json::to_string(event)?)?;
    }
    writeln!(
        out,
        "{}",
        serde_json::to_string(&serde_json::json!({ "final": outcome.final_state }))?
    )?;
    Ok(())
}
