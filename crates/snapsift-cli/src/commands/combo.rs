use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use serde::Serialize;
use snapsift_core::{
    ComboConfig, ComboEvent, ComboState, ComboTracker, LevelClassifier, SortSession,
};

#[derive(Subcommand)]
pub enum ComboAction {
    /// Replay a timeline of sort actions against a fresh tracker
    Simulate {
        /// Action offset in milliseconds from the start of the run
        /// (repeatable; a backwards step demonstrates the clock-skew restart)
        #[arg(long = "at", value_name = "MS", required = true)]
        at: Vec<u64>,
        /// Override the decay window in milliseconds
        #[arg(long)]
        window_ms: Option<u64>,
    },
    /// Show the heat level for a streak count
    Classify {
        /// Streak count to classify
        count: u32,
    },
    /// Run a live session; every stdin line counts one sort action
    Live {
        /// Override the decay window in milliseconds
        #[arg(long)]
        window_ms: Option<u64>,
    },
}

/// One simulated action and what it did to the meter.
#[derive(Debug, Serialize)]
struct SimulatedStep {
    offset_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<ComboEvent>,
    state: ComboState,
}

pub fn run(action: ComboAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ComboAction::Simulate { at, window_ms } => {
            let mut config = ComboConfig::load_or_default();
            if let Some(ms) = window_ms {
                config.decay_window_ms = ms;
            }
            let steps = simulate_steps(&config, &at, Utc::now())?;
            for step in &steps {
                println!("{}", serde_json::to_string(step)?);
            }
        }
        ComboAction::Classify { count } => {
            let config = ComboConfig::load_or_default();
            let classifier = LevelClassifier::new(config.thresholds.clone())?;
            println!("{}", classifier.classify(count));
        }
        ComboAction::Live { window_ms } => {
            let mut config = ComboConfig::load_or_default();
            if let Some(ms) = window_ms {
                config.decay_window_ms = ms;
            }
            config.validate()?;
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(live(config))?;
        }
    }
    Ok(())
}

/// Replay a timeline of offsets through a tracker.
///
/// Offsets are taken as given, not sorted: feeding a smaller offset after a
/// larger one exercises the same restart path a backwards wall clock would.
/// An offset that pushes the action instant past the representable time
/// range is rejected.
fn simulate_steps(
    config: &ComboConfig,
    offsets: &[u64],
    start: DateTime<Utc>,
) -> Result<Vec<SimulatedStep>, Box<dyn std::error::Error>> {
    let mut tracker = ComboTracker::new(config)?;
    let mut steps = Vec::with_capacity(offsets.len());
    let mut prev = tracker.state();
    for &offset in offsets {
        let now = i64::try_from(offset)
            .ok()
            .and_then(|ms| start.checked_add_signed(Duration::milliseconds(ms)))
            .ok_or_else(|| format!("action offset {offset} ms is out of range"))?;
        let next = tracker.record_action(now);
        steps.push(SimulatedStep {
            offset_ms: offset,
            event: ComboEvent::from_transition(&prev, &next),
            state: next.clone(),
        });
        prev = next;
    }
    Ok(steps)
}

async fn live(config: ComboConfig) -> Result<(), Box<dyn std::error::Error>> {
    use std::io::BufRead;

    let session = SortSession::start(config)?;
    let mut states = session.subscribe();

    // stdin is read on a plain thread; lines become sort actions.
    let (line_tx, mut lines) = tokio::sync::mpsc::channel::<String>(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    let mut prev = session.state();
    println!("{}", serde_json::to_string(&prev)?);

    loop {
        tokio::select! {
            line = lines.recv() => {
                if line.is_none() {
                    // stdin closed; end the session.
                    break;
                }
                session.record_action(Utc::now());
            }
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = states.borrow_and_update().clone();
                if let Some(event) = ComboEvent::from_transition(&prev, &next) {
                    println!("{}", serde_json::to_string(&event)?);
                }
                println!("{}", serde_json::to_string(&next)?);
                prev = next;
            }
        }
    }

    session.shutdown();
    Ok(())
}
