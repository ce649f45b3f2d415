use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use ppinterface::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

struct BarState {
    pb: ProgressBar,
    phase: Option<&'static str>,
}

/// Renders library progress events as an `indicatif` spinner or bar on stderr.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks state without drawing anything.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::new(0).with_style(Self::spinner_style());
        pb.set_draw_target(target);
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState { pb, phase: None })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    guard.phase = Some(name);
                    let pb = &guard.pb;
                    pb.reset();
                    pb.set_length(0);
                    pb.set_style(Self::spinner_style());
                    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    pb.set_message(name);
                }
                Progress::PhaseFinish => {
                    let message = match guard.phase.take() {
                        Some(name) => format!("✓ {}", name),
                        None => "✓ Done".to_string(),
                    };
                    guard.pb.disable_steady_tick();
                    guard.pb.finish_with_message(message);
                }
                Progress::TaskStart { total_steps } => {
                    let pb = &guard.pb;
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total_steps);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                }
                Progress::TaskIncrement => {
                    guard.pb.inc(1);
                }
                Progress::TaskFinish => {
                    let pb = &guard.pb;
                    let total = pb.length().unwrap_or(0);
                    if pb.position() < total {
                        pb.set_position(total);
                    }
                    pb.finish();
                }
                Progress::Message(msg) => {
                    if guard.pb.is_finished() {
                        guard.pb.set_message(msg);
                    } else {
                        guard.pb.println(format!("  {}", msg));
                    }
                }
            }
        })
    }

    /// Removes the bar from the terminal before regular output is printed.
    pub fn clear(&self) {
        if let Ok(guard) = self.state.lock() {
            guard.pb.finish_and_clear();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<20} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn snapshot(handler: &CliProgressHandler) -> (Option<u64>, u64, bool, String) {
        let guard = handler.state.lock().unwrap();
        (
            guard.pb.length(),
            guard.pb.position(),
            guard.pb.is_finished(),
            guard.pb.message(),
        )
    }

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::hidden();
        let (length, _, finished, _) = snapshot(&handler);
        assert_eq!(length, Some(0));
        assert!(finished);
    }

    #[test]
    fn callback_tracks_phases_and_tasks() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        callback(Progress::PhaseStart {
            name: "Contact Detection",
        });
        let (length, _, finished, message) = snapshot(&handler);
        assert_eq!(message, "Contact Detection");
        assert!(!finished);
        assert_eq!(length, Some(0));

        callback(Progress::TaskStart { total_steps: 50 });
        callback(Progress::TaskIncrement);
        let (length, position, _, _) = snapshot(&handler);
        assert_eq!(length, Some(50));
        assert_eq!(position, 1);

        callback(Progress::TaskFinish);
        let (_, position, finished, _) = snapshot(&handler);
        assert!(finished);
        assert_eq!(position, 50);

        callback(Progress::PhaseFinish);
        let (_, _, _, message) = snapshot(&handler);
        assert_eq!(message, "✓ Contact Detection");
    }

    #[test]
    fn phase_finish_without_start_uses_generic_message() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();
        callback(Progress::PhaseFinish);
        assert_eq!(snapshot(&handler).3, "✓ Done");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::hidden();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::PhaseStart {
                name: "Thread Test",
            });
            callback(Progress::TaskIncrement);
            callback(Progress::PhaseFinish);
        })
        .join()
        .unwrap();

        let (_, _, finished, message) = snapshot(&handler);
        assert!(finished);
        assert_eq!(message, "✓ Thread Test");
    }
}
