// Progress indicator shown while waiting for the model

use std::io::Write;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
const FRAME_INTERVAL: Duration = Duration::from_millis(100);
const JOIN_TIMEOUT: Duration = Duration::from_millis(200);

/// Background task redrawing `message` with a spinning frame
pub struct Spinner {
    stop: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
    width: usize,
}

impl Spinner {
    pub fn start_with(message: impl Into<String>, enabled: bool) -> Self {
        let message = message.into();
        let (stop, mut stopped) = watch::channel(false);
        let width = message.chars().count() + 2;

        let handle = enabled.then(|| {
            tokio::spawn(async move {
                let mut frame = 0usize;
                loop {
                    let mut stdout = std::io::stdout();
                    let _ = write!(stdout, "\r{} {}", message, FRAMES[frame % FRAMES.len()]);
                    let _ = stdout.flush();
                    frame += 1;

                    tokio::select! {
                        // Only ever set to true; a dropped sender also ends the loop.
                        _ = stopped.changed() => break,
                        _ = tokio::time::sleep(FRAME_INTERVAL) => {}
                    }
                }
            })
        });

        Self {
            stop,
            handle,
            width,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the task, wait up to 200 ms for it, then clear the line
    pub async fn stop(mut self) {
        let _ = self.stop.send(true);
        let Some(handle) = self.handle.take() else {
            return;
        };

        if tokio::time::timeout(JOIN_TIMEOUT, handle).await.is_err() {
            debug!("spinner did not stop in time");
        }

        let mut stdout = std::io::stdout();
        let _ = write!(stdout, "\r{}\r", " ".repeat(self.width));
        let _ = stdout.flush();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_stop_joins_quickly() {
        let spinner = Spinner::start_with("thinking", true);
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(spinner.is_running());

        let start = Instant::now();
        spinner.stop().await;
        assert!(start.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_disabled_spinner_is_inert() {
        let spinner = Spinner::start_with("thinking", false);
        assert!(!spinner.is_running());
        spinner.stop().await;
    }
}
