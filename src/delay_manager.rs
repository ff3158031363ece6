use log::debug;
use std::thread;
use std::time::Duration;

/// Courtesy pause between requests. Not a retry/backoff mechanism.
pub fn request_delay(seconds: f64) {
    if seconds <= 0.0 {
        return;
    }
    debug!("Waiting for {} seconds before next request...", seconds);
    thread::sleep(Duration::from_secs_f64(seconds));
}
