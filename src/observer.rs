//! Progress and diagnostics sink handed to every stage of the pipeline.

use indicatif::{ProgressBar, ProgressStyle};
use log::Level;

pub trait Observer {
    fn log(&self, level: Level, message: &str);

    fn project_started(&self, index: usize, total: usize, name: &str) {
        self.log(
            Level::Info,
            &format!("{index}/{total} - Fetching commits for project: {name}"),
        );
    }
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn log(&self, level: Level, message: &str) {
        log::log!(level, "{message}");
    }
}

/// Drives a progress bar over the project listing while still logging.
pub struct ProgressObserver {
    bar: ProgressBar,
    inner: LogObserver,
}

impl ProgressObserver {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self { bar, inner: LogObserver }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn log(&self, level: Level, message: &str) {
        self.bar.suspend(|| self.inner.log(level, message));
    }

    fn project_started(&self, index: usize, total: usize, name: &str) {
        self.bar.set_length(total as u64);
        self.bar.set_position(index as u64);
        self.bar.set_message(name.to_string());
        self.bar
            .suspend(|| self.inner.project_started(index, total, name));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Observer;
    use log::Level;
    use std::cell::RefCell;

    #[derive(Default)]
    pub struct RecordingObserver {
        pub events: RefCell<Vec<(Level, String)>>,
    }

    impl RecordingObserver {
        pub fn messages(&self, level: Level) -> Vec<String> {
            self.events
                .borrow()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl Observer for RecordingObserver {
        fn log(&self, level: Level, message: &str) {
            self.events.borrow_mut().push((level, message.to_string()));
        }
    }
}
