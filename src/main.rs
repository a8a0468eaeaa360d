//! Terminal entry point for Don't Do It

use std::{env, error::Error, fs::File, path::Path, process::ExitCode, sync::Mutex};

use dont_do::{
    config::{CONFIG_ENV, Options},
    tui,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("dont-do: {error}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let options = Options::from_env()?;
    if let Some(path) = options.log_file() {
        init_logging(path)?;
    }
    // after init_logging, or the event has nowhere to go
    log_options_source(env::var_os(CONFIG_ENV).as_deref().map(Path::new));
    tui::run(options)
}

fn log_options_source(config: Option<&Path>) {
    match config {
        Some(path) => info!(path = %path.display(), "options loaded"),
        None => info!("default options in use"),
    }
}

// stdout belongs to the terminal UI, so logs only ever go to a file
fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| -> Box<dyn Error> { error })?;
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::{
        io::{self, Write},
        sync::Arc,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_logs(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        String::from_utf8(captured.0.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_options_source_reaches_subscriber() {
        let logs = captured_logs(|| log_options_source(Some(Path::new("/etc/dont-do.json"))));

        assert!(logs.contains("options loaded"));
        assert!(logs.contains("/etc/dont-do.json"));
    }

    #[test]
    fn test_default_options_are_logged() {
        let logs = captured_logs(|| log_options_source(None));

        assert!(logs.contains("default options in use"));
    }
}
