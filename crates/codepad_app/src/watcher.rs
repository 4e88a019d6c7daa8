use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use codepad_core::{Msg, SourceBundle};
use pad_logging::pad_warn;

use crate::app::ShellCommand;

pub const HTML_BUFFER: &str = "pad.html";
pub const CSS_BUFFER: &str = "pad.css";
pub const JS_BUFFER: &str = "pad.js";

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Create the buffer files from the starter bundle when missing and return
/// whatever is currently on disk.
pub fn ensure_buffers(dir: &Path) -> io::Result<SourceBundle> {
    let starter = SourceBundle::starter();
    Ok(SourceBundle {
        html: ensure_buffer(dir.join(HTML_BUFFER), &starter.html)?,
        css: ensure_buffer(dir.join(CSS_BUFFER), &starter.css)?,
        javascript: ensure_buffer(dir.join(JS_BUFFER), &starter.javascript)?,
    })
}

/// Overwrite the buffer files, e.g. when a snippet is loaded into the editors.
pub fn write_buffers(dir: &Path, sources: &SourceBundle) -> io::Result<()> {
    fs::write(dir.join(HTML_BUFFER), &sources.html)?;
    fs::write(dir.join(CSS_BUFFER), &sources.css)?;
    fs::write(dir.join(JS_BUFFER), &sources.javascript)?;
    Ok(())
}

/// Poll the buffer files and post the full bundle whenever any of them
/// changes. Coalescing bursts into a single run is the controller's job, not
/// the watcher's.
pub fn spawn(dir: PathBuf, tx: Sender<ShellCommand>) {
    thread::spawn(move || {
        let mut last: Option<SourceBundle> = None;
        loop {
            thread::sleep(POLL_INTERVAL);
            let current = match read_buffers(&dir) {
                Ok(bundle) => bundle,
                Err(err) => {
                    pad_warn!("Failed to read buffer files: {}", err);
                    continue;
                }
            };
            if last.as_ref() == Some(&current) {
                continue;
            }
            // The first observation is the bundle run_app already seeded.
            let fresh = last.is_some();
            last = Some(current.clone());
            if fresh
                && tx
                    .send(ShellCommand::Core(Msg::SourcesEdited(current)))
                    .is_err()
            {
                break;
            }
        }
    });
}

fn read_buffers(dir: &Path) -> io::Result<SourceBundle> {
    Ok(SourceBundle {
        html: fs::read_to_string(dir.join(HTML_BUFFER))?,
        css: fs::read_to_string(dir.join(CSS_BUFFER))?,
        javascript: fs::read_to_string(dir.join(JS_BUFFER))?,
    })
}

fn ensure_buffer(path: PathBuf, default: &str) -> io::Result<String> {
    match fs::read_to_string(&path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::write(&path, default)?;
            Ok(default.to_string())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::{ensure_buffers, write_buffers};
    use codepad_core::SourceBundle;

    #[test]
    fn missing_buffers_are_seeded_with_the_starter() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = ensure_buffers(dir.path()).unwrap();
        assert_eq!(bundle, SourceBundle::starter());
        assert!(dir.path().join("pad.html").exists());
        assert!(dir.path().join("pad.css").exists());
        assert!(dir.path().join("pad.js").exists());
    }

    #[test]
    fn existing_buffers_are_kept_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pad.html"), "<p>mine</p>").unwrap();
        let bundle = ensure_buffers(dir.path()).unwrap();
        assert_eq!(bundle.html, "<p>mine</p>");
        assert_eq!(bundle.css, SourceBundle::starter().css);
    }

    #[test]
    fn write_buffers_replaces_all_three_files() {
        let dir = tempfile::tempdir().unwrap();
        ensure_buffers(dir.path()).unwrap();
        let sources = SourceBundle::new("<i>x</i>", "i { color: red; }", "console.log('x');");
        write_buffers(dir.path(), &sources).unwrap();
        assert_eq!(ensure_buffers(dir.path()).unwrap(), sources);
    }
}
