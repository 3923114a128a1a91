// src/source.rs
use crossbeam_channel::{bounded, Receiver, Sender};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tracing::{debug, info};

use crate::error::SourceError;
use crate::parser::is_block_event;

const READ_BUFFER_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub lines_read: u64,
    pub block_lines: u64,
}

/// Background reader feeding block lines to the engine in file order.
#[derive(Debug)]
pub struct LineSource {
    handle: JoinHandle<Result<SourceStats, SourceError>>,
}

impl LineSource {
    pub fn join(self) -> Result<SourceStats, SourceError> {
        self.handle.join().map_err(|_| SourceError::ReaderPanicked)?
    }
}

/// Opens `path` and starts reading it on its own thread.
///
/// The returned receiver yields every block line once, in file order, and
/// disconnects when the file is exhausted or a read fails.
pub fn spawn_reader(path: &Path, capacity: usize) -> Result<(LineSource, Receiver<String>), SourceError> {
    let file = open_log(path)?;
    let (tx, rx) = bounded(capacity.max(1));
    let path = path.to_path_buf();

    info!(path = %path.display(), "scanning firewall log");
    let handle = thread::spawn(move || {
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
        read_block_lines(reader, &tx).map_err(|source| SourceError::Read { path, source })
    });

    Ok((LineSource { handle }, rx))
}

fn open_log(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => SourceError::NotFound(PathBuf::from(path)),
        _ => SourceError::Open {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Sends every block line of `reader` down `sender`.
///
/// Stops early, without error, if the receiving side has gone away.
pub fn read_block_lines<R: BufRead>(mut reader: R, sender: &Sender<String>) -> std::io::Result<SourceStats> {
    let mut stats = SourceStats::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        stats.lines_read += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if !is_block_event(line) {
            continue;
        }

        stats.block_lines += 1;
        if sender.send(line.to_string()).is_err() {
            debug!("line consumer hung up, stopping reader");
            break;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::io::Cursor;

    const LOG: &str = "Oct 18 10:00:00 host systemd[1]: Starting Daily apt upgrade...\n\
        Oct 18 10:00:01 host kernel: [1.0] [UFW BLOCK] IN=eth0 OUT= MAC=aa SRC=1.1.1.1 DST=2.2.2.2 PROTO=TCP SPT=1 DPT=2\n\
        Oct 18 10:00:02 host kernel: [2.0] [UFW ALLOW] IN=eth0 OUT= SRC=1.1.1.1\n\
        Oct 18 10:00:03 host kernel: [3.0] [UFW BLOCK] IN= OUT=eth0 SRC=2.2.2.2 DST=3.3.3.3 PROTO=UDP SPT=5 DPT=53\r\n\
        Oct 18 10:00:04 host kernel: [4.0] [UFW BLOCK] IN=eth0 OUT= SRC=9.9.9.9";

    #[test]
    fn test_read_block_lines_filters_and_keeps_order() {
        let (tx, rx) = unbounded();
        let stats = read_block_lines(Cursor::new(LOG), &tx).unwrap();
        drop(tx);

        assert_eq!(stats, SourceStats { lines_read: 5, block_lines: 3 });
        let lines: Vec<String> = rx.iter().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("SRC=1.1.1.1"));
        assert!(lines[1].ends_with("DPT=53"));
        assert!(lines[2].ends_with("SRC=9.9.9.9"));
    }

    #[test]
    fn test_read_block_lines_tolerates_invalid_utf8() {
        let mut bytes = b"[UFW BLOCK] IN=eth0 SRC=\xff\xfe\n".to_vec();
        bytes.extend_from_slice(b"garbage \xff\n");
        let (tx, rx) = unbounded();
        let stats = read_block_lines(Cursor::new(bytes), &tx).unwrap();
        drop(tx);

        assert_eq!(stats.lines_read, 2);
        assert_eq!(stats.block_lines, 1);
        assert!(rx.recv().unwrap().starts_with("[UFW BLOCK] IN=eth0"));
    }

    #[test]
    fn test_read_block_lines_stops_when_receiver_dropped() {
        let (tx, rx) = unbounded();
        drop(rx);
        let stats = read_block_lines(Cursor::new(LOG), &tx).unwrap();
        assert_eq!(stats.block_lines, 1);
        assert_eq!(stats.lines_read, 2);
    }

    #[test]
    fn test_spawn_reader_missing_file() {
        let err = spawn_reader(Path::new("/definitely/not/here.log"), 8).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }
}
