//! Output sinks for the log writer.

use std::fs::File;
use std::io::{self, Cursor, Seek, SeekFrom, Write};

/// A byte sink that can be asked to persist what it has accepted.
///
/// Files sync their data to disk; in-memory sinks only flush.
pub trait LogSink: Write {
    /// Persist everything written so far.
    fn sync(&mut self) -> io::Result<()> {
        self.flush()
    }

    /// Discard everything past `len` bytes and continue writing there.
    ///
    /// Sinks that cannot shrink return `Unsupported`.
    fn truncate_to(&mut self, _len: u64) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "sink cannot be truncated",
        ))
    }
}

impl LogSink for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)?;
        self.seek(SeekFrom::Start(len))?;
        Ok(())
    }
}

impl LogSink for Vec<u8> {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len).map_err(|_| io::ErrorKind::InvalidInput)?;
        self.truncate(len);
        Ok(())
    }
}

impl LogSink for Cursor<Vec<u8>> {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        LogSink::truncate_to(self.get_mut(), len)?;
        self.set_position(len);
        Ok(())
    }
}

impl LogSink for Cursor<&mut Vec<u8>> {
    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        LogSink::truncate_to(&mut **self.get_mut(), len)?;
        self.set_position(len);
        Ok(())
    }
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn sync(&mut self) -> io::Result<()> {
        (**self).sync()
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        (**self).truncate_to(len)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn sync(&mut self) -> io::Result<()> {
        (**self).sync()
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        (**self).truncate_to(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempfile;

    #[test]
    fn test_vec_truncate_to() {
        let mut sink = vec![1u8, 2, 3, 4];
        LogSink::truncate_to(&mut sink, 2).unwrap();
        sink.write_all(&[9]).unwrap();
        assert_eq!(sink, vec![1, 2, 9]);
    }

    #[test]
    fn test_cursor_truncate_to_moves_position() {
        let mut sink = Cursor::new(vec![1u8, 2, 3, 4]);
        LogSink::truncate_to(&mut sink, 1).unwrap();
        sink.write_all(&[7, 8]).unwrap();
        assert_eq!(sink.into_inner(), vec![1, 7, 8]);
    }

    #[test]
    fn test_file_truncate_to_moves_position() {
        let mut file = tempfile().unwrap();
        file.write_all(b"abcdef").unwrap();
        LogSink::truncate_to(&mut file, 3).unwrap();
        file.write_all(b"X").unwrap();

        let mut contents = String::new();
        file.seek(SeekFrom::Start(0)).unwrap();
        std::io::Read::read_to_string(&mut file, &mut contents).unwrap();
        assert_eq!(contents, "abcX");
    }
}
