use std::io::{ErrorKind, Read};

/// Fill `buf` as far as the reader allows and return the bytes read.
///
/// Unlike `read_exact`, a short count is not an error here: it tells the
/// caller where the stream ended.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// use std::io::Cursor;
///
/// let mut buf = [0u8; 4];
/// let read = read_until_full(&mut Cursor::new([1u8, 2]), &mut buf).unwrap();
/// assert_eq!(read, 2);
/// ```
///
/// # Errors
/// Returns the underlying I/O error, except `Interrupted`, which is retried.
pub fn read_until_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::read_until_full;
    use std::io::{Cursor, Read};

    /// Hands out at most one byte per call.
    struct Trickle<R>(R);

    impl<R: Read> Read for Trickle<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    #[test]
    fn fills_across_short_reads() {
        let mut reader = Trickle(Cursor::new([1u8, 2, 3, 4, 5]));
        let mut buf = [0u8; 4];
        assert_eq!(read_until_full(&mut reader, &mut buf).unwrap(), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn reports_short_count_at_eof() {
        let mut reader = Cursor::new([9u8, 8]);
        let mut buf = [0u8; 8];
        assert_eq!(read_until_full(&mut reader, &mut buf).unwrap(), 2);
    }

    #[test]
    fn empty_reader_reads_nothing() {
        let mut reader = Cursor::new(Vec::<u8>::new());
        let mut buf = [0u8; 8];
        assert_eq!(read_until_full(&mut reader, &mut buf).unwrap(), 0);
    }
}
