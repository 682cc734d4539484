use persephone_host::host::write_message;
use persephone_host::Response;
use std::io::{self, Write};

/// Records whether `flush` happened after the last write.
#[derive(Default)]
struct FlushTracker {
    data: Vec<u8>,
    flushed: bool,
}

impl Write for FlushTracker {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.flushed = false;
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

#[test]
fn test_write_message() {
    let mut out = FlushTracker::default();
    write_message(&mut out, &Response::status(true)).unwrap();

    assert!(out.flushed, "frame must be flushed before returning");

    // The first 4 bytes should be the length of the JSON content.
    let content_length = u32::from_ne_bytes(out.data[0..4].try_into().unwrap()) as usize;
    assert_eq!(content_length, out.data.len() - 4);

    // The rest of the bytes should be the JSON content.
    assert_eq!(&out.data[4..], br#"{"success":true}"#);
}
