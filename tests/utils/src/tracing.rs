use once_cell::sync::Lazy;
use std::{
    io,
    sync::{Mutex, MutexGuard},
};
use tracing_core::Dispatch;
use tracing_subscriber::{fmt::MakeWriter, util::SubscriberInitExt};

lazy_static! {
    pub static ref GLOBAL_TRACING_BUF: Mutex<Vec<u8>> = Mutex::new(vec![]);
}

static SUBSCRIBER_INIT: Lazy<()> = Lazy::new(|| {
    let mock_writer = TracingWriter::new(&*GLOBAL_TRACING_BUF);

    let subscriber: Dispatch = tracing_subscriber::fmt()
        .with_writer(mock_writer)
        .with_max_level(::tracing::Level::DEBUG)
        .with_level(true)
        .with_ansi(false)
        .into();
    subscriber.init()
});

/// Installs the buffer-backed subscriber once per test binary.
pub fn init_tracing() {
    Lazy::force(&SUBSCRIBER_INIT);
}

#[derive(Debug)]
pub struct TracingWriter<'a> {
    buf: &'a Mutex<Vec<u8>>,
}

impl<'a> TracingWriter<'a> {
    pub fn new(buf: &'a Mutex<Vec<u8>>) -> Self {
        Self { buf }
    }

    fn buf(&self) -> io::Result<MutexGuard<'a, Vec<u8>>> {
        self.buf
            .lock()
            .map_err(|_| io::Error::from(io::ErrorKind::Other))
    }
}

impl<'a> io::Write for TracingWriter<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut target = self.buf()?;
        print!("{}", String::from_utf8_lossy(buf));
        target.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buf()?.flush()
    }
}

impl<'a> MakeWriter for TracingWriter<'a> {
    type Writer = Self;

    fn make_writer(&self) -> Self::Writer {
        TracingWriter::new(self.buf)
    }
}

// logs_contain may panic so don't use in production code
pub fn logs_contain(s: &str) -> bool {
    let logs = String::from_utf8(GLOBAL_TRACING_BUF.lock().unwrap().to_vec()).unwrap();
    logs.split('\n').any(|line| line.contains(s))
}

/// Lines containing every one of `needles`.
pub fn logs_contain_all(needles: &[&str]) -> bool {
    let logs = String::from_utf8(GLOBAL_TRACING_BUF.lock().unwrap().to_vec()).unwrap();
    logs.split('\n')
        .any(|line| needles.iter().all(|needle| line.contains(needle)))
}
