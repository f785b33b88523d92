//! Output destinations of the converted records.
//!
//! Each submodule parses one kind of output from its bound [`Context`]
//! (see [`crate::document`]). Parsed outputs are collected in an
//! [`OutputSet`], which is checked as a whole once the document is consumed.

mod file;
mod kafka;
mod print;
mod send;
mod server;
mod syslog;
mod validity;

pub use file::{Compression, FileOutput};
pub use kafka::{KafkaOutput, Partition};
pub use print::PrintOutput;
pub use send::{SendOutput, SendProtocol};
pub use server::ServerOutput;
pub use syslog::{
    HostnameMode, SyslogOutput, SyslogPriority, SyslogTransport, TcpTransport, UdpTransport,
};

use crate::document::Context;
use crate::error::{Error, Result};
use enum_dispatch::enum_dispatch;
use strum_macros::Display;

/// Kind of an output. Displays as its XML tag.
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum OutputKind {
    Print,
    Server,
    Send,
    File,
    Kafka,
    Syslog,
}

/// Accessors shared by all output kinds.
#[enum_dispatch]
pub trait Output {
    /// Unique name of the output
    fn name(&self) -> &str;

    fn kind(&self) -> OutputKind;
}

/// One parsed output of any kind.
#[enum_dispatch(Output)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRecord {
    Print(PrintOutput),
    Server(ServerOutput),
    Send(SendOutput),
    File(FileOutput),
    Kafka(KafkaOutput),
    Syslog(SyslogOutput),
}

impl OutputRecord {
    /// Parse the context of one child of `<outputs>`.
    pub(crate) fn parse(kind: OutputKind, ctx: Context) -> Result<Self> {
        Ok(match kind {
            OutputKind::Print => print::parse(ctx)?.into(),
            OutputKind::Server => server::parse(ctx)?.into(),
            OutputKind::Send => send::parse(ctx)?.into(),
            OutputKind::File => file::parse(ctx)?.into(),
            OutputKind::Kafka => kafka::parse(ctx)?.into(),
            OutputKind::Syslog => syslog::parse(ctx)?.into(),
        })
    }
}

/// All configured outputs grouped by kind, each group in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSet {
    pub prints: Vec<PrintOutput>,
    pub servers: Vec<ServerOutput>,
    pub sends: Vec<SendOutput>,
    pub files: Vec<FileOutput>,
    pub kafkas: Vec<KafkaOutput>,
    pub syslogs: Vec<SyslogOutput>,
}

impl OutputSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: OutputRecord) {
        log::debug!("Adding <{}> output '{}'", record.kind(), record.name());
        match record {
            OutputRecord::Print(o) => self.prints.push(o),
            OutputRecord::Server(o) => self.servers.push(o),
            OutputRecord::Send(o) => self.sends.push(o),
            OutputRecord::File(o) => self.files.push(o),
            OutputRecord::Kafka(o) => self.kafkas.push(o),
            OutputRecord::Syslog(o) => self.syslogs.push(o),
        }
    }

    /// Total number of outputs of all kinds.
    pub fn len(&self) -> usize {
        self.prints.len()
            + self.servers.len()
            + self.sends.len()
            + self.files.len()
            + self.kafkas.len()
            + self.syslogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all outputs: print, send, server, file, kafka and syslog
    /// groups in this order, each group in document order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Output> + '_ {
        fn erase<T: Output + 'static>(items: &[T]) -> impl Iterator<Item = &dyn Output> + '_ {
            items.iter().map(|o| o as &dyn Output)
        }

        erase(&self.prints)
            .chain(erase(&self.sends))
            .chain(erase(&self.servers))
            .chain(erase(&self.files))
            .chain(erase(&self.kafkas))
            .chain(erase(&self.syslogs))
    }

    /// Check constraints that span the whole set.
    pub fn check_validity(&self) -> Result<()> {
        validity::check(self)
    }
}

/// Convert a parsed number to a port in `1..=65535`.
pub(crate) fn to_port(value: u64, err: impl FnOnce() -> Error) -> Result<u16> {
    u16::try_from(value)
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(err)
}

/// Check that a required text field is set.
pub(crate) fn require(value: &str, err: impl FnOnce() -> Error) -> Result<()> {
    if value.is_empty() {
        Err(err())
    } else {
        Ok(())
    }
}
