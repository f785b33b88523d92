//! Static description of the configuration document.
//!
//! Every node kind declares the ordered list of its legal children together
//! with their value type and cardinality. The tables are plain data: they are
//! indexed once on first use and never change afterwards.

mod element;
mod tables;

pub use element::{Element, ElementDef, ElementFlags, ValueType};
pub use tables::{node_schema, NodeSchema};

use strum_macros::{Display, EnumIter, EnumString};

/// Kind of a node that has children. Displays as its XML tag.
#[derive(Clone, Copy, Debug, Display, EnumIter, EnumString, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum NodeKind {
    Params,
    Outputs,
    Print,
    Server,
    Send,
    File,
    Kafka,
    #[strum(serialize = "property")]
    KafkaProperty,
    Syslog,
    #[strum(serialize = "priority")]
    SyslogPriority,
    #[strum(serialize = "transport")]
    SyslogTransport,
    #[strum(serialize = "tcp")]
    SyslogTcp,
    #[strum(serialize = "udp")]
    SyslogUdp,
}

impl NodeKind {
    /// The node kind of the document root.
    pub const ROOT: NodeKind = NodeKind::Params;
}
