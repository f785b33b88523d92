use crate::schema::{Element, ElementDef, ElementFlags, NodeKind, ValueType};
use std::collections::HashMap;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

const REQ: ElementFlags = ElementFlags::REQUIRED;
const OPT: ElementFlags = ElementFlags::OPTIONAL;
const OPT_MULTI: ElementFlags = ElementFlags::OPTIONAL.union(ElementFlags::MULTI);

const fn elem(id: Element, tag: &'static str, ty: ValueType, flags: ElementFlags) -> ElementDef {
    ElementDef::new(id, tag, ty, flags)
}

const fn nested(id: Element, tag: &'static str, kind: NodeKind, flags: ElementFlags) -> ElementDef {
    ElementDef::nested(id, tag, kind, flags)
}

use Element as E;
use ValueType::{Bool, String as Str, Uint};

static ARGS_PRINT: &[ElementDef] = &[elem(E::PrintName, "name", Str, REQ)];

static ARGS_SERVER: &[ElementDef] = &[
    elem(E::ServerName, "name", Str, REQ),
    elem(E::ServerPort, "port", Uint, REQ),
    elem(E::ServerBlock, "blocking", Bool, OPT),
];

static ARGS_SEND: &[ElementDef] = &[
    elem(E::SendName, "name", Str, REQ),
    elem(E::SendIp, "ip", Str, OPT),
    elem(E::SendPort, "port", Uint, OPT),
    elem(E::SendProto, "protocol", Str, OPT),
    elem(E::SendBlock, "blocking", Bool, OPT),
];

static ARGS_FILE: &[ElementDef] = &[
    elem(E::FileName, "name", Str, REQ),
    elem(E::FilePath, "path", Str, REQ),
    elem(E::FilePrefix, "prefix", Str, OPT),
    elem(E::FileWindow, "timeWindow", Uint, OPT),
    elem(E::FileAlign, "timeAlignment", Bool, OPT),
    elem(E::FileCompress, "compression", Str, OPT),
];

static ARGS_KAFKA_PROPERTY: &[ElementDef] = &[
    elem(E::KafkaPropKey, "key", Str, REQ),
    elem(E::KafkaPropValue, "value", Str, OPT),
];

static ARGS_KAFKA: &[ElementDef] = &[
    elem(E::KafkaName, "name", Str, REQ),
    elem(E::KafkaBrokers, "brokers", Str, REQ),
    elem(E::KafkaTopic, "topic", Str, REQ),
    elem(E::KafkaPartition, "partition", Str, OPT),
    elem(E::KafkaBrokerVersion, "brokerVersion", Str, OPT),
    elem(E::KafkaBlocking, "blocking", Bool, OPT),
    elem(E::KafkaPerfTuning, "performanceTuning", Bool, OPT),
    nested(E::KafkaProperty, "property", NodeKind::KafkaProperty, OPT_MULTI),
];

// Facility and severity are checked together by the syslog parser.
static ARGS_SYSLOG_PRIORITY: &[ElementDef] = &[
    elem(E::SyslogPriFacility, "facility", Uint, OPT),
    elem(E::SyslogPriSeverity, "severity", Uint, OPT),
];

static ARGS_SYSLOG_TCP: &[ElementDef] = &[
    elem(E::SyslogTcpHost, "hostname", Str, REQ),
    elem(E::SyslogTcpPort, "port", Uint, REQ),
    elem(E::SyslogTcpBlock, "blocking", Bool, REQ),
];

static ARGS_SYSLOG_UDP: &[ElementDef] = &[
    elem(E::SyslogUdpHost, "hostname", Str, REQ),
    elem(E::SyslogUdpPort, "port", Uint, REQ),
];

// Both arms are optional here; exactly one of them is enforced by the parser.
static ARGS_SYSLOG_TRANSPORT: &[ElementDef] = &[
    nested(E::SyslogTcp, "tcp", NodeKind::SyslogTcp, OPT),
    nested(E::SyslogUdp, "udp", NodeKind::SyslogUdp, OPT),
];

static ARGS_SYSLOG: &[ElementDef] = &[
    elem(E::SyslogName, "name", Str, REQ),
    elem(E::SyslogHostname, "hostname", Str, OPT),
    elem(E::SyslogProgram, "program", Str, OPT),
    elem(E::SyslogProcId, "procId", Bool, OPT),
    nested(E::SyslogPriority, "priority", NodeKind::SyslogPriority, OPT),
    nested(E::SyslogTransport, "transport", NodeKind::SyslogTransport, REQ),
];

static ARGS_OUTPUTS: &[ElementDef] = &[
    nested(E::OutputPrint, "print", NodeKind::Print, OPT_MULTI),
    nested(E::OutputServer, "server", NodeKind::Server, OPT_MULTI),
    nested(E::OutputSend, "send", NodeKind::Send, OPT_MULTI),
    nested(E::OutputFile, "file", NodeKind::File, OPT_MULTI),
    nested(E::OutputKafka, "kafka", NodeKind::Kafka, OPT_MULTI),
    nested(E::OutputSyslog, "syslog", NodeKind::Syslog, OPT_MULTI),
];

// A missing <outputs> is reported by the cross-output check, not here.
static ARGS_PARAMS: &[ElementDef] = &[
    elem(E::FmtTcpFlags, "tcpFlags", Str, OPT),
    elem(E::FmtTimestamp, "timestamp", Str, OPT),
    elem(E::FmtProto, "protocol", Str, OPT),
    elem(E::FmtUnknown, "ignoreUnknown", Bool, OPT),
    elem(E::FmtOptions, "ignoreOptions", Bool, OPT),
    elem(E::FmtNonPrint, "nonPrintableChar", Bool, OPT),
    elem(E::FmtNumeric, "numericNames", Bool, OPT),
    elem(E::FmtOctetAsUint, "octetArrayAsUint", Bool, OPT),
    elem(E::FmtBiflowSplit, "splitBiflow", Bool, OPT),
    elem(E::FmtDetailedInfo, "detailedInfo", Bool, OPT),
    elem(E::FmtTemplateInfo, "templateInfo", Bool, OPT),
    nested(E::OutputList, "outputs", NodeKind::Outputs, OPT),
];

fn elements_of(kind: NodeKind) -> &'static [ElementDef] {
    match kind {
        NodeKind::Params => ARGS_PARAMS,
        NodeKind::Outputs => ARGS_OUTPUTS,
        NodeKind::Print => ARGS_PRINT,
        NodeKind::Server => ARGS_SERVER,
        NodeKind::Send => ARGS_SEND,
        NodeKind::File => ARGS_FILE,
        NodeKind::Kafka => ARGS_KAFKA,
        NodeKind::KafkaProperty => ARGS_KAFKA_PROPERTY,
        NodeKind::Syslog => ARGS_SYSLOG,
        NodeKind::SyslogPriority => ARGS_SYSLOG_PRIORITY,
        NodeKind::SyslogTransport => ARGS_SYSLOG_TRANSPORT,
        NodeKind::SyslogTcp => ARGS_SYSLOG_TCP,
        NodeKind::SyslogUdp => ARGS_SYSLOG_UDP,
    }
}

/// Schema of a single node kind with its children indexed by tag.
#[derive(Debug)]
pub struct NodeSchema {
    kind: NodeKind,
    elements: &'static [ElementDef],
    by_tag: HashMap<&'static str, ElementDef>,
}

impl NodeSchema {
    fn new(kind: NodeKind) -> Self {
        let elements = elements_of(kind);
        let by_tag = elements.iter().map(|def| (def.tag(), *def)).collect();
        NodeSchema {
            kind,
            elements,
            by_tag,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Children in declaration order.
    pub fn elements(&self) -> &'static [ElementDef] {
        self.elements
    }

    pub fn lookup(&self, tag: &str) -> Option<&ElementDef> {
        self.by_tag.get(tag)
    }
}

static SCHEMA: LazyLock<HashMap<NodeKind, NodeSchema>> = LazyLock::new(|| {
    NodeKind::iter()
        .map(|kind| (kind, NodeSchema::new(kind)))
        .collect()
});

/// Look up the schema of a node kind.
pub fn node_schema(kind: NodeKind) -> Option<&'static NodeSchema> {
    SCHEMA.get(&kind)
}
