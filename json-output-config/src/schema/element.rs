use crate::schema::NodeKind;
use bitflags::bitflags;
use strum_macros::Display;

// ValueType defines how the text of an element is interpreted.
#[derive(Clone, Copy, Display, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ValueType {
    // STRING: trimmed text content
    String,
    // UINT: unsigned decimal integer
    Uint,
    // BOOL: true/false, yes/no or 1/0
    Bool,
    // CONTEXT: nested element described by its own schema
    #[strum(serialize = "context")]
    Context(NodeKind),
}

bitflags! {
    // Cardinality of an element. No flags means required exactly once.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u32 {
        const REQUIRED = 0;
        const OPTIONAL = 1;
        const MULTI = 2;
    }
}

/// Identifier of every element the configuration knows about.
///
/// Parsers dispatch on these identifiers, never on raw tag names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    // Formatting parameters
    FmtTcpFlags,
    FmtTimestamp,
    FmtProto,
    FmtUnknown,
    FmtOptions,
    FmtNonPrint,
    FmtNumeric,
    FmtOctetAsUint,
    FmtBiflowSplit,
    FmtDetailedInfo,
    FmtTemplateInfo,
    // Common output
    OutputList,
    OutputPrint,
    OutputSend,
    OutputServer,
    OutputFile,
    OutputKafka,
    OutputSyslog,
    // Standard output
    PrintName,
    // Send output
    SendName,
    SendIp,
    SendPort,
    SendProto,
    SendBlock,
    // Server output
    ServerName,
    ServerPort,
    ServerBlock,
    // File output
    FileName,
    FilePath,
    FilePrefix,
    FileWindow,
    FileAlign,
    FileCompress,
    // Kafka output
    KafkaName,
    KafkaBrokers,
    KafkaTopic,
    KafkaPartition,
    KafkaBrokerVersion,
    KafkaBlocking,
    KafkaPerfTuning,
    KafkaProperty,
    KafkaPropKey,
    KafkaPropValue,
    // Syslog output
    SyslogName,
    SyslogPriority,
    SyslogPriFacility,
    SyslogPriSeverity,
    SyslogHostname,
    SyslogProgram,
    SyslogProcId,
    SyslogTransport,
    SyslogTcp,
    SyslogTcpHost,
    SyslogTcpPort,
    SyslogTcpBlock,
    SyslogUdp,
    SyslogUdpHost,
    SyslogUdpPort,
}

// ElementDef declares one legal child of a node.
// Prefer using the helper functions to create an ElementDef.
#[derive(Clone, Copy, Debug)]
pub struct ElementDef {
    id: Element,
    tag: &'static str,
    ty: ValueType,
    flags: ElementFlags,
}

impl ElementDef {
    pub const fn new(id: Element, tag: &'static str, ty: ValueType, flags: ElementFlags) -> Self {
        ElementDef { id, tag, ty, flags }
    }

    pub const fn nested(
        id: Element,
        tag: &'static str,
        kind: NodeKind,
        flags: ElementFlags,
    ) -> Self {
        ElementDef::new(id, tag, ValueType::Context(kind), flags)
    }

    pub fn id(&self) -> Element {
        self.id
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn ty(&self) -> ValueType {
        self.ty
    }

    pub fn is_required(&self) -> bool {
        !self.flags.contains(ElementFlags::OPTIONAL)
    }

    pub fn is_repeatable(&self) -> bool {
        self.flags.contains(ElementFlags::MULTI)
    }
}
