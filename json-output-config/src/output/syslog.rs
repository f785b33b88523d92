use crate::document::{Content, Context};
use crate::error::{Error, Result};
use crate::output::{require, to_port, Output, OutputKind};
use crate::schema::Element;
use crate::validate::is_printable_ascii;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

const FACILITY_MAX: u8 = 23;
const FACILITY_DEFAULT: u8 = 16;
const SEVERITY_MAX: u8 = 7;
const SEVERITY_DEFAULT: u8 = 6;

/// Maximum length of APP-NAME (RFC 5424, Section 6)
const PROGRAM_MAX_LEN: usize = 48;

/// What to put into the HOSTNAME field of a message.
#[derive(Debug, Clone, Copy, Default, Display, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HostnameMode {
    /// Nil value
    #[default]
    None,
    /// Hostname of the local machine
    Local,
}

/// Facility and severity of the messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyslogPriority {
    pub facility: u8,
    pub severity: u8,
}

impl SyslogPriority {
    /// PRI value of the message header.
    pub fn value(&self) -> u16 {
        u16::from(self.facility) * 8 + u16::from(self.severity)
    }
}

impl Default for SyslogPriority {
    fn default() -> Self {
        Self {
            facility: FACILITY_DEFAULT,
            severity: SEVERITY_DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpTransport {
    pub hostname: String,
    pub port: u16,
    pub blocking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpTransport {
    pub hostname: String,
    pub port: u16,
}

/// Socket used to deliver the messages. Exactly one kind is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyslogTransport {
    Tcp(TcpTransport),
    Udp(UdpTransport),
}

/// Send records as syslog messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyslogOutput {
    pub name: String,
    pub priority: SyslogPriority,
    pub hostname: HostnameMode,
    /// APP-NAME of the messages, empty for the nil value
    pub program: String,
    /// Add PROCID to the messages
    pub proc_id: bool,
    pub transport: SyslogTransport,
}

impl Output for SyslogOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OutputKind {
        OutputKind::Syslog
    }
}

#[derive(Default)]
struct Builder {
    name: String,
    priority: SyslogPriority,
    hostname: HostnameMode,
    program: String,
    proc_id: bool,
    transport: Option<SyslogTransport>,
}

impl Builder {
    fn set(mut self, content: Content) -> Result<Self> {
        match content.id() {
            Element::SyslogName => self.name = content.into_string()?,
            Element::SyslogHostname => {
                let value = content.into_string()?;
                self.hostname = HostnameMode::from_str(&value).map_err(|_| {
                    Error::invalid(format!("Unknown syslog hostname type '{value}'"))
                })?;
            }
            Element::SyslogProgram => self.program = content.into_string()?,
            Element::SyslogProcId => self.proc_id = content.into_bool()?,
            Element::SyslogPriority => self.priority = parse_priority(content.into_context()?)?,
            Element::SyslogTransport => {
                self.transport = parse_transport(content.into_context()?)?;
            }
            _ => return Err(Error::invalid("Unexpected element within <syslog>!")),
        }
        Ok(self)
    }

    fn finish(self) -> Result<SyslogOutput> {
        require(&self.name, || {
            Error::invalid("Name of a <syslog> output must be defined!")
        })?;

        let transport = self
            .transport
            .ok_or_else(|| Error::invalid("Syslog transport type must be defined!"))?;

        if !is_printable_ascii(&self.program) {
            return Err(Error::invalid(format!(
                "Invalid syslog identifier '{}'",
                self.name
            )));
        }

        if self.program.len() > PROGRAM_MAX_LEN {
            return Err(Error::invalid(format!(
                "Too long syslog identifier '{}'",
                self.name
            )));
        }

        Ok(SyslogOutput {
            name: self.name,
            priority: self.priority,
            hostname: self.hostname,
            program: self.program,
            proc_id: self.proc_id,
            transport,
        })
    }
}

fn parse_priority(ctx: Context) -> Result<SyslogPriority> {
    let mut facility = None;
    let mut severity = None;

    for content in ctx {
        match content.id() {
            Element::SyslogPriFacility => facility = Some(content.into_uint()?),
            Element::SyslogPriSeverity => severity = Some(content.into_uint()?),
            _ => return Err(Error::invalid("Unexpected element within <priority>!")),
        }
    }

    let (Some(facility), Some(severity)) = (facility, severity) else {
        return Err(Error::invalid(
            "Both syslog facility and severity must be set!",
        ));
    };

    let facility = u8::try_from(facility)
        .ok()
        .filter(|f| *f <= FACILITY_MAX)
        .ok_or_else(|| {
            Error::invalid(format!(
                "Syslog facility is out of range [0..{FACILITY_MAX}]"
            ))
        })?;
    let severity = u8::try_from(severity)
        .ok()
        .filter(|s| *s <= SEVERITY_MAX)
        .ok_or_else(|| {
            Error::invalid(format!(
                "Syslog severity is out of range [0..{SEVERITY_MAX}]"
            ))
        })?;

    Ok(SyslogPriority { facility, severity })
}

/// Returns `None` if the node has no transport at all.
fn parse_transport(ctx: Context) -> Result<Option<SyslogTransport>> {
    let mut transport = None;

    for content in ctx {
        if transport.is_some() {
            return Err(Error::invalid(
                "Multiple syslog transport types are not allowed!",
            ));
        }

        transport = Some(match content.id() {
            Element::SyslogTcp => SyslogTransport::Tcp(parse_tcp(content.into_context()?)?),
            Element::SyslogUdp => SyslogTransport::Udp(parse_udp(content.into_context()?)?),
            _ => return Err(Error::invalid("Unexpected element within <transport>!")),
        });
    }

    Ok(transport)
}

fn parse_tcp(ctx: Context) -> Result<TcpTransport> {
    let mut hostname = String::new();
    let mut port = None;
    let mut blocking = None;

    for content in ctx {
        match content.id() {
            Element::SyslogTcpHost => hostname = content.into_string()?,
            Element::SyslogTcpPort => {
                port = Some(to_port(content.into_uint()?, || {
                    Error::invalid("Invalid port number of a <tcp> syslog!")
                })?);
            }
            Element::SyslogTcpBlock => blocking = Some(content.into_bool()?),
            _ => return Err(Error::invalid("Unexpected element within <tcp> syslog!")),
        }
    }

    require(&hostname, || {
        Error::invalid("Hostname of a <tcp> syslog must be defined!")
    })?;
    let port = port.ok_or_else(|| Error::invalid("Port of a <tcp> syslog must be defined!"))?;
    let blocking = blocking
        .ok_or_else(|| Error::invalid("Blocking mode of a <tcp> syslog must be defined!"))?;

    Ok(TcpTransport {
        hostname,
        port,
        blocking,
    })
}

fn parse_udp(ctx: Context) -> Result<UdpTransport> {
    let mut hostname = String::new();
    let mut port = None;

    for content in ctx {
        match content.id() {
            Element::SyslogUdpHost => hostname = content.into_string()?,
            Element::SyslogUdpPort => {
                port = Some(to_port(content.into_uint()?, || {
                    Error::invalid("Invalid port number of a <udp> syslog!")
                })?);
            }
            _ => return Err(Error::invalid("Unexpected element within <udp> syslog!")),
        }
    }

    require(&hostname, || {
        Error::invalid("Hostname of a <udp> syslog must be defined!")
    })?;
    let port = port.ok_or_else(|| Error::invalid("Port of a <udp> syslog must be defined!"))?;

    Ok(UdpTransport { hostname, port })
}

pub(crate) fn parse(ctx: Context) -> Result<SyslogOutput> {
    ctx.into_iter()
        .try_fold(Builder::default(), Builder::set)?
        .finish()
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)] // Tests can panic on failures
mod tests {
    use super::*;
    use crate::document::Value;
    use crate::schema::NodeKind;

    fn text(id: Element, tag: &'static str, value: &str) -> Content {
        Content::new(id, tag, Value::String(value.to_string()))
    }

    fn uint(id: Element, tag: &'static str, value: u64) -> Content {
        Content::new(id, tag, Value::Uint(value))
    }

    fn nested(id: Element, tag: &'static str, kind: NodeKind, contents: Vec<Content>) -> Content {
        Content::new(id, tag, Value::Context(Context::new(kind, contents)))
    }

    fn udp(port: u64) -> Content {
        nested(
            Element::SyslogUdp,
            "udp",
            NodeKind::SyslogUdp,
            vec![
                text(Element::SyslogUdpHost, "hostname", "localhost"),
                uint(Element::SyslogUdpPort, "port", port),
            ],
        )
    }

    fn tcp(blocking: bool) -> Content {
        nested(
            Element::SyslogTcp,
            "tcp",
            NodeKind::SyslogTcp,
            vec![
                text(Element::SyslogTcpHost, "hostname", "syslog.example.org"),
                uint(Element::SyslogTcpPort, "port", 601),
                Content::new(Element::SyslogTcpBlock, "blocking", Value::Bool(blocking)),
            ],
        )
    }

    fn transport(arms: Vec<Content>) -> Content {
        nested(
            Element::SyslogTransport,
            "transport",
            NodeKind::SyslogTransport,
            arms,
        )
    }

    fn priority(contents: Vec<Content>) -> Content {
        nested(
            Element::SyslogPriority,
            "priority",
            NodeKind::SyslogPriority,
            contents,
        )
    }

    fn parse_with(extra: Vec<Content>) -> Result<SyslogOutput> {
        let mut contents = vec![text(Element::SyslogName, "name", "syslog")];
        contents.extend(extra);
        parse(Context::new(NodeKind::Syslog, contents))
    }

    fn err_msg(result: Result<SyslogOutput>) -> String {
        result.err().map(|e| e.to_string()).unwrap_or_default()
    }

    #[test]
    fn test_defaults() {
        let output = parse_with(vec![transport(vec![udp(514)])]);
        assert_eq!(
            output,
            Ok(SyslogOutput {
                name: "syslog".to_string(),
                priority: SyslogPriority {
                    facility: 16,
                    severity: 6,
                },
                hostname: HostnameMode::None,
                program: String::new(),
                proc_id: false,
                transport: SyslogTransport::Udp(UdpTransport {
                    hostname: "localhost".to_string(),
                    port: 514,
                }),
            })
        );
    }

    #[test]
    fn test_all_fields() {
        let output = parse_with(vec![
            text(Element::SyslogHostname, "hostname", "LOCAL"),
            text(Element::SyslogProgram, "program", "ipfixcol2"),
            Content::new(Element::SyslogProcId, "procId", Value::Bool(true)),
            priority(vec![
                uint(Element::SyslogPriFacility, "facility", 23),
                uint(Element::SyslogPriSeverity, "severity", 0),
            ]),
            transport(vec![tcp(true)]),
        ])
        .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(output.hostname, HostnameMode::Local);
        assert_eq!(output.program, "ipfixcol2");
        assert!(output.proc_id);
        assert_eq!(output.priority.value(), 184);
        assert_eq!(
            output.transport,
            SyslogTransport::Tcp(TcpTransport {
                hostname: "syslog.example.org".to_string(),
                port: 601,
                blocking: true,
            })
        );
    }

    #[test]
    fn test_multiple_transports() {
        assert_eq!(
            err_msg(parse_with(vec![transport(vec![tcp(false), udp(514)])])),
            "Multiple syslog transport types are not allowed!"
        );
    }

    #[test]
    fn test_missing_transport() {
        assert_eq!(
            err_msg(parse_with(vec![transport(Vec::new())])),
            "Syslog transport type must be defined!"
        );
        assert_eq!(
            err_msg(parse_with(Vec::new())),
            "Syslog transport type must be defined!"
        );
    }

    #[test]
    fn test_priority_requires_both() {
        let only_facility = priority(vec![uint(Element::SyslogPriFacility, "facility", 1)]);
        assert_eq!(
            err_msg(parse_with(vec![only_facility, transport(vec![udp(514)])])),
            "Both syslog facility and severity must be set!"
        );

        let only_severity = priority(vec![uint(Element::SyslogPriSeverity, "severity", 1)]);
        assert_eq!(
            err_msg(parse_with(vec![only_severity, transport(vec![udp(514)])])),
            "Both syslog facility and severity must be set!"
        );
    }

    #[test]
    fn test_priority_ranges() {
        let pri = |facility, severity| {
            priority(vec![
                uint(Element::SyslogPriFacility, "facility", facility),
                uint(Element::SyslogPriSeverity, "severity", severity),
            ])
        };

        assert!(parse_with(vec![pri(0, 7), transport(vec![udp(514)])]).is_ok());
        assert_eq!(
            err_msg(parse_with(vec![pri(24, 0), transport(vec![udp(514)])])),
            "Syslog facility is out of range [0..23]"
        );
        assert_eq!(
            err_msg(parse_with(vec![pri(0, 8), transport(vec![udp(514)])])),
            "Syslog severity is out of range [0..7]"
        );
        assert!(parse_with(vec![pri(1000, 0), transport(vec![udp(514)])]).is_err());
    }

    #[test]
    fn test_program_printable() {
        for program in ["ipfix col", "ipfix\u{1}", "tab\there"] {
            assert_eq!(
                err_msg(parse_with(vec![
                    text(Element::SyslogProgram, "program", program),
                    transport(vec![udp(514)]),
                ])),
                "Invalid syslog identifier 'syslog'"
            );
        }
    }

    #[test]
    fn test_program_length() {
        let max = "p".repeat(48);
        let output = parse_with(vec![
            text(Element::SyslogProgram, "program", &max),
            transport(vec![udp(514)]),
        ]);
        assert_eq!(output.map(|o| o.program), Ok(max));

        let too_long = "p".repeat(49);
        assert_eq!(
            err_msg(parse_with(vec![
                text(Element::SyslogProgram, "program", &too_long),
                transport(vec![udp(514)]),
            ])),
            "Too long syslog identifier 'syslog'"
        );
    }

    #[test]
    fn test_unknown_hostname_mode() {
        assert_eq!(
            err_msg(parse_with(vec![
                text(Element::SyslogHostname, "hostname", "fqdn"),
                transport(vec![udp(514)]),
            ])),
            "Unknown syslog hostname type 'fqdn'"
        );
    }

    #[test]
    fn test_transport_port_range() {
        assert_eq!(
            err_msg(parse_with(vec![transport(vec![udp(0)])])),
            "Invalid port number of a <udp> syslog!"
        );
        assert_eq!(
            err_msg(parse_with(vec![transport(vec![udp(70000)])])),
            "Invalid port number of a <udp> syslog!"
        );
    }

    #[test]
    fn test_tcp_requires_all_fields() {
        let partial = nested(
            Element::SyslogTcp,
            "tcp",
            NodeKind::SyslogTcp,
            vec![
                text(Element::SyslogTcpHost, "hostname", "localhost"),
                uint(Element::SyslogTcpPort, "port", 601),
            ],
        );
        assert_eq!(
            err_msg(parse_with(vec![transport(vec![partial])])),
            "Blocking mode of a <tcp> syslog must be defined!"
        );
    }

    #[test]
    fn test_priority_value() {
        assert_eq!(SyslogPriority::default().value(), 134);
    }
}
