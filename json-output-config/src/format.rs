//! Global formatting flags of the JSON records.

use crate::document::{unexpected_element, Content};
use crate::error::Result;
use crate::schema::{Element, NodeKind};
use crate::validate::choose_boolean;
use strum_macros::Display;

/// How TCP flags are written.
#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum TcpFlagsFormat {
    /// Text such as `".A..S."`
    #[default]
    Formatted,
    /// Plain number
    Raw,
}

/// How timestamps are written.
#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum TimestampFormat {
    /// ISO 8601 text
    #[default]
    Formatted,
    /// Milliseconds since the Unix epoch
    Unix,
}

/// How protocol identifiers are written.
#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum ProtocolFormat {
    /// Protocol name such as `"TCP"`
    #[default]
    Formatted,
    /// Protocol number
    Raw,
}

/// Formatting flags applied to every converted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    pub tcp_flags: TcpFlagsFormat,
    pub timestamp: TimestampFormat,
    pub proto: ProtocolFormat,
    /// Skip fields with unknown definitions
    pub ignore_unknown: bool,
    /// Skip records described by Options Templates
    pub ignore_options: bool,
    /// Keep non-printable characters in strings
    pub non_printable: bool,
    /// Use numeric identifiers instead of field names
    pub numeric_names: bool,
    /// Interpret octet arrays as unsigned integers when possible
    pub octets_as_uint: bool,
    /// Split biflow records into two unidirectional ones
    pub split_biflow: bool,
    /// Add detailed information about each record
    pub detailed_info: bool,
    /// Convert (Options) Template records too
    pub template_info: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            tcp_flags: TcpFlagsFormat::Formatted,
            timestamp: TimestampFormat::Formatted,
            proto: ProtocolFormat::Formatted,
            ignore_unknown: true,
            ignore_options: true,
            non_printable: true,
            numeric_names: false,
            octets_as_uint: true,
            split_biflow: false,
            detailed_info: false,
            template_info: false,
        }
    }
}

impl FormatConfig {
    /// Apply one formatting element of the root node.
    pub(crate) fn apply(&mut self, content: Content) -> Result<()> {
        match content.id() {
            Element::FmtTcpFlags => {
                let formatted =
                    choose_boolean("tcpFlags", &content.into_string()?, "formatted", "raw")?;
                self.tcp_flags = if formatted {
                    TcpFlagsFormat::Formatted
                } else {
                    TcpFlagsFormat::Raw
                };
            }
            Element::FmtTimestamp => {
                let formatted =
                    choose_boolean("timestamp", &content.into_string()?, "formatted", "unix")?;
                self.timestamp = if formatted {
                    TimestampFormat::Formatted
                } else {
                    TimestampFormat::Unix
                };
            }
            Element::FmtProto => {
                let formatted =
                    choose_boolean("protocol", &content.into_string()?, "formatted", "raw")?;
                self.proto = if formatted {
                    ProtocolFormat::Formatted
                } else {
                    ProtocolFormat::Raw
                };
            }
            Element::FmtUnknown => self.ignore_unknown = content.into_bool()?,
            Element::FmtOptions => self.ignore_options = content.into_bool()?,
            Element::FmtNonPrint => self.non_printable = content.into_bool()?,
            Element::FmtNumeric => self.numeric_names = content.into_bool()?,
            Element::FmtOctetAsUint => self.octets_as_uint = content.into_bool()?,
            Element::FmtBiflowSplit => self.split_biflow = content.into_bool()?,
            Element::FmtDetailedInfo => self.detailed_info = content.into_bool()?,
            Element::FmtTemplateInfo => self.template_info = content.into_bool()?,
            _ => return Err(unexpected_element(NodeKind::Params)),
        }

        Ok(())
    }
}
