#![forbid(unsafe_code)]

//! Configuration of the JSON output plugin.
//!
//! The configuration is an XML document with a `<params>` root. It holds a
//! few global formatting flags and a list of outputs (standard output, TCP
//! server, network sender, rotating files, Kafka producer and syslog).
//! [`Config::parse`] binds the document to a static schema, parses every
//! output, checks the set of outputs as a whole and returns an immutable
//! [`Config`].
//!
//! ```
//! use json_output_config::prelude::*;
//!
//! let params = r#"
//!     <params>
//!         <tcpFlags>raw</tcpFlags>
//!         <outputs>
//!             <print><name>console</name></print>
//!             <file>
//!                 <name>store</name>
//!                 <path>/tmp/flows/%Y/%m/%d/</path>
//!                 <compression>gzip</compression>
//!             </file>
//!         </outputs>
//!     </params>"#;
//!
//! let config = Config::parse(params).unwrap();
//! assert_eq!(config.format().tcp_flags, TcpFlagsFormat::Raw);
//! assert_eq!(config.outputs().len(), 2);
//! ```

pub mod document;
pub mod format;
pub mod output;
pub mod schema;
pub mod validate;

mod config;
mod error;

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::validate::{parse_version, Version};

///
/// Expose all structures a consumer of the configuration typically needs
///
/// ```
/// use json_output_config::prelude::*;
/// ```
pub mod prelude {
    pub use crate::format::{FormatConfig, ProtocolFormat, TcpFlagsFormat, TimestampFormat};
    pub use crate::output::{
        Compression, FileOutput, HostnameMode, KafkaOutput, Output, OutputKind, OutputRecord,
        OutputSet, Partition, PrintOutput, SendOutput, SendProtocol, ServerOutput, SyslogOutput,
        SyslogPriority, SyslogTransport, TcpTransport, UdpTransport,
    };
    pub use crate::{parse_version, Config, Error, Version};
}
