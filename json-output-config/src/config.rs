use crate::document::{parse_document, unexpected_element, Context};
use crate::error::{Error, Result};
use crate::format::FormatConfig;
use crate::output::{OutputKind, OutputRecord, OutputSet};
use crate::schema::{Element, NodeKind};
use std::str::FromStr;

/// Validated configuration of the JSON output.
///
/// A `Config` only exists if the whole document was accepted: there is no
/// partially parsed state visible to callers.
///
/// ```
/// use json_output_config::Config;
///
/// let config = Config::parse(
///     "<params><outputs><send><name>collector</name></send></outputs></params>",
/// )
/// .unwrap();
/// assert_eq!(config.outputs().sends[0].port, 4739);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    format: FormatConfig,
    outputs: OutputSet,
}

impl Config {
    /// Parse and validate a configuration document.
    ///
    /// Any failure is reported as [`Error::Configuration`] with the underlying
    /// message as its detail.
    pub fn parse(params: &str) -> Result<Self> {
        Self::load(params).map_err(Error::into_configuration)
    }

    fn load(params: &str) -> Result<Self> {
        let mut parser = Parser::default();

        let root = parse_document(params)?;
        log::debug!("Configuration document bound to the schema");

        parser.parse_params(root)?;
        parser.outputs.check_validity()?;

        log::info!(
            "Configuration loaded with {} output(s)",
            parser.outputs.len()
        );
        Ok(Config {
            format: parser.format,
            outputs: parser.outputs,
        })
    }

    pub fn format(&self) -> &FormatConfig {
        &self.format
    }

    pub fn outputs(&self) -> &OutputSet {
        &self.outputs
    }

    pub fn into_parts(self) -> (FormatConfig, OutputSet) {
        (self.format, self.outputs)
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Config::parse(s)
    }
}

/// Mutable state of a single load, starting from the defaults.
#[derive(Default)]
struct Parser {
    format: FormatConfig,
    outputs: OutputSet,
}

impl Parser {
    fn parse_params(&mut self, params: Context) -> Result<()> {
        for content in params {
            match content.id() {
                Element::OutputList => self.parse_outputs(content.into_context()?)?,
                _ => self.format.apply(content)?,
            }
        }
        Ok(())
    }

    fn parse_outputs(&mut self, outputs: Context) -> Result<()> {
        for content in outputs {
            let kind = match content.id() {
                Element::OutputPrint => OutputKind::Print,
                Element::OutputServer => OutputKind::Server,
                Element::OutputSend => OutputKind::Send,
                Element::OutputFile => OutputKind::File,
                Element::OutputKafka => OutputKind::Kafka,
                Element::OutputSyslog => OutputKind::Syslog,
                _ => return Err(unexpected_element(NodeKind::Outputs)),
            };

            let record = OutputRecord::parse(kind, content.into_context()?)?;
            self.outputs.push(record);
        }
        Ok(())
    }
}
