use crate::document::{Content, Context};
use crate::error::{Error, Result};
use crate::output::{require, to_port, Output, OutputKind};
use crate::schema::Element;
use crate::validate::{choose_boolean, is_valid_address};
use strum_macros::Display;

const DEFAULT_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4739;

/// Transport protocol of a [`SendOutput`].
#[derive(Debug, Clone, Copy, Default, Display, PartialEq, Eq)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SendProtocol {
    #[default]
    Udp,
    Tcp,
}

/// Send records to a remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutput {
    pub name: String,
    /// IPv4 or IPv6 address of the destination
    pub addr: String,
    pub port: u16,
    pub proto: SendProtocol,
    /// Block when the connection is congested (TCP only)
    pub blocking: bool,
}

impl Default for SendOutput {
    fn default() -> Self {
        Self {
            name: String::new(),
            addr: DEFAULT_ADDR.to_string(),
            port: DEFAULT_PORT,
            proto: SendProtocol::Udp,
            blocking: false,
        }
    }
}

impl Output for SendOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OutputKind {
        OutputKind::Send
    }
}

#[derive(Default)]
struct Builder(SendOutput);

impl Builder {
    fn set(mut self, content: Content) -> Result<Self> {
        let output = &mut self.0;
        match content.id() {
            Element::SendName => output.name = content.into_string()?,
            Element::SendIp => output.addr = content.into_string()?,
            Element::SendPort => {
                output.port = to_port(content.into_uint()?, || {
                    Error::invalid("Invalid port number of a <send> output!")
                })?;
            }
            Element::SendProto => {
                let udp = choose_boolean("protocol", &content.into_string()?, "UDP", "TCP")?;
                output.proto = if udp {
                    SendProtocol::Udp
                } else {
                    SendProtocol::Tcp
                };
            }
            Element::SendBlock => output.blocking = content.into_bool()?,
            _ => return Err(Error::invalid("Unexpected element within <send>!")),
        }
        Ok(self)
    }

    fn finish(self) -> Result<SendOutput> {
        let output = self.0;
        require(&output.name, || {
            Error::invalid("Name of a <send> output must be defined!")
        })?;

        if !is_valid_address(&output.addr) {
            return Err(Error::invalid(format!(
                "Value of the element <ip> of the output <send> '{}' is not a valid IPv4/IPv6 address",
                output.name
            )));
        }

        Ok(output)
    }
}

pub(crate) fn parse(ctx: Context) -> Result<SendOutput> {
    ctx.into_iter()
        .try_fold(Builder::default(), Builder::set)?
        .finish()
}
