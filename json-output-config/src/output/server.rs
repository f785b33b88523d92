use crate::document::{Content, Context};
use crate::error::{Error, Result};
use crate::output::{require, to_port, Output, OutputKind};
use crate::schema::Element;

/// Serve records to clients connecting over TCP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOutput {
    pub name: String,
    /// Local port to listen on
    pub port: u16,
    /// Block when a client cannot keep up
    pub blocking: bool,
}

impl Output for ServerOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OutputKind {
        OutputKind::Server
    }
}

#[derive(Default)]
struct Builder {
    name: String,
    port: Option<u16>,
    blocking: bool,
}

impl Builder {
    fn set(mut self, content: Content) -> Result<Self> {
        match content.id() {
            Element::ServerName => self.name = content.into_string()?,
            Element::ServerPort => {
                let port = to_port(content.into_uint()?, || {
                    Error::invalid("Invalid port number of a <server> output!")
                })?;
                self.port = Some(port);
            }
            Element::ServerBlock => self.blocking = content.into_bool()?,
            _ => return Err(Error::invalid("Unexpected element within <server>!")),
        }
        Ok(self)
    }

    fn finish(self) -> Result<ServerOutput> {
        require(&self.name, || {
            Error::invalid("Name of a <server> output must be defined!")
        })?;
        let port = self.port.ok_or_else(|| {
            Error::invalid(format!(
                "Port of the <server> output '{}' must be defined!",
                self.name
            ))
        })?;

        Ok(ServerOutput {
            name: self.name,
            port,
            blocking: self.blocking,
        })
    }
}

pub(crate) fn parse(ctx: Context) -> Result<ServerOutput> {
    ctx.into_iter()
        .try_fold(Builder::default(), Builder::set)?
        .finish()
}
