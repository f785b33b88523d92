use crate::document::{Content, Context};
use crate::error::{Error, Result};
use crate::output::{require, Output, OutputKind};
use crate::schema::Element;

/// Write records to the standard output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintOutput {
    pub name: String,
}

impl Output for PrintOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OutputKind {
        OutputKind::Print
    }
}

#[derive(Default)]
struct Builder {
    name: String,
}

impl Builder {
    fn set(mut self, content: Content) -> Result<Self> {
        match content.id() {
            Element::PrintName => self.name = content.into_string()?,
            _ => return Err(Error::invalid("Unexpected element within <print>!")),
        }
        Ok(self)
    }

    fn finish(self) -> Result<PrintOutput> {
        require(&self.name, || {
            Error::invalid("Name of a <print> output must be defined!")
        })?;
        Ok(PrintOutput { name: self.name })
    }
}

pub(crate) fn parse(ctx: Context) -> Result<PrintOutput> {
    ctx.into_iter()
        .try_fold(Builder::default(), Builder::set)?
        .finish()
}
