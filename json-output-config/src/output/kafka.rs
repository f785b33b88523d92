use crate::document::{Content, Context};
use crate::error::{Error, Result};
use crate::output::{require, Output, OutputKind};
use crate::schema::Element;
use crate::validate::parse_version;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Target partition of a Kafka producer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Partition {
    /// Let the partitioner decide
    #[default]
    Unassigned,
    Fixed(i32),
}

impl Partition {
    /// Value understood by Kafka clients, `-1` stands for unassigned.
    pub fn as_raw(&self) -> i32 {
        match self {
            Partition::Unassigned => -1,
            Partition::Fixed(id) => *id,
        }
    }
}

impl FromStr for Partition {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("unassigned") {
            return Ok(Partition::Unassigned);
        }

        s.parse::<i32>()
            .ok()
            .filter(|id| *id >= 0)
            .map(Partition::Fixed)
            .ok_or_else(|| Error::invalid("Invalid partition number of a <kafka> output!"))
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Unassigned => write!(f, "unassigned"),
            Partition::Fixed(id) => write!(f, "{id}"),
        }
    }
}

/// Produce records to a Kafka topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KafkaOutput {
    pub name: String,
    /// Comma separated list of brokers
    pub brokers: String,
    pub topic: String,
    pub partition: Partition,
    /// Broker version to assume if the broker cannot report it
    pub broker_fallback: Option<String>,
    /// Block when the producer queue is full instead of dropping records
    pub blocking: bool,
    /// Add throughput oriented producer options
    pub perf_tuning: bool,
    /// Extra client properties, applied last
    pub properties: BTreeMap<String, String>,
}

impl Output for KafkaOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OutputKind {
        OutputKind::Kafka
    }
}

struct Builder(KafkaOutput);

impl Default for Builder {
    fn default() -> Self {
        Builder(KafkaOutput {
            name: String::new(),
            brokers: String::new(),
            topic: String::new(),
            partition: Partition::Unassigned,
            broker_fallback: None,
            blocking: false,
            perf_tuning: true,
            properties: BTreeMap::new(),
        })
    }
}

impl Builder {
    fn set(mut self, content: Content) -> Result<Self> {
        let output = &mut self.0;
        match content.id() {
            Element::KafkaName => output.name = content.into_string()?,
            Element::KafkaBrokers => output.brokers = content.into_string()?,
            Element::KafkaTopic => output.topic = content.into_string()?,
            Element::KafkaPartition => output.partition = content.into_string()?.parse()?,
            Element::KafkaBrokerVersion => {
                let version = content.into_string()?;
                output.broker_fallback = (!version.is_empty()).then_some(version);
            }
            Element::KafkaBlocking => output.blocking = content.into_bool()?,
            Element::KafkaPerfTuning => output.perf_tuning = content.into_bool()?,
            Element::KafkaProperty => {
                let (key, value) = parse_property(content.into_context()?)?;
                if let Some(previous) = output.properties.insert(key.clone(), value) {
                    log::warn!(
                        "Property '{key}' of the <kafka> output redefined (previous value '{previous}')"
                    );
                }
            }
            _ => return Err(Error::invalid("Unexpected element within <kafka>!")),
        }
        Ok(self)
    }

    fn finish(self) -> Result<KafkaOutput> {
        let output = self.0;
        require(&output.name, || {
            Error::invalid("Name of a <kafka> output must be defined!")
        })?;
        require(&output.brokers, || {
            Error::invalid("List of <kafka> brokers must be specified!")
        })?;
        require(&output.topic, || {
            Error::invalid("Topic of <kafka> output must be specified!")
        })?;

        // At least major and minor version are expected
        if let Some(version) = &output.broker_fallback {
            parse_version(version).map_err(|_| {
                Error::invalid("Broker version of a <kafka> output is not valid!")
            })?;
        }

        Ok(output)
    }
}

fn parse_property(ctx: Context) -> Result<(String, String)> {
    let mut key = String::new();
    let mut value = String::new();

    for content in ctx {
        match content.id() {
            Element::KafkaPropKey => key = content.into_string()?,
            Element::KafkaPropValue => value = content.into_string()?,
            _ => return Err(Error::invalid("Unexpected element within <property>!")),
        }
    }

    require(&key, || {
        Error::invalid("Property key of a <kafka> output cannot be empty!")
    })?;
    Ok((key, value))
}

pub(crate) fn parse(ctx: Context) -> Result<KafkaOutput> {
    ctx.into_iter()
        .try_fold(Builder::default(), Builder::set)?
        .finish()
}
