use crate::document::{Content, Context};
use crate::error::{Error, Result};
use crate::output::{require, Output, OutputKind};
use crate::schema::Element;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

const DEFAULT_WINDOW: u32 = 300;

/// Compression of the stored files.
#[derive(Debug, Clone, Copy, Default, Display, EnumString, PartialEq, Eq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Compression {
    #[default]
    None,
    Gzip,
}

/// Store records to files rotated by a time window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutput {
    pub name: String,
    /// Directory pattern, may contain strftime(3) conversions
    pub path_pattern: String,
    pub prefix: String,
    /// Length of the time window in seconds
    pub window_size: u32,
    /// Align window starts to multiples of the window size
    pub window_align: bool,
    pub compression: Compression,
}

impl Output for FileOutput {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> OutputKind {
        OutputKind::File
    }
}

struct Builder(FileOutput);

impl Default for Builder {
    fn default() -> Self {
        Builder(FileOutput {
            name: String::new(),
            path_pattern: String::new(),
            prefix: String::new(),
            window_size: DEFAULT_WINDOW,
            window_align: true,
            compression: Compression::None,
        })
    }
}

impl Builder {
    fn set(mut self, content: Content) -> Result<Self> {
        let output = &mut self.0;
        match content.id() {
            Element::FileName => output.name = content.into_string()?,
            Element::FilePath => output.path_pattern = content.into_string()?,
            Element::FilePrefix => output.prefix = content.into_string()?,
            Element::FileWindow => {
                output.window_size = u32::try_from(content.into_uint()?).map_err(|_| {
                    Error::invalid(format!("Windows size must be between 0..{}!", u32::MAX))
                })?;
            }
            Element::FileAlign => output.window_align = content.into_bool()?,
            Element::FileCompress => {
                let value = content.into_string()?;
                output.compression = Compression::from_str(&value).map_err(|_| {
                    Error::invalid(format!("Unknown compression algorithm '{value}'"))
                })?;
            }
            _ => return Err(Error::invalid("Unexpected element within <file>!")),
        }
        Ok(self)
    }

    fn finish(self) -> Result<FileOutput> {
        let output = self.0;
        require(&output.name, || {
            Error::invalid("Name of a <file> output must be defined!")
        })?;
        require(&output.path_pattern, || {
            Error::invalid(format!(
                "Element <path> of the output '{}' must be defined!",
                output.name
            ))
        })?;
        Ok(output)
    }
}

pub(crate) fn parse(ctx: Context) -> Result<FileOutput> {
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

    fn required() -> Vec<Content> {
        vec![
            text(Element::FileName, "name", "store"),
            text(Element::FilePath, "path", "/tmp/ipfixcol/flow/%Y/%m/%d/"),
        ]
    }

    fn parse_with(extra: Vec<Content>) -> Result<FileOutput> {
        let mut contents = required();
        contents.extend(extra);
        parse(Context::new(NodeKind::File, contents))
    }

    #[test]
    fn test_defaults() {
        let output = parse_with(Vec::new());
        assert_eq!(
            output,
            Ok(FileOutput {
                name: "store".to_string(),
                path_pattern: "/tmp/ipfixcol/flow/%Y/%m/%d/".to_string(),
                prefix: String::new(),
                window_size: 300,
                window_align: true,
                compression: Compression::None,
            })
        );
    }

    #[test]
    fn test_all_fields() {
        let output = parse_with(vec![
            text(Element::FilePrefix, "prefix", "json."),
            Content::new(Element::FileWindow, "timeWindow", Value::Uint(60)),
            Content::new(Element::FileAlign, "timeAlignment", Value::Bool(false)),
            text(Element::FileCompress, "compression", "GZip"),
        ]);
        let output = output.unwrap_or_else(|e| panic!("unexpected error: {e}"));
        assert_eq!(output.prefix, "json.");
        assert_eq!(output.window_size, 60);
        assert!(!output.window_align);
        assert_eq!(output.compression, Compression::Gzip);
    }

    #[test]
    fn test_unknown_compression() {
        let err = parse_with(vec![text(Element::FileCompress, "compression", "lz4")]).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Unknown compression algorithm 'lz4'".to_string())
        );
    }

    #[test]
    fn test_window_too_large() {
        let window = Content::new(
            Element::FileWindow,
            "timeWindow",
            Value::Uint(u64::from(u32::MAX) + 1),
        );
        assert!(parse_with(vec![window]).is_err());
    }

    #[test]
    fn test_empty_path() {
        let contents = vec![
            text(Element::FileName, "name", "store"),
            text(Element::FilePath, "path", ""),
        ];
        let err = parse(Context::new(NodeKind::File, contents)).err();
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("Element <path> of the output 'store' must be defined!".to_string())
        );
    }

    #[test]
    fn test_compression_tokens() {
        assert_eq!(Compression::from_str("NONE"), Ok(Compression::None));
        assert_eq!(Compression::from_str("gzip"), Ok(Compression::Gzip));
        assert!(Compression::from_str("zip").is_err());
        assert_eq!(Compression::Gzip.to_string(), "gzip");
    }
}
