use crate::dashboard::{AppConfig, View};
use anyhow::Result;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: AppConfig,
    pub format: OutputFormat,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            format: OutputFormat::default(),
        }
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
    }

    /// Writes the rendered view in the selected format.
    ///
    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn write_view(&self, out: &mut impl Write, view: &View) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(out, "{view}\n")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, view)?;
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{render, Dashboard};

    fn globals() -> GlobalArgs {
        GlobalArgs::new(AppConfig {
            api_base_url: "/api".to_string(),
            origin: "http://localhost:8000".to_string(),
        })
    }

    #[test]
    fn test_global_args() {
        let args = globals();
        assert_eq!(args.config.api_base_url, "/api");
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
    }

    #[test]
    fn test_write_view_text() -> Result<()> {
        let mut out = Vec::new();
        globals().write_view(&mut out, &render(&Dashboard::new()))?;
        let text = String::from_utf8(out)?;
        assert!(text.starts_with("user list"));
        Ok(())
    }

    #[test]
    fn test_write_view_json() -> Result<()> {
        let mut args = globals();
        args.set_format(OutputFormat::Json);
        let mut out = Vec::new();
        args.write_view(&mut out, &render(&Dashboard::new()))?;
        let value: serde_json::Value = serde_json::from_slice(&out)?;
        assert_eq!(value["results"]["kind"], "empty");
        Ok(())
    }
}
