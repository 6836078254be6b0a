//! Delivery of property bags to the host.
//!
//! The locator's job ends at a validated [`ModuleProperties`]; a
//! [`PropertySink`] is whatever the host uses to act on it.

use std::io::Write;

use crate::error::Result;
use crate::properties::ModuleProperties;

/// Receives computed property bags.
pub trait PropertySink {
    fn append(&mut self, props: ModuleProperties) -> Result<()>;
}

impl<S: PropertySink + ?Sized> PropertySink for &mut S {
    fn append(&mut self, props: ModuleProperties) -> Result<()> {
        (**self).append(props)
    }
}

/// Keeps every bag in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub modules: Vec<ModuleProperties>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag emitted for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ModuleProperties> {
        self.modules.iter().find(|m| m.name == name)
    }
}

impl PropertySink for CollectingSink {
    fn append(&mut self, props: ModuleProperties) -> Result<()> {
        self.modules.push(props);
        Ok(())
    }
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PropertySink for JsonSink<W> {
    fn append(&mut self, props: ModuleProperties) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &props)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module_type::ModuleType;

    #[test]
    fn collecting_sink_keeps_order() {
        let mut sink = CollectingSink::new();
        sink.append(ModuleProperties::new("a", ModuleType::LlvmHostDefaults)).unwrap();
        sink.append(ModuleProperties::new("b", ModuleType::ClangBuiltinHeaders)).unwrap();
        assert_eq!(sink.modules.len(), 2);
        assert_eq!(sink.modules[0].name, "a");
        assert!(sink.get("b").is_some());
        assert!(sink.get("c").is_none());
    }

    #[test]
    fn json_sink_writes_lines() {
        let mut sink = JsonSink::new(Vec::new());
        sink.append(ModuleProperties::new("a", ModuleType::LlvmHostDefaults)).unwrap();
        sink.append(ModuleProperties::new("b", ModuleType::LlvmHostDefaults)).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: ModuleProperties = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.name, "a");
    }
}
