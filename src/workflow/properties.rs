use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// An ordered set of job properties.
///
/// Keys keep the position of their first insertion; inserting an existing
/// key replaces its value in place.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a `key=value` properties file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read properties from {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Parses `key=value` lines.
    ///
    /// Blank lines, `#` comments and lines without `=` are ignored. Keys and
    /// values are trimmed; the value is everything after the first `=`.
    pub fn parse(text: &str) -> Self {
        let mut props = Self::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                props.insert(key.trim(), value.trim());
            }
        }
        props
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the properties as a Hadoop `<configuration>` document.
    pub fn to_configuration_xml(&self) -> String {
        let mut xml = vec!["<configuration>".to_string()];
        for (name, value) in self.iter() {
            xml.push("  <property>".to_string());
            xml.push(format!("    <name>{}</name>", escape_xml(name)));
            xml.push(format!("    <value>{}</value>", escape_xml(value)));
            xml.push("  </property>".to_string());
        }
        xml.push("</configuration>".to_string());
        xml.join("\n")
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let props = Properties::parse(
            "# cluster\n\
             nameNode = hdfs://namenode:8020\n\
             \n\
             jobTracker=resourcemanager:8032\n\
             not a property\n\
             queueName=default=high\n",
        );
        assert_eq!(props.len(), 3);
        assert_eq!(props.get("nameNode"), Some("hdfs://namenode:8020"));
        assert_eq!(props.get("jobTracker"), Some("resourcemanager:8032"));
        assert_eq!(props.get("queueName"), Some("default=high"));
        assert_eq!(props.get("not a property"), None);
    }

    #[test]
    fn insert_overrides_in_place() {
        let mut props = Properties::parse("a=1\nb=2\na=3\n");
        props.insert("c", "4");
        props.insert("b", "5");
        let entries: Vec<_> = props.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "5"), ("c", "4")]);
    }

    #[test]
    fn configuration_xml_layout() {
        let mut props = Properties::new();
        props.insert("user.name", "etl");
        props.insert("filter", "a<b && c");
        assert_eq!(
            props.to_configuration_xml(),
            "<configuration>\n\
             \x20 <property>\n\
             \x20   <name>user.name</name>\n\
             \x20   <value>etl</value>\n\
             \x20 </property>\n\
             \x20 <property>\n\
             \x20   <name>filter</name>\n\
             \x20   <value>a&lt;b &amp;&amp; c</value>\n\
             \x20 </property>\n\
             </configuration>"
        );
    }

    #[test]
    fn empty_configuration() {
        assert!(Properties::new().is_empty());
        assert_eq!(
            Properties::new().to_configuration_xml(),
            "<configuration>\n</configuration>"
        );
    }
}
