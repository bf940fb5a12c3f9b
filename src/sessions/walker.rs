//! Depth-first walk over the SecureCRT session tree.
//!
//! # Overview
//!
//! SecureCRT exports its session folders as nested `<key>` elements. The
//! walker starts at the `<key name="Sessions">` element, descends through
//! folder keys, and turns every key without nested keys into a
//! [`SessionRecord`]:
//!
//! ```xml
//! <key name="Sessions">
//!   <key name="Work">
//!     <key name="Server1">
//!       <string name="Hostname">10.0.0.5</string>
//!       <dword name="[SSH2] Port">2222</dword>
//!     </key>
//!   </key>
//! </key>
//! ```
//!
//! yields `Sessions/Work/Server1,10.0.0.5,2222,SSH2`.
//!
//! # Example
//!
//! ```
//! use extract_sessions::config::ExtractOptions;
//! use extract_sessions::sessions::SessionWalker;
//! use extract_sessions::xml::parse_document;
//!
//! let xml = r#"<key name="Sessions"><key name="db"><string name="Hostname">db1</string></key></key>"#;
//! let document = parse_document(xml.as_bytes(), "inline").unwrap();
//!
//! let options = ExtractOptions::default();
//! let (records, summary) = SessionWalker::new(&options).walk(&document, "inline").unwrap();
//! assert_eq!(records[0].name, "Sessions/db");
//! assert_eq!(summary.sessions, 1);
//! ```

use crate::config::{ExtractOptions, PortPolicy};
use crate::error::ExtractError;
use crate::xml::XmlElement;

use super::record::{SessionRecord, DEFAULT_PORT, PATH_SEPARATOR};

/// Tag of folder and session elements.
pub const KEY_TAG: &str = "key";
/// Tag of text-valued fields.
pub const STRING_TAG: &str = "string";
/// Tag of integer-valued fields.
pub const DWORD_TAG: &str = "dword";

/// Name of the key holding all sessions.
pub const SESSIONS_ROOT: &str = "Sessions";
/// Field holding the host name or address.
pub const HOSTNAME_FIELD: &str = "Hostname";
/// Field holding the SSH2 port.
pub const PORT_FIELD: &str = "[SSH2] Port";
/// Field holding the protocol name.
pub const PROTOCOL_FIELD: &str = "Protocol Name";

/// Counters collected during a walk, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Whether a `Sessions` key was found at all
    pub root_found: bool,
    /// Sessions emitted
    pub sessions: usize,
    /// Keys with no children at all, skipped
    pub empty_keys: usize,
    /// Leaves skipped because they had no hostname
    pub missing_hostname: usize,
    /// Sessions whose port was replaced by the default
    pub port_fallbacks: usize,
}

/// Session tree walker.
#[derive(Debug)]
pub struct SessionWalker<'a> {
    options: &'a ExtractOptions,
}

impl<'a> SessionWalker<'a> {
    /// Create a walker using the given options.
    #[must_use]
    pub fn new(options: &'a ExtractOptions) -> Self {
        Self { options }
    }

    /// Collect every session below the `Sessions` key of `document`.
    ///
    /// Records come out depth-first, children in document order. A document
    /// without a `Sessions` key gives an empty list unless strict mode is on.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::FieldParse`] for a bad port value under
    ///   [`PortPolicy::Abort`]
    /// - [`ExtractError::MissingSessions`] when strict and there is no root
    pub fn walk(
        &self,
        document: &XmlElement,
        source_name: &str,
    ) -> Result<(Vec<SessionRecord>, WalkSummary), ExtractError> {
        let mut summary = WalkSummary::default();
        let mut records = Vec::new();

        let Some(root) = document.find(&|e: &XmlElement| e.is(KEY_TAG, SESSIONS_ROOT)) else {
            if self.options.strict {
                return Err(ExtractError::MissingSessions {
                    source_name: source_name.to_string(),
                });
            }
            log::warn!("No Sessions key in {}, nothing to export", source_name);
            return Ok((records, summary));
        };
        summary.root_found = true;

        let mut path = Vec::new();
        if !self.options.strip_root {
            path.push(SESSIONS_ROOT.to_string());
        }

        // The root is always a folder, even when it has no nested keys.
        for child in root.children_tagged(KEY_TAG) {
            self.visit(child, &mut path, &mut records, &mut summary)?;
        }

        log::debug!(
            "Walked {}: {} sessions, {} empty keys, {} without hostname, {} port fallbacks",
            source_name,
            summary.sessions,
            summary.empty_keys,
            summary.missing_hostname,
            summary.port_fallbacks
        );
        Ok((records, summary))
    }

    fn visit(
        &self,
        node: &XmlElement,
        path: &mut Vec<String>,
        records: &mut Vec<SessionRecord>,
        summary: &mut WalkSummary,
    ) -> Result<(), ExtractError> {
        path.push(node.attr("name").unwrap_or_default().to_string());

        let result = if node.children.is_empty() {
            log::trace!("Skipping empty key {}", path.join(PATH_SEPARATOR));
            summary.empty_keys += 1;
            Ok(())
        } else if node.children_tagged(KEY_TAG).next().is_some() {
            node.children_tagged(KEY_TAG)
                .try_for_each(|child| self.visit(child, path, records, summary))
        } else {
            self.extract(node, path, summary).map(|record| {
                if let Some(record) = record {
                    records.push(record);
                }
            })
        };

        path.pop();
        result
    }

    /// Read the fields of a leaf key. `None` means the leaf is filtered out.
    fn extract(
        &self,
        node: &XmlElement,
        path: &[String],
        summary: &mut WalkSummary,
    ) -> Result<Option<SessionRecord>, ExtractError> {
        let mut hostname: Option<String> = None;
        let mut port_text: Option<&str> = None;
        let mut protocol: Option<String> = None;

        // Later duplicates overwrite earlier ones.
        for field in &node.children {
            match (field.tag.as_str(), field.attr("name")) {
                (STRING_TAG, Some(HOSTNAME_FIELD)) => hostname = Some(field.text.trim().to_string()),
                (DWORD_TAG, Some(PORT_FIELD)) => port_text = Some(field.text.trim()),
                (STRING_TAG, Some(PROTOCOL_FIELD)) => protocol = Some(field.text.trim().to_string()),
                _ => {}
            }
        }

        let name = path.join(PATH_SEPARATOR);

        if self.options.require_hostname && hostname.as_deref().map_or(true, str::is_empty) {
            log::debug!("Skipping {}: no hostname", name);
            summary.missing_hostname += 1;
            return Ok(None);
        }

        let port = match port_text.filter(|text| !text.is_empty()) {
            None => None,
            Some(text) => match text.parse::<u16>() {
                Ok(port) => Some(port),
                Err(_) => match self.options.port_policy {
                    PortPolicy::Abort => {
                        return Err(ExtractError::FieldParse {
                            session: name,
                            field: PORT_FIELD.to_string(),
                            value: text.to_string(),
                        });
                    }
                    PortPolicy::FallBackToDefault => {
                        log::warn!(
                            "Session {}: invalid port '{}', using {}",
                            name,
                            text,
                            DEFAULT_PORT
                        );
                        summary.port_fallbacks += 1;
                        None
                    }
                },
            },
        };

        let protocol = protocol.filter(|p| !p.is_empty());
        let record = SessionRecord::new(path, hostname, port, protocol);
        log::trace!("Session {} -> {}:{}", record.name, record.address, record.port);
        summary.sessions += 1;
        Ok(Some(record))
    }
}
