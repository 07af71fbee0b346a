//! Section selector and the panel visibility derived from it.

use std::fmt;
use std::str::FromStr;

use posit_hub_common::HubError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Chat,
    Upload,
    Search,
    Help,
}

impl Section {
    /// Radio order on the page.
    pub const ALL: [Section; 4] = [Section::Chat, Section::Upload, Section::Search, Section::Help];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Chat   => "chat",
            Section::Upload => "upload",
            Section::Search => "search",
            Section::Help   => "help",
        }
    }

    /// Radio button label.
    pub fn label(self) -> &'static str {
        match self {
            Section::Chat   => "Chat",
            Section::Upload => "Upload",
            Section::Search => "Search",
            Section::Help   => "Help",
        }
    }

    /// Panel heading.
    pub fn heading(self) -> &'static str {
        match self {
            Section::Chat   => "Chat",
            Section::Upload => "Upload Documents",
            Section::Search => "Search Documents",
            Section::Help   => "Help & Information",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| HubError::InvalidInput(format!("unknown section: {s}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub section: Section,
    pub visible: bool,
}

/// All four panels; only the active one is visible.
pub fn panels(active: Section) -> [Panel; 4] {
    Section::ALL.map(|section| Panel { section, visible: section == active })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_section() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>().unwrap(), section);
        }
    }

    #[test]
    fn test_unknown_section_is_invalid_input() {
        let err = "settings".parse::<Section>().unwrap_err();
        assert!(matches!(err, HubError::InvalidInput(_)));
        // Identifiers are case-sensitive
        assert!("Chat".parse::<Section>().is_err());
    }

    #[test]
    fn test_exactly_one_panel_visible() {
        for active in Section::ALL {
            let panels = panels(active);
            let visible: Vec<_> = panels.iter().filter(|p| p.visible).collect();
            assert_eq!(visible.len(), 1);
            assert_eq!(visible[0].section, active);
        }
    }

    #[test]
    fn test_default_is_chat() {
        assert_eq!(Section::default(), Section::Chat);
    }
}
