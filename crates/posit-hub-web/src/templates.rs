//! Page templates, embedded at compile time and rendered with minijinja.

use minijinja::{context, Environment};
use posit_hub_common::{HubError, Result};
use posit_hub_config::UiConfig;
use posit_hub_reactive::{controls, Section};
use serde::Serialize;

const INDEX: &str = "index.html";

pub struct Templates {
    env: Environment<'static>,
}

#[derive(Serialize)]
struct SectionView {
    id: &'static str,
    label: &'static str,
    heading: &'static str,
    selected: bool,
}

impl Templates {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../templates/index.html"))
            .map_err(|e| HubError::Template(e.to_string()))?;
        Ok(Self { env })
    }

    /// Render the single page. Every session starts on the default section.
    pub fn render_index(&self, ui: &UiConfig) -> Result<String> {
        let selected = Section::default();
        let sections: Vec<SectionView> = Section::ALL
            .into_iter()
            .map(|s| SectionView { id: s.as_str(), label: s.label(), heading: s.heading(), selected: s == selected })
            .collect();

        self.env
            .get_template(INDEX)
            .and_then(|tmpl| {
                tmpl.render(context! {
                    ui => ui,
                    sections => sections,
                    section_input => controls::SECTION,
                    outputs => controls::OUTPUTS,
                })
            })
            .map_err(|e| HubError::Template(e.to_string()))
    }
}
