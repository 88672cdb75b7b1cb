//! The static info screen: a title and a disclosure list.

/// A link inside a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub trigger: &'static str,
    pub body: &'static str,
    pub link: Option<Link>,
    open: bool,
}

impl Section {
    pub const fn new(trigger: &'static str, body: &'static str, link: Option<Link>) -> Self {
        Self {
            trigger,
            body,
            link,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

/// Several sections may be open at the same time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoScreen {
    pub title: &'static str,
    sections: Vec<Section>,
}

impl Default for InfoScreen {
    fn default() -> Self {
        Self {
            title: "Welcome!",
            sections: vec![
                Section::new(
                    "What API am I using?",
                    "Weather data comes from Open Weather.",
                    Some(Link {
                        label: "Open Weather",
                        href: "https://openweathermap.org/",
                    }),
                ),
                Section::new(
                    "What can I do here?",
                    "Type a city name on the weather screen and submit it to see its current \
                     conditions. Refresh to fetch them again for the same city.",
                    None,
                ),
            ],
        }
    }
}

impl InfoScreen {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Flip one section. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(section) = self.sections.get_mut(index) {
            section.open = !section.open;
        }
    }

    pub fn expand_all(&mut self) {
        for section in &mut self.sections {
            section.open = true;
        }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.sections.get(index).is_some_and(Section::is_open)
    }
}
