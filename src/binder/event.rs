//! Change events flowing through the binder

/// What caused a master's change handler to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A genuine user edit
    User,
    /// The synthetic event fired once per master after binding
    PageLoad,
    /// A CLONE dependency wrote into this field
    Clone { source: String },
}

/// A change of one master field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub origin: ChangeOrigin,
    /// DOM ids of the masters this change was cloned through, oldest first
    chain: Vec<String>,
}

impl ChangeEvent {
    pub fn user() -> Self {
        Self {
            origin: ChangeOrigin::User,
            chain: Vec::new(),
        }
    }

    pub fn page_load() -> Self {
        Self {
            origin: ChangeOrigin::PageLoad,
            chain: Vec::new(),
        }
    }

    pub fn is_page_load(&self) -> bool {
        self.origin == ChangeOrigin::PageLoad
    }

    /// Event fired on a slave after `source` cloned its value into it
    pub fn cloned_from(&self, source: &str) -> Self {
        let mut chain = self.chain.clone();
        chain.push(source.to_string());
        Self {
            origin: ChangeOrigin::Clone {
                source: source.to_string(),
            },
            chain,
        }
    }

    /// Whether this change already passed through `dom_id`
    pub fn has_visited(&self, dom_id: &str) -> bool {
        self.chain.iter().any(|id| id == dom_id)
    }

    pub fn chain(&self) -> &[String] {
        &self.chain
    }
}
