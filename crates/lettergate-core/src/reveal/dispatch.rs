//! Click classification for the delegated document listener.
//!
//! A click target is matched, in table order, against each role's selector
//! using ancestor-inclusive lookup. The first role that matches wins.

use serde::{Deserialize, Serialize};

use crate::config::LettersConfig;

/// Element roles the reveal controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Trigger,
    CloseControl,
}

/// The slice of a document element the dispatcher needs.
pub trait MarkupElement: Sized {
    /// Nearest ancestor-or-self matching `selector`.
    fn closest(&self, selector: &str) -> Option<Self>;

    fn attribute(&self, name: &str) -> Option<String>;

    fn has_class(&self, class: &str) -> bool;

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// Every way a trigger can be flagged as inert. The flags are written by
/// different code paths, so any one of them is enough.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerFlags {
    pub native_disabled: bool,
    pub aria_disabled: bool,
    pub locked_class: bool,
}

impl TriggerFlags {
    pub fn is_inert(&self) -> bool {
        self.native_disabled || self.aria_disabled || self.locked_class
    }
}

/// A classified user interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Activate {
        content_ref: String,
        flags: TriggerFlags,
    },
    Close,
    Cancel,
}

#[derive(Debug, Clone)]
struct Route {
    role: Role,
    selector: String,
}

#[derive(Debug, Clone)]
pub struct DispatchTable {
    routes: Vec<Route>,
    template_attr: String,
    locked_class: String,
}

impl DispatchTable {
    pub fn new(template_attr: impl Into<String>, locked_class: impl Into<String>) -> Self {
        Self {
            routes: Vec::new(),
            template_attr: template_attr.into(),
            locked_class: locked_class.into(),
        }
    }

    pub fn with_route(mut self, role: Role, selector: impl Into<String>) -> Self {
        self.routes.push(Route {
            role,
            selector: selector.into(),
        });
        self
    }

    pub fn from_config(cfg: &LettersConfig) -> Self {
        Self::new(cfg.template_attr.clone(), cfg.locked_class.clone())
            .with_route(Role::Trigger, cfg.trigger_selector.clone())
            .with_route(Role::CloseControl, cfg.close_selector.clone())
    }

    /// Find the first role whose selector matches the target or one of its
    /// ancestors.
    pub fn resolve<E: MarkupElement>(&self, target: &E) -> Option<(Role, E)> {
        self.routes
            .iter()
            .find_map(|route| target.closest(&route.selector).map(|el| (route.role, el)))
    }

    /// Classify a click target.
    pub fn interaction<E: MarkupElement>(&self, target: &E) -> Option<Interaction> {
        let (role, element) = self.resolve(target)?;
        match role {
            Role::Trigger => {
                let content_ref = element.attribute(&self.template_attr)?;
                Some(Interaction::Activate {
                    content_ref,
                    flags: self.flags_of(&element),
                })
            }
            Role::CloseControl => Some(Interaction::Close),
        }
    }

    fn flags_of<E: MarkupElement>(&self, element: &E) -> TriggerFlags {
        TriggerFlags {
            native_disabled: element.has_attribute("disabled"),
            aria_disabled: element.attribute("aria-disabled").as_deref() == Some("true"),
            locked_class: element.has_class(&self.locked_class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal element tree: each node knows the selectors it matches and
    /// its parent.
    #[derive(Debug, Clone, Default)]
    struct Node {
        matches: Vec<&'static str>,
        attrs: Vec<(&'static str, &'static str)>,
        classes: Vec<&'static str>,
        parent: Option<Box<Node>>,
    }

    impl MarkupElement for Node {
        fn closest(&self, selector: &str) -> Option<Self> {
            if self.matches.iter().any(|m| *m == selector) {
                return Some(self.clone());
            }
            self.parent.as_ref().and_then(|p| p.closest(selector))
        }

        fn attribute(&self, name: &str) -> Option<String> {
            self.attrs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }

        fn has_class(&self, class: &str) -> bool {
            self.classes.iter().any(|c| *c == class)
        }
    }

    fn table() -> DispatchTable {
        DispatchTable::from_config(&LettersConfig::default())
    }

    fn envelope(attrs: Vec<(&'static str, &'static str)>) -> Node {
        Node {
            matches: vec![".envelope[data-letter-template]"],
            attrs,
            ..Node::default()
        }
    }

    #[test]
    fn click_inside_trigger_resolves_to_trigger() {
        let label = Node {
            parent: Some(Box::new(envelope(vec![("data-letter-template", "letter-1")]))),
            ..Node::default()
        };

        assert_eq!(
            table().interaction(&label),
            Some(Interaction::Activate {
                content_ref: "letter-1".into(),
                flags: TriggerFlags::default(),
            })
        );
    }

    #[test]
    fn close_marker_resolves_to_close() {
        let button = Node {
            matches: vec!["[data-close='true']"],
            ..Node::default()
        };
        assert_eq!(table().interaction(&button), Some(Interaction::Close));
    }

    #[test]
    fn unrelated_click_is_ignored() {
        assert_eq!(table().interaction(&Node::default()), None);
    }

    #[test]
    fn each_disabled_path_marks_inert() {
        let by_attr = envelope(vec![("data-letter-template", "a"), ("disabled", "true")]);
        let by_aria = envelope(vec![("data-letter-template", "a"), ("aria-disabled", "true")]);
        let mut by_class = envelope(vec![("data-letter-template", "a")]);
        by_class.classes.push("envelope--locked");
        let enabled = envelope(vec![("data-letter-template", "a"), ("aria-disabled", "false")]);

        for (node, inert) in [(by_attr, true), (by_aria, true), (by_class, true), (enabled, false)] {
            match table().interaction(&node) {
                Some(Interaction::Activate { flags, .. }) => assert_eq!(flags.is_inert(), inert),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn trigger_wins_over_close_control() {
        let mut both = envelope(vec![("data-letter-template", "a")]);
        both.matches.push("[data-close='true']");
        assert!(matches!(
            table().interaction(&both),
            Some(Interaction::Activate { .. })
        ));
    }
}
