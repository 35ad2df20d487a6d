use std::borrow::{Borrow, Cow};
use std::fmt::{Debug, Display, Formatter, Result};

/// The key a node's outcome is looked up by in its successor table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(Cow<'static, str>);

impl Label {
    /// Used when a node returns no explicit label.
    pub const DEFAULT: Label = Label(Cow::Borrowed("default"));

    pub fn new(label: impl Into<Cow<'static, str>>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        *self == Self::DEFAULT
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Label {
    fn from(label: &'static str) -> Self {
        Self(Cow::Borrowed(label))
    }
}

impl From<String> for Label {
    fn from(label: String) -> Self {
        Self(Cow::Owned(label))
    }
}

/// The closed set of outcomes a node's finalize phase can return.
///
/// Usually derived on a unit enum with `#[derive(Action)]`; one variant must be
/// marked `#[action(terminal)]`.
pub trait Action: Debug + Send + Sync + Sized + 'static {
    /// The transition key for this outcome.
    fn label(&self) -> Label;

    /// The outcome used when the finalize phase fails.
    fn terminal() -> Self;
}

/// Nodes with a single outcome always take the default edge.
impl Action for () {
    fn label(&self) -> Label {
        Label::DEFAULT
    }

    fn terminal() -> Self {}
}

impl Action for Label {
    fn label(&self) -> Label {
        self.clone()
    }

    fn terminal() -> Self {
        Label::DEFAULT
    }
}

impl<A: Action> Action for Option<A> {
    fn label(&self) -> Label {
        match self {
            Some(action) => action.label(),
            None => Label::DEFAULT,
        }
    }

    fn terminal() -> Self {
        Some(A::terminal())
    }
}
