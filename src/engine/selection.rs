use std::collections::BTreeSet;

/// How a label reaches its target. A drag always ends with the label released;
/// a tap keeps the label selected after a wrong target so it can be retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionStyle
{
    Drag,
    Tap,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceOutcome
{
    Selected,
    Cleared,
    Ignored,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetOutcome
{
    NoSource,
    AlreadyMatched,
    Matched
    {
        id: String,
        complete: bool,
    },
    Mismatch,
}

#[derive(Debug)]
pub struct SelectionMatchEngine
{
    style: InteractionStyle,
    ids: Vec<String>,
    selected: Option<String>,
    matched: BTreeSet<String>,
}

impl SelectionMatchEngine
{
    pub fn new<I, S>(ids: I, style: InteractionStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            style,
            ids: ids.into_iter().map(Into::into).collect(),
            selected: None,
            matched: BTreeSet::new(),
        }
    }

    pub fn select_source(&mut self, id: &str) -> SourceOutcome
    {
        if self.matched.contains(id) || !self.ids.iter().any(|known| known == id) {
            return SourceOutcome::Ignored;
        }
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
            SourceOutcome::Cleared
        } else {
            self.selected = Some(id.to_string());
            SourceOutcome::Selected
        }
    }

    pub fn attempt_target(&mut self, target_id: &str) -> TargetOutcome
    {
        let Some(source) = self.selected.clone() else {
            return TargetOutcome::NoSource;
        };
        if self.style == InteractionStyle::Drag {
            self.selected = None;
        }
        if self.matched.contains(target_id) {
            return TargetOutcome::AlreadyMatched;
        }
        if source != target_id {
            return TargetOutcome::Mismatch;
        }

        self.matched.insert(source.clone());
        self.selected = None;
        let complete = self.is_complete();
        log::debug!("matched {source} ({}/{})", self.matched.len(), self.ids.len());
        TargetOutcome::Matched {
            id: source,
            complete,
        }
    }

    pub fn reset(&mut self)
    {
        self.selected = None;
        self.matched.clear();
    }

    pub fn style(&self) -> InteractionStyle
    {
        self.style
    }

    pub fn selected(&self) -> Option<&str>
    {
        self.selected.as_deref()
    }

    pub fn is_matched(&self, id: &str) -> bool
    {
        self.matched.contains(id)
    }

    pub fn matched_count(&self) -> usize
    {
        self.matched.len()
    }

    pub fn total(&self) -> usize
    {
        self.ids.len()
    }

    pub fn is_complete(&self) -> bool
    {
        !self.ids.is_empty() && self.matched.len() == self.ids.len()
    }
}
