//! Session history bookkeeping for surfaces whose engine does not expose
//! back/forward state directly.

/// Linear session history with a cursor, like a browser's back/forward list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationHistory {
    entries: Vec<String>,
    index: Option<usize>,
    /// Entry a requested back/forward traversal is heading to.
    pending: Option<usize>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.index.map(|i| self.entries[i].as_str())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_go_forward(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    /// Marks a back traversal as in flight and returns the target address.
    pub fn begin_back(&mut self) -> Option<&str> {
        let target = self.index.filter(|i| *i > 0)? - 1;
        self.pending = Some(target);
        Some(&self.entries[target])
    }

    /// Marks a forward traversal as in flight and returns the target address.
    pub fn begin_forward(&mut self) -> Option<&str> {
        let target = self.index.filter(|i| i + 1 < self.entries.len())? + 1;
        self.pending = Some(target);
        Some(&self.entries[target])
    }

    /// Forgets an in-flight traversal, e.g. when a new load replaces it or
    /// the traversal request never reached the engine.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records that the surface now shows `url`.
    ///
    /// Completes a pending traversal if there is one (the entry takes the
    /// committed address, which may differ after a redirect). Otherwise a
    /// repeat of the current address is ignored and anything else becomes a
    /// new entry, discarding the forward list.
    pub fn commit(&mut self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Some(target) = self.pending.take() {
            self.entries[target] = url.to_string();
            self.index = Some(target);
            return;
        }
        if self.current() == Some(url) {
            return;
        }
        let keep = self.index.map_or(0, |i| i + 1);
        self.entries.truncate(keep);
        self.entries.push(url.to_string());
        self.index = Some(self.entries.len() - 1);
    }
}
