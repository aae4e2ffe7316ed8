// proof/src/scope.rs — Box (subproof) tree
//
// Boxes live in an append-only arena and point at their parent by index.
// The active chain is the innermost open box followed by its ancestors; a box
// is never removed, so closed boxes stay reachable both as ancestors recorded
// on their lines and as citable ranges.

/// Index of a box in the [`ScopeTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

/// One subproof region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// Index of the first line belonging to the box.
    pub start: usize,
    /// Line count when the box was closed; `None` while open.
    closed_at: Option<usize>,
    pub parent: Option<ScopeId>,
}

impl Scope {
    pub fn is_open(&self) -> bool {
        self.closed_at.is_none()
    }

    /// Inclusive index of the last line, once closed. A box closed with no
    /// lines in it has no last line.
    pub fn end(&self) -> Option<usize> {
        self.closed_at
            .filter(|&closed| closed > self.start)
            .map(|closed| closed - 1)
    }

    /// True if the box is closed and spans exactly `[start, end]`.
    pub fn covers(&self, start: usize, end: usize) -> bool {
        self.start == start && self.end() == Some(end)
    }
}

/// Arena of boxes plus the innermost open one.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
    active: Option<ScopeId>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn active(&self) -> Option<ScopeId> {
        self.active
    }

    pub fn active_scope(&self) -> Option<&Scope> {
        self.active.map(|id| self.get(id))
    }

    /// Number of boxes ever opened.
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Open a box starting at line `start` inside the active box.
    pub fn push(&mut self, start: usize) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            start,
            closed_at: None,
            parent: self.active,
        });
        self.active = Some(id);
        id
    }

    /// Close the active box at `line_count`. Returns the closed box, or
    /// `None` if no box is open.
    pub fn pop(&mut self, line_count: usize) -> Option<ScopeId> {
        let id = self.active?;
        let scope = &mut self.scopes[id.0];
        scope.closed_at = Some(line_count);
        self.active = scope.parent;
        Some(id)
    }

    /// `from` and its ancestors, innermost first.
    pub fn ancestors(&self, from: Option<ScopeId>) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: from,
        }
    }

    /// Number of boxes enclosing `from` (including itself).
    pub fn depth_of(&self, from: Option<ScopeId>) -> usize {
        self.ancestors(from).count()
    }

    /// Length of the active chain.
    pub fn depth(&self) -> usize {
        self.depth_of(self.active)
    }

    /// True if `scope` is top level or lies on the active chain, i.e. things
    /// recorded in it are still in scope.
    pub fn is_visible(&self, scope: Option<ScopeId>) -> bool {
        match scope {
            None => true,
            Some(target) => self.ancestors(self.active).any(|id| id == target),
        }
    }

    /// Find the closed box spanning `[start, end]` among `from` and its
    /// ancestors.
    pub fn find_box(&self, from: Option<ScopeId>, start: usize, end: usize) -> Option<ScopeId> {
        self.ancestors(from).find(|&id| self.get(id).covers(start, end))
    }
}

/// Iterator over a box and its ancestors.
pub struct Ancestors<'a> {
    tree: &'a ScopeTree,
    next: Option<ScopeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let current = self.next?;
        self.next = self.tree.get(current).parent;
        Some(current)
    }
}
