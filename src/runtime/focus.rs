use crate::view::ElementHandle;

use super::EventFlow;

/// Focus operations the guard needs from the view.
pub trait FocusHost {
    fn active_element(&self) -> Option<ElementHandle>;
    /// Move focus to `element`. Returns `false` when the element can no longer
    /// take focus (e.g. it was removed from the page).
    fn focus(&mut self, element: ElementHandle) -> bool;
    /// Focusable descendants of `container`, in tab order.
    fn focusables(&self, container: ElementHandle) -> Vec<ElementHandle>;
}

/// Cyclic tab order over one container, fixed at install time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrap {
    container: ElementHandle,
    order: Vec<ElementHandle>,
}

impl FocusTrap {
    pub fn container(&self) -> ElementHandle {
        self.container
    }

    pub fn order(&self) -> &[ElementHandle] {
        &self.order
    }

    fn first(&self) -> Option<ElementHandle> {
        self.order.first().copied()
    }

    fn last(&self) -> Option<ElementHandle> {
        self.order.last().copied()
    }
}

/// Result of a Tab press routed through the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Focus wrapped to the given element; default traversal is suppressed.
    Wrapped(ElementHandle),
    PassThrough,
}

impl TabOutcome {
    pub fn flow(self) -> EventFlow {
        match self {
            TabOutcome::Wrapped(_) => EventFlow::Consumed,
            TabOutcome::PassThrough => EventFlow::Continue,
        }
    }
}

/// Owns the single pending restore target and the single active trap.
#[derive(Debug, Default)]
pub struct FocusGuard {
    pending: Option<ElementHandle>,
    trap: Option<FocusTrap>,
}

impl FocusGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the currently focused element. A later capture replaces it.
    pub fn capture(&mut self, host: &impl FocusHost) {
        self.pending = host.active_element();
    }

    /// Focus the captured element and forget it. Returns whether focus landed.
    pub fn restore(&mut self, host: &mut impl FocusHost) -> bool {
        match self.pending.take() {
            Some(target) => host.focus(target),
            None => false,
        }
    }

    pub fn pending(&self) -> Option<ElementHandle> {
        self.pending
    }

    /// Install a trap over `container`, replacing any existing one.
    pub fn trap(&mut self, container: ElementHandle, host: &impl FocusHost) -> &FocusTrap {
        let order = host.focusables(container);
        self.trap.insert(FocusTrap { container, order })
    }

    pub fn release_trap(&mut self) -> Option<FocusTrap> {
        self.trap.take()
    }

    pub fn active_trap(&self) -> Option<&FocusTrap> {
        self.trap.as_ref()
    }

    pub fn handle_tab(&self, backwards: bool, host: &mut impl FocusHost) -> TabOutcome {
        let Some(trap) = self.trap.as_ref() else {
            return TabOutcome::PassThrough;
        };
        let (Some(first), Some(last)) = (trap.first(), trap.last()) else {
            return TabOutcome::PassThrough;
        };

        let active = host.active_element();
        let target = if backwards && active == Some(first) {
            last
        } else if !backwards && active == Some(last) {
            first
        } else {
            return TabOutcome::PassThrough;
        };

        host.focus(target);
        TabOutcome::Wrapped(target)
    }
}
