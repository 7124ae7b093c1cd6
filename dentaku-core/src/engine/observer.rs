//! Change notification for the display text.
//!
//! A presentation layer registers listeners with
//! [`Calculator::subscribe`](crate::Calculator::subscribe) instead of polling.
//! Listeners run once per key, after the display has been recomputed, and
//! only when the text actually changed.

/// Receives the new display text whenever it changes.
pub trait DisplayListener: Send {
    fn display_changed(
        &mut self,
        text: &str,
    );
}

impl<F> DisplayListener for F
where
    F: FnMut(&str) + Send,
{
    fn display_changed(
        &mut self,
        text: &str,
    ) {
        self(text)
    }
}

/// Ordered set of registered listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    listeners: Vec<Box<dyn DisplayListener>>,
}

impl Listeners {
    pub(crate) fn push(
        &mut self,
        listener: Box<dyn DisplayListener>,
    ) {
        self.listeners.push(listener);
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn notify(
        &mut self,
        text: &str,
    ) {
        for listener in &mut self.listeners {
            listener.display_changed(text);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
