use std::{fmt, rc::Rc};

/// A registry of listeners that all get notified together. Listeners are
/// shared handles, and identity is by handle: adding the same `Rc` twice only
/// registers it once, while two separately allocated listeners are always
/// distinct even if they're equal.
///
/// `L` is typically a trait object, e.g.
/// `ObservableSubject<dyn HexagonalMapListener<T>>`.
pub struct ObservableSubject<L: ?Sized> {
    listeners: Vec<Rc<L>>,
}

impl<L: ?Sized> ObservableSubject<L> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register a listener. Returns `false` (and does nothing) if this exact
    /// listener was already registered.
    pub fn add_listener(&mut self, listener: Rc<L>) -> bool {
        if self.contains(&listener) {
            false
        } else {
            self.listeners.push(listener);
            true
        }
    }

    /// Unregister a listener. Returns `false` if it wasn't registered.
    pub fn remove_listener(&mut self, listener: &Rc<L>) -> bool {
        match self.listeners.iter().position(|l| same_listener(l, listener)) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, listener: &Rc<L>) -> bool {
        self.listeners.iter().any(|l| same_listener(l, listener))
    }

    /// Call the given function once for each listener, in registration order
    pub fn notify(&self, mut f: impl FnMut(&L)) {
        for listener in &self.listeners {
            f(listener);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Compare by address only. Trait object vtable pointers aren't guaranteed to
/// be unique, so strip the metadata before comparing.
fn same_listener<L: ?Sized>(a: &Rc<L>, b: &Rc<L>) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

impl<L: ?Sized> Default for ObservableSubject<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: ?Sized> fmt::Debug for ObservableSubject<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableSubject")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    fn listener(name: &'static str, log: &Log) -> Rc<dyn Fn(&str)> {
        let log = Rc::clone(log);
        Rc::new(move |event: &str| {
            log.borrow_mut().push(format!("{}: {}", name, event))
        })
    }

    #[test]
    fn test_notify_in_order() {
        let log = Log::default();
        let mut subject: ObservableSubject<dyn Fn(&str)> =
            ObservableSubject::new();
        assert!(subject.is_empty());
        subject.add_listener(listener("a", &log));
        subject.add_listener(listener("b", &log));
        assert_eq!(subject.len(), 2);

        subject.notify(|l| l("hello"));
        assert_eq!(*log.borrow(), vec!["a: hello", "b: hello"]);
    }

    #[test]
    fn test_add_twice() {
        let log = Log::default();
        let mut subject: ObservableSubject<dyn Fn(&str)> =
            ObservableSubject::default();
        let a = listener("a", &log);
        assert!(subject.add_listener(Rc::clone(&a)));
        assert!(!subject.add_listener(Rc::clone(&a)));
        assert_eq!(subject.len(), 1);

        subject.notify(|l| l("once"));
        assert_eq!(*log.borrow(), vec!["a: once"]);
    }

    #[test]
    fn test_remove() {
        let log = Log::default();
        let mut subject: ObservableSubject<dyn Fn(&str)> =
            ObservableSubject::new();
        let a = listener("a", &log);
        let b = listener("b", &log);
        subject.add_listener(Rc::clone(&a));
        subject.add_listener(Rc::clone(&b));

        assert!(subject.remove_listener(&a));
        // Removing something that isn't there is a no-op
        assert!(!subject.remove_listener(&a));
        assert!(!subject.contains(&a));
        assert!(subject.contains(&b));

        subject.notify(|l| l("after"));
        assert_eq!(*log.borrow(), vec!["b: after"]);
    }
}
