use std::cell::RefCell;

use convo_types::SessionHandle;

/// Failure to persist or clear the session handle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("session storage unavailable: {0}")]
pub struct StoreError(pub String);

/// Client-local persistence for the active conversation id.
///
/// At most one handle is active per store. The store never invents a
/// handle; it only remembers what the service issued.
pub trait SessionStore {
    /// Current handle, if any. Does not talk to the service.
    fn load(&self) -> Option<SessionHandle>;

    /// Remember `handle`, replacing whatever was stored before.
    fn save(&self, handle: &SessionHandle) -> Result<(), StoreError>;

    /// Forget the stored handle.
    fn clear(&self) -> Result<(), StoreError>;
}

/// In-memory store, scoped to the lifetime of the value
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    handle: RefCell<Option<SessionHandle>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with an existing handle
    pub fn with_handle(handle: SessionHandle) -> Self {
        Self {
            handle: RefCell::new(Some(handle)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<SessionHandle> {
        self.handle.borrow().clone()
    }

    fn save(&self, handle: &SessionHandle) -> Result<(), StoreError> {
        *self.handle.borrow_mut() = Some(handle.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.handle.borrow_mut().take();
        Ok(())
    }
}

impl<T: SessionStore + ?Sized> SessionStore for std::rc::Rc<T> {
    fn load(&self) -> Option<SessionHandle> {
        (**self).load()
    }

    fn save(&self, handle: &SessionHandle) -> Result<(), StoreError> {
        (**self).save(handle)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}
