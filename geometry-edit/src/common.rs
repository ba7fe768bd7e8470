use std::sync::Arc;

use parking_lot::RwLock;

/// Shared, lock-protected value.
pub(crate) type Atomic<T> = Arc<RwLock<T>>;

#[inline]
pub(crate) fn atomic<T>(t: T) -> Atomic<T> {
    Arc::new(RwLock::new(t))
}

pub(crate) trait ReadExecutor<T: ?Sized> {
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R;
}

impl<T> ReadExecutor<T> for Atomic<T> {
    #[inline]
    fn read_with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.read();
        f(&*guard)
    }
}

pub(crate) trait WriteExecutor<T: ?Sized> {
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T> WriteExecutor<T> for Atomic<T> {
    #[inline]
    fn write_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.write();
        f(&mut *guard)
    }
}
